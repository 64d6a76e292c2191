//! Asynchronous image and model loading.
//!
//! Loading is the only async boundary in the crate; decode work runs on
//! the blocking pool. There is no cancellation: a superseded load simply
//! has its result discarded by the caller.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{AssetError, Result};
use crate::skeleton::{self, Skeleton};

/// Read and decode an image file into RGBA8.
pub async fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path: PathBuf = path.as_ref().to_path_buf();

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AssetError::NotFound(format!("{}: {}", path.display(), e)))?;

    let image = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|e| AssetError::ImageDecode(format!("{}: {}", path.display(), e)))?
        .map_err(|e| AssetError::ImageDecode(format!("{}: {}", path.display(), e)))?;

    let image = image.to_rgba8();
    tracing::debug!(
        "Loaded {}x{} image from {}",
        image.width(),
        image.height(),
        path.display()
    );

    Ok(image)
}

/// Import the skinned skeleton out of a GLB/glTF file.
pub async fn load_skeleton<P: AsRef<Path>>(path: P) -> Result<Skeleton> {
    let path: PathBuf = path.as_ref().to_path_buf();

    tokio::task::spawn_blocking(move || skeleton::gltf::load(&path))
        .await
        .map_err(|e| AssetError::ModelLoad(format!("model load task failed: {}", e)))?
}
