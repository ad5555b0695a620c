/// Thumbnail decoding for staged images
/// Decodes the selected file and shrinks it to fit the preview tile
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

use super::PreviewError;

/// Decoded RGBA thumbnail ready to hand to the renderer
#[derive(Clone, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Decode a thumbnail that fits within `size` x `size`
pub async fn render_thumbnail(path: PathBuf, size: u32) -> Result<Thumbnail, PreviewError> {
    // Spawn blocking task for CPU-bound work
    tokio::task::spawn_blocking(move || render_thumbnail_blocking(&path, size))
        .await
        .map_err(|e| PreviewError::Task(e.to_string()))?
}

/// Blocking version of thumbnail decoding
fn render_thumbnail_blocking(path: &Path, size: u32) -> Result<Thumbnail, PreviewError> {
    if !path.exists() {
        return Err(PreviewError::Missing(path.to_path_buf()));
    }

    let img = image::open(path).map_err(|e| PreviewError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    // Only shrink; small images keep their size
    let img = if img.width() > size || img.height() > size {
        img.resize(size, size, FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    tracing::debug!(path = %path.display(), width, height, "decoded preview thumbnail");

    Ok(Thumbnail {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("product-catalog-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_render_thumbnail_fits_size() {
        let path = temp_path("wide.png");
        image::RgbaImage::new(400, 100).save(&path).unwrap();

        let thumbnail = render_thumbnail(path.clone(), 128).await.unwrap();
        assert_eq!(thumbnail.width, 128);
        assert_eq!(thumbnail.height, 32);
        assert_eq!(thumbnail.pixels.len(), 128 * 32 * 4);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_small_image_is_not_upscaled() {
        let path = temp_path("small.png");
        image::RgbaImage::new(20, 10).save(&path).unwrap();

        let thumbnail = render_thumbnail(path.clone(), 128).await.unwrap();
        assert_eq!((thumbnail.width, thumbnail.height), (20, 10));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let result = render_thumbnail(PathBuf::from("/nonexistent/jar.png"), 128).await;
        assert!(matches!(result, Err(PreviewError::Missing(_))));
    }

    #[tokio::test]
    async fn test_non_image_is_a_decode_error() {
        let path = temp_path("notes.png");
        std::fs::write(&path, b"not an image").unwrap();

        let result = render_thumbnail(path.clone(), 128).await;
        assert!(matches!(result, Err(PreviewError::Decode { .. })));

        std::fs::remove_file(path).ok();
    }
}
