use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageError, RgbImage};

use super::{ImageReader, PixelGrid};
use crate::error::Error;

/// Decodes any image format supported by the `image` crate into a BGR grid,
/// optionally scaled to `target_width` with the aspect ratio preserved.
pub struct FileImageReader {
    path: PathBuf,
    target_width: u32,
}

impl FileImageReader {
    pub fn new(path: &Path, target_width: u32) -> Self {
        Self {
            path: path.to_owned(),
            target_width,
        }
    }

    fn decode(&self) -> crate::Result<RgbImage> {
        let path = self.path.display().to_string();
        match image::open(&self.path) {
            Ok(decoded) => Ok(decoded.to_rgb8()),
            Err(ImageError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                Err(Error::ImageNotFound(path))
            }
            Err(e) => Err(Error::ImageDecodeError(path, e)),
        }
    }

    fn resize(&self, image: RgbImage) -> RgbImage {
        if self.target_width == 0 || image.width() == 0 {
            return image;
        }
        let height = resized_height(self.target_width, image.width(), image.height());
        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            image.width(),
            image.height(),
            self.target_width,
            height
        );
        imageops::resize(&image, self.target_width, height, FilterType::Triangle)
    }
}

impl ImageReader<u8> for FileImageReader {
    fn read_image(&mut self) -> crate::Result<PixelGrid<u8>> {
        let image = self.resize(self.decode()?);
        let width = image.width() as usize;
        let height = image.height() as usize;
        let samples = image
            .pixels()
            .flat_map(|pixel| {
                let [red, green, blue] = pixel.0;
                [blue, green, red]
            })
            .collect();
        Ok(PixelGrid::new(width, height, 3, samples))
    }
}

/// Height matching `target_width` under the original aspect ratio, at least one row.
pub fn resized_height(target_width: u32, width: u32, height: u32) -> u32 {
    let scaled = target_width as f64 * height as f64 / width as f64;
    (scaled.round() as u32).max(1)
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::{resized_height, FileImageReader};
    use crate::error::Error;
    use crate::grid::ImageReader;

    #[test]
    fn resized_height_keeps_aspect_ratio() {
        assert_eq!(resized_height(320, 640, 480), 240);
        assert_eq!(resized_height(100, 300, 200), 67);
        assert_eq!(resized_height(10, 1000, 1), 1);
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let mut reader = FileImageReader::new(Path::new("does/not/exist.png"), 0);
        let result = reader.read_image();
        assert!(
            matches!(result, Err(Error::ImageNotFound(_))),
            "Missing image not reported as not found"
        );
    }

    #[test]
    fn undecodable_file_is_reported_as_decode_error() {
        let mut reader = FileImageReader::new(Path::new("Cargo.toml"), 0);
        let result = reader.read_image();
        assert!(
            matches!(result, Err(Error::ImageDecodeError(_, _))),
            "Undecodable file not reported as decode error"
        );
    }
}
