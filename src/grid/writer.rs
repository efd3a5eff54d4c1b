use std::path::{Path, PathBuf};

use image::ColorType;

use super::{ImageWriter, PixelGrid};
use crate::error::Error;

/// Writes gray or BGR grids, picking the file format from the
/// extension of `path`.
pub struct FileImageWriter {
    path: PathBuf,
}

impl FileImageWriter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_owned(),
        }
    }

    fn write_failure(&self, error: image::ImageError) -> Error {
        Error::OutputWriteFailure(self.path.display().to_string(), error)
    }
}

fn bgr_to_rgb(samples: &[u8]) -> Vec<u8> {
    samples
        .chunks_exact(3)
        .flat_map(|pixel| [pixel[2], pixel[1], pixel[0]])
        .collect()
}

impl ImageWriter<u8> for FileImageWriter {
    fn write_image(&mut self, image: &PixelGrid<u8>) -> crate::Result<()> {
        let width = image.width() as u32;
        let height = image.height() as u32;
        let result = if image.channels() == 1 {
            image::save_buffer(&self.path, image.samples(), width, height, ColorType::L8)
        } else {
            debug_assert_eq!(image.channels(), 3, "Only gray or BGR grids are written");
            image::save_buffer(
                &self.path,
                &bgr_to_rgb(image.samples()),
                width,
                height,
                ColorType::Rgb8,
            )
        };
        result.map_err(|e| self.write_failure(e))?;
        log::info!("Wrote {}x{} image to '{}'", width, height, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::{bgr_to_rgb, FileImageWriter};
    use crate::error::Error;
    use crate::grid::{ImageWriter, PixelGrid};

    #[test]
    fn swap_channel_order_for_encoding() {
        assert_eq!(bgr_to_rgb(&[1, 2, 3, 4, 5, 6]), vec![3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn unknown_extension_fails_to_write() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/labels.unknown");
        let mut writer = FileImageWriter::new(&path);
        let grid = PixelGrid::filled(2, 2, 1, 0_u8);
        let result = writer.write_image(&grid);
        assert!(matches!(result, Err(Error::OutputWriteFailure(_, _))));
        assert!(!path.exists(), "No file must be written on failure");
    }

    #[test]
    fn missing_directory_fails_to_write() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("no/such/directory/labels.png");
        let mut writer = FileImageWriter::new(&path);
        let grid = PixelGrid::filled(2, 2, 3, 7_u8);
        let result = writer.write_image(&grid);
        assert!(matches!(result, Err(Error::OutputWriteFailure(_, _))));
    }
}
