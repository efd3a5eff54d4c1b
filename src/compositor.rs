use crate::canonical::CanonicalLabels;
use crate::grid::PixelGrid;

pub const SEPARATOR_VALUE: u8 = 193;
pub const DEFAULT_SEPARATOR_FRACTION: f64 = 0.0625;

/// Side by side comparison: original, gray strip, labels shown as BGR.
pub struct Compositor {
    separator_fraction: f64,
}

impl Compositor {
    pub fn new(separator_fraction: f64) -> Self {
        Self { separator_fraction }
    }

    pub fn separator_width(&self, image_width: usize) -> usize {
        (self.separator_fraction * image_width as f64) as usize
    }

    pub fn compose(&self, original: &PixelGrid<u8>, labels: &CanonicalLabels) -> PixelGrid<u8> {
        let channels = original.channels();
        let separator = PixelGrid::filled(
            self.separator_width(original.width()),
            original.height(),
            channels,
            SEPARATOR_VALUE,
        );
        let labels = labels.grid().broadcast(channels);
        PixelGrid::concat_horizontally(&[original, &separator, &labels])
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR_FRACTION)
    }
}
