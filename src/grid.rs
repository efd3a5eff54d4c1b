use crate::channels::ChannelSelection;
use crate::color::{BGRColorFormat, ColorSpace};

pub mod reader;
pub mod writer;

pub trait ImageReader<T> {
    fn read_image(&mut self) -> crate::Result<PixelGrid<T>>;
}

pub trait ImageWriter<T> {
    fn write_image(&mut self, image: &PixelGrid<T>) -> crate::Result<()>;
}

/// Interleaved, row-major image of `height * width * channels` samples.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid<T> {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<T>,
}

impl<T> PixelGrid<T>
where
    T: Clone + Copy,
{
    pub fn new(width: usize, height: usize, channels: usize, samples: Vec<T>) -> Self {
        debug_assert!(channels > 0, "Pixel grid needs at least one channel");
        debug_assert_eq!(
            samples.len(),
            width * height * channels,
            "Number of samples does not match the grid dimensions"
        );
        Self {
            width,
            height,
            channels,
            samples,
        }
    }

    pub fn filled(width: usize, height: usize, channels: usize, value: T) -> Self {
        Self::new(width, height, channels, vec![value; width * height * channels])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn pixel(&self, column_index: usize, row_index: usize) -> &[T] {
        let start = (row_index * self.width + column_index) * self.channels;
        &self.samples[start..start + self.channels]
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, T> {
        self.samples.chunks_exact(self.channels)
    }

    pub fn row(&self, row_index: usize) -> &[T] {
        let row_length = self.width * self.channels;
        let start = row_index * row_length;
        &self.samples[start..start + row_length]
    }

    /// Projects the grid onto the selected channels. A single selected channel
    /// keeps an explicit channel dimension of one.
    pub fn select_channels(&self, selection: &ChannelSelection) -> crate::Result<PixelGrid<T>> {
        let indices = selection.indices(self.channels)?;
        let samples = self
            .pixels()
            .flat_map(|pixel| indices.iter().map(move |&index| pixel[index]))
            .collect();
        Ok(PixelGrid::new(self.width, self.height, indices.len(), samples))
    }

    /// Places grids of equal height and channel count next to each other.
    pub fn concat_horizontally(grids: &[&PixelGrid<T>]) -> PixelGrid<T> {
        let height = grids.first().map_or(0, |grid| grid.height);
        let channels = grids.first().map_or(1, |grid| grid.channels);
        debug_assert!(
            grids
                .iter()
                .all(|grid| grid.height == height && grid.channels == channels),
            "Concatenated grids must share height and channel count"
        );
        let width = grids.iter().map(|grid| grid.width).sum();
        let mut samples = Vec::with_capacity(width * height * channels);
        for row_index in 0..height {
            for grid in grids {
                samples.extend_from_slice(grid.row(row_index));
            }
        }
        PixelGrid::new(width, height, channels, samples)
    }
}

impl PixelGrid<u8> {
    /// Converts a three channel BGR grid into `color_space`.
    pub fn convert_color_space(&self, color_space: ColorSpace) -> PixelGrid<u8> {
        if color_space == ColorSpace::Bgr {
            return self.clone();
        }
        let samples = self
            .pixels()
            .flat_map(|pixel| color_space.convert_pixel(&BGRColorFormat::from_slice(pixel)))
            .collect();
        PixelGrid::new(self.width, self.height, self.channels, samples)
    }

    /// Repeats every sample of a single channel grid `channels` times.
    pub fn broadcast(&self, channels: usize) -> PixelGrid<u8> {
        debug_assert_eq!(self.channels, 1, "Only single channel grids can be broadcast");
        let samples = self
            .samples
            .iter()
            .flat_map(|&sample| std::iter::repeat(sample).take(channels))
            .collect();
        PixelGrid::new(self.width, self.height, channels, samples)
    }
}

#[cfg(test)]
mod test {
    use super::PixelGrid;
    use crate::channels::ChannelSelection;
    use crate::color::ColorSpace;
    use crate::error::Error;

    #[rustfmt::skip]
    const TEST_GRID: &[u8] = &[
         1,  2,  3,    4,  5,  6,
         7,  8,  9,   10, 11, 12,
        13, 14, 15,   16, 17, 18,
    ];

    fn create_test_grid() -> PixelGrid<u8> {
        PixelGrid::new(2, 3, 3, Vec::from(TEST_GRID))
    }

    #[test]
    fn pixel_is_read_in_row_major_order() {
        let grid = create_test_grid();
        assert_eq!(grid.pixel(0, 0), &[1, 2, 3]);
        assert_eq!(grid.pixel(1, 0), &[4, 5, 6]);
        assert_eq!(grid.pixel(0, 1), &[7, 8, 9]);
        assert_eq!(grid.pixel(1, 2), &[16, 17, 18]);
    }

    #[test]
    fn select_first_and_last_channel() {
        let grid = create_test_grid();
        let selection: ChannelSelection = "02".parse().unwrap();
        let selected = grid.select_channels(&selection).unwrap();
        assert_eq!(selected.channels(), 2);
        for row_index in 0..grid.height() {
            for column_index in 0..grid.width() {
                let original = grid.pixel(column_index, row_index);
                assert_eq!(
                    selected.pixel(column_index, row_index),
                    &[original[0], original[2]],
                    "Pixel at x = {}, y = {} does not match",
                    column_index,
                    row_index
                );
            }
        }
    }

    #[test]
    fn select_single_channel_keeps_channel_dimension() {
        let grid = create_test_grid();
        let selection: ChannelSelection = "1".parse().unwrap();
        let selected = grid.select_channels(&selection).unwrap();
        assert_eq!(selected.channels(), 1);
        assert_eq!(selected.width(), 2);
        assert_eq!(selected.height(), 3);
        assert_eq!(selected.samples(), &[2, 5, 8, 11, 14, 17]);
    }

    #[test]
    fn select_all_channels_is_identity() {
        let grid = create_test_grid();
        let selected = grid.select_channels(&ChannelSelection::All).unwrap();
        assert_eq!(selected, grid);
    }

    #[test]
    fn select_out_of_range_channel_fails() {
        let grid = create_test_grid();
        let selection: ChannelSelection = "5".parse().unwrap();
        let result = grid.select_channels(&selection);
        assert!(matches!(result, Err(Error::InvalidChannelIndex(5, 3))));
    }

    #[test]
    fn bgr_conversion_returns_copy() {
        let grid = create_test_grid();
        assert_eq!(grid.convert_color_space(ColorSpace::Bgr), grid);
    }

    #[test]
    fn hsv_conversion_keeps_dimensions() {
        let grid = create_test_grid();
        let converted = grid.convert_color_space(ColorSpace::Hsv);
        assert_eq!(converted.width(), grid.width());
        assert_eq!(converted.height(), grid.height());
        assert_eq!(converted.channels(), 3);
        assert_ne!(converted, grid);
    }

    #[test]
    fn concat_interleaves_rows() {
        let left = PixelGrid::new(1, 2, 1, vec![1_u8, 2]);
        let right = PixelGrid::new(2, 2, 1, vec![3_u8, 4, 5, 6]);
        let result = PixelGrid::concat_horizontally(&[&left, &right]);
        assert_eq!(result.width(), 3);
        assert_eq!(result.samples(), &[1, 3, 4, 2, 5, 6]);
    }

    #[test]
    fn broadcast_gray_to_three_channels() {
        let gray = PixelGrid::new(2, 1, 1, vec![0_u8, 255]);
        let result = gray.broadcast(3);
        assert_eq!(result.samples(), &[0, 0, 0, 255, 255, 255]);
    }
}
