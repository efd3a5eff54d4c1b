use crate::grid::PixelGrid;

/// One feature vector per pixel, stored contiguously in row-major pixel order.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureSet {
    dimension: usize,
    values: Vec<f32>,
}

impl FeatureSet {
    pub fn new(dimension: usize, values: Vec<f32>) -> Self {
        debug_assert!(dimension > 0, "Feature vectors need at least one component");
        debug_assert_eq!(values.len() % dimension, 0, "Incomplete feature vector");
        Self { dimension, values }
    }

    /// Flattens an `(H, W, C)` grid into `H * W` vectors of length `C`.
    pub fn from_grid<T>(grid: &PixelGrid<T>) -> Self
    where
        T: Copy + Into<f32>,
    {
        let values = grid.samples().iter().map(|&sample| sample.into()).collect();
        Self::new(grid.channels(), values)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.values.len() / self.dimension
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::ChunksExact<'_, f32> {
        self.values.chunks_exact(self.dimension)
    }
}

#[cfg(test)]
mod test {
    use super::FeatureSet;
    use crate::grid::PixelGrid;

    #[test]
    fn flatten_in_row_major_order() {
        #[rustfmt::skip]
        let grid = PixelGrid::new(3, 2, 2, vec![
            0_u8, 1,   2, 3,   4, 5,
            6, 7,      8, 9,  10, 11,
        ]);
        let features = FeatureSet::from_grid(&grid);
        assert_eq!(features.len(), 6);
        assert_eq!(features.dimension(), 2);
        let vectors: Vec<&[f32]> = features.iter().collect();
        assert_eq!(vectors[0], &[0.0, 1.0]);
        assert_eq!(vectors[2], &[4.0, 5.0]);
        assert_eq!(vectors[3], &[6.0, 7.0]);
        for (index, vector) in features.iter().enumerate() {
            let column_index = index % grid.width();
            let row_index = index / grid.width();
            let pixel: Vec<f32> = grid
                .pixel(column_index, row_index)
                .iter()
                .map(|&sample| sample as f32)
                .collect();
            assert_eq!(vector, pixel.as_slice(), "Vector {} out of order", index);
        }
    }

    #[test]
    fn single_channel_grid_gives_one_dimensional_features() {
        let grid = PixelGrid::new(2, 2, 1, vec![9_u8, 8, 7, 6]);
        let features = FeatureSet::from_grid(&grid);
        assert_eq!(features.dimension(), 1);
        assert_eq!(features.iter().last(), Some(&[6.0_f32][..]));
    }

    #[test]
    fn empty_grid_gives_empty_features() {
        let grid: PixelGrid<u8> = PixelGrid::new(0, 0, 3, Vec::new());
        let features = FeatureSet::from_grid(&grid);
        assert!(features.is_empty());
        assert_eq!(features.len(), 0);
    }
}
