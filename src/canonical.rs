use crate::cluster::LabelGrid;
use crate::grid::PixelGrid;

/// Cluster labels mapped onto a gray ramp ordered by cluster size: the most
/// frequent cluster is black, the least frequent the brightest level.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalLabels {
    grid: PixelGrid<u8>,
    ranking: Vec<usize>,
    counts: Vec<usize>,
}

impl CanonicalLabels {
    pub fn from_label_grid(labels: &LabelGrid) -> Self {
        let counts = labels.counts();
        let ranking = rank_by_frequency(&counts);
        let step = intensity_step(labels.cluster_count());

        let mut intensities = vec![0_u8; counts.len()];
        for (rank, &label) in ranking.iter().enumerate() {
            intensities[label] = (rank * step) as u8;
        }
        let samples = labels
            .labels()
            .iter()
            .map(|&label| intensities[label])
            .collect();

        Self {
            grid: PixelGrid::new(labels.width(), labels.height(), 1, samples),
            ranking,
            counts,
        }
    }

    /// Single channel gray image of the canonical labels.
    pub fn grid(&self) -> &PixelGrid<u8> {
        &self.grid
    }

    /// Cluster ids from most to least frequent.
    pub fn ranking(&self) -> &[usize] {
        &self.ranking
    }

    /// Pixel count per original cluster id.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn intensity(&self, column_index: usize, row_index: usize) -> u8 {
        self.grid.pixel(column_index, row_index)[0]
    }
}

/// Ids sorted by descending count; the stable sort keeps equal counts in
/// ascending id order.
fn rank_by_frequency(counts: &[usize]) -> Vec<usize> {
    let mut ranking: Vec<usize> = (0..counts.len()).collect();
    ranking.sort_by(|&a, &b| counts[b].cmp(&counts[a]));
    ranking
}

/// Gray level distance between neighbouring ranks, truncated so the last rank
/// stays within 255.
pub fn intensity_step(cluster_count: usize) -> usize {
    255 / cluster_count.saturating_sub(1).max(1)
}
