use crate::error::Error;
use crate::features::FeatureSet;

pub mod kmeans;

pub use kmeans::{KMeans, KMeansOptions};

pub const MIN_CLUSTERS: usize = 2;
pub const MAX_CLUSTERS: usize = 256;

/// Hard clustering of feature vectors, one label in `[0, k)` per vector.
///
/// Label numbering carries no meaning beyond grouping; callers that need a
/// stable order canonicalize the labels afterwards.
pub trait Clustering {
    fn fit_predict(&self, features: &FeatureSet, cluster_count: ClusterCount)
        -> crate::Result<Vec<usize>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClusterCount(usize);

impl ClusterCount {
    /// Clamps requests below two to two, with a warning.
    pub fn new(requested: i64) -> crate::Result<Self> {
        let (count, clamped) = Self::clamp(requested)?;
        if clamped {
            log::warn!(
                "num-clusters < {0} invalid. Using num-clusters = {0}",
                MIN_CLUSTERS
            );
        }
        Ok(count)
    }

    /// Returns the effective count and whether `requested` had to be raised
    /// to [`MIN_CLUSTERS`].
    pub fn clamp(requested: i64) -> crate::Result<(Self, bool)> {
        if requested < MIN_CLUSTERS as i64 {
            return Ok((Self(MIN_CLUSTERS), true));
        }
        let requested = requested as u64;
        if requested > MAX_CLUSTERS as u64 {
            return Err(Error::TooManyClusters(requested as usize));
        }
        Ok((Self(requested as usize), false))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// Cluster label per pixel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelGrid {
    width: usize,
    height: usize,
    cluster_count: usize,
    labels: Vec<usize>,
}

impl LabelGrid {
    pub fn new(width: usize, height: usize, cluster_count: ClusterCount, labels: Vec<usize>) -> Self {
        debug_assert_eq!(labels.len(), width * height, "One label per pixel required");
        debug_assert!(
            labels.iter().all(|&label| label < cluster_count.get()),
            "Label out of range"
        );
        Self {
            width,
            height,
            cluster_count: cluster_count.get(),
            labels,
        }
    }

    /// Clusters `features` and reshapes the labels back into the
    /// `width * height` grid they were flattened from.
    pub fn assign<C>(
        clustering: &C,
        features: &FeatureSet,
        width: usize,
        height: usize,
        cluster_count: ClusterCount,
    ) -> crate::Result<Self>
    where
        C: Clustering + ?Sized,
    {
        let labels = clustering.fit_predict(features, cluster_count)?;
        Ok(Self::new(width, height, cluster_count, labels))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn label(&self, column_index: usize, row_index: usize) -> usize {
        self.labels[row_index * self.width + column_index]
    }

    /// Number of pixels per cluster id.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.cluster_count];
        for &label in &self.labels {
            counts[label] += 1;
        }
        counts
    }
}
