use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::{KMeans as KMeansModel, KMeansInit};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{ClusterCount, Clustering};
use crate::error::Error;
use crate::features::FeatureSet;

#[derive(Clone, Debug, PartialEq)]
pub struct KMeansOptions {
    /// independent seeded runs, the one with the lowest inertia wins
    pub restarts: usize,
    /// upper bound of Lloyd iterations per run
    pub max_iterations: usize,
    /// centroid movement below which a run counts as converged
    pub tolerance: f64,
    pub seed: u64,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            restarts: 40,
            max_iterations: 500,
            tolerance: 1e-4,
            seed: 0,
        }
    }
}

/// k-means with k-means++ seeding and multiple restarts, fitted by
/// `linfa-clustering`.
pub struct KMeans {
    options: KMeansOptions,
}

impl KMeans {
    pub fn new(options: KMeansOptions) -> Self {
        Self { options }
    }
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new(KMeansOptions::default())
    }
}

fn to_records(features: &FeatureSet) -> crate::Result<Array2<f64>> {
    let values = features.iter().flatten().map(|&value| value as f64).collect();
    Array2::from_shape_vec((features.len(), features.dimension()), values)
        .map_err(|e| Error::ClusteringFailure(e.to_string()))
}

impl Clustering for KMeans {
    fn fit_predict(
        &self,
        features: &FeatureSet,
        cluster_count: ClusterCount,
    ) -> crate::Result<Vec<usize>> {
        if features.is_empty() {
            return Err(Error::EmptyImage);
        }
        if features.len() < cluster_count.get() {
            return Err(Error::TooFewPixels(features.len(), cluster_count.get()));
        }
        let records = to_records(features)?;
        let dataset = DatasetBase::from(records);
        let rng = StdRng::seed_from_u64(self.options.seed);
        let model = KMeansModel::params_with_rng(cluster_count.get(), rng)
            .n_runs(self.options.restarts.max(1))
            .max_n_iterations(self.options.max_iterations as u64)
            .tolerance(self.options.tolerance)
            .init_method(KMeansInit::KMeansPlusPlus)
            .fit(&dataset)
            .map_err(|e| Error::ClusteringFailure(e.to_string()))?;
        log::info!(
            "k-means with {} clusters finished, inertia {:.3}",
            cluster_count.get(),
            model.inertia()
        );
        let labels: Array1<usize> = model.predict(dataset.records());
        Ok(labels.to_vec())
    }
}
