use crate::dataset::Dataset;
use crate::error::Result;

/// Common interface for hard clustering algorithms (one label per instance).
pub trait Clustering {
    /// Fit the model and return one cluster label per instance, in dataset order.
    fn fit_predict(&self, data: &Dataset) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
