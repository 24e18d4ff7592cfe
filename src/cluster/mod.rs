//! Lloyd's k-means over a [`Dataset`](crate::Dataset).
//!
//! The engine is split into three layers:
//!
//! - [`distance_squared`]: the only metric, squared Euclidean distance, which
//!   refuses vectors of unequal length instead of guessing
//! - [`Cluster`]: member indices into the dataset plus their centroid; it can
//!   recompute its own center and report how far it moved
//! - [`Kmeans`]: the assignment / update loop over a fixed set of k clusters,
//!   returning a [`KmeansFit`]
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lloyd::cluster::{Clustering, Kmeans, Termination};
//! use lloyd::Dataset;
//!
//! let data = Dataset::new(vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 2.0],
//!     vec![10.0, 0.0],
//!     vec![10.0, 2.0],
//! ])
//! .unwrap();
//!
//! let fit = Kmeans::new(2).with_max_iter(10).fit(&data).unwrap();
//! assert_eq!(fit.termination(), Termination::Converged);
//! assert_eq!(fit.iterations(), 2);
//! assert_eq!(fit.clusters()[0].center(), &[0.0, 1.0]);
//!
//! let labels = Kmeans::new(2).fit_predict(&data).unwrap();
//! assert_eq!(labels, vec![0, 0, 1, 1]);
//! ```

#[allow(clippy::module_inception)]
mod cluster;
mod distance;
mod kmeans;
mod traits;

pub use cluster::Cluster;
pub use distance::{distance, distance_squared};
pub use kmeans::{Init, Kmeans, KmeansFit, Termination, DEFAULT_K, DEFAULT_MAX_ITER};
pub use traits::Clustering;
