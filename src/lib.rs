//! Deterministic k-means clustering.
//!
//! `lloyd` groups the rows of a numeric table into k clusters with Lloyd's
//! algorithm. Initialization is deterministic by default, so the same input
//! always yields the same clusters.
//!
//! - [`dataset`]: the immutable N x D table the engine reads
//! - [`ingest`]: CSV loading into a [`Dataset`]
//! - [`cluster`]: distance, clusters, and the Lloyd loop

#![forbid(unsafe_code)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod cluster;
pub mod dataset;
pub mod error;
pub mod ingest;

pub use cluster::{Cluster, Clustering, Init, Kmeans, KmeansFit, Termination};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use ingest::{read_csv, read_csv_path, CsvOptions};
