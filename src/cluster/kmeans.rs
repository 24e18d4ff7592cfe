//! K-means clustering (Lloyd's algorithm).
//!
//! Partitions a [`Dataset`] into k clusters by minimizing the
//! **within-cluster sum of squares**:
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize k clusters, each holding one instance
//! 2. **Assign**: every instance goes to the cluster with the nearest center
//! 3. **Update**: every center becomes the mean of its members
//! 4. Stop once the summed center movement is at most `epsilon`, or after
//!    `max_iter` iterations
//!
//! Ties in step 2 go to the lowest cluster index. A cluster that receives no
//! instances keeps its previous center and contributes no movement.
//!
//! # Initialization
//!
//! The default [`Init::Stride`] picks instance `⌊N·m/k⌋` for cluster `m`. It
//! involves no randomness, so two runs over the same data always agree.
//! [`Init::Random`] samples distinct instances with a seeded RNG instead.
//!
//! # Failure Modes
//!
//! - **Local optima**: Lloyd only finds a local minimum of WCSS
//! - **Oscillation**: with a finite budget and `epsilon = 0` the loop may run
//!   out of iterations without reaching a fixed point; [`KmeansFit::termination`]
//!   tells the two outcomes apart
//! - **k > N**: allowed; surplus clusters share an initial instance, lose it to
//!   the lower-indexed twin on the first pass and stay empty with a frozen center

use super::cluster::Cluster;
use super::distance::distance_squared;
use super::traits::Clustering;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use rand::prelude::*;
use std::fmt;

/// Number of clusters used by [`Kmeans::default`].
pub const DEFAULT_K: usize = 3;
/// Iteration budget used unless [`Kmeans::with_max_iter`] says otherwise.
pub const DEFAULT_MAX_ITER: usize = 10;

/// How the initial cluster centers are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Init {
    /// Cluster `m` starts at instance `⌊N·m/k⌋`.
    #[default]
    Stride,
    /// Cluster centers start at distinct instances drawn with a seeded RNG.
    ///
    /// When k exceeds N, the surplus clusters draw with replacement.
    Random {
        /// RNG seed.
        seed: u64,
    },
}

/// Why the Lloyd loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Total center movement fell to `epsilon` or below.
    Converged,
    /// The iteration budget ran out first.
    Exhausted,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged => f.write_str("converged"),
            Self::Exhausted => f.write_str("iteration budget exhausted"),
        }
    }
}

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Convergence threshold on total center movement.
    epsilon: f64,
    /// Maximum iterations.
    max_iter: usize,
    /// Initialization strategy.
    init: Init,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    ///
    /// Defaults: `epsilon = 0.0` (stop only at an exact fixed point),
    /// `max_iter = 10`, stride initialization.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            epsilon: 0.0,
            max_iter: DEFAULT_MAX_ITER,
            init: Init::Stride,
        }
    }

    /// Set the convergence threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the initialization strategy.
    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    /// Use random initialization with the given seed.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_init(Init::Random { seed })
    }

    /// Configured convergence threshold.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Configured iteration budget.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Configured initialization strategy.
    pub fn init(&self) -> Init {
        self.init
    }

    fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        // Also rejects NaN.
        if !(self.epsilon >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be a non-negative number",
            });
        }
        Ok(())
    }

    /// Instance index each cluster starts from.
    fn seeds(&self, n: usize) -> Vec<usize> {
        match self.init {
            Init::Stride => (0..self.k).map(|m| n * m / self.k).collect(),
            Init::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut picks = rand::seq::index::sample(&mut rng, n, self.k.min(n)).into_vec();
                while picks.len() < self.k {
                    picks.push(rng.random_range(0..n));
                }
                picks
            }
        }
    }

    /// Run Lloyd's algorithm.
    ///
    /// Parameters are validated before any work is done; an invalid `k` or
    /// `epsilon` yields [`Error::InvalidParameter`] and no partial result.
    pub fn fit(&self, data: &Dataset) -> Result<KmeansFit> {
        self.validate()?;

        let n = data.len();
        let mut clusters: Vec<Cluster> = self
            .seeds(n)
            .into_iter()
            .map(|i| {
                let mut cluster = Cluster::new();
                cluster.push(i);
                cluster.update_center(data);
                cluster
            })
            .collect();

        let mut iterations = 0;
        let mut movement = None;
        let mut termination = Termination::Exhausted;

        while iterations < self.max_iter {
            clusters.iter_mut().for_each(Cluster::clear);

            for (p, row) in data.rows().enumerate() {
                let m = nearest(&clusters, row);
                clusters[m].push(p);
            }

            let total: f64 = clusters.iter_mut().map(|c| c.update_center(data)).sum();
            iterations += 1;
            movement = Some(total);
            log::debug!("iteration {iterations:>4}  movement {total:.6}");

            if total <= self.epsilon {
                termination = Termination::Converged;
                break;
            }
        }

        match termination {
            Termination::Converged => log::info!("converged after {iterations} iterations"),
            Termination::Exhausted => {
                log::info!("stopped after {iterations} iterations (budget exhausted)")
            }
        }

        Ok(KmeansFit {
            clusters,
            n_instances: n,
            iterations,
            termination,
            movement,
        })
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(DEFAULT_K)
    }
}

impl Clustering for Kmeans {
    /// Labels come from the final assignment pass, so `max_iter` must be at least 1.
    fn fit_predict(&self, data: &Dataset) -> Result<Vec<usize>> {
        self.fit(data)?.labels().ok_or(Error::InvalidParameter {
            name: "max_iter",
            message: "must be at least 1 to assign instances",
        })
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Index of the cluster whose center is nearest to `row`; ties go to the lowest index.
fn nearest(clusters: &[Cluster], row: &[f64]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (m, cluster) in clusters.iter().enumerate() {
        let dist = match distance_squared(row, cluster.center()) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("cluster {m} skipped during assignment ({e})");
                f64::INFINITY
            }
        };
        if dist < best_dist {
            best_dist = dist;
            best = m;
        }
    }
    best
}

/// Result of [`Kmeans::fit`]: the k clusters plus how the run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    clusters: Vec<Cluster>,
    n_instances: usize,
    iterations: usize,
    termination: Termination,
    movement: Option<f64>,
}

impl KmeansFit {
    /// The clusters, indexed 0..k.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Take ownership of the clusters.
    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }

    /// Number of Lloyd iterations that ran.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Why the loop stopped.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Shorthand for `termination() == Termination::Converged`.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Total center movement of the last iteration, or `None` if none ran.
    pub fn movement(&self) -> Option<f64> {
        self.movement
    }

    /// Member count per cluster.
    pub fn sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Cluster::len).collect()
    }

    /// Center per cluster.
    pub fn centers(&self) -> Vec<&[f64]> {
        self.clusters.iter().map(Cluster::center).collect()
    }

    /// Cluster index of every instance, from the last assignment pass.
    ///
    /// `None` when no iteration ran: the clusters then only hold their initial
    /// instances and do not partition the dataset.
    pub fn labels(&self) -> Option<Vec<usize>> {
        if self.iterations == 0 {
            return None;
        }
        let mut labels = vec![0; self.n_instances];
        for (m, cluster) in self.clusters.iter().enumerate() {
            for &i in cluster.members() {
                labels[i] = m;
            }
        }
        Some(labels)
    }

    /// Nearest final center for a new instance.
    pub fn predict(&self, row: &[f64]) -> Result<usize> {
        let dim = self.clusters.first().map_or(0, |c| c.center().len());
        if row.len() != dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: row.len(),
            });
        }
        Ok(nearest(&self.clusters, row))
    }

    /// Sum of [`Cluster::sum_of_squared_errors`] over all clusters.
    pub fn inertia(&self, data: &Dataset) -> f64 {
        self.clusters
            .iter()
            .map(|c| c.sum_of_squared_errors(data))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_corners() -> Dataset {
        Dataset::new(vec![
            vec![0.0, 0.0],
            vec![0.0, 2.0],
            vec![10.0, 0.0],
            vec![10.0, 2.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_kmeans_four_corners() {
        let data = four_corners();
        let fit = Kmeans::new(2)
            .with_epsilon(0.0)
            .with_max_iter(10)
            .fit(&data)
            .unwrap();

        assert_eq!(fit.iterations(), 2);
        assert_eq!(fit.termination(), Termination::Converged);
        assert_eq!(fit.movement(), Some(0.0));
        assert_eq!(fit.clusters()[0].members(), &[0, 1]);
        assert_eq!(fit.clusters()[1].members(), &[2, 3]);
        assert_eq!(fit.centers(), vec![&[0.0, 1.0][..], &[10.0, 1.0][..]]);
        assert_eq!(fit.labels(), Some(vec![0, 0, 1, 1]));
        assert_eq!(fit.inertia(&data), 4.0);
    }

    #[test]
    fn test_kmeans_stride_seeds() {
        assert_eq!(Kmeans::new(2).seeds(4), vec![0, 2]);
        assert_eq!(Kmeans::new(3).seeds(10), vec![0, 3, 6]);
        assert_eq!(Kmeans::new(4).seeds(2), vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_kmeans_single_iteration_budget() {
        let data = four_corners();
        let fit = Kmeans::new(2).with_max_iter(1).fit(&data).unwrap();

        // Centers moved from [0,0]/[10,0] to [0,1]/[10,1].
        assert_eq!(fit.iterations(), 1);
        assert_eq!(fit.termination(), Termination::Exhausted);
        assert!(!fit.converged());
        assert_eq!(fit.movement(), Some(2.0));
    }

    #[test]
    fn test_kmeans_epsilon_stops_early() {
        let data = four_corners();
        let fit = Kmeans::new(2)
            .with_epsilon(2.0)
            .with_max_iter(10)
            .fit(&data)
            .unwrap();

        assert_eq!(fit.iterations(), 1);
        assert!(fit.converged());
    }

    #[test]
    fn test_kmeans_zero_iterations() {
        let data = four_corners();
        let fit = Kmeans::new(2).with_max_iter(0).fit(&data).unwrap();

        assert_eq!(fit.iterations(), 0);
        assert_eq!(fit.termination(), Termination::Exhausted);
        assert_eq!(fit.movement(), None);
        assert_eq!(fit.labels(), None);
        assert_eq!(fit.clusters()[0].members(), &[0]);
        assert_eq!(fit.clusters()[1].center(), &[10.0, 0.0]);

        assert!(Kmeans::new(2).with_max_iter(0).fit_predict(&data).is_err());
    }

    #[test]
    fn test_kmeans_k_one_is_global_mean() {
        let data = Dataset::new(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
            vec![-1.0, 0.0, 2.0],
        ])
        .unwrap();
        let fit = Kmeans::new(1).fit(&data).unwrap();

        assert_eq!(fit.sizes(), vec![4]);
        assert_eq!(fit.clusters()[0].center(), data.mean().as_slice());
        assert!(fit.converged());
    }

    #[test]
    fn test_kmeans_k_larger_than_n() {
        let data = Dataset::new(vec![vec![0.0], vec![5.0]]).unwrap();
        let fit = Kmeans::new(4).fit(&data).unwrap();

        // Seeds 0, 0, 1, 1: the higher-indexed twins never win a tie.
        assert_eq!(fit.sizes(), vec![1, 0, 1, 0]);
        assert_eq!(fit.clusters()[1].center(), &[0.0]);
        assert_eq!(fit.clusters()[3].center(), &[5.0]);
        assert!(fit.converged());
    }

    #[test]
    fn test_kmeans_ties_go_to_lowest_index() {
        // Seeds are instances 0 ([-1]) and 2 ([1]); instance 1 ([0]) is 1 away from both.
        let data = Dataset::new(vec![vec![-1.0], vec![0.0], vec![1.0], vec![9.0]]).unwrap();
        let fit = Kmeans::new(2).with_max_iter(1).fit(&data).unwrap();

        assert_eq!(fit.clusters()[0].members(), &[0, 1]);
        assert_eq!(fit.clusters()[1].members(), &[2, 3]);
    }

    #[test]
    fn test_kmeans_invalid_params() {
        let data = four_corners();

        let err = Kmeans::new(0).fit(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "k", .. }));

        let err = Kmeans::new(2).with_epsilon(-1.0).fit(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "epsilon", .. }));

        assert!(Kmeans::new(2).with_epsilon(f64::NAN).fit(&data).is_err());
    }

    #[test]
    fn test_kmeans_deterministic() {
        let data = four_corners();
        let a = Kmeans::new(2).fit(&data).unwrap();
        let b = Kmeans::new(2).fit(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_kmeans_random_init_with_seed() {
        let data: Vec<Vec<f64>> = (0..30)
            .map(|i| vec![(i % 3) as f64 * 10.0 + (i as f64) * 0.01, 0.0])
            .collect();
        let data = Dataset::new(data).unwrap();

        let kmeans = Kmeans::new(3).with_seed(42).with_max_iter(50);
        let seeds = kmeans.seeds(data.len());
        assert_eq!(seeds.len(), 3);
        let mut distinct = seeds.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(distinct.len(), 3);

        let a = kmeans.fit(&data).unwrap();
        let b = kmeans.fit(&data).unwrap();
        assert_eq!(a, b, "same seed should give same result");
        assert_eq!(a.sizes().iter().sum::<usize>(), 30);
    }

    #[test]
    fn test_kmeans_random_init_k_larger_than_n() {
        let kmeans = Kmeans::new(5).with_seed(7);
        let seeds = kmeans.seeds(2);
        assert_eq!(seeds.len(), 5);
        assert!(seeds.iter().all(|&i| i < 2));
    }

    #[test]
    fn test_kmeans_predict() {
        let data = four_corners();
        let fit = Kmeans::new(2).fit(&data).unwrap();

        assert_eq!(fit.predict(&[1.0, 1.0]).unwrap(), 0);
        assert_eq!(fit.predict(&[9.0, 3.0]).unwrap(), 1);
        assert!(fit.predict(&[1.0]).is_err());
    }

    #[test]
    fn test_kmeans_fit_predict() {
        let data = four_corners();
        let kmeans = Kmeans::new(2);
        assert_eq!(kmeans.n_clusters(), 2);
        assert_eq!(kmeans.fit_predict(&data).unwrap(), vec![0, 0, 1, 1]);
    }
}
