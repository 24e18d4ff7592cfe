use super::distance::{distance, distance_squared};
use crate::dataset::Dataset;

/// One k-means cluster: indices of its member instances and their centroid.
///
/// Members are indices into the [`Dataset`] the cluster was fitted on, never
/// copies of the rows. Membership is rebuilt by the engine every iteration;
/// the cluster itself only recomputes its center.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    members: Vec<usize>,
    center: Vec<f64>,
}

impl Cluster {
    /// An empty cluster with no center yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of the instances currently assigned to this cluster.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Current center. Empty until the first non-empty [`update_center`](Self::update_center).
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster currently has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.members.clear();
    }

    pub(crate) fn push(&mut self, index: usize) {
        self.members.push(index);
    }

    /// Recompute the center as the mean of the members and return how far it moved.
    ///
    /// With no members the center is left as is and the movement is 0. The first
    /// center ever computed also reports 0, since there is nothing to move from.
    pub fn update_center(&mut self, data: &Dataset) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }

        let mut mean = vec![0.0; data.dim()];
        for &i in &self.members {
            for (m, x) in mean.iter_mut().zip(data.row(i)) {
                *m += x;
            }
        }
        let n = self.members.len() as f64;
        mean.iter_mut().for_each(|m| *m /= n);

        let old = std::mem::replace(&mut self.center, mean);
        if old.is_empty() {
            return 0.0;
        }
        match distance(&old, &self.center) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("center movement not measurable ({e}); counting it as 0");
                0.0
            }
        }
    }

    /// Sum over members of the squared distance to the center.
    ///
    /// 0 for an empty cluster.
    pub fn sum_of_squared_errors(&self, data: &Dataset) -> f64 {
        self.members
            .iter()
            .map(|&i| match distance_squared(data.row(i), &self.center) {
                Ok(d) => d,
                Err(e) => {
                    log::warn!("instance {i} not comparable with its center ({e})");
                    0.0
                }
            })
            .sum()
    }
}
