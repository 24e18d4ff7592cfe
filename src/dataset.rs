//! Read-only numeric table handed to the clustering engine.
//!
//! A [`Dataset`] is a row-major matrix of `f64` values: rows are instances,
//! columns are attributes. It is validated once at construction (non-empty,
//! uniform dimensionality, finite values) and never mutated afterwards, so
//! clusters can refer to instances by index.

use crate::error::{Error, Result};

/// Immutable N x D table of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
    n_rows: usize,
    dim: usize,
    names: Option<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from rows.
    ///
    /// Fails with [`Error::EmptyInput`] when there are no rows or the rows have no
    /// attributes, and with [`Error::DimensionMismatch`] when a row's length differs
    /// from the first row's. Non-finite values (NaN, infinities) are rejected with
    /// [`Error::InvalidParameter`].
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::EmptyInput);
        };
        let dim = first.len();
        if dim == 0 {
            return Err(Error::EmptyInput);
        }

        let n_rows = rows.len();
        let mut values = Vec::with_capacity(n_rows * dim);
        for row in rows {
            if row.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: row.len(),
                });
            }
            if !row.iter().all(|x| x.is_finite()) {
                return Err(Error::InvalidParameter {
                    name: "rows",
                    message: "values must be finite",
                });
            }
            values.extend(row);
        }

        Ok(Self {
            values,
            n_rows,
            dim,
            names: None,
        })
    }

    /// Attach attribute names (one per column).
    pub fn with_attribute_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.dim {
            return Err(Error::InvalidParameter {
                name: "attribute_names",
                message: "must have one name per attribute",
            });
        }
        self.names = Some(names);
        Ok(self)
    }

    /// Number of instances (N).
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Always `false` for a constructed dataset; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Number of attributes per instance (D).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Attribute vector of instance `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.dim;
        &self.values[start..start + self.dim]
    }

    /// Iterate over instances in index order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.dim)
    }

    /// Attribute names, if the source provided them.
    pub fn attribute_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Componentwise mean over all instances.
    pub fn mean(&self) -> Vec<f64> {
        let mut sum = vec![0.0; self.dim];
        for row in self.rows() {
            for (s, x) in sum.iter_mut().zip(row) {
                *s += x;
            }
        }
        let n = self.n_rows as f64;
        sum.iter_mut().for_each(|s| *s /= n);
        sum
    }
}

impl TryFrom<Vec<Vec<f64>>> for Dataset {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows)
    }
}
