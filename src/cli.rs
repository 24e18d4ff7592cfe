//! Command-line interface definitions and the run report

use crate::cluster::{Init, Kmeans, KmeansFit, DEFAULT_K, DEFAULT_MAX_ITER};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::ingest::CsvOptions;
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use std::fmt;
use std::path::PathBuf;

/// Cluster the rows of a CSV file with Lloyd's k-means
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
pub struct Args {
    /// Number of clusters
    #[arg(default_value_t = DEFAULT_K as i64)]
    pub k: i64,

    /// Stop once the summed center movement of an iteration is at most this
    #[arg(default_value_t = 0.0)]
    pub epsilon: f64,

    /// Maximum number of iterations
    #[arg(default_value_t = DEFAULT_MAX_ITER)]
    pub iterations: usize,

    /// Path to the input CSV file
    #[arg(default_value = "iris.csv")]
    pub input: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Treat the first line as data instead of attribute names
    #[arg(long)]
    pub no_header: bool,

    /// Keep the last column instead of dropping it as a class label
    #[arg(long)]
    pub keep_last_column: bool,

    /// How initial centers are chosen
    #[arg(long, value_enum, default_value_t = InitArg::Stride)]
    pub init: InitArg,

    /// Seed for `--init random`
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// More log output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Initialization strategy as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InitArg {
    /// Evenly spaced instances
    Stride,
    /// Seeded random instances
    Random,
}

impl Args {
    /// Build the clusterer described by the arguments.
    ///
    /// A negative `k` is rejected here; `k = 0` is rejected by [`Kmeans::fit`].
    pub fn kmeans(&self) -> Result<Kmeans> {
        let k = usize::try_from(self.k).map_err(|_| Error::InvalidParameter {
            name: "k",
            message: "must be at least 1",
        })?;
        let init = match self.init {
            InitArg::Stride => Init::Stride,
            InitArg::Random => Init::Random { seed: self.seed },
        };
        Ok(Kmeans::new(k)
            .with_epsilon(self.epsilon)
            .with_max_iter(self.iterations)
            .with_init(init))
    }

    /// CSV layout described by the arguments.
    pub fn csv_options(&self) -> Result<CsvOptions> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(Error::InvalidParameter {
                name: "delimiter",
                message: "must be a single ASCII character",
            })?;
        Ok(CsvOptions {
            delimiter,
            has_header: !self.no_header,
            drop_last_column: !self.keep_last_column,
        })
    }

    /// Log level selected by `-q` / `-v`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Per-cluster summary printed after a run.
pub struct Report<'a> {
    data: &'a Dataset,
    fit: &'a KmeansFit,
}

impl<'a> Report<'a> {
    /// Summarize `fit`, computing errors against `data`.
    pub fn new(data: &'a Dataset, fit: &'a KmeansFit) -> Self {
        Self { data, fit }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { data, fit } = self;
        if let Some(names) = data.attribute_names() {
            writeln!(f, "Attributes: {}", names.join(", "))?;
        }
        for (m, cluster) in fit.clusters().iter().enumerate() {
            write!(f, "Cluster {m}: {} instances, center at: ", cluster.len())?;
            for (j, x) in cluster.center().iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{x:.6}")?;
            }
            writeln!(f)?;
            writeln!(
                f,
                "  Sum of squared errors: {:.6}",
                cluster.sum_of_squared_errors(data)
            )?;
        }
        writeln!(f, "Total sum of squared errors: {:.6}", fit.inertia(data))?;
        write!(
            f,
            "Terminated after {} iterations ({})",
            fit.iterations(),
            fit.termination()
        )?;
        if let Some(movement) = fit.movement() {
            write!(f, ", final movement {movement:.6}")?;
        }
        writeln!(f)
    }
}
