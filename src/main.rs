//! `lloyd`: cluster the rows of a CSV file and report the clusters.

use anyhow::{Context, Result};
use clap::Parser;
use lloyd::cli::{Args, Report};
use lloyd::read_csv_path;
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    // Parameters are checked before any input is read.
    let kmeans = args.kmeans()?;
    let options = args.csv_options()?;

    let start_time = Instant::now();

    let data = read_csv_path(&args.input, &options)
        .with_context(|| format!("unable to load {}", args.input.display()))?;
    let parse_time = start_time.elapsed();
    println!(
        "Loaded {} instances with {} attributes",
        data.len(),
        data.dim()
    );

    let fit_start = Instant::now();
    let fit = kmeans.fit(&data).context("k-means failed")?;
    let fit_time = fit_start.elapsed();

    print!("{}", Report::new(&data, &fit));

    println!("Parsing time:    {:.6}s", parse_time.as_secs_f64());
    println!("Clustering time: {:.6}s", fit_time.as_secs_f64());
    println!(
        "Total time:      {:.6}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
