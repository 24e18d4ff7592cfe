//! K-means on a simple 2D dataset, with stride and seeded random initialization.

use lloyd::{Clustering, Dataset, Init, Kmeans};

fn main() {
    // Three well-separated clusters in 2D.
    let data = Dataset::new(vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
    ])
    .unwrap();

    // --- Stride initialization (k=3) ---
    let kmeans = Kmeans::new(3).with_max_iter(20);
    let fit = kmeans.fit(&data).unwrap();
    println!(
        "=== K-means, stride init: {} after {} iterations ===",
        fit.termination(),
        fit.iterations()
    );
    for (m, cluster) in fit.clusters().iter().enumerate() {
        println!(
            "  cluster {m}: members {:?}, center ({:5.2}, {:5.2})",
            cluster.members(),
            cluster.center()[0],
            cluster.center()[1]
        );
    }
    println!("  inertia {:.4}", fit.inertia(&data));

    // --- Seeded random initialization (k=3) ---
    let kmeans = Kmeans::new(3)
        .with_max_iter(20)
        .with_init(Init::Random { seed: 42 });
    let labels = kmeans.fit_predict(&data).unwrap();
    println!("\n=== K-means, random init (seed 42) ===");
    for (i, label) in labels.iter().enumerate() {
        let row = data.row(i);
        println!("  point {:2} ({:5.1}, {:5.1}) => cluster {}", i, row[0], row[1], label);
    }
}
