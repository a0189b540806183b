use kmeans::*;

fn main() {
    let (sample_cnt, sample_dims, k) = (20000, 8, 4);

    // Generate some random data
    let samples: Vec<Vec<f64>> = (0..sample_cnt)
        .map(|_| (0..sample_dims).map(|_| rand::random()).collect())
        .collect();

    // Calculate kmeans, using randomly selected samples as initial centroids
    let kmean = KMeans::new(&samples, EuclideanDistance::new());
    let conf = KMeansConfig::build()
        .error_calculation(true)
        .empty_cluster(EmptyClusterPolicy::StealFarthest)
        .build();
    let clusters = match kmean.run(k, &conf) {
        Ok(clusters) => clusters,
        Err(e) => {
            eprintln!("Clustering failed: {}", e);
            std::process::exit(1);
        }
    };

    for cluster in &clusters {
        println!("Centroid: {:?}", cluster.center());
        println!("Size: {} | Error: {:?}", cluster.size(), cluster.error());
    }
}
