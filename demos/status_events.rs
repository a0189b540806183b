use kmeans::*;

fn main() {
    let (sample_cnt, sample_dims, k) = (20000, 200, 4);

    // Generate some random data
    let samples: Vec<Vec<f64>> = (0..sample_cnt)
        .map(|_| (0..sample_dims).map(|_| rand::random()).collect())
        .collect();

    let init_done = |_: &[Cluster<Vec<f64>, f64>]| println!("Initialization completed.");
    let iteration_done = |clusters: &[Cluster<Vec<f64>, f64>], nr: usize| {
        let error: f64 = clusters.iter().filter_map(Cluster::error).sum();
        let sizes: Vec<usize> = clusters.iter().map(Cluster::size).collect();
        println!("Iteration {} - Error: {:.2} | Cluster sizes: {:?}", nr, error, sizes);
    };
    let conf = KMeansConfig::build()
        .min_centroid_shift(0.001)
        .max_iterations(2500)
        .error_calculation(true)
        .empty_cluster(EmptyClusterPolicy::StealFarthest)
        .init_done(&init_done)
        .iteration_done(&iteration_done)
        .build();

    let kmean = KMeans::new(&samples, EuclideanDistance::new());
    match kmean.run(k, &conf) {
        Ok(clusters) => println!("Cluster sizes: {:?}", clusters.iter().map(Cluster::size).collect::<Vec<_>>()),
        Err(e) => eprintln!("Clustering failed: {}", e),
    }
}
