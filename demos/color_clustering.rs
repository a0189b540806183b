//! Finds the dominant colors of a (generated) picture, by clustering its pixels in RGB space.
use kmeans::*;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Euclidean distance between the RGB components of two colors.
fn color_distance(a: &Color, b: &Color) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Mean of each color component, rounded.
fn color_mean(colors: &[Color], members: &[usize]) -> Color {
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for &idx in members {
        r += colors[idx].r as u64;
        g += colors[idx].g as u64;
        b += colors[idx].b as u64;
    }
    let size = members.len() as f64;
    Color {
        r: (r as f64 / size).round() as u8,
        g: (g as f64 / size).round() as u8,
        b: (b as f64 / size).round() as u8,
    }
}

/// A "picture" made of noisy pixels around three base colors.
fn load_picture(rnd: &mut StdRng) -> Vec<Color> {
    let base = [(200u8, 30u8, 30u8, 5000), (30, 180, 40, 3000), (20, 40, 220, 1500)];
    let mut noisy = |v: u8| (v as i16 + rnd.gen_range(-15i16..=15)).clamp(0, 255) as u8;
    base.iter()
        .flat_map(|&(r, g, b, cnt)| std::iter::repeat((r, g, b)).take(cnt))
        .map(|(r, g, b)| Color { r: noisy(r), g: noisy(g), b: noisy(b) })
        .collect()
}

fn main() {
    let mut rnd = StdRng::seed_from_u64(3);
    let colors = load_picture(&mut rnd);

    let print_clusters = |clusters: &[Cluster<Color, f64>], nr: usize| {
        for cluster in clusters {
            println!("{}: {}", nr, cluster);
        }
    };
    let conf = KMeansConfig::build()
        .error_calculation(true)
        .empty_cluster(EmptyClusterPolicy::StealFarthest)
        .random_generator(rnd)
        .iteration_done(&print_clusters)
        .build();

    let kmean = KMeans::new(&colors, FnStrategy::new(color_distance, color_mean));
    match kmean.run_default(&conf) {
        Ok(clusters) => for cluster in &clusters {
            println!("{}", cluster);
        },
        Err(e) => eprintln!("Clustering failed: {}", e),
    }
}
