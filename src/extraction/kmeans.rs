//! Lloyd's k-means over RGB pixels
//!
//! Deterministic for a given seed: the first centroid is drawn from a
//! seeded `StdRng`, assignment ties go to the lowest centroid index, and all
//! reductions run in pixel order regardless of how the assignment step
//! is parallelized.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::color::Rgb;
use crate::constants::clustering::PARALLEL_MIN_PIXELS;

/// Clustering parameters
#[derive(Debug, Clone, Copy)]
pub(crate) struct KMeansParams {
    pub seed: u64,
    pub max_iterations: usize,
    pub epsilon: f64,
    pub parallel: bool,
}

/// Final state of a clustering run
#[derive(Debug, Clone)]
pub(crate) struct Clustering {
    pub centroids: Vec<Rgb>,
    pub counts: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
    pub reseeded: usize,
}

/// Nearest centroid for one pixel and the squared distance to it
#[derive(Debug, Clone, Copy)]
struct Assignment {
    cluster: usize,
    distance_squared: u32,
}

/// Run k-means; callers guarantee `1 <= k <= pixels.len()`
pub(crate) fn cluster(pixels: &[Rgb], k: usize, params: KMeansParams) -> Clustering {
    let mut centroids = initialize_centroids(pixels, k, params.seed);
    let mut iterations = 0;
    let mut converged = false;
    let mut reseeded = 0;

    while iterations < params.max_iterations {
        iterations += 1;

        let assignments = assign(pixels, &centroids, params.parallel);
        let (next, reseeds) = update_centroids(pixels, &assignments, &centroids);
        reseeded += reseeds;

        let movement = max_movement(&centroids, &next);
        centroids = next;

        log::trace!(
            "k-means iteration {}: movement {:.3}, {} reseeded",
            iterations,
            movement,
            reseeds
        );

        if movement <= params.epsilon {
            converged = true;
            break;
        }
    }

    let assignments = assign(pixels, &centroids, params.parallel);
    let mut counts = vec![0usize; k];
    for assignment in &assignments {
        counts[assignment.cluster] += 1;
    }

    Clustering {
        centroids,
        counts,
        iterations,
        converged,
        reseeded,
    }
}

/// Farthest-point seeding from a seeded random first centroid
///
/// Each further centroid is the pixel farthest from every centroid chosen so
/// far (ties to the lowest pixel index). Images with fewer than `k` distinct
/// colors get duplicate centroids, which later surface as empty clusters.
fn initialize_centroids(pixels: &[Rgb], k: usize, seed: u64) -> Vec<Rgb> {
    let mut rng = StdRng::seed_from_u64(seed);
    let first = pixels[rng.gen_range(0..pixels.len())];

    let mut centroids = Vec::with_capacity(k);
    centroids.push(first);
    let mut nearest_distance: Vec<u32> = pixels.iter().map(|p| p.distance_squared(first)).collect();

    while centroids.len() < k {
        let mut farthest = 0;
        for (index, &distance) in nearest_distance.iter().enumerate() {
            if distance > nearest_distance[farthest] {
                farthest = index;
            }
        }

        let next = pixels[farthest];
        centroids.push(next);
        for (distance, pixel) in nearest_distance.iter_mut().zip(pixels) {
            *distance = (*distance).min(pixel.distance_squared(next));
        }
    }

    centroids
}

fn nearest(pixel: Rgb, centroids: &[Rgb]) -> Assignment {
    let mut best = Assignment {
        cluster: 0,
        distance_squared: u32::MAX,
    };
    for (cluster, centroid) in centroids.iter().enumerate() {
        let distance_squared = pixel.distance_squared(*centroid);
        if distance_squared < best.distance_squared {
            best = Assignment {
                cluster,
                distance_squared,
            };
        }
    }
    best
}

fn assign(pixels: &[Rgb], centroids: &[Rgb], parallel: bool) -> Vec<Assignment> {
    if parallel && pixels.len() >= PARALLEL_MIN_PIXELS {
        pixels.par_iter().map(|p| nearest(*p, centroids)).collect()
    } else {
        pixels.iter().map(|p| nearest(*p, centroids)).collect()
    }
}

/// Channel-wise rounded means; empty clusters are reseeded
///
/// An empty cluster takes the pixel farthest from its assigned centroid
/// (ties to the lowest pixel index), each pixel used at most once per update.
/// Returns the new centroids and the number of reseeded clusters.
fn update_centroids(
    pixels: &[Rgb],
    assignments: &[Assignment],
    centroids: &[Rgb],
) -> (Vec<Rgb>, usize) {
    let k = centroids.len();
    let mut sums = vec![[0u64; 3]; k];
    let mut counts = vec![0u64; k];

    for (pixel, assignment) in pixels.iter().zip(assignments) {
        let sum = &mut sums[assignment.cluster];
        sum[0] += pixel.r as u64;
        sum[1] += pixel.g as u64;
        sum[2] += pixel.b as u64;
        counts[assignment.cluster] += 1;
    }

    let mut next = Vec::with_capacity(k);
    let mut taken: HashSet<usize> = HashSet::new();
    let mut reseeds = 0;

    for cluster in 0..k {
        if counts[cluster] == 0 {
            let farthest = farthest_pixel(assignments, &taken);
            taken.insert(farthest);
            next.push(pixels[farthest]);
            reseeds += 1;
        } else {
            let mean = |sum: u64| (sum as f64 / counts[cluster] as f64).round() as u8;
            let [r, g, b] = sums[cluster];
            next.push(Rgb::new(mean(r), mean(g), mean(b)));
        }
    }

    (next, reseeds)
}

fn farthest_pixel(assignments: &[Assignment], taken: &HashSet<usize>) -> usize {
    let mut best_index = 0;
    let mut best_distance = None;
    for (index, assignment) in assignments.iter().enumerate() {
        if taken.contains(&index) {
            continue;
        }
        if best_distance.map_or(true, |d| assignment.distance_squared > d) {
            best_index = index;
            best_distance = Some(assignment.distance_squared);
        }
    }
    best_index
}

fn max_movement(previous: &[Rgb], next: &[Rgb]) -> f64 {
    previous
        .iter()
        .zip(next)
        .map(|(a, b)| (a.distance_squared(*b) as f64).sqrt())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> KMeansParams {
        KMeansParams {
            seed: 42,
            max_iterations: 100,
            epsilon: 1e-3,
            parallel: false,
        }
    }

    #[test]
    fn test_initialize_prefers_distinct_colors() {
        let mut pixels = vec![Rgb::new(10, 10, 10); 50];
        pixels.push(Rgb::new(200, 0, 0));
        pixels.push(Rgb::new(0, 200, 0));

        let centroids = initialize_centroids(&pixels, 3, 7);
        let distinct: HashSet<Rgb> = centroids.iter().copied().collect();
        assert_eq!(centroids.len(), 3);
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_initialize_fills_duplicates_when_few_colors() {
        let pixels = vec![Rgb::new(1, 2, 3); 4];
        let centroids = initialize_centroids(&pixels, 3, 0);
        assert_eq!(centroids, vec![Rgb::new(1, 2, 3); 3]);
    }

    #[test]
    fn test_initialize_is_seeded() {
        let pixels: Vec<Rgb> = (0..100u8).map(|v| Rgb::new(v, 255 - v, v / 2)).collect();
        assert_eq!(
            initialize_centroids(&pixels, 5, 99),
            initialize_centroids(&pixels, 5, 99)
        );
    }

    #[test]
    fn test_nearest_breaks_ties_by_lowest_index() {
        let centroids = [Rgb::new(0, 0, 0), Rgb::new(20, 0, 0)];
        let assignment = nearest(Rgb::new(10, 0, 0), &centroids);
        assert_eq!(assignment.cluster, 0);
        assert_eq!(assignment.distance_squared, 100);
    }

    #[test]
    fn test_update_centroids_rounds_mean() {
        let pixels = [Rgb::new(0, 0, 0), Rgb::new(1, 3, 255)];
        let assignments = [
            Assignment { cluster: 0, distance_squared: 0 },
            Assignment { cluster: 0, distance_squared: 0 },
        ];
        let (next, reseeds) = update_centroids(&pixels, &assignments, &[Rgb::BLACK]);
        assert_eq!(reseeds, 0);
        // 0.5 rounds away from zero, 1.5 -> 2, 127.5 -> 128
        assert_eq!(next, vec![Rgb::new(1, 2, 128)]);
    }

    #[test]
    fn test_update_reseeds_empty_cluster_from_farthest_pixel() {
        let pixels = [Rgb::new(0, 0, 0), Rgb::new(10, 0, 0), Rgb::new(90, 0, 0)];
        let centroids = [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)];
        let assignments = [
            Assignment { cluster: 0, distance_squared: 0 },
            Assignment { cluster: 0, distance_squared: 100 },
            Assignment { cluster: 0, distance_squared: 8100 },
        ];
        let (next, reseeds) = update_centroids(&pixels, &assignments, &centroids);
        assert_eq!(reseeds, 1);
        assert_eq!(next[1], Rgb::new(90, 0, 0));
    }

    #[test]
    fn test_cluster_two_blobs() {
        let mut pixels = vec![Rgb::new(250, 10, 10); 30];
        pixels.extend(vec![Rgb::new(10, 10, 250); 10]);

        let result = cluster(&pixels, 2, params());
        assert!(result.converged);
        let mut pairs: Vec<(Rgb, usize)> = result.centroids.into_iter().zip(result.counts).collect();
        pairs.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        assert_eq!(pairs[0], (Rgb::new(250, 10, 10), 30));
        assert_eq!(pairs[1], (Rgb::new(10, 10, 250), 10));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pixels: Vec<Rgb> = (0..PARALLEL_MIN_PIXELS * 2)
            .map(|i| Rgb::new((i % 251) as u8, (i * 7 % 253) as u8, (i * 13 % 255) as u8))
            .collect();

        let sequential = cluster(&pixels, 6, params());
        let parallel = cluster(&pixels, 6, KMeansParams { parallel: true, ..params() });

        assert_eq!(sequential.centroids, parallel.centroids);
        assert_eq!(sequential.counts, parallel.counts);
        assert_eq!(sequential.iterations, parallel.iterations);
    }

    #[test]
    fn test_iteration_cap() {
        let pixels: Vec<Rgb> = (0..=255u8).map(|v| Rgb::new(v, v, v)).collect();
        let result = cluster(&pixels, 4, KMeansParams { max_iterations: 1, ..params() });
        assert_eq!(result.iterations, 1);
        assert_eq!(result.counts.iter().sum::<usize>(), pixels.len());
    }
}
