use std::time::{Duration, Instant};

use kmeans_segmenter::cluster::{ClusterCount, Clustering, KMeans, KMeansOptions};
use kmeans_segmenter::features::FeatureSet;
use kmeans_segmenter::grid::PixelGrid;

const IMAGE_WIDTH: usize = 640;
const IMAGE_HEIGHT: usize = 480;
const IMAGE_SIZE: usize = IMAGE_WIDTH * IMAGE_HEIGHT;
const CLUSTER_COUNT: i64 = 4;

fn create_test_image() -> PixelGrid<u8> {
    let samples = (0..IMAGE_SIZE)
        .flat_map(|index| {
            let x = index % IMAGE_WIDTH;
            let y = index / IMAGE_WIDTH;
            [
                (x % 256) as u8,
                (y % 256) as u8,
                ((x + y * 8) % 256) as u8,
            ]
        })
        .collect();
    PixelGrid::new(IMAGE_WIDTH, IMAGE_HEIGHT, 3, samples)
}

fn calculate_std_deviation_in_micros(mean: &Duration, measurements: &[Duration]) -> u64 {
    let mean_micros = mean.as_micros() as i128;
    let sum = measurements
        .iter()
        .map(|m| m.as_micros() as i128 - mean_micros)
        .map(|v| v.pow(2).unsigned_abs())
        .sum::<u128>();
    let variance = sum / measurements.len() as u128;
    (variance as f64).sqrt().round() as u64
}

const NUMBER_OF_ROUNDS: u32 = 5;

fn main() {
    println!("Creating test image");
    let test_image = create_test_image();
    println!("Flattening test image into feature vectors");
    let features = FeatureSet::from_grid(&test_image);
    let cluster_count = ClusterCount::new(CLUSTER_COUNT).expect("Cluster count is valid");
    let clustering = KMeans::new(KMeansOptions {
        restarts: 1,
        ..Default::default()
    });
    println!("Starting clustering");
    let mut durations: Vec<Duration> = Vec::new();

    for round in 1..=NUMBER_OF_ROUNDS {
        println!("Starting round {}", round);

        let start = Instant::now();
        clustering
            .fit_predict(&features, cluster_count)
            .expect("Clustering of test image failed");
        let duration = start.elapsed();

        println!(
            "Finished round {} after {} microseconds",
            round,
            duration.as_micros(),
        );
        durations.push(duration);
    }

    println!("Clustering done");

    let min_duration = durations.iter().min().unwrap();
    let max_duration = durations.iter().max().unwrap();
    let avg_duration = durations.iter().sum::<Duration>() / NUMBER_OF_ROUNDS;
    let std_deviation = calculate_std_deviation_in_micros(&avg_duration, &durations);

    println!(
        "Min: {}, Max: {}, Average: {}, Std Deviation: {}",
        min_duration.as_micros(),
        max_duration.as_micros(),
        avg_duration.as_micros(),
        std_deviation,
    );
}
