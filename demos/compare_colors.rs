//! Compare two colors under every distance metric
//!
//! Usage: compare_colors <hex1> <hex2>

use colorlens::color::{distance_report, hex_to_rgb};
use colorlens::scheme::contrast_color;
use colorlens::DistanceMetric;
use std::{env, process};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <hex1> <hex2>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} '#ff8800' '#ee7711'", args[0]);
        process::exit(1);
    }

    let parse = |input: &str| match hex_to_rgb(input) {
        Ok(rgb) => rgb,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            process::exit(1);
        }
    };
    let first = parse(&args[1]);
    let second = parse(&args[2]);

    println!("{} vs {}", first, second);
    println!(
        "Text colors: {} on {}, {} on {}",
        contrast_color(first),
        first,
        contrast_color(second),
        second
    );
    println!();
    println!("{:<12} {:>10} {:>12}", "Metric", "Distance", "Similarity");
    println!("{}", "-".repeat(36));

    let report = distance_report(first, second);
    for metric in DistanceMetric::ALL {
        println!(
            "{:<12} {:>10.3} {:>11.2}%",
            metric.name(),
            report.get(metric),
            metric.similarity(first, second)
        );
    }
}
