//! Generate a default engine configuration file
//!
//! Creates a JSON config with all default parameters

use colorlens::EngineConfig;
use std::{env, path::Path, process};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/colorlens.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = EngineConfig::default();

    match config.to_json_file(output_path) {
        Ok(()) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Extraction: k={}, seed {}, max {} iterations, epsilon {}",
                config.extraction.cluster_count,
                config.extraction.seed,
                config.extraction.max_iterations,
                config.extraction.convergence_epsilon
            );
            match config.extraction.max_dimension {
                Some(max) => eprintln!("  Downsampling: {}px", max),
                None => eprintln!("  Downsampling: off"),
            }
            eprintln!(
                "  Description: dark < {}, bright > {}, grayish < {}, vivid > {}",
                config.classification.dark_threshold,
                config.classification.bright_threshold,
                config.classification.grayish_threshold,
                config.classification.vivid_threshold
            );
            eprintln!("  Default metric: {}", config.distance.default_metric);
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
