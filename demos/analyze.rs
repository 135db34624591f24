//! Extract and name the dominant colors of an image
//!
//! Usage: analyze <image> [--colors N] [--config config.json]

use colorlens::{ColorEngine, EngineConfig};
use serde::Serialize;
use std::{env, path::Path, process};

#[derive(Serialize)]
struct NamedEntry {
    hex: String,
    name: String,
    description: String,
    percentage: f64,
}

fn print_help(program: &str) {
    eprintln!("Usage: {} <image> [--colors N] [--config config.json]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --colors N        Number of dominant colors (default 5)");
    eprintln!("  --config FILE     Load engine configuration from JSON");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to see clustering diagnostics.");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut image_path_arg = None;
    let mut colors = None;
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--colors" if i + 1 < args.len() => {
                match args[i + 1].parse::<usize>() {
                    Ok(n) => colors = Some(n),
                    Err(_) => {
                        eprintln!("Error: --colors expects a positive integer");
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--config" if i + 1 < args.len() => {
                config_path = Some(args[i + 1].clone());
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") && image_path_arg.is_none() => {
                image_path_arg = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let image_path = match image_path_arg {
        Some(path) => path,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    let mut config = match config_path {
        Some(path) => match EngineConfig::from_json_file(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    if let Some(n) = colors {
        config.extraction.cluster_count = n;
    }

    let engine = match ColorEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let report = match engine.extract_palette_from_image(Path::new(&image_path)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            process::exit(1);
        }
    };

    let entries: Vec<NamedEntry> = report
        .palette
        .iter()
        .map(|entry| {
            let description = engine.classifier().describe(entry.rgb);
            NamedEntry {
                hex: entry.hex.clone(),
                name: description.name,
                description: description.full_description,
                percentage: entry.percentage,
            }
        })
        .collect();

    match serde_json::to_string_pretty(&entries) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    }

    if report.empty_clusters > 0 {
        eprintln!(
            "Note: {} of {} colors matched no pixels ({} reseeds)",
            report.empty_clusters,
            report.palette.len(),
            report.reseeded_clusters
        );
    }
}
