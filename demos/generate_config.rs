//! Generate default configuration file
//!
//! Creates a JSON config with all default parameters

use std::{env, path::Path, process};
use swatch_match::MatchConfig;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/swatch_match.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = MatchConfig::default();

    match config.to_json_file(output_path) {
        Ok(()) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Separation bands: Weak ≥ {:.0}%, Moderate ≥ {:.0}%, Strong ≥ {:.0}%",
                config.separation_thresholds.weak,
                config.separation_thresholds.moderate,
                config.separation_thresholds.strong
            );
            eprintln!(
                "  Minimum selection: {}x{} px",
                config.selection.min_width, config.selection.min_height
            );
            eprintln!("  Records: {}", config.storage.records_path.display());
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
