//! Command-line interface for swatch_match
//!
//! Basic CLI tool for comparing a sample color against two references and
//! managing saved comparisons.

use std::fs::File;
use std::io;
use std::path::Path;
use std::{env, process};

use chrono::Utc;
use swatch_match::color::from_hex;
use swatch_match::image_loader::{load_image, Selection};
use swatch_match::workflow::{self, ComparisonSession};
use swatch_match::{
    Closer, ColorData, ComparisonMetrics, JsonFileRepository, MatchConfig, MatchError, Result,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut config_path = None;
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        if pos + 1 >= args.len() {
            eprintln!("Error: --config requires a path");
            process::exit(1);
        }
        config_path = Some(args.remove(pos + 1));
        args.remove(pos);
    }
    let save = match args.iter().position(|a| a == "--save") {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    };

    let config = match config_path {
        Some(path) => MatchConfig::from_json_file(Path::new(&path)),
        None => Ok(MatchConfig::default()),
    };

    let result = config.and_then(|config| run(&program, &args, &config, save));
    if let Err(error) = result {
        eprintln!("Comparison failed: {}", error);
        if error.is_recoverable() {
            eprintln!("Suggestion: {}", error.user_message());
        }
        process::exit(1);
    }
}

fn run(program: &str, args: &[String], config: &MatchConfig, save: bool) -> Result<()> {
    let mut repo = JsonFileRepository::new(&config.storage.records_path);

    match args.first().map(String::as_str) {
        Some("hex") if args.len() == 4 => {
            let mut session = ComparisonSession::new();
            session.set_reference_a(&args[1], ColorData::from_rgb(from_hex(&args[1])?)?);
            session.set_reference_b(&args[2], ColorData::from_rgb(from_hex(&args[2])?)?);
            session.set_sample(ColorData::from_rgb(from_hex(&args[3])?)?);
            compare(session, config, &mut repo, save)
        }
        Some("image") if args.len() == 5 => {
            let image = load_image(Path::new(&args[1]))?;
            let mut session = ComparisonSession::new();
            let ref_a = workflow::capture_from_image(&image, parse_selection(&args[2])?, config)?;
            let ref_b = workflow::capture_from_image(&image, parse_selection(&args[3])?, config)?;
            let sample = workflow::capture_from_image(&image, parse_selection(&args[4])?, config)?;
            session.set_reference_a(ref_a.hex.clone(), ref_a);
            session.set_reference_b(ref_b.hex.clone(), ref_b);
            session.set_sample(sample);
            compare(session, config, &mut repo, save)
        }
        Some("export-csv") => {
            let count = workflow::export_all_csv(&repo, io::stdout().lock())?;
            eprintln!("Exported {} comparisons", count);
            Ok(())
        }
        Some("export-json") => {
            let count = workflow::export_all_json(&repo, io::stdout().lock())?;
            eprintln!("Exported {} comparisons", count);
            Ok(())
        }
        Some("import") if args.len() == 2 => {
            let file = File::open(&args[1])
                .map_err(|e| MatchError::storage(format!("failed to open {}", args[1]), e))?;
            let count = workflow::import_all_json(&mut repo, io::BufReader::new(file))?;
            eprintln!("Imported {} comparisons into {}", count, repo.path().display());
            Ok(())
        }
        _ => {
            print_help(program);
            process::exit(1);
        }
    }
}

fn compare(
    session: ComparisonSession,
    config: &MatchConfig,
    repo: &mut JsonFileRepository,
    save: bool,
) -> Result<()> {
    let classifier = config.classifier()?;
    let metrics = session.metrics(&classifier)?;
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    print_summary(&session, &metrics);

    if save {
        let record = session.to_record(&classifier, "", Utc::now())?;
        let id = workflow::save_comparison(repo, record)?;
        eprintln!("Saved comparison {} to {}", id, repo.path().display());
    }
    Ok(())
}

/// Parse `x,y,width,height`
fn parse_selection(arg: &str) -> Result<Selection> {
    let parts: Vec<u32> = arg
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| MatchError::invalid_input("selection", format!("{}: {}", arg, e)))?;
    match parts[..] {
        [x, y, width, height] => Ok(Selection::new(x, y, width, height)),
        _ => Err(MatchError::invalid_input(
            "selection",
            format!("expected x,y,width,height, got {}", arg),
        )),
    }
}

fn print_summary(session: &ComparisonSession, metrics: &ComparisonMetrics) {
    eprintln!();
    eprintln!("Comparison Summary:");
    if let (Some(a), Some(b), Some(sample)) =
        (session.reference_a(), session.reference_b(), session.sample())
    {
        let (l, c, h) = sample.lab.to_lch();
        eprintln!("  Sample:      {} (L*={:.1}, C*={:.1}, h={:.1})", sample.hex, l, c, h);
        eprintln!("  Reference A: {} ΔE={:.2}", a.color.hex, metrics.d_a);
        eprintln!("  Reference B: {} ΔE={:.2}", b.color.hex, metrics.d_b);
    }
    eprintln!(
        "  Split:       {:.1}% A / {:.1}% B",
        metrics.toward_a, metrics.toward_b
    );
    eprintln!(
        "  Separation:  {:.1}% ({})",
        metrics.separation, metrics.separation_label
    );
    match metrics.closer() {
        Some(Closer::A) => eprintln!("  Verdict:     closer to reference A"),
        Some(Closer::B) => eprintln!("  Verdict:     closer to reference B"),
        None => eprintln!("  Verdict:     exact tie"),
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [--config FILE] [--save] <command>", program_name);
    eprintln!();
    eprintln!("Decide which of two reference colors a sample resembles more.");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  hex <ref_a> <ref_b> <sample>           Compare three hex colors");
    eprintln!("  image <file> <ref_a> <ref_b> <sample>  Compare three regions (x,y,w,h)");
    eprintln!("  export-csv                             Write saved comparisons as CSV");
    eprintln!("  export-json                            Write saved comparisons as JSON");
    eprintln!("  import <file.json>                     Import comparisons from JSON");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} hex '#ff0000' '#0000ff' '#e01030'", program_name);
    eprintln!("  {} --save image still.png 0,0,20,20 40,0,20,20 20,0,20,20", program_name);
}
