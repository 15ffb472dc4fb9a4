use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use twokinds_map::MapContent;

const DEFAULT_CONTENT_PATH: &str = "assets/map.ron";

/// Validates a map content file before it gets embedded into the viewer.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Content file to check
    #[arg(default_value = DEFAULT_CONTENT_PATH)]
    path: PathBuf,

    /// Also list every hotspot with the panel it opens
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let source = match std::fs::read_to_string(&args.path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("read {}: {err}", args.path.display());
            return ExitCode::FAILURE;
        }
    };

    let content = match MapContent::from_ron(&source) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("parse {}: {err}", args.path.display());
            return ExitCode::FAILURE;
        }
    };

    log::debug!(
        "{}: {} hotspots, {} panels, {} labels",
        args.path.display(),
        content.hotspots.len(),
        content.panels.len(),
        content.labels.len()
    );

    if args.verbose {
        for (index, hotspot) in content.hotspots.iter().enumerate() {
            println!(
                "  #{index:<3} [{:>7.1}, {:>7.1}] -> {}",
                hotspot.x, hotspot.y, hotspot.panel_id
            );
        }
    }

    let issues = content.validate();
    if issues.is_empty() {
        println!("{}: ok", args.path.display());
        return ExitCode::SUCCESS;
    }

    for issue in &issues {
        println!("{}: {issue}", args.path.display());
    }
    println!("{} issue(s) found", issues.len());
    ExitCode::FAILURE
}
