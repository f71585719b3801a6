//! Command-line entry point for pass arrow extraction and calibration diagnostics.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use pass_arrows::config::PipelineConfig;
use pass_arrows::{diagnostics, log, paths, report};

#[derive(Parser)]
#[command(name = "pass-arrows")]
#[command(about = "Estimate inaccurate-pass arrows from pass map screenshots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect arrows for every match in the manifest and write the JSON.
    Extract {
        /// Config file (defaults to config.json next to the executable).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the output JSON path.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Override the clustering gap in pixels.
        #[arg(long)]
        gap: Option<u32>,
    },

    /// Write arrow-pixel histograms and masked pitch crops for each match.
    Inspect {
        /// Config file (defaults to config.json next to the executable).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for diag_<name>.png files.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Print strip profiles and dominant colour buckets of screenshots.
    Palette {
        /// Images to report on.
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },

    /// Write the default config file.
    InitConfig {
        /// Destination (defaults to config.json next to the executable).
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        let log_path = paths::get_logs_dir().join("pass_arrows.log");
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));

    paths::ensure_directories()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract { config, out, gap } => run_extract(config, out, gap),
        Commands::Inspect { config, out_dir } => run_inspect(config, out_dir),
        Commands::Palette { images } => run_palette(&images),
        Commands::InitConfig { path } => {
            let path = path.unwrap_or_else(paths::get_config_path);
            PipelineConfig::save_default(&path)?;
            log(&format!("Default config written to {}", path.display()));
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> PipelineConfig {
    PipelineConfig::load(&path.unwrap_or_else(paths::get_config_path))
}

fn run_extract(config: Option<PathBuf>, out: Option<PathBuf>, gap: Option<u32>) -> Result<()> {
    let mut config = load_config(config);
    if let Some(out) = out {
        config.output_path = out;
    }
    if let Some(gap) = gap {
        config.detection.cluster_gap = gap;
    }

    let report = report::run_batch(&config);
    report::export::export_to_json(&report, &config.output_path)?;

    log(&format!("Saved: {}", config.output_path.display()));
    log(&format!(
        "Total estimated inaccurate passes: {}",
        report.total_arrows()
    ));
    Ok(())
}

fn run_inspect(config: Option<PathBuf>, out_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config(config);
    let out_dir = out_dir.unwrap_or_else(paths::get_diagnostics_dir);

    for input in &config.matches {
        if let Err(e) =
            diagnostics::inspect_match(input, &config.detection.pitch_color, &out_dir)
        {
            log(&format!("{}: {:#}", input.name, e));
        }
    }
    Ok(())
}

fn run_palette(images: &[PathBuf]) -> Result<()> {
    let mut failures = 0;
    for path in images {
        match report::load_rgb(path) {
            Ok(img) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                diagnostics::log_palette(&name, &img);
            }
            Err(e) => {
                log(&format!("{:#}", e));
                failures += 1;
            }
        }
    }

    if failures == images.len() {
        return Err(anyhow!("No readable images"));
    }
    Ok(())
}
