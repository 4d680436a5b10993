//! Video duration statistics CLI (vstat) - Main binary entry point

use std::process;
use std::sync::Arc;
use vstat::cli::args::{Command, ScanArgs, parse_args};
use vstat::cli::output::{
    format_grand_total, format_json, format_probe_failures, format_progress, format_saved,
    format_scan_time,
};
use vstat::models::DirectoryProgress;
use vstat::services::report::build_report;

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug vstat
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    let exit_code = match &cli_args.command {
        Command::Help => {
            print_help();
            0
        }
        Command::Version => {
            print_version();
            0
        }
        Command::Scan(scan_args) => handle_scan(scan_args),
    };

    process::exit(exit_code);
}

fn handle_scan(args: &ScanArgs) -> i32 {
    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot determine current directory: {e}");
            return 2;
        }
    };

    let mut opts = args.to_scan_options();

    if !args.quiet {
        opts.progress_notifier = Some(Arc::new(|progress: &DirectoryProgress| {
            eprintln!("{}", format_progress(progress));
        }));
        eprintln!("Analyzing video files in all subdirectories of {}", root.display());
    }

    let summary = match vstat::scan_statistics(&root, &opts) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return match e {
                vstat::Error::InvalidInput(_) => 2,
                _ => 4,
            };
        }
    };

    let model = build_report(&summary.records, summary.grand_total);

    if !args.quiet {
        eprintln!("{}", format_grand_total(summary.grand_total));
        eprintln!("{}", format_scan_time(summary.visited, summary.elapsed()));
    }
    if let Some(warning) = format_probe_failures(&summary.probe_failures) {
        eprintln!("{warning}");
    }

    if args.json {
        println!("{}", format_json(&summary.root, &model, &summary.probe_failures));
    }

    let outcome = vstat::io::write_reports(&root, &model, chrono::Utc::now());

    for (kind, result) in [("CSV report", &outcome.csv), ("HTML report", &outcome.html)] {
        match result {
            Ok(path) if !args.quiet => eprintln!("{}", format_saved(kind, path)),
            Ok(_) => {}
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    if outcome.all_written() { 0 } else { 3 }
}

fn print_help() {
    println!("Video duration statistics (vstat) - Total video playback time per directory");
    println!();
    println!("USAGE:");
    println!("    vstat [OPTIONS]");
    println!();
    println!("Scans the current directory recursively for .mp4, .mkv, .avi, .mov and .webm");
    println!("files, reads each duration with ffmpeg, and writes video_stats.csv plus a");
    println!("timestamped video_stats_<YYYY-MM-DD_HH-MM-SS>.html report.");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help                 Show this help message");
    println!("    -v, --version              Show version information");
    println!("    --quiet                    Suppress progress output");
    println!("    --json                     Also print the report model as JSON on stdout");
    println!("    --sequential               Probe files one at a time");
    println!("    --probe-timeout <S>        Give up on a file after S seconds (default: 60, 0 = never)");
    println!("    --ffmpeg <PROGRAM>         ffmpeg executable to use (default: ffmpeg)");
    println!();
    println!("ENVIRONMENT:");
    println!("    RUST_LOG                   Log filter, e.g. RUST_LOG=debug");
    println!();
    println!("EXIT CODES:");
    println!("    0  success");
    println!("    2  invalid usage");
    println!("    3  a report could not be written");
    println!("    4  the scan was aborted (unreadable directory)");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_DATE: &str = env!("GIT_DATE");
    const BUILD_TARGET: &str = env!("BUILD_TARGET");

    println!("vstat {VERSION}");
    println!("Commit: {GIT_HASH} ({GIT_DATE})");
    println!("Target: {BUILD_TARGET}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
