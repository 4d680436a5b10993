//! CLI argument parsing

use crate::ScanOptions;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(ScanArgs),
    Help,
    Version,
}

/// Options for a scan of the current directory
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanArgs {
    pub quiet: bool,
    pub json: bool,
    pub sequential: bool,
    /// Seconds; `Some(0)` disables the timeout
    pub probe_timeout_secs: Option<u64>,
    pub ffmpeg: Option<String>,
}

impl ScanArgs {
    /// Apply the parsed flags on top of the default scan options
    #[must_use]
    pub fn to_scan_options(&self) -> ScanOptions {
        let mut opts = ScanOptions {
            parallel_probes: !self.sequential,
            ..ScanOptions::default()
        };

        if let Some(secs) = self.probe_timeout_secs {
            opts.probe_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(program) = &self.ffmpeg {
            opts.probe_program.clone_from(program);
        }

        opts
    }
}

/// Parse command line arguments (including the program name at index 0)
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut scan_args = ScanArgs::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                return Ok(CliArgs {
                    command: Command::Help,
                });
            }
            "--version" | "-v" => {
                return Ok(CliArgs {
                    command: Command::Version,
                });
            }
            "--quiet" => {
                scan_args.quiet = true;
            }
            "--json" => {
                scan_args.json = true;
            }
            "--sequential" => {
                scan_args.sequential = true;
            }
            "--probe-timeout" => {
                i += 1;
                if i >= args.len() {
                    return Err("--probe-timeout requires a value".to_string());
                }
                let secs: u64 = args[i]
                    .parse()
                    .map_err(|_| "--probe-timeout must be a non-negative integer".to_string())?;
                scan_args.probe_timeout_secs = Some(secs);
            }
            "--ffmpeg" => {
                i += 1;
                if i >= args.len() {
                    return Err("--ffmpeg requires a program path".to_string());
                }
                scan_args.ffmpeg = Some(args[i].clone());
            }
            arg if !arg.starts_with('-') => {
                return Err(format!(
                    "Unexpected argument: {arg} (the current directory is always scanned)"
                ));
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    Ok(CliArgs {
        command: Command::Scan(scan_args),
    })
}
