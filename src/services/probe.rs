//! Duration probing through an external media tool

use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::LazyLock;
use std::thread;
use std::time::{Duration, Instant};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Duration: (\d+):(\d+):(\d+)").expect("duration pattern is valid")
});

/// Reason a file's duration could not be determined
#[derive(Debug)]
pub enum ProbeError {
    /// The external tool could not be started
    Spawn(std::io::Error),
    /// Waiting on the external tool failed
    Wait(std::io::Error),
    /// The tool did not finish within the configured bound
    TimedOut(Duration),
    /// The tool's output contained no `Duration: HH:MM:SS` token
    Unparseable,
}

impl ProbeError {
    /// Short machine-readable code recorded alongside the failure
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ProbeError::Spawn(_) => "PROBE_SPAWN",
            ProbeError::Wait(_) => "PROBE_WAIT",
            ProbeError::TimedOut(_) => "PROBE_TIMEOUT",
            ProbeError::Unparseable => "PROBE_PARSE",
        }
    }
}

impl std::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeError::Spawn(e) => write!(f, "failed to start probe: {e}"),
            ProbeError::Wait(e) => write!(f, "failed waiting for probe: {e}"),
            ProbeError::TimedOut(limit) => {
                write!(f, "probe did not finish within {}s", limit.as_secs_f64())
            }
            ProbeError::Unparseable => write!(f, "no duration found in probe output"),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Spawn(e) | ProbeError::Wait(e) => Some(e),
            ProbeError::TimedOut(_) | ProbeError::Unparseable => None,
        }
    }
}

/// Source of playback durations, in whole seconds
pub trait DurationProbe: Send + Sync {
    fn probe(&self, path: &Path) -> Result<u64, ProbeError>;
}

/// Extract the first `Duration: HH:MM:SS` token from tool output
///
/// Hours are unbounded and minutes/seconds are not range-checked; fractional
/// seconds after the token are ignored.
#[must_use]
pub fn parse_duration(text: &str) -> Option<u64> {
    let caps = DURATION_PATTERN.captures(text)?;
    let hours: u64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Probe implementation that runs `ffmpeg -i <file>` and scans its banner
#[derive(Debug, Clone)]
pub struct FfmpegProbe {
    program: String,
    timeout: Option<Duration>,
}

impl FfmpegProbe {
    #[must_use]
    pub fn new(program: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Run the tool and return its combined stdout and stderr
    fn run(&self, path: &Path) -> Result<String, ProbeError> {
        let mut child = Command::new(&self.program)
            .arg("-hide_banner")
            .arg("-nostdin")
            .arg("-i")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(ProbeError::Spawn)?;

        // Drain both pipes on their own threads so a chatty tool cannot block
        // on a full pipe while we wait for it.
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let waited = wait_with_deadline(&mut child, self.timeout);

        let mut output = join_reader(stdout_reader);
        output.push_str(&join_reader(stderr_reader));

        waited?;
        Ok(output)
    }
}

impl DurationProbe for FfmpegProbe {
    fn probe(&self, path: &Path) -> Result<u64, ProbeError> {
        let output = self.run(path)?;
        // ffmpeg exits non-zero without an output file; only the text matters.
        let seconds = parse_duration(&output).ok_or(ProbeError::Unparseable)?;
        log::trace!("Probed {}: {seconds}s", path.display());
        Ok(seconds)
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<thread::JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            if let Err(err) = pipe.read_to_end(&mut buf) {
                log::debug!("Failed to read probe output: {err}");
            }
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Wait for the child, killing it once `timeout` has elapsed
fn wait_with_deadline(child: &mut Child, timeout: Option<Duration>) -> Result<(), ProbeError> {
    let Some(limit) = timeout else {
        child.wait().map_err(ProbeError::Wait)?;
        return Ok(());
    };

    let deadline = Instant::now() + limit;
    loop {
        if child.try_wait().map_err(ProbeError::Wait)?.is_some() {
            return Ok(());
        }

        if Instant::now() >= deadline {
            if let Err(err) = child.kill() {
                log::debug!("Failed to kill timed-out probe: {err}");
            }
            // Reap the process so it does not linger as a zombie.
            if let Err(err) = child.wait() {
                log::debug!("Failed to reap timed-out probe: {err}");
            }
            return Err(ProbeError::TimedOut(limit));
        }

        thread::sleep(WAIT_POLL_INTERVAL);
    }
}
