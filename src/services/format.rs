//! Human-readable duration formatting

/// Format seconds as `"<H> ч <M> мин <S> сек"`
///
/// Hours are not wrapped at 24.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours} ч {minutes} мин {secs} сек")
}
