//! CLI progress display utilities
//!
//! Step indicators with emojis, and the entry progress bar used while packing.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanBytes, HumanDuration, ProgressBar, ProgressStyle};
use onepack::pack::{PACK_STEPS, PackPhase};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading the manifest
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Link - for resolving file references
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");
/// Package - for packing entries
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Floppy disk - for writing the archive
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Emoji shown next to a phase's step line
#[must_use]
pub fn phase_emoji(phase: PackPhase) -> Emoji<'static, 'static> {
    match phase {
        PackPhase::LoadingManifest => LOOKING_GLASS,
        PackPhase::Resolving => LINK,
        PackPhase::Packing => PACKAGE,
        PackPhase::Writing => DISK,
        PackPhase::Complete => SPARKLE,
    }
}

/// Step line for a phase: `[1/4] 🔍 Reading mod.json...`
///
/// `None` for phases without a step number.
#[must_use]
pub fn step_line(phase: PackPhase) -> Option<String> {
    phase.step().map(|step| {
        format!(
            "{} {}{}...",
            style(format!("[{step}/{PACK_STEPS}]")).bold().dim(),
            phase_emoji(phase),
            phase.as_str()
        )
    })
}

/// Completion message: `✨ Done in 2s` or `✨ Done in 2s (1.20 KiB)`
#[must_use]
pub fn done_line(elapsed: Duration, archive_size: Option<usize>) -> String {
    match archive_size {
        Some(size) => format!(
            "{} Done in {} ({})",
            SPARKLE,
            HumanDuration(elapsed),
            HumanBytes(size as u64)
        ),
        None => format!("{} Done in {}", SPARKLE, HumanDuration(elapsed)),
    }
}

/// Progress bar style for determinate progress
///
/// Format: `[████████░░░░░░░░] 5/10 textures/a.png`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .expect("valid template")
}

/// Create a simple progress bar
#[must_use]
pub fn simple_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(bar_style());
    pb.set_message(msg.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_lines() {
        console::set_colors_enabled(false);
        let line = step_line(PackPhase::Resolving).unwrap();
        assert!(line.starts_with("[2/4] "));
        assert!(line.ends_with("Resolving files..."));
        assert!(step_line(PackPhase::Complete).is_none());
    }

    #[test]
    fn test_done_line_mentions_size() {
        let line = done_line(Duration::from_secs(2), Some(2048));
        assert!(line.contains("Done in"));
        assert!(line.ends_with("(2.00 KiB)"));
        assert!(!done_line(Duration::from_secs(2), None).contains('('));
    }

    #[test]
    fn test_simple_bar() {
        let pb = simple_bar(3, "Packing");
        pb.inc(2);
        assert_eq!(pb.position(), 2);
        assert_eq!(pb.length(), Some(3));
    }
}
