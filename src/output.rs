//! Console output for both tools.
//!
//! Everything the user reads is plain text on stdout, except per-file errors
//! which go to stderr. Sizes are whole kilobytes (`round(bytes / 1024)`).
//!
//! # Output Format
//!
//! ## optimize-images
//!
//! ```text
//! Found 3 images — starting optimization...
//! Optimized: public/hero.jpg → webp 180KB, avif 95KB
//! Skipped: public/favicon.png (tiny icon)
//! Error processing public/broken.png: Processing failed: ...   (stderr)
//!
//! Optimization summary:
//! public/hero.jpg — original 512KB, webp 180KB, avif 95KB
//! public/favicon.png — skipped (tiny icon)
//! public/broken.png — ERROR: Processing failed: ...
//!
//! Done. New .webp and .avif files were created next to originals. ...
//! ```
//!
//! ## overwrite-originals
//!
//! ```text
//! Found 2 raster images — overwriting originals with optimized versions.
//! Overwrote: screenshots/home.png — 240KB → 88KB
//! Skipped: public/dot.png (too small)
//!
//! Summary:
//! screenshots/home.png — 240KB → 88KB
//! public/dot.png — skipped (too small)
//!
//! Done. Originals have been overwritten. Please review changes and run git diff to inspect.
//! ```
//!
//! # Architecture
//!
//! Each message has a `format_*` function (returns `String` or `Vec<String>`)
//! for testability and a `print_*` wrapper that writes it. Format functions
//! are pure: no I/O, no side effects.

use crate::imaging::round_kb;
use crate::results::{ConversionResult, Outcome, OutputKind};

/// Which binary is talking. Selects the wording of every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// `optimize-images`: WebP + AVIF siblings.
    Derivatives,
    /// `overwrite-originals`: in-place recompression.
    Overwrite,
}

fn kb(bytes: u64) -> String {
    format!("{}KB", round_kb(bytes))
}

fn size_of(result: &ConversionResult, kind: OutputKind) -> u64 {
    result.output_size(kind).unwrap_or(0)
}

// ============================================================================
// Start / nothing found
// ============================================================================

pub fn format_found(tool: Tool, count: usize) -> String {
    match tool {
        Tool::Derivatives => format!("Found {} images — starting optimization...", count),
        Tool::Overwrite => format!(
            "Found {} raster images — overwriting originals with optimized versions.",
            count
        ),
    }
}

pub fn print_found(tool: Tool, count: usize) {
    println!("{}", format_found(tool, count));
}

pub fn format_nothing_found(tool: Tool) -> &'static str {
    match tool {
        Tool::Derivatives => "No images found to optimize.",
        Tool::Overwrite => "No raster images found to overwrite.",
    }
}

pub fn print_nothing_found(tool: Tool) {
    println!("{}", format_nothing_found(tool));
}

// ============================================================================
// Per-file progress
// ============================================================================

/// One progress line for a finished file.
pub fn format_progress(tool: Tool, result: &ConversionResult) -> String {
    let file = &result.file;
    match (&result.outcome, tool) {
        (Outcome::Converted { .. }, Tool::Derivatives) => format!(
            "Optimized: {} → webp {}, avif {}",
            file,
            kb(size_of(result, OutputKind::WebP)),
            kb(size_of(result, OutputKind::Avif)),
        ),
        (Outcome::Converted { original, .. }, Tool::Overwrite) => format!(
            "Overwrote: {} — {} → {}",
            file,
            kb(*original),
            kb(size_of(result, OutputKind::Optimized)),
        ),
        (Outcome::Skipped(reason), _) => format!("Skipped: {} ({})", file, reason.label()),
        (Outcome::Failed(message), Tool::Derivatives) => {
            format!("Error processing {}: {}", file, message)
        }
        (Outcome::Failed(message), Tool::Overwrite) => {
            format!("Error optimizing {}: {}", file, message)
        }
    }
}

/// Print a progress line; failures go to stderr.
pub fn print_progress(tool: Tool, result: &ConversionResult) {
    let line = format_progress(tool, result);
    if result.is_failure() {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

// ============================================================================
// Summary
// ============================================================================

fn summary_line(tool: Tool, result: &ConversionResult) -> String {
    let file = &result.file;
    match &result.outcome {
        Outcome::Failed(message) => format!("{} — ERROR: {}", file, message),
        Outcome::Skipped(reason) => format!("{} — {}", file, reason),
        Outcome::Converted { original, .. } => match tool {
            Tool::Derivatives => format!(
                "{} — original {}, webp {}, avif {}",
                file,
                kb(*original),
                kb(size_of(result, OutputKind::WebP)),
                kb(size_of(result, OutputKind::Avif)),
            ),
            Tool::Overwrite => format!(
                "{} — {} → {}",
                file,
                kb(*original),
                kb(size_of(result, OutputKind::Optimized)),
            ),
        },
    }
}

/// Blank line, header, then one line per result in processing order.
pub fn format_summary(tool: Tool, results: &[ConversionResult]) -> Vec<String> {
    let header = match tool {
        Tool::Derivatives => "Optimization summary:",
        Tool::Overwrite => "Summary:",
    };
    let mut lines = vec![String::new(), header.to_string()];
    lines.extend(results.iter().map(|r| summary_line(tool, r)));
    lines
}

pub fn print_summary(tool: Tool, results: &[ConversionResult]) {
    for line in format_summary(tool, results) {
        println!("{}", line);
    }
}

// ============================================================================
// Closing note
// ============================================================================

pub fn format_done(tool: Tool) -> Vec<String> {
    let note = match tool {
        Tool::Derivatives => {
            "Done. New .webp and .avif files were created next to originals. \
             Review them and replace originals if you want smaller assets in repo."
        }
        Tool::Overwrite => {
            "Done. Originals have been overwritten. \
             Please review changes and run git diff to inspect."
        }
    };
    vec![String::new(), note.to_string()]
}

pub fn print_done(tool: Tool) {
    for line in format_done(tool) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{OutputSize, SkipReason};

    fn derived(file: &str, original: u64, webp: u64, avif: u64) -> ConversionResult {
        ConversionResult::converted(
            file,
            original,
            vec![
                OutputSize {
                    kind: OutputKind::WebP,
                    bytes: webp,
                },
                OutputSize {
                    kind: OutputKind::Avif,
                    bytes: avif,
                },
            ],
        )
    }

    fn overwritten(file: &str, original: u64, optimized: u64) -> ConversionResult {
        ConversionResult::converted(
            file,
            original,
            vec![OutputSize {
                kind: OutputKind::Optimized,
                bytes: optimized,
            }],
        )
    }

    fn failed(file: &str, message: &str) -> ConversionResult {
        ConversionResult {
            file: file.to_string(),
            outcome: Outcome::Failed(message.to_string()),
        }
    }

    // =========================================================================
    // Start lines
    // =========================================================================

    #[test]
    fn found_line_wording() {
        assert_eq!(
            format_found(Tool::Derivatives, 3),
            "Found 3 images — starting optimization..."
        );
        assert_eq!(
            format_found(Tool::Overwrite, 1),
            "Found 1 raster images — overwriting originals with optimized versions."
        );
    }

    #[test]
    fn nothing_found_wording() {
        assert_eq!(
            format_nothing_found(Tool::Derivatives),
            "No images found to optimize."
        );
        assert_eq!(
            format_nothing_found(Tool::Overwrite),
            "No raster images found to overwrite."
        );
    }

    // =========================================================================
    // Progress
    // =========================================================================

    #[test]
    fn derivative_progress_rounds_to_kb() {
        let result = derived("public/hero.jpg", 524_288, 184_320, 97_000);
        assert_eq!(
            format_progress(Tool::Derivatives, &result),
            "Optimized: public/hero.jpg → webp 180KB, avif 95KB"
        );
    }

    #[test]
    fn overwrite_progress_shows_before_and_after() {
        let result = overwritten("screenshots/home.png", 245_760, 90_112);
        assert_eq!(
            format_progress(Tool::Overwrite, &result),
            "Overwrote: screenshots/home.png — 240KB → 88KB"
        );
    }

    #[test]
    fn skip_progress_uses_reason_label() {
        let result = ConversionResult::skipped("public/favicon.png", SkipReason::TinyIcon);
        assert_eq!(
            format_progress(Tool::Derivatives, &result),
            "Skipped: public/favicon.png (tiny icon)"
        );
    }

    #[test]
    fn failure_progress_wording_per_tool() {
        let result = failed("public/broken.png", "Processing failed: truncated");
        assert_eq!(
            format_progress(Tool::Derivatives, &result),
            "Error processing public/broken.png: Processing failed: truncated"
        );
        assert_eq!(
            format_progress(Tool::Overwrite, &result),
            "Error optimizing public/broken.png: Processing failed: truncated"
        );
    }

    // =========================================================================
    // Summary
    // =========================================================================

    #[test]
    fn derivative_summary_covers_every_result() {
        let results = vec![
            derived("public/hero.jpg", 524_288, 184_320, 97_280),
            ConversionResult::skipped("public/favicon.png", SkipReason::TinyIcon),
            failed("public/broken.png", "bad header"),
        ];

        assert_eq!(
            format_summary(Tool::Derivatives, &results),
            vec![
                "",
                "Optimization summary:",
                "public/hero.jpg — original 512KB, webp 180KB, avif 95KB",
                "public/favicon.png — skipped (tiny icon)",
                "public/broken.png — ERROR: bad header",
            ]
        );
    }

    #[test]
    fn overwrite_summary_lines() {
        let results = vec![
            overwritten("screenshots/home.png", 245_760, 90_112),
            ConversionResult::skipped("public/dot.png", SkipReason::TooSmall),
            ConversionResult::skipped("public/anim.gif", SkipReason::UnsupportedExtension),
        ];

        assert_eq!(
            format_summary(Tool::Overwrite, &results),
            vec![
                "",
                "Summary:",
                "screenshots/home.png — 240KB → 88KB",
                "public/dot.png — skipped (too small)",
                "public/anim.gif — skipped (unsupported ext)",
            ]
        );
    }

    #[test]
    fn summary_of_nothing_is_just_header() {
        assert_eq!(format_summary(Tool::Overwrite, &[]), vec!["", "Summary:"]);
    }

    #[test]
    fn sub_kilobyte_sizes_round() {
        let result = overwritten("a.jpg", 1536, 511);
        assert_eq!(format_progress(Tool::Overwrite, &result), "Overwrote: a.jpg — 2KB → 0KB");
    }

    // =========================================================================
    // Done
    // =========================================================================

    #[test]
    fn done_note_follows_blank_line() {
        let lines = format_done(Tool::Derivatives);
        assert_eq!(lines[0], "");
        assert_eq!(
            lines[1],
            "Done. New .webp and .avif files were created next to originals. \
             Review them and replace originals if you want smaller assets in repo."
        );
        assert_eq!(
            format_done(Tool::Overwrite)[1],
            "Done. Originals have been overwritten. Please review changes and run git diff to inspect."
        );
    }
}
