//! Rendering of finished summaries to presentation text files.
//!
//! The file layout (SUMMARY / KEY POINTS / KEY TOPICS / READING METRICS) is a
//! presentation concern: the voice pipeline and human reviewers both consume
//! it, but the canonical data stays in [`SummaryResult`].

use crate::summarize::SummaryResult;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Provenance details written into the report header.
#[derive(Debug, Clone, Default)]
pub struct ReportMeta {
    /// Source document description, usually the PDF path.
    pub source: String,
    /// Page count of the source PDF, when known.
    pub page_count: Option<usize>,
}

/// Render a summary result into the presentation text format.
pub fn render_summary(result: &SummaryResult, meta: &ReportMeta) -> String {
    let mut out = String::new();
    let processed_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    let _ = writeln!(out, "VIDEOBRIEF - VIDEO READY SUMMARY");
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out);
    let _ = writeln!(out, "Source: {}", meta.source);
    if let Some(pages) = meta.page_count {
        let _ = writeln!(out, "Pages: {pages}");
    }
    let _ = writeln!(out, "Original Word Count: {}", result.original_word_count);
    let _ = writeln!(out, "Summary Word Count: {}", result.word_count);
    let _ = writeln!(
        out,
        "Estimated Duration: {}",
        format_duration(result.estimated_duration_minutes)
    );
    let _ = writeln!(out, "Processed: {processed_at}");
    let _ = writeln!(out);

    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{}", "-".repeat(20));
    let _ = writeln!(out, "{}", result.summary);
    let _ = writeln!(out);

    let _ = writeln!(out, "KEY POINTS");
    let _ = writeln!(out, "{}", "-".repeat(20));
    for (index, point) in result.key_points.iter().enumerate() {
        let _ = writeln!(out, "{}. {point}", index + 1);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "KEY TOPICS");
    let _ = writeln!(out, "{}", "-".repeat(20));
    for (topic, count) in &result.key_topics {
        let _ = writeln!(out, "- {topic} (mentioned {count} times)");
    }

    if !result.reading_metrics.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "READING METRICS");
        let _ = writeln!(out, "{}", "-".repeat(20));
        let mut metrics: Vec<(&String, &f64)> = result.reading_metrics.iter().collect();
        metrics.sort_by_key(|(name, _)| name.as_str());
        for (name, value) in metrics {
            let _ = writeln!(out, "- {}: {value:.2}", title_case(name));
        }
    }

    out
}

/// Render and write a summary to `output_path`, creating parent directories.
pub fn write_summary(
    output_path: &Path,
    result: &SummaryResult,
    meta: &ReportMeta,
) -> std::io::Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, render_summary(result, meta))?;
    tracing::info!(path = %output_path.display(), "Summary saved");
    Ok(())
}

/// Derive a default output filename next to the source PDF.
pub fn default_output_path(pdf_path: &Path, duration_minutes: u32) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("summary");
    PathBuf::from(format!(
        "{}_summary_{duration_minutes}min.txt",
        clean_filename(stem)
    ))
}

/// Replace characters that are unsafe in filenames.
fn clean_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_matches(['.', '_']);
    if trimmed.is_empty() {
        "unnamed_file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Human-readable duration, e.g. `45 seconds`, `12.5 minutes`, `1h 20.0m`.
pub fn format_duration(minutes: f64) -> String {
    if minutes < 1.0 {
        format!("{} seconds", (minutes * 60.0).round() as u64)
    } else if minutes < 60.0 {
        format!("{minutes:.1} minutes")
    } else {
        let hours = (minutes / 60.0).floor() as u64;
        let remaining = minutes - hours as f64 * 60.0;
        if remaining > 0.0 {
            format!("{hours}h {remaining:.1}m")
        } else {
            format!("{hours} hours")
        }
    }
}

fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
