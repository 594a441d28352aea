//! Output Rendering
//!
//! Text and JSON renderings of use case results. Text renderers return a
//! `String` so the binary decides where it goes.

use std::fmt::Write;
use std::path::PathBuf;

use serde_json::{json, Value};

use crate::application::{LayerQueryResult, ResolveResult, ToolchainListing};
use crate::domain::services::RunOutcome;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

const CHECK: &str = "✓";
const CROSS: &str = "✗";

pub fn render_resolve(result: &ResolveResult) -> String {
    let report = &result.report;
    let mut out = String::new();

    for item in &report.items {
        let icon = if item.succeeded() { CHECK } else { CROSS };
        let _ = writeln!(out, "{} {}", icon, item.identifier);
        for error in &item.errors {
            let _ = writeln!(out, "    error: {}", error);
        }
        for warning in &item.warnings {
            let _ = writeln!(out, "    warning: {}", warning);
        }
    }

    for warning in &report.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }
    for filter in &report.missing_filters {
        let _ = writeln!(out, "warning: context '{}' was not found", filter);
    }
    if report.cancelled {
        let _ = writeln!(out, "cancelled");
    }

    let summary = match report.outcome() {
        RunOutcome::Succeeded => "resolved",
        RunOutcome::SucceededWithWarnings => "resolved with warnings",
        RunOutcome::Failed => "failed",
    };
    let _ = writeln!(
        out,
        "{} of {} contexts {}",
        report.items.len() - report.failed.len(),
        report.items.len(),
        summary
    );
    out
}

pub fn resolve_json(result: &ResolveResult) -> Value {
    let report = &result.report;
    json!({
        "success": report.succeeded(),
        "cancelled": report.cancelled,
        "contexts": report.items,
        "failed": report.failed.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "missing_filters": report.missing_filters,
        "warnings": report.warnings,
        "index_saved": result.index_saved,
        "context_set_saved": result.context_set_saved,
    })
}

/// One entry per line.
pub fn render_lines<T: std::fmt::Display>(entries: &[T]) -> String {
    entries.iter().fold(String::new(), |mut out, entry| {
        let _ = writeln!(out, "{}", entry);
        out
    })
}

pub fn render_paths(paths: &[PathBuf]) -> String {
    render_lines(&paths.iter().map(|p| p.display()).collect::<Vec<_>>())
}

pub fn render_layers(result: &LayerQueryResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "available:");
    for layer in &result.available {
        let _ = write!(out, "  {}", layer.id);
        if let Some(category) = &layer.category {
            let _ = write!(out, " [{}]", category);
        }
        if let Some(path) = &layer.path {
            let _ = write!(out, " ({})", path.display());
        }
        let _ = writeln!(out);
    }

    for context in &result.contexts {
        let _ = writeln!(out, "{}:", context.context);
        if !context.referenced.is_empty() {
            let _ = writeln!(out, "  referenced: {}", context.referenced.join(", "));
        }
        let _ = writeln!(out, "  compatible: {}", context.compatible.join(", "));
        for conflict in &context.conflicts {
            let _ = writeln!(out, "  {} {}", CROSS, conflict);
        }
    }
    out
}

pub fn render_toolchains(listing: &[ToolchainListing]) -> String {
    let mut out = String::new();
    for toolchain in listing {
        let _ = writeln!(
            out,
            "{} {}={}",
            toolchain.toolchain,
            toolchain.variable,
            toolchain.root.display()
        );
    }
    out
}
