//! Golden JSON files for session reports.
//!
//! A report is rendered as pretty JSON with every object's keys sorted and a
//! trailing newline. Verification compares that text with the golden file and
//! names the first line that differs. Setting `ALEMBIC_UPDATE_SNAPSHOTS=1`
//! rewrites the golden instead.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Environment variable that switches verification to rewriting goldens.
pub const UPDATE_SNAPSHOTS_ENV: &str = "ALEMBIC_UPDATE_SNAPSHOTS";

/// What [`verify_golden`] does with the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldenMode {
    /// Compare with the file on disk.
    Verify,
    /// Overwrite the file on disk.
    Update,
}

impl GoldenMode {
    /// Read the mode from [`UPDATE_SNAPSHOTS_ENV`].
    pub fn from_env() -> Self {
        match std::env::var(UPDATE_SNAPSHOTS_ENV).as_deref() {
            Ok("1") | Ok("true") | Ok("yes") => GoldenMode::Update,
            _ => GoldenMode::Verify,
        }
    }
}

/// Check `report` against the golden at `path` in the mode set by the environment.
pub fn verify_golden<T: Serialize>(path: impl AsRef<Path>, report: &T) -> Result<()> {
    verify_golden_with(GoldenMode::from_env(), path.as_ref(), report)
}

/// Check `report` against the golden at `path` in an explicit mode.
pub fn verify_golden_with<T: Serialize>(mode: GoldenMode, path: &Path, report: &T) -> Result<()> {
    let rendered = render_report(report)?;

    if mode == GoldenMode::Update {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create golden directory {}", dir.display()))?;
        }
        fs::write(path, &rendered)
            .with_context(|| format!("Failed to write golden {}", path.display()))?;
        info!(path = %path.display(), "golden rewritten");
        return Ok(());
    }

    let golden = fs::read_to_string(path).with_context(|| {
        format!(
            "No golden at {} (set {UPDATE_SNAPSHOTS_ENV}=1 to record it)",
            path.display()
        )
    })?;
    if let Some((line, expected, actual)) = first_difference(&golden, &rendered) {
        bail!(
            "{} differs at line {line}: expected `{expected}`, got `{actual}` \
             (set {UPDATE_SNAPSHOTS_ENV}=1 to accept)",
            path.display()
        );
    }
    Ok(())
}

/// Pretty JSON with sorted keys and a final newline.
pub fn render_report<T: Serialize>(report: &T) -> Result<String> {
    let value = serde_json::to_value(report).context("Failed to serialize report")?;
    let mut text =
        serde_json::to_string_pretty(&sorted(value)).context("Failed to format report")?;
    text.push('\n');
    Ok(text)
}

fn sorted(value: Value) -> Value {
    match value {
        Value::Object(fields) => {
            let ordered: BTreeMap<String, Value> = fields
                .into_iter()
                .map(|(key, inner)| (key, sorted(inner)))
                .collect();
            Value::Object(ordered.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        leaf => leaf,
    }
}

/// One-based line number plus the expected and actual text of the first
/// mismatching line. A missing line reads as `<end of file>`.
fn first_difference<'a>(golden: &'a str, rendered: &'a str) -> Option<(usize, &'a str, &'a str)> {
    const EOF: &str = "<end of file>";
    let mut expected = golden.lines();
    let mut actual = rendered.lines();
    let mut line = 1;
    loop {
        match (expected.next(), actual.next()) {
            (None, None) => {
                return (golden != rendered).then_some((line, EOF, EOF));
            }
            (e, a) if e != a => return Some((line, e.unwrap_or(EOF), a.unwrap_or(EOF))),
            _ => line += 1,
        }
    }
}
