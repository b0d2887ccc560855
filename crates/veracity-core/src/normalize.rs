use serde_json::Value;
use thiserror::Error;

use crate::NormalizedReport;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    /// `riskScore` was absent or not a finite number.
    #[error("scoring service response did not contain a risk score")]
    MissingScore,
}

/// Bullet glyphs the service has been observed to emit, in
/// longest-match-first order. The first entry is the UTF-8 encoding of
/// `•` misread as Latin-1; one service version shipped its prompt with
/// that corruption, so matching must not assume a single byte sequence.
/// `-` and `*` are handled separately: they are bullets only when
/// followed by whitespace.
const BULLET_GLYPHS: &[&str] = &["\u{00e2}\u{20ac}\u{00a2}", "•", "●", "·"];

/// Normalize a raw scoring response into a [`NormalizedReport`].
///
/// The service has returned the two findings fields in two incompatible
/// shapes across versions: a markdown blob whose meaningful lines start
/// with a bullet glyph (legacy), or an array with one finding per entry
/// (current). Both collapse into the same flat list here so that nothing
/// downstream ever branches on the raw shape.
///
/// Pure function of its input: the same raw value always yields the same
/// report.
pub fn normalize(raw: &Value) -> Result<NormalizedReport, NormalizeError> {
    let risk_score = raw
        .get("riskScore")
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .ok_or(NormalizeError::MissingScore)?;

    Ok(NormalizedReport {
        risk_score,
        red_flags: findings(raw.get("redFlagsAnalysis")),
        recommendations: findings(raw.get("strategicRecommendation")),
    })
}

/// Convert one findings field into a flat list, whichever shape it has.
///
/// An absent or unexpectedly-typed field is an empty list, not an error:
/// the renderer shows a no-data placeholder instead.
fn findings(field: Option<&Value>) -> Vec<String> {
    match field {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(strip_bullet)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(blob)) => blob
            .lines()
            .filter_map(bulleted_line)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// Strip one leading bullet glyph plus surrounding whitespace. Text
/// without a bullet is returned trimmed; inner markdown (bold markers
/// and the like) is preserved for rich rendering.
fn strip_bullet(text: &str) -> &str {
    let trimmed = text.trim();
    strip_bullet_marker(trimmed).unwrap_or(trimmed)
}

/// Keep only lines that are actually list items in the legacy blob
/// shape; headings and prose between bullets are dropped.
fn bulleted_line(line: &str) -> Option<&str> {
    strip_bullet_marker(line.trim())
}

/// Match one leading bullet marker against already-trimmed text and
/// return what follows it, trimmed. The ASCII markers `-` and `*` only
/// count when followed by whitespace, so a finding opening with
/// markdown emphasis (`**…**`) is not mistaken for a list item and
/// loses nothing.
fn strip_bullet_marker(trimmed: &str) -> Option<&str> {
    for glyph in BULLET_GLYPHS {
        if let Some(rest) = trimmed.strip_prefix(glyph) {
            return Some(rest.trim());
        }
    }
    if let Some(rest) = trimmed.strip_prefix(['-', '*'])
        && rest.starts_with(char::is_whitespace)
    {
        return Some(rest.trim());
    }
    None
}
