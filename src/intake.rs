//! Considerations intake: free text in, trade-off axes out.
//!
//! The pipeline is deliberately shallow:
//!
//! 1. [`normalize_text`] turns bullet glyphs into line breaks and drops `\r`.
//! 2. [`split_candidates`] splits on lines, then `;`, then `,`, de-duplicates
//!    case-insensitively, and keeps at most [`MAX_CANDIDATES`] phrases.
//! 3. [`infer_axis`] maps each phrase to an [`AxisCandidate`] with an ordered
//!    cascade: explicit ` vs ` separator, then `/`, then [`KEYWORD_RULES`],
//!    then the phrase itself with generic poles.
//!
//! Nothing here fails. Empty input simply yields no axes; deciding what to do
//! about that belongs to the caller.

#[cfg(test)]
#[path = "intake_test.rs"]
mod intake_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{BULLET_GLYPHS, MAX_CANDIDATES};

/// Generic low-end pole label.
pub const GENERIC_LOW: &str = "Lower";
/// Generic high-end pole label.
pub const GENERIC_HIGH: &str = "Higher";

/// An inferred trade-off axis: a display name and its two pole labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisCandidate {
    pub name: String,
    /// Label for the low (0.0) end.
    pub left: String,
    /// Label for the high (1.0) end.
    pub right: String,
}

/// A fixed axis produced when a keyword rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisTemplate {
    pub name: &'static str,
    pub left: &'static str,
    pub right: &'static str,
}

impl AxisTemplate {
    #[must_use]
    pub fn to_candidate(self) -> AxisCandidate {
        AxisCandidate { name: self.name.to_owned(), left: self.left.to_owned(), right: self.right.to_owned() }
    }
}

/// One row of the keyword table: any keyword found in the phrase selects `axis`.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub axis: AxisTemplate,
}

impl KeywordRule {
    /// Whether any keyword occurs in `lowered` (already ASCII-lowercased).
    #[must_use]
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }
}

/// Keyword heuristics in precedence order. The first matching row wins.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["money", "salary", "pay"],
        axis: AxisTemplate { name: "Money", left: "Lower", right: "Higher" },
    },
    KeywordRule {
        keywords: &["time", "balance", "burnout", "life"],
        axis: AxisTemplate { name: "Work-life", left: "All work", right: "All life" },
    },
    KeywordRule {
        keywords: &["growth", "learning", "skills"],
        axis: AxisTemplate { name: "Growth", left: "Stable", right: "Expansive" },
    },
    KeywordRule {
        keywords: &["meaning", "purpose", "impact"],
        axis: AxisTemplate { name: "Meaning", left: "Instrumental", right: "Purposeful" },
    },
    KeywordRule {
        keywords: &["risk", "security", "stability"],
        axis: AxisTemplate { name: "Risk", left: "Safer", right: "Riskier" },
    },
];

/// Replace bullet glyphs with line breaks, strip carriage returns, and trim.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c != '\r')
        .map(|c| if BULLET_GLYPHS.contains(&c) { '\n' } else { c })
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Split raw considerations into at most [`MAX_CANDIDATES`] distinct phrases.
///
/// Normalizes first, so bullet-separated input splits the same way as
/// line-separated input. Leading `- ` / `* ` list markers are dropped.
/// Duplicates are compared case-insensitively and the first spelling wins.
#[must_use]
pub fn split_candidates(raw: &str) -> Vec<String> {
    let normalized = normalize_text(raw);
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut dropped = 0usize;

    let phrases = normalized
        .split('\n')
        .flat_map(|line| line.split(';'))
        .flat_map(|part| part.split(','))
        .map(strip_list_marker)
        .filter(|p| !p.is_empty());

    for phrase in phrases {
        if !seen.insert(phrase.to_lowercase()) {
            continue;
        }
        if out.len() == MAX_CANDIDATES {
            dropped += 1;
            continue;
        }
        out.push(phrase.to_owned());
    }

    if dropped > 0 {
        debug!(kept = out.len(), dropped, "intake: candidate cap reached");
    }
    out
}

fn strip_list_marker(phrase: &str) -> &str {
    let trimmed = phrase.trim();
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .map_or(trimmed, str::trim)
}

/// Infer a trade-off axis for a single phrase. First matching rule wins.
#[must_use]
pub fn infer_axis(phrase: &str) -> AxisCandidate {
    let phrase = phrase.trim();
    let lowered = phrase.to_ascii_lowercase();

    if let Some(at) = lowered.find(" vs ") {
        return polar_axis(&phrase[..at], &phrase[at + " vs ".len()..]);
    }
    if let Some((left, right)) = phrase.split_once('/') {
        return polar_axis(left, right);
    }
    if let Some(rule) = KEYWORD_RULES.iter().find(|rule| rule.matches(&lowered)) {
        return rule.axis.to_candidate();
    }
    AxisCandidate { name: phrase.to_owned(), left: GENERIC_LOW.to_owned(), right: GENERIC_HIGH.to_owned() }
}

/// Axis spanning two explicit poles. An empty side falls back to the generic label.
fn polar_axis(left: &str, right: &str) -> AxisCandidate {
    let left = non_empty_or(left.trim(), GENERIC_LOW);
    let right = non_empty_or(right.trim(), GENERIC_HIGH);
    AxisCandidate { name: format!("{left} ↔ {right}"), left, right }
}

fn non_empty_or(s: &str, fallback: &str) -> String {
    if s.is_empty() { fallback.to_owned() } else { s.to_owned() }
}

/// Full intake: split the raw text and infer one axis per retained phrase.
///
/// Returns an empty vector when nothing usable was found.
#[must_use]
pub fn parse_considerations(raw: &str) -> Vec<AxisCandidate> {
    let axes: Vec<AxisCandidate> = split_candidates(raw).iter().map(|p| infer_axis(p)).collect();
    debug!(axes = axes.len(), "intake: parsed considerations");
    axes
}
