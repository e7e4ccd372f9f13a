//! Structural metrics over normalized regulation text.
//!
//! Everything here is a pure function of the input text. The reference and
//! defined-term counts are heuristics tied to this publisher's conventions:
//! citations use the section sign and dotted numbers, and defined terms are
//! set in typographic double quotes. Straight quotes are deliberately not
//! counted; widening the match would silently shift historical comparisons.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

/// Section citations: a section sign, optional space, dotted number.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"§\s*\d+(?:\.\d+)*").expect("valid regex"));

/// Defined terms: a non-empty span in typographic double quotes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static QUOTED_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"“[^”]+”").expect("valid regex"));

/// Metrics computed for one captured document.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Whitespace-separated token count.
    pub word_count: u64,
    /// SHA-256 of the exact text bytes, lowercase hex.
    pub fingerprint: String,
    /// Section references per 1000 words. Zero when the text has no words.
    pub ref_density: f64,
    /// Quoted defined terms per word. Zero when the text has no words.
    pub def_density: f64,
}

/// Compute all metrics over normalized text.
///
/// Pure and deterministic: equal inputs always produce equal metrics, which
/// is what makes fingerprints comparable across runs.
#[must_use]
pub fn compute(text: &str) -> Metrics {
    let word_count = text.split_whitespace().count() as u64;
    let ref_count = SECTION_REF.find_iter(text).count() as u64;
    let term_count = QUOTED_TERM.find_iter(text).count() as u64;

    let (ref_density, def_density) = if word_count == 0 {
        (0.0, 0.0)
    } else {
        (
            ref_count as f64 / word_count as f64 * 1000.0,
            term_count as f64 / word_count as f64,
        )
    };

    Metrics {
        word_count,
        fingerprint: fingerprint(text),
        ref_density,
        def_density,
    }
}

/// SHA-256 of the exact text bytes, as lowercase hex.
#[must_use]
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
