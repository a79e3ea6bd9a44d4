// WHY: Rule-based sentence boundary detection: cheap candidate cuts from one
// compiled pattern, then a sequential merge pass that cancels the spurious ones

pub mod classes;
mod exceptions;

use regex_automata::{meta::Regex, Input};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info};

use classes::class_count;
use exceptions::ExceptionMatcher;

/// Candidate boundary: a run of terminal punctuation, up to two optional
/// closing markers (closing quote or emphasis), then the whitespace a real
/// boundary consumes. The engine has no lookahead, so the sentence-opener
/// test happens separately against the text after the match.
static BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"[{terminals}]+[{quotes}*_]?[*_]?\s+",
        terminals = classes::TERMINALS,
        quotes = classes::DOUBLE_QUOTES,
    );
    Regex::new(&pattern).expect("boundary pattern compiles")
});

/// Enumerated-list marker: one ASCII capital or digit, optional space, a
/// period. "B." in "B. Do that." is a label, not a sentence end.
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]\s?\.\s*$").expect("list marker pattern compiles"));

/// Dangling close-paren pitfall: a fragment opening with an alphanumeric and
/// a closing parenthesis ("3) Do it.") carries an unmatched bracket by
/// construction, so parity must not get a vote.
static PITFALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]\s*\)").expect("pitfall pattern compiles"));

/// Configuration for a [`SentenceSegmenter`].
#[derive(Debug, Clone)]
pub struct SegmenterOptions {
    /// Abbreviation tokens; each suppresses the boundary after `<token>.`.
    /// Replaces the built-in list entirely. An empty list disables
    /// abbreviation suppression.
    pub exceptions: Vec<String>,
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self {
            exceptions: classes::EXCEPTIONS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Construction-time configuration failure. Segmentation itself never fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The exception list could not be compiled into a matcher.
    #[error("invalid exception list: {0}")]
    InvalidExceptions(#[from] regex_automata::meta::BuildError),
}

/// Rule-based sentence splitter.
///
/// `segment` cuts text at every candidate boundary (terminal punctuation,
/// optional closing markers, whitespace, then a capital, digit, or quoted
/// capital), then merges fragments back together when a cut was spurious:
/// after an abbreviation, after an enumerated-list marker, or inside an
/// unbalanced quote or bracket span. Balance is parity-counted, not matched
/// as a stack, which keeps the pass linear and handles the overwhelmingly
/// common case of one span crossing one boundary.
///
/// All compiled state is immutable after construction, so one instance can
/// serve any number of threads without locking.
#[derive(Debug)]
pub struct SentenceSegmenter {
    exceptions: ExceptionMatcher,
}

impl SentenceSegmenter {
    /// Build a segmenter from `options`. Fails only when the exception list
    /// cannot be compiled.
    pub fn new(options: SegmenterOptions) -> Result<Self, ConfigError> {
        let exceptions = ExceptionMatcher::compile(&options.exceptions)?;
        info!(
            "sentence segmenter ready: {} exception tokens",
            options.exceptions.len()
        );
        Ok(Self { exceptions })
    }

    /// Build a segmenter with the built-in abbreviation list.
    pub fn with_default_exceptions() -> Result<Self, ConfigError> {
        Self::new(SegmenterOptions::default())
    }

    /// Split `text` into sentences.
    ///
    /// Sentences come back in input order, each the space-joined run of one
    /// or more fragments; no characters are lost beyond the whitespace
    /// consumed at accepted boundaries, and no sentence is empty. Empty or
    /// all-whitespace input yields an empty vector.
    pub fn segment(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let fragments = cut_fragments(text);
        debug!(
            "segmenting {} bytes across {} fragments",
            text.len(),
            fragments.len()
        );

        let mut sentences = Vec::new();
        let mut memo = String::new();
        // Running counts over the accumulated memo; folding per fragment
        // keeps the parity check from rescanning merged text.
        let mut quote_count = 0usize;
        let mut bracket_count = 0usize;

        let last = fragments.len() - 1;
        for (i, fragment) in fragments.iter().enumerate() {
            let fragment_quotes = class_count(fragment, classes::DOUBLE_QUOTES);
            let fragment_brackets = class_count(fragment, classes::BRACKETS);
            let unbalanced = (quote_count + fragment_quotes) % 2 != 0
                || (bracket_count + fragment_brackets) % 2 != 0;

            // The final fragment always flushes so no trailing text is lost.
            let suppress = i != last
                && (self.exceptions.is_exception(fragment)
                    || LIST_MARKER.is_match(Input::new(fragment.trim()))
                    || (!PITFALL.is_match(Input::new(fragment)) && unbalanced));

            if suppress {
                if !memo.is_empty() {
                    memo.push(' ');
                }
                memo.push_str(fragment);
                quote_count += fragment_quotes;
                bracket_count += fragment_brackets;
                continue;
            }

            if memo.is_empty() {
                sentences.push((*fragment).to_string());
            } else {
                memo.push(' ');
                memo.push_str(fragment);
                sentences.push(std::mem::take(&mut memo));
            }
            quote_count = 0;
            bracket_count = 0;
        }

        debug!("emitted {} sentences", sentences.len());
        sentences
    }
}

/// Shared segmenter built from the built-in abbreviation list.
pub static DEFAULT_SEGMENTER: LazyLock<SentenceSegmenter> = LazyLock::new(|| {
    SentenceSegmenter::with_default_exceptions().expect("built-in exception list compiles")
});

/// Split `text` into sentences with the shared default segmenter.
pub fn segment(text: &str) -> Vec<String> {
    DEFAULT_SEGMENTER.segment(text)
}

/// Cut `text` at every verified candidate boundary. The left fragment keeps
/// its terminal punctuation and closing markers; the boundary whitespace is
/// consumed. Fragments are never empty.
fn cut_fragments(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut fragment_start = 0;
    let mut scan_from = 0;

    while scan_from < text.len() {
        let Some(found) = BOUNDARY.find(Input::new(&text[scan_from..])) else {
            break;
        };
        let match_start = scan_from + found.start();
        let match_end = scan_from + found.end();

        if opens_sentence(&text[match_end..]) {
            // The cut lands where the matched whitespace begins.
            let cut = match text[match_start..match_end].find(|c: char| c.is_whitespace()) {
                Some(ws) => match_start + ws,
                // Unreachable: the boundary pattern requires trailing whitespace.
                None => match_end,
            };
            fragments.push(&text[fragment_start..cut]);
            fragment_start = match_end;
        }
        // Resuming at the match end on failure is safe: a whitespace run
        // cannot contain a later boundary start, and a boundary starting at
        // the rejected opener is found by the next iteration.
        scan_from = match_end;
    }

    fragments.push(&text[fragment_start..]);
    fragments
}

/// Sentence-opener test: an ASCII capital or digit, optionally preceded by
/// one opening quote of either class.
fn opens_sentence(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() || first.is_ascii_digit() => true,
        Some(first) if classes::is_quote(first) => {
            matches!(chars.next(), Some(second) if second.is_ascii_uppercase() || second.is_ascii_digit())
        }
        _ => false,
    }
}
