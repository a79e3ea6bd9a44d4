// WHY: One compiled alternation replaces a per-fragment walk over the token
// list, and compiling it once pins the cost at configuration time

use regex_automata::{meta::Regex, Input};
use tracing::debug;

use super::ConfigError;

/// Compiled abbreviation matcher, shared read-only by every `segment` call.
///
/// Tokens become a single alternation with a literal trailing period
/// (`Dr` compiles as `Dr\.`) tested as an unanchored substring search, so an
/// exception anywhere in a fragment suppresses the boundary after it. Tokens
/// are inserted verbatim: pattern metacharacters keep their pattern meaning,
/// and a token that breaks the pattern fails compilation.
#[derive(Debug)]
pub struct ExceptionMatcher {
    pattern: Option<Regex>,
}

impl ExceptionMatcher {
    /// Compile `tokens` into a matcher. An empty list yields a matcher that
    /// never reports an exception.
    pub fn compile(tokens: &[String]) -> Result<Self, ConfigError> {
        if tokens.is_empty() {
            debug!("empty exception list, abbreviation suppression disabled");
            return Ok(Self { pattern: None });
        }

        let alternation = tokens
            .iter()
            .map(|token| format!(r"{token}\."))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!("(?:{alternation})"))?;
        debug!("compiled {} exception tokens", tokens.len());

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// True when `fragment` contains any exception token followed by a period.
    pub fn is_exception(&self, fragment: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(Input::new(fragment)),
            None => false,
        }
    }
}
