//! Prompt templates with named `{placeholder}` substitution.

use crate::BindingSet;
use regex::Regex;
use scrivano_error::{ChainError, ChainErrorKind, ScrivanoResult};

/// Matches brace escapes, well-formed placeholders, and stray braces, in
/// that order of preference.
const TOKEN_PATTERN: &str = r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}|[{}]";

/// One parsed span of a template pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Verbatim text with brace escapes already unfolded
    Literal(String),
    /// A named substitution site
    Placeholder(String),
}

/// An immutable prompt pattern with named `{placeholder}` sites.
///
/// Placeholder names match `[A-Za-z_][A-Za-z0-9_]*`. Doubled braces are
/// literal: `{{` renders as `{` and `}}` as `}`. Unbalanced braces and
/// invalid names are rejected at parse time, so a constructed template
/// always renders the same output from the same bindings.
///
/// # Examples
///
/// ```
/// use scrivano_core::{BindingSet, PromptTemplate};
///
/// # fn main() -> scrivano_error::ScrivanoResult<()> {
/// let template = PromptTemplate::parse("Write me a title about {topic}")?;
/// assert_eq!(template.placeholders(), ["topic"]);
///
/// let mut bindings = BindingSet::new();
/// bindings.insert("topic", "volcanoes")?;
/// assert_eq!(template.render(&bindings)?, "Write me a title about volcanoes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pattern: String,
    segments: Vec<Segment>,
    placeholders: Vec<String>,
}

impl PromptTemplate {
    /// Parse a pattern string into a template.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlaceholder` for unbalanced braces or placeholder
    /// names outside `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn parse(pattern: impl Into<String>) -> ScrivanoResult<Self> {
        let pattern = pattern.into();
        let matcher = Regex::new(TOKEN_PATTERN).map_err(|e| {
            ChainError::new(ChainErrorKind::InvalidPlaceholder(format!(
                "token pattern failed to compile: {e}"
            )))
        })?;

        let mut segments = Vec::new();
        let mut placeholders: Vec<String> = Vec::new();
        let mut literal = String::new();
        let mut last_end = 0;

        for found in matcher.find_iter(&pattern) {
            literal.push_str(&pattern[last_end..found.start()]);
            last_end = found.end();

            match found.as_str() {
                "{{" => literal.push('{'),
                "}}" => literal.push('}'),
                "{" => {
                    // A lone '{' is either unbalanced or opens an invalid name.
                    let rest = &pattern[found.end()..];
                    let detail = match rest.find(['{', '}']) {
                        Some(pos) if rest.as_bytes()[pos] == b'}' => format!(
                            "invalid placeholder name {:?}, names match [A-Za-z_][A-Za-z0-9_]*",
                            &rest[..pos]
                        ),
                        _ => format!(
                            "unbalanced '{{' at byte {}, use '{{{{' for a literal brace",
                            found.start()
                        ),
                    };
                    return Err(ChainError::new(ChainErrorKind::InvalidPlaceholder(detail)).into());
                }
                "}" => {
                    return Err(ChainError::new(ChainErrorKind::InvalidPlaceholder(format!(
                        "unbalanced '}}' at byte {}, use '}}}}' for a literal brace",
                        found.start()
                    )))
                    .into());
                }
                token => {
                    // "{name}" including both braces
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    let name = token[1..token.len() - 1].to_string();
                    if !placeholders.contains(&name) {
                        placeholders.push(name.clone());
                    }
                    segments.push(Segment::Placeholder(name));
                }
            }
        }

        literal.push_str(&pattern[last_end..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            pattern,
            segments,
            placeholders,
        })
    }

    /// The original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Placeholder names in first-appearance order, deduplicated.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Substitute every placeholder from `bindings`.
    ///
    /// Substitution is a single pass: values are inserted verbatim and
    /// never re-scanned, so braces inside a bound value stay braces.
    ///
    /// # Errors
    ///
    /// Returns `MissingBinding` naming every unbound placeholder when any
    /// placeholder has no binding. No partial render is produced.
    pub fn render(&self, bindings: &BindingSet) -> ScrivanoResult<String> {
        let missing: Vec<String> = self
            .placeholders
            .iter()
            .filter(|name| !bindings.contains(name))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(ChainError::new(ChainErrorKind::MissingBinding {
                placeholders: missing,
            })
            .into());
        }

        let mut rendered = String::with_capacity(self.pattern.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Placeholder(name) => {
                    if let Some(value) = bindings.get(name) {
                        rendered.push_str(value);
                    }
                }
            }
        }
        Ok(rendered)
    }
}
