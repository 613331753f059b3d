//! Core data structures for chains.

use crate::toml_parser;
use scrivano_core::PromptTemplate;
use scrivano_error::{ChainError, ChainErrorKind, ScrivanoResult};
use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

/// The binding key the executor seeds with the caller's topic.
///
/// Steps may reference `{topic}` freely but may not publish under it.
pub const TOPIC_KEY: &str = "topic";

/// Query template a research step falls back to when none is declared.
pub const DEFAULT_RESEARCH_QUERY: &str = "{topic}";

/// Which backend family serves a step, with the template it renders.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendKind {
    /// Text generation against the chain's `TextGenerator`.
    Generate {
        /// Prompt template rendered from the accumulated bindings
        template: PromptTemplate,
    },
    /// Best-effort lookup against the chain's `ResearchProvider`.
    Research {
        /// Query template rendered from the accumulated bindings
        query: PromptTemplate,
    },
}

impl BackendKind {
    /// The backend family name as it appears in chain files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generate { .. } => "generate",
            Self::Research { .. } => "research",
        }
    }
}

/// A single step in a chain: one output key, one template, one backend.
///
/// Generation steps may override the chain-level `model` and `max_tokens`
/// defaults, and may pin a `temperature` that takes precedence over the
/// caller's creativity setting.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct StepSpec {
    /// Key the step publishes its output under
    #[setters(skip)]
    key: String,
    /// Backend family and the template it renders
    #[setters(skip)]
    backend: BackendKind,
    /// Optional model override for this step
    model: Option<String>,
    /// Optional temperature override for this step
    temperature: Option<f32>,
    /// Optional max_tokens override for this step
    max_tokens: Option<u32>,
}

impl StepSpec {
    /// Creates a generation step that renders `template` and publishes
    /// under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template pattern does not parse.
    pub fn generate(key: impl Into<String>, template: &str) -> ScrivanoResult<Self> {
        Ok(Self {
            key: key.into(),
            backend: BackendKind::Generate {
                template: PromptTemplate::parse(template)?,
            },
            model: None,
            temperature: None,
            max_tokens: None,
        })
    }

    /// Creates a research step that looks up `query` and publishes under
    /// `key`. A `None` query falls back to [`DEFAULT_RESEARCH_QUERY`].
    ///
    /// # Errors
    ///
    /// Returns an error if the query pattern does not parse.
    pub fn research(key: impl Into<String>, query: Option<&str>) -> ScrivanoResult<Self> {
        Ok(Self {
            key: key.into(),
            backend: BackendKind::Research {
                query: PromptTemplate::parse(query.unwrap_or(DEFAULT_RESEARCH_QUERY))?,
            },
            model: None,
            temperature: None,
            max_tokens: None,
        })
    }

    /// The template the step renders, prompt or query.
    pub fn template(&self) -> &PromptTemplate {
        match &self.backend {
            BackendKind::Generate { template } => template,
            BackendKind::Research { query } => query,
        }
    }

    /// Whether the step targets the research backend.
    pub fn is_research(&self) -> bool {
        matches!(self.backend, BackendKind::Research { .. })
    }
}

/// Chain metadata from the `[chain]` section.
///
/// `model` and `max_tokens` are defaults for every generation step; each
/// step may override them. There is no chain-level temperature: the
/// creativity knob belongs to the caller.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct ChainMetadata {
    /// Unique identifier for this chain
    #[setters(skip)]
    name: String,
    /// Human-readable description of what this chain produces
    #[setters(skip)]
    description: String,
    /// Optional default model for all generation steps
    model: Option<String>,
    /// Optional default max_tokens for all generation steps
    max_tokens: Option<u32>,
}

impl ChainMetadata {
    /// Creates metadata with no generation defaults.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            model: None,
            max_tokens: None,
        }
    }
}

/// A composite output joining step outputs after a successful run.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct AssemblySpec {
    /// Key the composite is reported under
    key: String,
    /// Step keys whose outputs are joined, in order
    parts: Vec<String>,
    /// Text placed between adjacent parts
    separator: String,
}

impl AssemblySpec {
    /// Creates an assembly joining `parts` with `separator`.
    pub fn new(
        key: impl Into<String>,
        parts: Vec<String>,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            parts,
            separator: separator.into(),
        }
    }
}

/// Complete chain definition parsed from TOML or built programmatically.
///
/// Construction validates the whole definition, so a `ChainSpec` in hand
/// is always runnable: step keys are unique and well formed, every
/// placeholder is satisfiable by the topic or an earlier step, and every
/// assembly references real steps.
///
/// # Example TOML Structure
///
/// ```toml
/// [chain]
/// name = "script"
/// description = "Youtube title and script generator"
///
/// [[steps]]
/// key = "title"
/// template = "Write me a Youtube video title about {topic}"
///
/// [[steps]]
/// key = "script"
/// template = "Write me a script based on the title TITLE: {title}"
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ChainSpec {
    /// Chain metadata
    metadata: ChainMetadata,

    /// Steps in execution order
    steps: Vec<StepSpec>,

    /// Composite outputs built after all steps complete
    assemblies: Vec<AssemblySpec>,
}

impl ChainSpec {
    /// Builds a validated chain from its pieces.
    ///
    /// # Errors
    ///
    /// Returns a `ChainError` naming the first violated construction rule:
    /// empty step list, malformed or duplicate or reserved step keys,
    /// empty templates, unsatisfiable placeholders, out-of-range
    /// temperature overrides, or assembly problems.
    pub fn new(
        metadata: ChainMetadata,
        steps: Vec<StepSpec>,
        assemblies: Vec<AssemblySpec>,
    ) -> ScrivanoResult<Self> {
        let chain = Self {
            metadata,
            steps,
            assemblies,
        };
        chain.validate()?;
        Ok(chain)
    }

    /// Loads a chain from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is invalid
    /// - Validation fails (duplicate keys, unbound placeholders, etc.)
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScrivanoResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChainError::new(ChainErrorKind::FileRead(e.to_string())))?;
        content.parse()
    }

    /// Whether any step targets the research backend.
    pub fn has_research(&self) -> bool {
        self.steps.iter().any(StepSpec::is_research)
    }

    /// Step keys in execution order.
    pub fn step_keys(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.key().as_str()).collect()
    }

    /// Checks the construction rules.
    ///
    /// Rules, in the order they are checked:
    /// - At least one step
    /// - Step keys are valid placeholder names, unused by earlier steps,
    ///   and not the reserved topic key
    /// - Templates are non-empty and every placeholder is the topic or an
    ///   earlier step's key
    /// - Temperature overrides fall within [0.0, 1.0]
    /// - Assemblies have parts, fresh keys, and reference declared steps
    #[tracing::instrument(skip(self), fields(name = %self.metadata.name(), step_count = self.steps.len()))]
    fn validate(&self) -> ScrivanoResult<()> {
        if self.steps.is_empty() {
            return Err(ChainError::new(ChainErrorKind::EmptyChain).into());
        }

        let mut bound: BTreeSet<&str> = BTreeSet::new();
        bound.insert(TOPIC_KEY);

        for step in &self.steps {
            let key = step.key().as_str();
            if !is_valid_key(key) {
                return Err(ChainError::new(ChainErrorKind::InvalidPlaceholder(format!(
                    "step key '{}' is not usable as a placeholder name",
                    key
                )))
                .into());
            }
            if key == TOPIC_KEY {
                return Err(
                    ChainError::new(ChainErrorKind::ReservedKey(key.to_string())).into(),
                );
            }
            if bound.contains(key) {
                return Err(
                    ChainError::new(ChainErrorKind::DuplicateStepKey(key.to_string())).into(),
                );
            }

            let template = step.template();
            if template.pattern().trim().is_empty() {
                return Err(
                    ChainError::new(ChainErrorKind::EmptyTemplate(key.to_string())).into(),
                );
            }
            for placeholder in template.placeholders() {
                if !bound.contains(placeholder.as_str()) {
                    return Err(ChainError::new(ChainErrorKind::UnboundPlaceholder {
                        step: key.to_string(),
                        placeholder: placeholder.clone(),
                    })
                    .into());
                }
            }

            if let Some(temperature) = step.temperature() {
                if !(0.0..=1.0).contains(temperature) {
                    return Err(ChainError::new(ChainErrorKind::CreativityOutOfRange(
                        *temperature,
                    ))
                    .into());
                }
            }

            bound.insert(key);
        }

        let step_keys: BTreeSet<&str> =
            self.steps.iter().map(|step| step.key().as_str()).collect();
        let mut assembly_keys: BTreeSet<&str> = BTreeSet::new();
        for assembly in &self.assemblies {
            let key = assembly.key().as_str();
            if assembly.parts().is_empty() {
                return Err(
                    ChainError::new(ChainErrorKind::EmptyAssembly(key.to_string())).into(),
                );
            }
            if key == TOPIC_KEY || step_keys.contains(key) || assembly_keys.contains(key) {
                return Err(
                    ChainError::new(ChainErrorKind::DuplicateAssemblyKey(key.to_string()))
                        .into(),
                );
            }
            for part in assembly.parts() {
                if !step_keys.contains(part.as_str()) {
                    return Err(ChainError::new(ChainErrorKind::UnknownAssemblyPart {
                        assembly: key.to_string(),
                        part: part.clone(),
                    })
                    .into());
                }
            }
            assembly_keys.insert(key);
        }

        Ok(())
    }
}

impl FromStr for ChainSpec {
    type Err = scrivano_error::ScrivanoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml_parser::from_toml_str(s)
    }
}

/// Whether `key` is usable as a template placeholder name.
fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_key_grammar() {
        assert!(is_valid_key("title"));
        assert!(is_valid_key("article1"));
        assert!(is_valid_key("_private"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("9lives"));
        assert!(!is_valid_key("two words"));
        assert!(!is_valid_key("kebab-case"));
    }

    #[test]
    fn test_step_override_setters() -> anyhow::Result<()> {
        let step = StepSpec::generate("title", "Title for {topic}")?
            .with_model("gpt-3.5-turbo-instruct")
            .with_temperature(0.9f32)
            .with_max_tokens(200u32);

        assert_eq!(step.model().as_deref(), Some("gpt-3.5-turbo-instruct"));
        assert_eq!(*step.temperature(), Some(0.9));
        assert_eq!(*step.max_tokens(), Some(200));
        Ok(())
    }

    #[test]
    fn test_research_query_defaults_to_topic() -> anyhow::Result<()> {
        let step = StepSpec::research("wikipedia_research", None)?;
        assert!(step.is_research());
        assert_eq!(step.template().pattern(), "{topic}");
        assert_eq!(step.backend().name(), "research");
        Ok(())
    }
}
