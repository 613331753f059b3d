//! TOML deserialization structures for chain definitions.
//!
//! This module provides intermediate structures for deserializing TOML
//! into our domain types (ChainSpec, StepSpec, AssemblySpec).

use crate::{AssemblySpec, ChainMetadata, ChainSpec, StepSpec};
use scrivano_error::{ChainError, ChainErrorKind, ScrivanoResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, error, instrument};

/// Intermediate structure for deserializing the [chain] section.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlChain {
    pub name: String,
    pub description: String,
    /// Optional default model for all generation steps
    #[serde(default)]
    pub model: Option<String>,
    /// Optional default max_tokens for all generation steps
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// Intermediate structure for deserializing one [[steps]] entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlStep {
    pub key: String,
    /// Backend family: "generate" (the default) or "research"
    #[serde(default)]
    pub backend: Option<String>,
    /// Prompt template for generation steps
    #[serde(default)]
    pub template: Option<String>,
    /// Query template for research steps; defaults to "{topic}"
    #[serde(default)]
    pub query: Option<String>,
    /// Optional model override
    #[serde(default)]
    pub model: Option<String>,
    /// Optional temperature override
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Optional max_tokens override
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// Intermediate structure for one entry in the [assemblies] table.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlAssembly {
    pub parts: Vec<String>,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    " ".to_string()
}

/// Root TOML structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlChainFile {
    pub chain: TomlChain,
    #[serde(default)]
    pub steps: Vec<TomlStep>,
    /// Keyed by assembly name; BTreeMap keeps reporting order stable
    #[serde(default)]
    pub assemblies: BTreeMap<String, TomlAssembly>,
}

impl TomlStep {
    /// Convert a TOML step to a domain StepSpec.
    ///
    /// The backend defaults to "generate". Generation steps must carry a
    /// `template` and must not carry a `query`; research steps the reverse,
    /// except that their `query` may be omitted. Research steps take no
    /// generation parameters.
    #[instrument(skip(self), fields(key = %self.key, backend = ?self.backend))]
    pub fn to_step(&self) -> ScrivanoResult<StepSpec> {
        let backend = self.backend.as_deref().unwrap_or("generate");
        debug!(backend, "Converting TOML step to domain StepSpec");

        let mut step = match backend {
            "generate" => {
                if self.query.is_some() {
                    error!("Generation step carries a research 'query' field");
                    return Err(ChainError::new(ChainErrorKind::TomlParse(format!(
                        "step '{}' is a generation step and does not take 'query'",
                        self.key
                    )))
                    .into());
                }
                let template = self.template.as_deref().ok_or_else(|| {
                    error!("Generation step missing 'template' field");
                    ChainError::new(ChainErrorKind::TomlParse(format!(
                        "step '{}' is a generation step and requires 'template'",
                        self.key
                    )))
                })?;
                StepSpec::generate(&self.key, template)?
            }
            "research" => {
                if self.template.is_some() {
                    error!("Research step carries a generation 'template' field");
                    return Err(ChainError::new(ChainErrorKind::TomlParse(format!(
                        "step '{}' is a research step and does not take 'template', use 'query'",
                        self.key
                    )))
                    .into());
                }
                if self.model.is_some() || self.temperature.is_some() || self.max_tokens.is_some()
                {
                    error!("Research step carries generation parameters");
                    return Err(ChainError::new(ChainErrorKind::TomlParse(format!(
                        "step '{}' is a research step and does not take model, temperature, or max_tokens",
                        self.key
                    )))
                    .into());
                }
                StepSpec::research(&self.key, self.query.as_deref())?
            }
            unknown => {
                error!(backend = unknown, "Unknown backend family");
                return Err(ChainError::new(ChainErrorKind::TomlParse(format!(
                    "step '{}' names unknown backend '{}', expected 'generate' or 'research'",
                    self.key, unknown
                )))
                .into());
            }
        };

        if let Some(model) = &self.model {
            step = step.with_model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            step = step.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            step = step.with_max_tokens(max_tokens);
        }
        Ok(step)
    }
}

/// Parse and validate a chain definition from TOML text.
#[instrument(skip(s), fields(len = s.len()))]
pub fn from_toml_str(s: &str) -> ScrivanoResult<ChainSpec> {
    let file: TomlChainFile = toml::from_str(s)
        .map_err(|e| ChainError::new(ChainErrorKind::TomlParse(e.to_string())))?;
    debug!(
        chain = %file.chain.name,
        steps = file.steps.len(),
        assemblies = file.assemblies.len(),
        "Parsed chain TOML"
    );

    let mut metadata = ChainMetadata::new(file.chain.name, file.chain.description);
    if let Some(model) = file.chain.model {
        metadata = metadata.with_model(model);
    }
    if let Some(max_tokens) = file.chain.max_tokens {
        metadata = metadata.with_max_tokens(max_tokens);
    }

    let steps = file
        .steps
        .iter()
        .map(TomlStep::to_step)
        .collect::<ScrivanoResult<Vec<_>>>()?;

    let assemblies = file
        .assemblies
        .into_iter()
        .map(|(key, assembly)| AssemblySpec::new(key, assembly.parts, assembly.separator))
        .collect();

    ChainSpec::new(metadata, steps, assemblies)
}
