//! Per-step conversation transcripts.

use serde::{Deserialize, Serialize};

/// One prompt/response exchange recorded by a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct MemoryEntry {
    /// The fully rendered prompt sent to the backend
    prompt: String,
    /// The backend's response text
    response: String,
}

impl MemoryEntry {
    /// Creates an entry from a prompt and its response.
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response: response.into(),
        }
    }
}

/// Append-only transcript of the exchanges a single step performed.
///
/// Every step of every execution gets a fresh log; logs are never shared
/// between steps or carried across executions. Appending never reorders
/// or rewrites earlier entries.
///
/// # Examples
///
/// ```
/// use scrivano_core::MemoryLog;
///
/// let mut log = MemoryLog::new();
/// log.append("Write me a title about volcanoes", "Fire Mountains Explained");
///
/// assert_eq!(log.len(), 1);
/// assert_eq!(
///     log.history(),
///     "Human: Write me a title about volcanoes\nAI: Fire Mountains Explained"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLog {
    entries: Vec<MemoryEntry>,
}

impl MemoryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one exchange. Infallible.
    pub fn append(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.entries.push(MemoryEntry::new(prompt, response));
    }

    /// The recorded exchanges, oldest first.
    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    /// Number of recorded exchanges.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the interleaved `Human:`/`AI:` transcript.
    pub fn history(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() * 2);
        for entry in &self.entries {
            lines.push(format!("Human: {}", entry.prompt));
            lines.push(format!("AI: {}", entry.response));
        }
        lines.join("\n")
    }
}
