//! Builtin chain catalog.
//!
//! The chain definitions that ship with the crate, embedded at compile
//! time so the binary needs no data files.

use crate::ChainSpec;
use scrivano_error::{ChainError, ChainErrorKind, ScrivanoResult};
use tracing::debug;

const SCRIPT_CHAIN: &str = include_str!("../chains/script.toml");
const ARTICLE_CHAIN: &str = include_str!("../chains/article.toml");
const TUTORIAL_CHAIN: &str = include_str!("../chains/tutorial.toml");

/// Names of the builtin chains, in catalog order.
pub fn builtin_names() -> &'static [&'static str] {
    &["script", "article", "tutorial"]
}

/// Loads a builtin chain by name.
///
/// # Errors
///
/// Returns `UnknownChain`, listing the known names, when `name` is not
/// in the catalog.
///
/// # Examples
///
/// ```
/// use scrivano_chain::catalog;
///
/// # fn main() -> scrivano_error::ScrivanoResult<()> {
/// let chain = catalog::builtin("script")?;
/// assert_eq!(chain.metadata().name(), "script");
/// assert_eq!(chain.steps().len(), 2);
/// # Ok(())
/// # }
/// ```
pub fn builtin(name: &str) -> ScrivanoResult<ChainSpec> {
    let source = match name {
        "script" => SCRIPT_CHAIN,
        "article" => ARTICLE_CHAIN,
        "tutorial" => TUTORIAL_CHAIN,
        _ => {
            return Err(ChainError::new(ChainErrorKind::UnknownChain {
                name: name.to_string(),
                known: builtin_names().iter().map(|s| s.to_string()).collect(),
            })
            .into());
        }
    };
    debug!(chain = name, "Loading builtin chain");
    source.parse()
}
