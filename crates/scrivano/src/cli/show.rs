//! Catalog inspection command handlers.

use super::run::load_chain;
use scrivano::{BackendKind, ScrivanoResult, catalog};

/// List the builtin chains with their descriptions.
pub fn list_chains() -> ScrivanoResult<()> {
    println!("Builtin chains:");
    for name in catalog::builtin_names() {
        let chain = catalog::builtin(name)?;
        println!(
            "  {:<10} {} ({} steps)",
            name,
            chain.metadata().description(),
            chain.steps().len()
        );
    }
    Ok(())
}

/// Print a chain definition without executing it.
pub fn show_chain(chain: &str) -> ScrivanoResult<()> {
    let spec = load_chain(chain)?;

    println!("Chain: {}", spec.metadata().name());
    println!("Description: {}", spec.metadata().description());
    if let Some(model) = spec.metadata().model() {
        println!("Model: {}", model);
    }
    println!();

    for (index, step) in spec.steps().iter().enumerate() {
        match step.backend() {
            BackendKind::Generate { template } => {
                println!("Step {}: {} (generate)", index + 1, step.key());
                println!("  {}", template.pattern());
            }
            BackendKind::Research { query } => {
                println!("Step {}: {} (research)", index + 1, step.key());
                println!("  query: {}", query.pattern());
            }
        }
    }

    for assembly in spec.assemblies() {
        println!();
        println!(
            "Assembly '{}': joins [{}] with {:?}",
            assembly.key(),
            assembly.parts().join(", "),
            assembly.separator()
        );
    }

    Ok(())
}
