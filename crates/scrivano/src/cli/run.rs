//! Chain execution command handler.

use scrivano::{
    BackendConfig, ChainExecution, ChainExecutor, ChainSpec, JsonError, OpenAiClient,
    ScrivanoResult, WikipediaClient,
};
use std::path::Path;

/// Resolve a `--chain` argument to a chain definition.
///
/// Arguments naming an existing file load from disk; anything else is
/// looked up in the builtin catalog, where an unknown name produces an
/// error listing the catalog.
pub(crate) fn load_chain(chain: &str) -> ScrivanoResult<ChainSpec> {
    let path = Path::new(chain);
    if path.exists() {
        ChainSpec::from_file(path)
    } else {
        scrivano::catalog::builtin(chain)
    }
}

/// Run a chain against a topic and print the results.
///
/// This is the composition root: it loads the layered backend
/// configuration, reads the OpenAI key from the environment, and wires a
/// Wikipedia client in when the chain declares research steps.
pub async fn run_chain(
    chain: &str,
    topic: &str,
    creativity: f32,
    json: bool,
) -> ScrivanoResult<()> {
    let spec = load_chain(chain)?;

    tracing::info!(
        chain = %spec.metadata().name(),
        steps = spec.steps().len(),
        research = spec.has_research(),
        "Chain loaded"
    );

    let config = BackendConfig::load()?;
    let client = OpenAiClient::from_env(&config.openai)?;

    let mut executor = ChainExecutor::new(client);
    if spec.has_research() {
        executor = executor.with_research(Box::new(WikipediaClient::new(&config.wikipedia)?));
    }

    tracing::info!("Executing chain");
    let execution = executor.execute(&spec, topic, creativity).await?;

    tracing::info!(
        steps_completed = execution.steps.len(),
        "Chain execution completed"
    );

    if json {
        let report = serde_json::to_string_pretty(&execution)
            .map_err(|e| JsonError::new(e.to_string()))?;
        println!("{}", report);
        return Ok(());
    }

    print_execution(&execution);
    Ok(())
}

/// Print the human-readable execution report: outputs first, then the
/// per-step message history.
fn print_execution(execution: &ChainExecution) {
    println!("\nChain Execution Summary:");
    println!("========================");
    println!("Chain: {}", execution.chain_name);
    println!("Topic: {}", execution.topic);
    println!("Steps completed: {}", execution.steps.len());
    println!();

    for step in &execution.steps {
        println!("Step {}: {}", step.sequence_number + 1, step.step_key);
        println!("  Backend: {}", step.backend);
        if let Some(model) = &step.model {
            println!("  Model: {}", model);
        }
        println!();
        println!("{}", step.output);
        println!();
    }

    for (key, text) in &execution.assembled {
        println!("Assembled '{}':", key);
        println!();
        println!("{}", text);
        println!();
    }

    println!("Message History:");
    println!("================");
    for step in &execution.steps {
        println!("[{}]", step.step_key);
        println!("{}", step.memory.history());
        println!();
    }
}
