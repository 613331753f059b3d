//! Construction-time validation tests for chain definitions.
//!
//! A ChainSpec that constructs must be runnable, so everything a chain
//! can get wrong has to surface here, not mid-execution.

use scrivano_chain::{AssemblySpec, ChainMetadata, ChainSpec, StepSpec};
use scrivano_error::{ChainErrorKind, ScrivanoError, ScrivanoErrorKind};

fn chain_kind(err: &ScrivanoError) -> Option<&ChainErrorKind> {
    match err.kind() {
        ScrivanoErrorKind::Chain(chain_err) => Some(chain_err.kind()),
        _ => None,
    }
}

fn metadata() -> ChainMetadata {
    ChainMetadata::new("test", "Validation test chain")
}

#[test]
fn test_empty_chain_is_rejected() {
    let err = ChainSpec::new(metadata(), vec![], vec![]).expect_err("no steps");
    assert_eq!(chain_kind(&err), Some(&ChainErrorKind::EmptyChain));
}

#[test]
fn test_unbound_placeholder_fails_construction() -> anyhow::Result<()> {
    // {title} is published by nobody, so the chain must not construct.
    let err = ChainSpec::new(
        metadata(),
        vec![StepSpec::generate("script", "Write a script for {title}")?],
        vec![],
    )
    .expect_err("unbound placeholder");

    match chain_kind(&err) {
        Some(ChainErrorKind::UnboundPlaceholder { step, placeholder }) => {
            assert_eq!(step, "script");
            assert_eq!(placeholder, "title");
        }
        other => panic!("Expected UnboundPlaceholder, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_later_outputs_cannot_feed_earlier_steps() -> anyhow::Result<()> {
    // Declared order is execution order; a forward reference is unbound.
    let err = ChainSpec::new(
        metadata(),
        vec![
            StepSpec::generate("script", "Write a script for {title}")?,
            StepSpec::generate("title", "Write me a title about {topic}")?,
        ],
        vec![],
    )
    .expect_err("forward reference");

    assert!(matches!(
        chain_kind(&err),
        Some(ChainErrorKind::UnboundPlaceholder { .. })
    ));
    Ok(())
}

#[test]
fn test_topic_is_always_bound() -> anyhow::Result<()> {
    let chain = ChainSpec::new(
        metadata(),
        vec![StepSpec::generate("title", "Write me a title about {topic}")?],
        vec![],
    )?;
    assert_eq!(chain.step_keys(), ["title"]);
    Ok(())
}

#[test]
fn test_duplicate_step_key_is_rejected() -> anyhow::Result<()> {
    let err = ChainSpec::new(
        metadata(),
        vec![
            StepSpec::generate("title", "One title about {topic}")?,
            StepSpec::generate("title", "Another title about {topic}")?,
        ],
        vec![],
    )
    .expect_err("duplicate key");

    assert_eq!(
        chain_kind(&err),
        Some(&ChainErrorKind::DuplicateStepKey("title".to_string()))
    );
    Ok(())
}

#[test]
fn test_reserved_topic_key_is_rejected() -> anyhow::Result<()> {
    let err = ChainSpec::new(
        metadata(),
        vec![StepSpec::generate("topic", "Rewrite {topic}")?],
        vec![],
    )
    .expect_err("reserved key");

    assert_eq!(
        chain_kind(&err),
        Some(&ChainErrorKind::ReservedKey("topic".to_string()))
    );
    Ok(())
}

#[test]
fn test_invalid_step_key_is_rejected() -> anyhow::Result<()> {
    let err = ChainSpec::new(
        metadata(),
        vec![StepSpec::generate("two words", "About {topic}")?],
        vec![],
    )
    .expect_err("key with a space");

    assert!(matches!(
        chain_kind(&err),
        Some(ChainErrorKind::InvalidPlaceholder(_))
    ));
    Ok(())
}

#[test]
fn test_empty_template_is_rejected() -> anyhow::Result<()> {
    let err = ChainSpec::new(
        metadata(),
        vec![StepSpec::generate("title", "   ")?],
        vec![],
    )
    .expect_err("whitespace template");

    assert_eq!(
        chain_kind(&err),
        Some(&ChainErrorKind::EmptyTemplate("title".to_string()))
    );
    Ok(())
}

#[test]
fn test_step_temperature_override_must_be_in_range() -> anyhow::Result<()> {
    let err = ChainSpec::new(
        metadata(),
        vec![StepSpec::generate("title", "About {topic}")?.with_temperature(1.5f32)],
        vec![],
    )
    .expect_err("temperature above 1.0");

    assert_eq!(
        chain_kind(&err),
        Some(&ChainErrorKind::CreativityOutOfRange(1.5))
    );
    Ok(())
}

#[test]
fn test_research_steps_can_sit_anywhere_their_bindings_allow() -> anyhow::Result<()> {
    // A research query may consume an earlier generation output.
    let chain = ChainSpec::new(
        metadata(),
        vec![
            StepSpec::generate("title", "Write me a title about {topic}")?,
            StepSpec::research("background", Some("{title}"))?,
            StepSpec::generate("article", "Write {title} using {background}")?,
        ],
        vec![],
    )?;
    assert!(chain.has_research());
    Ok(())
}

#[test]
fn test_research_query_cannot_reference_later_steps() -> anyhow::Result<()> {
    let err = ChainSpec::new(
        metadata(),
        vec![
            StepSpec::research("background", Some("{title}"))?,
            StepSpec::generate("title", "Write me a title about {topic}")?,
        ],
        vec![],
    )
    .expect_err("query references a later step");

    assert!(matches!(
        chain_kind(&err),
        Some(ChainErrorKind::UnboundPlaceholder { .. })
    ));
    Ok(())
}

#[test]
fn test_assembly_parts_must_name_steps() -> anyhow::Result<()> {
    let err = ChainSpec::new(
        metadata(),
        vec![StepSpec::generate("half1", "First half about {topic}")?],
        vec![AssemblySpec::new(
            "whole",
            vec!["half1".to_string(), "half2".to_string()],
            " ",
        )],
    )
    .expect_err("unknown part");

    match chain_kind(&err) {
        Some(ChainErrorKind::UnknownAssemblyPart { assembly, part }) => {
            assert_eq!(assembly, "whole");
            assert_eq!(part, "half2");
        }
        other => panic!("Expected UnknownAssemblyPart, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_assembly_key_cannot_shadow_a_step() -> anyhow::Result<()> {
    let err = ChainSpec::new(
        metadata(),
        vec![
            StepSpec::generate("half1", "First half about {topic}")?,
            StepSpec::generate("half2", "Second half after {half1}")?,
        ],
        vec![AssemblySpec::new(
            "half1",
            vec!["half1".to_string(), "half2".to_string()],
            " ",
        )],
    )
    .expect_err("assembly shadows a step key");

    assert_eq!(
        chain_kind(&err),
        Some(&ChainErrorKind::DuplicateAssemblyKey("half1".to_string()))
    );
    Ok(())
}

#[test]
fn test_assembly_without_parts_is_rejected() -> anyhow::Result<()> {
    let err = ChainSpec::new(
        metadata(),
        vec![StepSpec::generate("title", "About {topic}")?],
        vec![AssemblySpec::new("whole", vec![], " ")],
    )
    .expect_err("empty parts");

    assert_eq!(
        chain_kind(&err),
        Some(&ChainErrorKind::EmptyAssembly("whole".to_string()))
    );
    Ok(())
}
