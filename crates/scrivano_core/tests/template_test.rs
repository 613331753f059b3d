//! Template rendering behavior against binding sets.

use scrivano_core::{BindingSet, PromptTemplate};
use scrivano_error::{ChainErrorKind, ScrivanoErrorKind};

fn bindings(pairs: &[(&str, &str)]) -> BindingSet {
    let mut set = BindingSet::new();
    for (key, value) in pairs {
        set.insert(*key, *value).expect("unique test keys");
    }
    set
}

#[test]
fn test_renders_multiple_placeholders_in_one_pass() {
    let template =
        PromptTemplate::parse("Write a {length} article titled {title} using: {research}")
            .expect("valid template");
    let bound = bindings(&[
        ("length", "300 word"),
        ("title", "Fire Mountains Explained"),
        ("research", "Volcanoes are ruptures in the crust."),
    ]);

    assert_eq!(
        template.render(&bound).expect("all placeholders bound"),
        "Write a 300 word article titled Fire Mountains Explained using: \
         Volcanoes are ruptures in the crust."
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let template = PromptTemplate::parse("Write a script for {title}").expect("valid template");
    let bound = bindings(&[("title", "Fire Mountains Explained")]);

    let first = template.render(&bound).expect("bound");
    let second = template.render(&bound).expect("bound");
    assert_eq!(first, second);
}

#[test]
fn test_missing_bindings_are_reported_completely_in_template_order() {
    let template =
        PromptTemplate::parse("{title} by {author} on {date}").expect("valid template");
    let bound = bindings(&[("author", "scrivano")]);

    let err = template.render(&bound).expect_err("two placeholders unbound");
    match err.kind() {
        ScrivanoErrorKind::Chain(chain) => match chain.kind() {
            ChainErrorKind::MissingBinding { placeholders } => {
                assert_eq!(placeholders, &["title".to_string(), "date".to_string()]);
            }
            other => panic!("expected MissingBinding, got {other}"),
        },
        other => panic!("expected chain error, got {other}"),
    }
}

#[test]
fn test_failed_render_produces_no_partial_output() {
    let template = PromptTemplate::parse("intro {missing} outro").expect("valid template");
    let err = template.render(&BindingSet::new()).expect_err("unbound");
    assert!(format!("{err}").contains("missing"));
}

#[test]
fn test_extra_bindings_are_ignored() {
    let template = PromptTemplate::parse("just {topic}").expect("valid template");
    let bound = bindings(&[("topic", "volcanoes"), ("unused", "ballast")]);
    assert_eq!(template.render(&bound).expect("bound"), "just volcanoes");
}

#[test]
fn test_static_templates_render_from_an_empty_binding_set() {
    let template = PromptTemplate::parse("no placeholders at all").expect("valid template");
    assert_eq!(
        template.render(&BindingSet::new()).expect("static"),
        "no placeholders at all"
    );
}

#[test]
fn test_pattern_accessor_returns_the_original_text() {
    let raw = "Write me a Youtube video title about {topic}";
    let template = PromptTemplate::parse(raw).expect("valid template");
    assert_eq!(template.pattern(), raw);
}
