//! Input Collector Integration Tests
//!
//! Tests for mutual exclusivity of headline and image, and for
//! validation under both mode policies.

use ethical_lens::core::{InputCollector, ModePolicy, PreparedInput};
use ethical_lens::domain::{Input, InputKind};
use ethical_lens::ValidationError;

#[test]
fn test_image_replaces_headline() {
    let mut collector = InputCollector::default();
    collector.set_headline("Breaking news").unwrap();
    collector.set_image("/tmp/photo.png").unwrap();

    assert!(collector.input().headline().is_none());
    assert_eq!(collector.input().kind(), Some(InputKind::Image));
}

#[test]
fn test_headline_replaces_image() {
    let mut collector = InputCollector::default();
    collector.set_image("/tmp/photo.png").unwrap();
    collector.set_headline("Breaking news").unwrap();

    assert!(collector.input().image().is_none());
    assert_eq!(collector.input().headline(), Some("Breaking news"));
}

#[test]
fn test_exclusivity_over_input_sequences() {
    // Every prefix of an alternating sequence holds at most one input
    let mut collector = InputCollector::default();
    let steps: Vec<Box<dyn Fn(&mut InputCollector)>> = vec![
        Box::new(|c: &mut InputCollector| c.set_headline("one").unwrap()),
        Box::new(|c: &mut InputCollector| c.set_image("a.jpg").unwrap()),
        Box::new(|c: &mut InputCollector| c.set_image("b.jpg").unwrap()),
        Box::new(|c: &mut InputCollector| c.set_headline("two").unwrap()),
        Box::new(|c: &mut InputCollector| c.clear_image()),
        Box::new(|c: &mut InputCollector| c.set_image("c.jpg").unwrap()),
        Box::new(|c: &mut InputCollector| c.clear_image()),
    ];

    for step in &steps {
        step(&mut collector);
        let both = collector.input().headline().is_some() && collector.input().image().is_some();
        assert!(!both);
    }
    assert_eq!(collector.input(), &Input::Empty);
}

#[test]
fn test_clear_image_keeps_headline() {
    let mut collector = InputCollector::default();
    collector.set_headline("Keep me").unwrap();
    collector.clear_image();

    assert_eq!(collector.input().headline(), Some("Keep me"));
}

#[test]
fn test_inferred_validation() {
    let mut collector = InputCollector::default();
    assert_eq!(
        collector.validate(),
        Err(ValidationError::MissingInput { expected: None })
    );

    collector.set_headline("").unwrap();
    assert_eq!(collector.validate().unwrap_err().code(), "missing-input");

    collector.set_image("/tmp/face.jpg").unwrap();
    let prepared = collector.validate().unwrap();
    assert_eq!(prepared.kind(), InputKind::Image);
}

#[test]
fn test_text_hints_travel_with_headline() {
    let mut collector = InputCollector::default().with_language("de");
    collector.set_headline("Schlagzeile").unwrap();
    collector.set_country("de");
    collector.set_category("politics");
    collector.set_page_size("3");

    match collector.validate().unwrap() {
        PreparedInput::Text {
            headline,
            hints,
            language,
        } => {
            assert_eq!(headline, "Schlagzeile");
            assert_eq!(language, "de");
            assert_eq!(hints.country.as_deref(), Some("de"));
            assert_eq!(hints.category.as_deref(), Some("politics"));
            assert_eq!(hints.page_size.as_deref(), Some("3"));
        }
        other => panic!("expected text input, got {:?}", other),
    }
}

#[test]
fn test_explicit_requires_mode() {
    let mut collector = InputCollector::new(ModePolicy::Explicit);
    assert!(collector.awaiting_mode());

    // Nothing can be entered before a mode is chosen
    assert_eq!(
        collector.set_headline("too early"),
        Err(ValidationError::MissingInput { expected: None })
    );
    assert_eq!(
        collector.validate().unwrap_err().to_string(),
        "Please select an option."
    );
}

#[test]
fn test_explicit_mode_field_must_be_filled() {
    let mut collector = InputCollector::new(ModePolicy::Explicit);

    collector.select_mode(InputKind::Text);
    let err = collector.validate().unwrap_err();
    assert_eq!(err.code(), "missing-input");
    assert_eq!(err.to_string(), "Please enter a headline.");

    collector.select_mode(InputKind::Image);
    let err = collector.validate().unwrap_err();
    assert_eq!(err.to_string(), "Please upload an image.");
}

#[test]
fn test_explicit_rejects_other_mode_input() {
    let mut collector = InputCollector::new(ModePolicy::Explicit);
    collector.select_mode(InputKind::Image);

    let err = collector.set_headline("wrong slot").unwrap_err();
    assert_eq!(err.code(), "mode-mismatch");
    assert_eq!(collector.input(), &Input::Empty);
}

#[test]
fn test_switching_mode_drops_other_input() {
    let mut collector = InputCollector::new(ModePolicy::Explicit);
    collector.select_mode(InputKind::Text);
    collector.set_headline("headline").unwrap();

    collector.select_mode(InputKind::Image);

    assert_eq!(collector.input(), &Input::Empty);
    assert_eq!(collector.mode(), Some(InputKind::Image));
}

#[test]
fn test_clear_returns_to_mode_selection() {
    let mut collector = InputCollector::new(ModePolicy::Explicit);
    collector.select_mode(InputKind::Text);
    collector.set_headline("headline").unwrap();
    collector.set_category("science");

    collector.clear();

    assert!(collector.awaiting_mode());
    assert_eq!(collector.input(), &Input::Empty);
    assert!(collector.hints().category.is_none());
}
