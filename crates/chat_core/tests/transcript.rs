use chat_core::{Sender, SourceCategory, Transcript, PLACEHOLDER_TEXT};
use pretty_assertions::assert_eq;

#[test]
fn render_splits_lines_and_dedupes_badges() {
    let mut transcript = Transcript::new();
    let id = transcript.render(
        "first\nsecond",
        Sender::Bot,
        vec![
            "Wikipedia: A".to_string(),
            "DuckDuckGo: B".to_string(),
            "Wikipedia: C".to_string(),
        ],
    );

    let view = transcript.view();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, id);
    assert_eq!(view[0].lines, vec!["first".to_string(), "second".to_string()]);
    let labels: Vec<_> = view[0].badges.iter().map(|b| b.label).collect();
    assert_eq!(labels, vec!["Wikipedia", "DuckDuckGo"]);
    assert_eq!(transcript.latest(), Some(id));
}

#[test]
fn markup_is_kept_as_text() {
    let mut transcript = Transcript::new();
    transcript.render("<b>bold</b>", Sender::Bot, Vec::new());

    assert_eq!(transcript.view()[0].lines, vec!["<b>bold</b>".to_string()]);
}

#[test]
fn user_messages_never_carry_badges() {
    let mut transcript = Transcript::new();
    transcript.render("hi", Sender::User, vec!["PDF p1".to_string()]);

    let view = transcript.view();
    assert!(view[0].badges.is_empty());
    assert!(transcript.messages().all(|m| m.sources.is_empty()));
}

#[test]
fn unknown_tag_renders_other_badge() {
    let mut transcript = Transcript::new();
    transcript.render("x", Sender::Bot, vec!["Foo: x".to_string()]);

    let badge = transcript.view()[0].badges[0];
    assert_eq!(badge.category, SourceCategory::Other);
    assert_eq!(badge.label, "Other");
}

#[test]
fn placeholder_is_removable_but_messages_are_not() {
    let mut transcript = Transcript::new();
    let message = transcript.render("hello", Sender::User, Vec::new());
    let placeholder = transcript.push_placeholder();

    let view = transcript.view();
    assert!(view[1].placeholder);
    assert_eq!(view[1].lines, vec![PLACEHOLDER_TEXT.to_string()]);
    assert_eq!(transcript.latest(), Some(placeholder));

    assert!(!transcript.remove(message));
    assert!(transcript.remove(placeholder));
    assert!(!transcript.remove(placeholder));
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.latest(), Some(message));
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut transcript = Transcript::new();
    let placeholder = transcript.push_placeholder();
    transcript.remove(placeholder);
    let next = transcript.render("x", Sender::Bot, Vec::new());

    assert_ne!(placeholder, next);
}
