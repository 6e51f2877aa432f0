use chrono::Local;
use chrono::TimeZone;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Message;
use crate::domain::models::Role;

fn message_at_noon(role: Role, text: &str) -> Message {
    return Message {
        id: "test-message".to_string(),
        role,
        text: text.to_string(),
        timestamp: Local.with_ymd_and_hms(2025, 11, 16, 12, 30, 0).unwrap(),
        is_streaming: false,
    };
}

fn compose(lines: Vec<ratatui::text::Line<'static>>) -> Vec<String> {
    return lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| return span.content.to_string())
                .collect::<String>();
        })
        .collect();
}

#[test]
fn it_renders_a_model_bubble() {
    let msg = message_at_noon(Role::Model, "Hello World");
    let composed = compose(Bubble::new(&msg, BubbleAlignment::Left, 80).as_lines());

    insta::assert_debug_snapshot!(composed, @r###"
    [
        "FCI Assistant · 12:30",
        "Hello World",
        "",
    ]
    "###);
}

#[test]
fn it_wraps_text_to_three_quarters_of_the_viewport() {
    let msg = message_at_noon(
        Role::Model,
        "A variable is a named box that holds one value at a time and can be reassigned",
    );
    let composed = compose(Bubble::new(&msg, BubbleAlignment::Left, 40).as_lines());

    // Header, at least two wrapped lines, trailing blank.
    assert!(composed.len() > 3);
    for line in composed.iter().skip(1) {
        assert!(line.chars().count() <= 30);
    }
}

#[test]
fn it_right_aligns_user_bubbles() {
    let msg = message_at_noon(Role::User, "hi");
    let composed = compose(Bubble::new(&msg, BubbleAlignment::Right, 40).as_lines());

    let body = &composed[1];
    assert_eq!(body.chars().count(), 40);
    assert!(body.starts_with("  "));
    assert!(body.ends_with("hi"));
}

#[test]
fn it_renders_a_placeholder_body_for_empty_streaming_messages() {
    let mut msg = message_at_noon(Role::Model, "");
    msg.is_streaming = true;
    let composed = compose(Bubble::new(&msg, BubbleAlignment::Left, 40).as_lines());

    assert_eq!(composed.len(), 3);
    assert_eq!(composed[1], " ");
}
