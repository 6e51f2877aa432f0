use super::Conversation;
use crate::configuration::WELCOME_MESSAGE;
use crate::domain::models::Message;
use crate::domain::models::Role;

fn streaming_count(conversation: &Conversation) -> usize {
    return conversation
        .messages()
        .iter()
        .filter(|e| return e.is_streaming)
        .count();
}

#[test]
fn it_guards_blank_submissions() {
    let conversation = Conversation::default();
    assert!(!conversation.can_submit(""));
    assert!(!conversation.can_submit("   \n\t "));
    assert!(conversation.can_submit("hello"));
}

#[test]
fn it_guards_submissions_while_streaming() {
    let mut conversation = Conversation::default();
    conversation.reset_with_welcome();

    let pending_id = conversation.begin_exchange("hello");
    assert!(conversation.is_typing());
    assert!(!conversation.can_submit("hello again"));

    conversation.finalize(&pending_id);
    assert!(!conversation.is_typing());
    assert!(conversation.can_submit("hello again"));
}

#[test]
fn it_begins_an_exchange() {
    let mut conversation = Conversation::default();
    conversation.reset_with_welcome();

    let pending_id = conversation.begin_exchange("What is recursion?");

    let messages = conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].text, "What is recursion?");
    assert!(!messages[1].is_streaming);
    assert_eq!(messages[2].role, Role::Model);
    assert_eq!(messages[2].id, pending_id);
    assert!(messages[2].text.is_empty());
    assert!(messages[2].is_streaming);
    assert_eq!(streaming_count(&conversation), 1);
}

#[test]
fn it_appends_fragments_in_order() {
    let mut conversation = Conversation::default();
    let pending_id = conversation.begin_exchange("hello");

    conversation.append_fragment(&pending_id, "Hello ");
    conversation.append_fragment(&pending_id, "World");

    assert_eq!(conversation.messages().last().unwrap().text, "Hello World");
    assert!(conversation.is_typing());
}

#[test]
fn it_ignores_fragments_for_unknown_ids() {
    let mut conversation = Conversation::default();
    let pending_id = conversation.begin_exchange("hello");

    conversation.append_fragment("superseded-id", "stale fragment");
    conversation.finalize("superseded-id");

    assert!(conversation.messages().last().unwrap().text.is_empty());
    assert!(conversation.is_typing());

    conversation.finalize(&pending_id);
    assert!(!conversation.is_typing());
}

#[test]
fn it_freezes_finalized_replies() {
    let mut conversation = Conversation::default();
    let pending_id = conversation.begin_exchange("hello");

    conversation.append_fragment(&pending_id, "Done.");
    conversation.finalize(&pending_id);
    conversation.append_fragment(&pending_id, "late fragment");

    assert_eq!(conversation.messages().last().unwrap().text, "Done.");
}

#[test]
fn it_resets_with_welcome_idempotently() {
    let mut conversation = Conversation::default();
    let pending_id = conversation.begin_exchange("hello");
    conversation.append_fragment(&pending_id, "Hi!");
    conversation.finalize(&pending_id);

    conversation.reset_with_welcome();
    conversation.reset_with_welcome();

    let messages = conversation.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::Model);
    assert_eq!(messages[0].text, WELCOME_MESSAGE);
    assert!(!messages[0].is_streaming);
}

#[test]
fn it_excludes_leftovers_from_replay_but_keeps_them_displayed() {
    let mut leftover = Message::new_streaming(Role::Model);
    leftover.append("a reply that never fini");

    let restored = vec![
        Message::new(Role::Model, WELCOME_MESSAGE),
        Message::new(Role::User, "Explain loops"),
        leftover,
    ];

    let mut conversation = Conversation::default();
    conversation.restore(restored);

    let turns = conversation.replay_turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, Role::Model);
    assert_eq!(turns[1].role, Role::User);
    assert_eq!(turns[1].text, "Explain loops");

    conversation.normalize();
    assert_eq!(conversation.messages().len(), 3);
    assert_eq!(streaming_count(&conversation), 0);
    assert!(conversation.can_submit("hello"));
}

#[test]
fn it_excludes_empty_placeholders_from_replay() {
    let mut empty = Message::new_streaming(Role::Model);
    empty.finalize();

    let mut conversation = Conversation::default();
    conversation.restore(vec![Message::new(Role::User, "hi"), empty]);

    assert_eq!(conversation.replay_turns().len(), 1);
}

#[test]
fn it_balances_user_and_model_counts_across_exchanges() {
    let mut conversation = Conversation::default();
    conversation.reset_with_welcome();

    for idx in 0..5 {
        let pending_id = conversation.begin_exchange(&format!("question {idx}"));
        assert_eq!(streaming_count(&conversation), 1);
        conversation.append_fragment(&pending_id, "answer");
        conversation.finalize(&pending_id);
        assert_eq!(streaming_count(&conversation), 0);
    }

    let users = conversation
        .messages()
        .iter()
        .filter(|e| return e.role == Role::User)
        .count();
    let finalized_models = conversation
        .messages()
        .iter()
        .filter(|e| return e.role == Role::Model && !e.is_streaming)
        .count();

    assert_eq!(users, 5);
    // The welcome message is the one extra model turn.
    assert_eq!(finalized_models, 6);
}
