use anyhow::Result;
use tokio::sync::mpsc;

use super::ChatService;
use crate::configuration::ERROR_REPLY;
use crate::configuration::WELCOME_MESSAGE;
use crate::domain::models::Event;
use crate::domain::models::Role;
use crate::domain::services::Conversation;
use crate::domain::services::HistoryStore;
use crate::infrastructure::gemini::Gemini;

fn test_service(
    url: String,
    dir: &std::path::Path,
) -> (ChatService, mpsc::UnboundedReceiver<Event>) {
    let (tx, rx) = mpsc::unbounded_channel::<Event>();
    let mut conversation = Conversation::default();
    conversation.reset_with_welcome();

    let service = ChatService {
        conversation,
        session: Gemini::with_url(url),
        store: HistoryStore::new(dir.to_path_buf()),
        tx,
    };

    return (service, rx);
}

fn last_snapshot(rx: &mut mpsc::UnboundedReceiver<Event>) -> Option<crate::domain::models::ConversationSnapshot> {
    let mut last = None;
    while let Ok(event) = rx.try_recv() {
        if let Event::ConversationUpdated(snapshot) = event {
            last = Some(snapshot);
        }
    }
    return last;
}

fn delta_line(text: &str) -> String {
    return format!(
        "data: {{\"candidates\":[{{\"content\":{{\"role\":\"model\",\"parts\":[{{\"text\":\"{text}\"}}]}}}}]}}"
    );
}

#[tokio::test]
async fn it_ignores_blank_submissions() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut service, mut rx) = test_service("http://localhost:0".to_string(), dir.path());

    service.submit("   \n\t ").await?;

    assert_eq!(service.conversation.messages().len(), 1);
    assert!(!service.store.file_path().exists());
    assert!(last_snapshot(&mut rx).is_none());

    return Ok(());
}

#[tokio::test]
async fn it_rejects_submissions_while_streaming() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut service, _rx) = test_service("http://localhost:0".to_string(), dir.path());

    service.conversation.begin_exchange("first question");
    let before = service.conversation.messages().len();

    service.submit("hello").await?;

    assert_eq!(service.conversation.messages().len(), before);

    return Ok(());
}

#[tokio::test]
async fn it_streams_a_full_exchange() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let body = [delta_line("Hello "), delta_line("World")].join("\n\n");

    let mut server = mockito::Server::new();
    let mock = server
        .mock(
            "POST",
            "/v1beta/models/model-1:streamGenerateContent?alt=sse&key=abc",
        )
        .with_status(200)
        .with_body(body)
        .create();

    let (mut service, mut rx) = test_service(server.url(), dir.path());
    service.submit("Say hi to the world").await?;
    mock.assert();

    let messages = service.conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].text, "Say hi to the world");
    assert_eq!(messages[2].role, Role::Model);
    assert_eq!(messages[2].text, "Hello World");
    assert!(!messages[2].is_streaming);

    // The reply joined the session context for the next turn.
    assert_eq!(service.session.history_len(), 2);

    let saved = service.store.load().await.unwrap();
    assert_eq!(saved.len(), 3);
    assert_eq!(saved[2].text, "Hello World");
    assert!(!saved[2].is_streaming);

    let snapshot = last_snapshot(&mut rx).unwrap();
    assert!(!snapshot.is_typing);
    assert_eq!(snapshot.messages.len(), 3);

    return Ok(());
}

#[tokio::test]
async fn it_finalizes_with_an_apology_on_remote_failure() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut server = mockito::Server::new();
    let mock = server
        .mock(
            "POST",
            "/v1beta/models/model-1:streamGenerateContent?alt=sse&key=abc",
        )
        .with_status(500)
        .create();

    let (mut service, mut rx) = test_service(server.url(), dir.path());
    service.submit("hello").await?;
    mock.assert();

    let messages = service.conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].text, ERROR_REPLY);
    assert!(!messages[2].is_streaming);

    // The failed exchange is dropped from the session context.
    assert_eq!(service.session.history_len(), 0);

    let saved = service.store.load().await.unwrap();
    assert_eq!(saved[2].text, ERROR_REPLY);
    assert!(!saved[2].is_streaming);

    let snapshot = last_snapshot(&mut rx).unwrap();
    assert!(!snapshot.is_typing);

    // The conversation stays usable afterwards.
    assert!(service.conversation.can_submit("try again"));

    return Ok(());
}

#[tokio::test]
async fn it_resets_idempotently() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut service, mut rx) = test_service("http://localhost:0".to_string(), dir.path());

    let pending_id = service.conversation.begin_exchange("hello");
    service.conversation.append_fragment(&pending_id, "Hi!");
    service.conversation.finalize(&pending_id);
    service.persist().await?;
    assert!(service.store.file_path().exists());

    service.reset().await?;
    service.reset().await?;

    let messages = service.conversation.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::Model);
    assert_eq!(messages[0].text, WELCOME_MESSAGE);
    assert_eq!(service.session.history_len(), 0);

    // The slot holds exactly the welcome state after a reset.
    let saved = service.store.load().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].text, WELCOME_MESSAGE);

    let snapshot = last_snapshot(&mut rx).unwrap();
    assert_eq!(snapshot.messages.len(), 1);
    assert!(!snapshot.is_typing);

    return Ok(());
}
