use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::HistoryStore;
use crate::domain::models::Message;
use crate::domain::models::Role;

fn tempdir_store() -> Result<(tempfile::TempDir, HistoryStore)> {
    let dir = tempfile::tempdir()?;
    let store = HistoryStore::new(dir.path().join("history"));
    return Ok((dir, store));
}

#[tokio::test]
async fn it_round_trips_the_conversation() -> Result<()> {
    let (_dir, store) = tempdir_store()?;

    let mut streaming = Message::new_streaming(Role::Model);
    streaming.append("partial rep");

    let messages = vec![
        Message::new(Role::Model, "Welcome!"),
        Message::new(Role::User, "Explain arrays"),
        streaming,
    ];

    store.save(&messages).await?;
    let loaded = store.load().await.unwrap();

    assert_eq!(loaded.len(), messages.len());
    for (saved, restored) in messages.iter().zip(loaded.iter()) {
        assert_eq!(restored.id, saved.id);
        assert_eq!(restored.role, saved.role);
        assert_eq!(restored.text, saved.text);
        assert_eq!(restored.timestamp, saved.timestamp);
        assert_eq!(restored.is_streaming, saved.is_streaming);
    }

    return Ok(());
}

#[tokio::test]
async fn it_overwrites_prior_content_on_save() -> Result<()> {
    let (_dir, store) = tempdir_store()?;

    store.save(&[Message::new(Role::User, "first")]).await?;
    store
        .save(&[
            Message::new(Role::User, "first"),
            Message::new(Role::Model, "second"),
        ])
        .await?;

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].text, "second");

    return Ok(());
}

#[tokio::test]
async fn it_skips_saving_an_empty_conversation() -> Result<()> {
    let (_dir, store) = tempdir_store()?;

    store.save(&[]).await?;

    assert!(!store.file_path().exists());
    assert!(store.load().await.is_none());

    return Ok(());
}

#[tokio::test]
async fn it_returns_none_when_nothing_is_stored() -> Result<()> {
    let (_dir, store) = tempdir_store()?;
    assert!(store.load().await.is_none());
    return Ok(());
}

#[tokio::test]
async fn it_returns_none_for_corrupt_history() -> Result<()> {
    let (_dir, store) = tempdir_store()?;

    fs::create_dir_all(&store.data_dir).await?;
    let mut file = fs::File::create(store.file_path()).await?;
    file.write_all(b"{ not json ]").await?;

    assert!(store.load().await.is_none());

    return Ok(());
}

#[tokio::test]
async fn it_clears_idempotently() -> Result<()> {
    let (_dir, store) = tempdir_store()?;

    store.save(&[Message::new(Role::User, "hello")]).await?;
    assert!(store.file_path().exists());

    store.clear().await?;
    assert!(!store.file_path().exists());

    store.clear().await?;
    assert!(store.load().await.is_none());

    return Ok(());
}
