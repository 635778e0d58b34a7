use chrono::{TimeZone, Utc};
use paperclip_error::{PaperclipErrorKind, StorageErrorKind};
use paperclip_storage::SessionStore;
use tempfile::TempDir;

#[tokio::test]
async fn test_start_writes_file_immediately() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = SessionStore::new(dir.path().join("sessions"))?;
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    let session = store.start("local_session", now).await?;

    let path = store.path_for(session.id());
    assert!(path.exists());
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    assert_eq!(json["id"], session.id().as_str());
    assert_eq!(json["name"], format!("local_session_{}", session.id()));
    assert_eq!(json["created_at"], 1_700_000_000);
    assert_eq!(json["messages"], serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn test_save_and_load_round_trip() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = SessionStore::new(dir.path())?;
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let mut session = store.start("s", now).await?;

    session
        .history_mut()
        .append_exchange("héllo", "wörld", "gem", now);
    store.save(&session).await?;

    let loaded = store.load(session.id()).await?;
    assert_eq!(loaded, session);

    let raw = std::fs::read_to_string(store.path_for(session.id()))?;
    assert!(raw.contains("wörld"));
    assert!(raw.contains("\"provider\": \"gem\""));
    assert!(!dir.path().join(format!("{}.json.tmp", session.id())).exists());
    Ok(())
}

#[tokio::test]
async fn test_load_missing_session_is_not_found() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = SessionStore::new(dir.path())?;

    let err = store.load("deadbeef").await.unwrap_err();
    match err.kind() {
        PaperclipErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::NotFound(_)))
        }
        other => panic!("unexpected error: {}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_load_rejects_garbage() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = SessionStore::new(dir.path())?;
    std::fs::write(store.path_for("bad"), "{not json")?;

    let err = store.load("bad").await.unwrap_err();
    assert!(err.to_string().contains("Invalid session document"));
    Ok(())
}
