use yfinance_session::{SessionKey, SessionSnapshot, SessionState};

#[tokio::test]
async fn clones_share_one_store() {
    let state = SessionState::new();
    let other = state.clone();

    other.set(SessionKey::Crumb, "c1").await;
    assert_eq!(state.get("crumb").await.as_deref(), Some("c1"));

    state.set("crumb", "c2").await;
    assert_eq!(other.get(SessionKey::Crumb).await.as_deref(), Some("c2"));
}

#[tokio::test]
async fn empty_values_do_not_count_as_present() {
    let state = SessionState::new();
    assert!(!state.has(SessionKey::SessionId).await);
    state.set(SessionKey::SessionId, "").await;
    assert!(!state.has(SessionKey::SessionId).await);
    assert_eq!(state.get(SessionKey::SessionId).await.as_deref(), Some(""));
}

#[tokio::test]
async fn snapshot_survives_json_and_restore() {
    let state = SessionState::new();
    state.set(SessionKey::SessionId, "sess").await;
    state.set(SessionKey::Crumb, "cr/umb").await;
    state.set("unrelated", "ignored").await;

    let json = state.snapshot().await.to_json().unwrap();
    assert_eq!(json, r#"{"sessionId":"sess","crumb":"cr/umb"}"#);

    let restored = SessionState::new();
    restored.restore(&SessionSnapshot::from_json(&json).unwrap()).await;
    let snap = restored.snapshot().await;
    assert_eq!(snap.value(SessionKey::SessionId), "sess");
    assert_eq!(snap.value(SessionKey::Crumb), "cr/umb");
    assert_eq!(snap.get(SessionKey::CsrfToken), None);

    let seeded = SessionState::from_snapshot(&snap);
    assert!(seeded.has(SessionKey::Crumb).await);
    assert_eq!(seeded.get("unrelated").await, None);
}

#[test]
fn malformed_snapshot_json_is_a_data_error() {
    let err = SessionSnapshot::from_json("{not json").unwrap_err();
    assert!(matches!(err, yfinance_session::YfError::Data(_)));
}

#[test]
fn keys_use_wire_names() {
    let names: Vec<String> = [
        SessionKey::SessionId,
        SessionKey::CsrfToken,
        SessionKey::BrandBid,
        SessionKey::Crumb,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(names, ["sessionId", "csrfToken", "brandBid", "crumb"]);
}
