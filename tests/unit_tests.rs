use led_hub::{
    error::HubError, BroadcastHub, Connection, ConnectionRegistry, HubMessage, LedState,
    StateStore, StateUpdate, WebConfig,
};

/// Test LedState wire format in both directions
#[test]
fn test_led_state_serialization() {
    let state = LedState::new("12,34,56", "78");
    let json = serde_json::to_string(&state).expect("Should serialize to JSON");
    assert_eq!(json, r#"{"color":"12,34,56","intensity":"78"}"#);

    let parsed: LedState = serde_json::from_str(&json).expect("Should deserialize from JSON");
    assert_eq!(parsed, state);
}

/// Test that a sequence of updates merges last-write-wins per field
#[tokio::test]
async fn test_update_sequence_merges_per_field() {
    let store = StateStore::default();
    let messages = [
        r#"{"color":"1,1,1"}"#,
        r#"{"intensity":"10"}"#,
        r#"{"color":"2,2,2","intensity":"20"}"#,
        r#"{"color":"3,3,3"}"#,
    ];

    let mut expected = LedState::default();
    for text in messages {
        let update = StateUpdate::parse(text).expect("Should parse update");
        expected.apply(update.clone());
        let (state, changed) = store.apply_partial(update).await;
        assert!(changed);
        assert_eq!(state, expected);
    }

    assert_eq!(store.get().await, LedState::new("3,3,3", "20"));
}

/// Test that one dead connection does not stop delivery to the rest
#[tokio::test]
async fn test_broadcast_survives_failing_connection() {
    let registry = ConnectionRegistry::new();
    let mut healthy = Vec::new();
    for _ in 0..5 {
        let (connection, rx) = Connection::new();
        registry.register(connection, "hello").await.unwrap();
        healthy.push(rx);
    }

    let (broken, broken_rx) = Connection::new();
    registry.register(broken.clone(), "hello").await.unwrap();
    drop(broken_rx);
    assert!(broken.send("direct").is_err());

    assert_eq!(registry.broadcast(r#"{"reset":true}"#).await, 5);
    for rx in &mut healthy {
        assert_eq!(rx.recv().await.as_deref(), Some("hello"));
        assert_eq!(rx.recv().await.as_deref(), Some(r#"{"reset":true}"#));
    }
}

/// Test that the join snapshot matches the state at registration time
#[test]
fn test_join_snapshot_matches_state() {
    tokio_test::block_on(async {
        let hub = BroadcastHub::default();
        hub.handle_message(r#"{"color":"9,8,7","intensity":"6"}"#).await;

        let (_, mut rx) = hub.join().await.expect("Should join");
        let first: LedState =
            serde_json::from_str(&rx.recv().await.unwrap()).expect("Snapshot should be state");
        assert_eq!(first, hub.store().get().await);
        assert!(rx.try_recv().is_err());
    });
}

/// Test reset message shape
#[test]
fn test_reset_message() {
    let json = HubMessage::reset().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value, serde_json::json!({"reset": true}));
}

/// Test HubError creation and formatting
#[test]
fn test_hub_error_types() {
    let web_error = HubError::web_server_error("Server startup failed");
    assert!(format!("{}", web_error).contains("Server startup failed"));

    let config_error = HubError::config_error("Invalid configuration");
    assert!(format!("{}", config_error).contains("Invalid configuration"));

    let json_error: HubError = serde_json::from_str::<LedState>("{").unwrap_err().into();
    assert!(format!("{}", json_error).starts_with("JSON error"));
}

/// Test WebConfig builder pattern
#[test]
fn test_web_config() {
    let config = WebConfig::default()
        .with_host("127.0.0.1")
        .with_port(9090)
        .with_cors(false)
        .with_max_websocket_connections(50)
        .with_initial_state(LedState::new("0,0,0", "0"));

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9090);
    assert!(!config.enable_cors);
    assert_eq!(config.max_websocket_connections, 50);
    assert_eq!(config.initial_state, LedState::new("0,0,0", "0"));
    assert_eq!(config.bind_address(), "127.0.0.1:9090");
}

/// Test default configuration values
#[test]
fn test_web_config_defaults() {
    let config = WebConfig::default();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, led_hub::DEFAULT_WEB_PORT);
    assert!(config.enable_cors);
    assert_eq!(config.initial_state, LedState::default());
}
