use std::time::Duration;

use clap::Parser;
use serde_json::json;
use vox_ox::{InputSelection, Locale, Session, VoxBridge};
use vox_ox_cli::{
    cli::{Cli, Commands, submit_and_present, submit_file},
    output::Presenter,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method},
};

#[test]
fn test_parse_text_command() {
    let cli = Cli::try_parse_from([
        "vox",
        "--endpoint",
        "http://localhost:9000/fn",
        "--timeout-secs",
        "30",
        "--lang",
        "en",
        "text",
        "Hola mundo",
    ])
    .unwrap();

    assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9000/fn"));
    assert_eq!(cli.timeout_secs, Some(30));
    assert_eq!(cli.lang, Locale::En);
    assert!(matches!(cli.command, Commands::Text { text: Some(ref t) } if t == "Hola mundo"));

    let bridge = cli.bridge().unwrap();
    assert_eq!(bridge.timeout(), Duration::from_secs(30));
}

#[test]
fn test_parse_rejects_zero_timeout_and_unknown_lang() {
    assert!(Cli::try_parse_from(["vox", "--timeout-secs", "0", "repl"]).is_err());
    assert!(Cli::try_parse_from(["vox", "--lang", "fr", "repl"]).is_err());
}

#[test]
fn test_bad_endpoint_is_reported() {
    let cli = Cli::try_parse_from(["vox", "--endpoint", "not a url", "audio", "x.mp3"]).unwrap();
    assert!(cli.bridge().is_err());
}

#[test]
fn test_missing_flags_fall_back_to_env() {
    unsafe {
        std::env::set_var("VOX_ENDPOINT", "http://localhost:7000/from-env");
        std::env::set_var("VOX_TIMEOUT_SECS", "45");
    }

    let cli = Cli::try_parse_from(["vox", "--timeout-secs", "10", "repl"]).unwrap();
    let bridge = cli.bridge().unwrap();
    assert_eq!(bridge.endpoint(), "http://localhost:7000/from-env");
    assert_eq!(bridge.timeout(), Duration::from_secs(10));

    unsafe {
        std::env::remove_var("VOX_ENDPOINT");
        std::env::remove_var("VOX_TIMEOUT_SECS");
    }
}

async fn bridge_for(server: &MockServer) -> VoxBridge {
    VoxBridge::builder()
        .endpoint(format!("{}/default/fn", server.uri()))
        .timeout(Duration::from_secs(5))
        .build()
}

#[tokio::test]
async fn test_text_flow_saves_audio() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({ "text": "Hola mundo" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "audio_base64": "SUQzBAA=" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(bridge_for(&server).await);
    let mut presenter = Presenter::new(Locale::Es, dir.path());
    let mut out = Vec::new();

    let ok = submit_and_present(
        &mut session,
        &mut presenter,
        &InputSelection::text("Hola mundo"),
        &mut out,
    )
    .await
    .unwrap();
    assert!(ok);

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("No hay texto para mostrar"));
    assert!(printed.contains("vox-output.mp3"));

    let saved = std::fs::read(dir.path().join("vox-output.mp3")).unwrap();
    assert_eq!(saved, b"ID3\x04\x00");
}

#[tokio::test]
async fn test_saved_audio_never_overwrites_earlier_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "audio_base64": "SUQzBAA=" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("vox-output.mp3"), b"previous").unwrap();

    // A fresh presenter stands in for a second run of the binary.
    let mut session = Session::new(bridge_for(&server).await);
    let mut presenter = Presenter::new(Locale::En, dir.path());
    let mut out = Vec::new();

    for _ in 0..2 {
        let ok = submit_and_present(&mut session, &mut presenter, &InputSelection::text("hi"), &mut out)
            .await
            .unwrap();
        assert!(ok);
    }

    assert_eq!(std::fs::read(dir.path().join("vox-output.mp3")).unwrap(), b"previous");
    assert_eq!(std::fs::read(dir.path().join("vox-output-2.mp3")).unwrap(), b"ID3\x04\x00");
    assert_eq!(std::fs::read(dir.path().join("vox-output-3.mp3")).unwrap(), b"ID3\x04\x00");
    assert!(String::from_utf8(out).unwrap().contains("vox-output-3.mp3"));
}

#[tokio::test]
async fn test_server_error_is_printed_inline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Polly unavailable" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(bridge_for(&server).await);
    let mut presenter = Presenter::new(Locale::En, dir.path());
    let mut out = Vec::new();

    let ok = submit_and_present(&mut session, &mut presenter, &InputSelection::text("hi"), &mut out)
        .await
        .unwrap();
    assert!(!ok);
    assert!(String::from_utf8(out).unwrap().contains("Polly unavailable"));
}

#[tokio::test]
async fn test_audio_file_flow_prints_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({ "audio_base64": "AQID" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "hola" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let upload = dir.path().join("grabacion.mp3");
    std::fs::write(&upload, [1u8, 2, 3]).unwrap();

    let mut session = Session::new(bridge_for(&server).await);
    let mut presenter = Presenter::new(Locale::Es, dir.path());
    let mut out = Vec::new();

    let ok = submit_file(&mut session, &mut presenter, &upload, &mut out)
        .await
        .unwrap();
    assert!(ok);

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("grabacion.mp3 (audio/mpeg, 3 bytes)"));
    assert!(printed.contains("hola"));
    assert!(printed.contains("No hay audio para mostrar"));
}

#[tokio::test]
async fn test_unsupported_upload_does_not_reach_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let upload = dir.path().join("voice.ogg");
    std::fs::write(&upload, [1u8]).unwrap();

    let mut session = Session::new(bridge_for(&server).await);
    let mut presenter = Presenter::new(Locale::En, dir.path());
    let mut out = Vec::new();

    let ok = submit_file(&mut session, &mut presenter, &upload, &mut out)
        .await
        .unwrap();
    assert!(!ok);
    assert!(String::from_utf8(out).unwrap().contains("Unsupported audio format (ogg)"));
}
