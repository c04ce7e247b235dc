use std::io::Write;

use vox_ox::{
    AudioFile, AudioFormat, InputKind, InputSelection, VoxBridge, VoxRequestError,
    parse_timeout_secs, validate_endpoint,
};

#[tokio::test]
async fn test_load_wav_file() {
    let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
    file.write_all(b"RIFF\x24\x00\x00\x00WAVEfmt ").unwrap();

    let audio = AudioFile::load(file.path()).await.unwrap();
    assert_eq!(audio.format, AudioFormat::Wav);
    assert_eq!(audio.len(), 16);
    assert!(audio.name.ends_with(".wav"));

    let selection = InputSelection::from(audio);
    assert_eq!(selection.kind(), InputKind::Audio);
}

#[tokio::test]
async fn test_load_rejects_other_extensions() {
    let file = tempfile::Builder::new().suffix(".ogg").tempfile().unwrap();

    let err = AudioFile::load(file.path()).await.unwrap_err();
    assert!(matches!(err, VoxRequestError::UnsupportedAudioFormat(ext) if ext == "ogg"));
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = AudioFile::load(dir.path().join("missing.mp3")).await.unwrap_err();
    assert!(matches!(err, VoxRequestError::Io(_)));
}

#[tokio::test]
async fn test_empty_upload_is_not_sent() {
    let file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
    let audio = AudioFile::load(file.path()).await.unwrap();
    assert!(audio.is_empty());

    // Unroutable endpoint: the request must fail before any network access.
    let bridge = VoxBridge::new("http://127.0.0.1:9/unused");
    let err = bridge.process(&InputSelection::from(audio)).await.unwrap_err();
    assert!(matches!(err, VoxRequestError::EmptyInput));
}

#[test]
fn test_config_validation() {
    assert!(validate_endpoint("https://example.com/default/fn").is_ok());
    assert!(validate_endpoint("example.com/fn").is_err());
    assert!(validate_endpoint("file:///tmp/x").is_err());

    assert_eq!(parse_timeout_secs(" 30 ").unwrap().as_secs(), 30);
    assert!(parse_timeout_secs("0").is_err());
    assert!(parse_timeout_secs("soon").is_err());
}

#[test]
fn test_default_client() {
    let bridge = VoxBridge::default();
    assert_eq!(bridge.endpoint(), vox_ox::DEFAULT_ENDPOINT);
    assert_eq!(bridge.timeout(), vox_ox::DEFAULT_TIMEOUT);
    assert!(format!("{bridge:?}").contains("VoxBridge"));
}

// One test owns the VOX_* variables so nothing else in this binary races on them.
#[test]
fn test_load_from_env() {
    unsafe {
        std::env::set_var("VOX_ENDPOINT", "http://localhost:7000/default/fn");
        std::env::set_var("VOX_TIMEOUT_SECS", "42");
    }
    let bridge = VoxBridge::load_from_env().unwrap();
    assert_eq!(bridge.endpoint(), "http://localhost:7000/default/fn");
    assert_eq!(bridge.timeout().as_secs(), 42);

    for bad in ["0", "soon"] {
        unsafe { std::env::set_var("VOX_TIMEOUT_SECS", bad) };
        let err = VoxBridge::load_from_env().unwrap_err();
        assert!(matches!(err, VoxRequestError::InvalidConfig(_)), "{bad}: {err:?}");
    }

    unsafe {
        std::env::remove_var("VOX_TIMEOUT_SECS");
        std::env::set_var("VOX_ENDPOINT", "ftp://example.com/fn");
    }
    let err = VoxBridge::load_from_env().unwrap_err();
    assert!(matches!(err, VoxRequestError::InvalidConfig(ref m) if m.contains("ftp")));

    unsafe { std::env::remove_var("VOX_ENDPOINT") };
    let bridge = VoxBridge::load_from_env().unwrap();
    assert_eq!(bridge.endpoint(), vox_ox::DEFAULT_ENDPOINT);
    assert_eq!(bridge.timeout(), vox_ox::DEFAULT_TIMEOUT);
}
