use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use selfq_core::export::{protect, recover, EnvelopeConfig, ProtectedRecord};
use selfq_core::fs::write_atomic;
use selfq_core::{is_well_formed, ErrorKind};

struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be available")
            .as_nanos();
        let filename = format!("{}_{}_{}.selfq.json", prefix, std::process::id(), nanos);
        let path = std::env::temp_dir().join(filename);
        Self { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn story() -> ProtectedRecord {
    serde_json::json!({
        "title": "Day 1",
        "content": "Hello",
        "mood": 4,
        "tags": ["first", "morning"],
        "draft": false,
        "location": { "lat": 52.52, "lon": 13.405 },
        "notes": "Ünïcödé and emoji \u{1F600}"
    })
    .as_object()
    .cloned()
    .expect("object literal")
}

#[test]
fn test_artifact_file_round_trip_with_production_iterations() {
    let temp = TempFile::new("selfq_round_trip");
    let config = EnvelopeConfig::story();

    let artifact = protect(&story(), &config).expect("protect should succeed");
    let text = artifact.to_json_pretty().expect("serialize should succeed");
    write_atomic(&temp.path, text.as_bytes()).expect("write should succeed");

    let on_disk = fs::read_to_string(&temp.path).expect("read should succeed");
    assert!(is_well_formed(&on_disk, &config));

    let recovered = recover(&on_disk, &config).expect("recover should succeed");
    assert_eq!(recovered, story());
}

#[test]
fn test_post_family_round_trip() {
    let temp = TempFile::new("selfq_post");
    let config = EnvelopeConfig::post().with_kdf_iterations(2_000);
    let post = serde_json::json!({ "slug": "hello-world", "body": "# Hi" })
        .as_object()
        .cloned()
        .expect("object literal");

    let text = protect(&post, &config)
        .and_then(|a| a.to_json_pretty())
        .expect("protect should succeed");
    write_atomic(&temp.path, text.as_bytes()).expect("write should succeed");

    let on_disk = fs::read_to_string(&temp.path).expect("read should succeed");
    assert_eq!(recover(&on_disk, &config).expect("recover"), post);

    let story_err = recover(&on_disk, &EnvelopeConfig::story()).unwrap_err();
    assert_eq!(story_err.kind(), ErrorKind::SignatureMismatch);
    assert!(!is_well_formed(&on_disk, &EnvelopeConfig::story()));
}

#[test]
fn test_same_record_protects_to_independent_artifacts() {
    let config = EnvelopeConfig::story().with_kdf_iterations(1_000);
    let first = protect(&story(), &config).expect("protect");
    let second = protect(&story(), &config).expect("protect");

    assert_ne!(first.encrypted_data, second.encrypted_data);
    for (a, b) in first.layer_info.iter().zip(&second.layer_info) {
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.nonce, b.nonce);
    }
}

#[test]
fn test_concurrent_protect_and_recover() {
    let config = EnvelopeConfig::story().with_kdf_iterations(1_000);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let config = config.clone();
            std::thread::spawn(move || {
                let mut record = story();
                record.insert("index".to_string(), serde_json::json!(i));
                let text = protect(&record, &config)
                    .and_then(|a| a.to_json_pretty())
                    .expect("protect");
                (record, recover(&text, &config).expect("recover"))
            })
        })
        .collect();

    for handle in handles {
        let (original, recovered) = handle.join().expect("thread");
        assert_eq!(original, recovered);
    }
}
