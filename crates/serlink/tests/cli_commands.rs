use std::path::PathBuf;
use std::process::Command;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/serlink-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write_catalog(dir: &PathBuf) -> PathBuf {
    let path = dir.join("types.json");
    std::fs::write(
        &path,
        r#"{
            "message_types": [
                { "id": 7, "name": "adc_reading", "data_type": "u16",
                  "description": "Raw ADC sample" }
            ]
        }"#,
    )
    .expect("catalog should be writable");
    path
}

#[test]
fn types_lists_catalog_entries() {
    let dir = unique_temp_dir("types");
    let catalog = write_catalog(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_serlink"))
        .arg("--log-level")
        .arg("error")
        .arg("--format")
        .arg("json")
        .arg("types")
        .arg("--registry")
        .arg(&catalog)
        .output()
        .expect("types command should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("adc_reading"));
    assert!(stdout.contains("\"id\":7"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn types_fails_on_missing_catalog() {
    let output = Command::new(env!("CARGO_BIN_EXE_serlink"))
        .arg("--log-level")
        .arg("error")
        .arg("types")
        .arg("--registry")
        .arg("/nonexistent/types.json")
        .output()
        .expect("types command should run");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn decode_prints_valid_frame() {
    let output = Command::new(env!("CARGO_BIN_EXE_serlink"))
        .arg("--log-level")
        .arg("error")
        .arg("--format")
        .arg("json")
        .arg("decode")
        .arg("01 01 07 03 04 0A")
        .output()
        .expect("decode command should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"checksum_ok\":true"));
    assert!(stdout.contains("\"type_id\":7"));
}

#[test]
fn decode_rejects_truncated_frame() {
    let output = Command::new(env!("CARGO_BIN_EXE_serlink"))
        .arg("--log-level")
        .arg("error")
        .arg("decode")
        .arg("01 01 07")
        .output()
        .expect("decode command should run");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn version_prints_package_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_serlink"))
        .arg("version")
        .output()
        .expect("version command should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("serlink "));
}
