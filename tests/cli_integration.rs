#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_pudgyturtle").to_string()
}

#[test]
fn cli_encrypt_decrypt_roundtrip() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("plain.txt");
    let enc = dir.path().join("plain.enc");
    let dec = dir.path().join("plain.dec");

    std::fs::write(&plain, b"attack at dawn, retreat at dusk").unwrap();

    let st = Command::new(bin())
        .args(["encrypt", "--key", "0x5A5A5A"])
        .arg(&plain)
        .arg(&enc)
        .status()
        .unwrap();
    assert!(st.success());

    let st = Command::new(bin())
        .args(["decrypt", "--key", "0x5A5A5A"])
        .arg(&enc)
        .arg(&dec)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(
        std::fs::read(&dec).unwrap(),
        std::fs::read(&plain).unwrap()
    );
}

#[test]
fn cli_compat_profile_matches_reference_tool() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("a.bin");
    std::fs::write(&plain, b"A").unwrap();

    let out = Command::new(bin())
        .args(["encrypt", "--profile", "compat24"])
        .arg(&plain)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, [0x54, 0x44]);
}

#[test]
fn cli_stdin_to_stdout() {
    let mut child = Command::new(bin())
        .arg("encrypt")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"A").unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, [0x54, 0x4E]);
}

#[test]
fn cli_refuses_to_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("in");
    let existing = dir.path().join("out");
    std::fs::write(&plain, b"payload").unwrap();
    std::fs::write(&existing, b"keep me").unwrap();

    let st = Command::new(bin())
        .arg("encrypt")
        .arg(&plain)
        .arg(&existing)
        .status()
        .unwrap();
    assert!(!st.success());
    assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");

    let st = Command::new(bin())
        .args(["--force", "encrypt"])
        .arg(&plain)
        .arg(&existing)
        .status()
        .unwrap();
    assert!(st.success());
    assert_ne!(std::fs::read(&existing).unwrap(), b"keep me");
}

#[test]
fn cli_malformed_ciphertext_fails() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("bad.enc");
    // First default-key mask is 0x55; 0x50 unmasks to discrepancy 5.
    std::fs::write(&bad, [0x50u8]).unwrap();

    let out = Command::new(bin())
        .args(["decrypt", "--check-only"])
        .arg(&bad)
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("malformed ciphertext"), "stderr: {stderr}");
}

#[test]
fn cli_zero_key_rejected() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("in");
    std::fs::write(&plain, b"x").unwrap();

    let out = Command::new(bin())
        .args(["encrypt", "--check-only", "--key", "0x1000000"])
        .arg(&plain)
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn cli_json_stats() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("in");
    std::fs::write(&plain, b"hello").unwrap();

    let out = Command::new(bin())
        .args(["--json", "encrypt", "--check-only"])
        .arg(&plain)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(stats["command"], "encrypt");
    assert_eq!(stats["input_size"], 5);
    assert!(stats["output_size"].as_u64().unwrap() >= 10);
}

#[test]
fn cli_config_works() {
    let out = Command::new(bin()).arg("config").output().unwrap();
    assert!(out.status.success());
}
