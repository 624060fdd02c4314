//! The default sink aborts the process, so it runs in a child copy of this test binary.

use std::env;
use std::process::{Command, Stdio};

use fallible::{ErrorCode, ResultExt, Status, err};

const CHILD_ENV: &str = "FALLIBLE_ABORT_CHILD";

#[test]
fn default_sink_aborts_on_expect_ok() {
    if env::var_os(CHILD_ENV).is_some() {
        let status: Status = Err(err(ErrorCode::UNKNOWN).domain("D").reason("boom").done());
        status.expect_ok();
        return;
    }

    let exe = env::current_exe().expect("test binary path");
    let output = Command::new(exe)
        .env(CHILD_ENV, "1")
        .env("RUST_TEST_THREADS", "1")
        .arg("default_sink_aborts_on_expect_ok")
        .arg("--exact")
        .arg("--nocapture")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("spawn child test process");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success(), "child survived expect_ok: {stderr}");
    assert!(stderr.contains("Panicked at"), "{stderr}");
    assert!(stderr.contains("boom"), "{stderr}");
    assert!(stderr.contains("abort.rs:"), "{stderr}");
}
