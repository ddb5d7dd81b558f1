use tempfile::TempDir;

use crate::brew::Brew;

/// Writes `body` as a shell script standing in for `brew` and returns a
/// `Brew` that runs it through `sh`. Keep the `TempDir` alive for the test.
pub fn fake_brew(body: &str) -> (TempDir, Brew) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("brew.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write fake brew");
    let brew = Brew::from_parts("sh", vec![path.to_string_lossy().to_string()]);
    (dir, brew)
}
