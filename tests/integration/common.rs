//! Shared helpers for driving the binary.

use assert_cmd::Command;
use std::path::Path;

/// `bemforge` run inside `dir` with colors and inherited log settings off.
pub fn bemforge(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bemforge").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}
