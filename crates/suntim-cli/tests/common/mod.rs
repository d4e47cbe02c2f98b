//! Shared E2E test helpers for `suntim` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables read by the config loader.
const CONFIG_VARS: &[&str] = &[
    "SUNTIM_DEBUG",
    "SUNTIM_HISTORY_CAPACITY",
    "SUNTIM_GROW_ON_ROLE_CHANGE",
    "SUNTIM_PROJECT_DIR",
    "RUST_LOG",
];

/// Two objects and four people, the last one inactive.
pub const SETUP: &str = "\
object O1 Kab. Badung KT=1 KST=1 AT=3
object O2 Kota Denpasar KT=1 AT=2
person p1 Budi Santoso
person p2 Siti Aminah
person p3 Eka
person p4 inactive Fajar
";

/// Build a Command for the `suntim` binary isolated from the user's
/// config: `HOME` and the root directory point into a fresh temp dir.
///
/// Returns (command, _guard); keep the guard alive for the test's duration.
pub fn suntim_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir for home");
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("suntim");
    cmd.timeout(TIMEOUT_BASIC);
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", tmp.path());
    cmd.args(["-C", tmp.path().to_str().expect("valid utf8")]);
    (cmd, tmp)
}

/// Joins [`SETUP`] and `body` into one script.
pub fn script(body: &str) -> String {
    format!("{SETUP}{body}")
}
