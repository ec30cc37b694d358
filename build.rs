use std::{env, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let hash = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".into());
    let status = match command_stdout("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean",
        Some(_) => "dirty",
        None => "unknown",
    };
    let built_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown-target".into());
    let rustc = command_stdout("rustc", &["--version"]).unwrap_or_else(|| "unknown".into());

    for (key, value) in [
        ("FOLIO_BUILD_HASH", hash.as_str()),
        ("FOLIO_BUILD_STATUS", status),
        ("FOLIO_BUILD_TIMESTAMP", built_at.as_str()),
        ("FOLIO_BUILD_TARGET", target.as_str()),
        ("FOLIO_BUILD_RUSTC", rustc.as_str()),
    ] {
        println!("cargo:rustc-env={key}={value}");
    }
}

/// Trimmed stdout of a successful command, `None` if it cannot run or fails.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
