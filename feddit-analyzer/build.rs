//! Build identification for the startup banner
//!
//! Exposes `GIT_HASH` (suffixed `-dirty` for uncommitted changes),
//! `BUILD_TIMESTAMP` (UTC, RFC 3339) and `BUILD_PROFILE` to `env!`.

use std::process::Command;

/// Run git and return trimmed stdout, or None when git is unavailable
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn git_hash() -> String {
    match git(&["rev-parse", "--short=8", "HEAD"]) {
        Some(hash) => {
            let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
                .is_some_and(|status| !status.is_empty());
            if dirty {
                format!("{}-dirty", hash)
            } else {
                hash
            }
        }
        None => "unknown".to_string(),
    }
}

fn main() {
    let build_env = [
        ("GIT_HASH", git_hash()),
        (
            "BUILD_TIMESTAMP",
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        ),
        (
            "BUILD_PROFILE",
            std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string()),
        ),
    ];

    for (key, value) in build_env {
        println!("cargo:rustc-env={}={}", key, value);
    }
}
