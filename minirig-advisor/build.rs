//! Build script for minirig-advisor
//!
//! Stamps the binary with the commit, build time, profile and target triple.
//! `/api/buildinfo` and the startup log report them. The stamp is refreshed
//! whenever the advisor, the library (including the built-in seed catalog) or
//! the checked-out commit changes.

use std::path::Path;
use std::process::Command;

fn main() {
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=BUILD_TARGET={}", target);

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=../minirig-common/src");
    for git_path in ["../.git/HEAD", "../.git/refs/heads"] {
        if Path::new(git_path).exists() {
            println!("cargo:rerun-if-changed={}", git_path);
        }
    }
}
