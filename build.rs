//! Build script for the nutrition tracker
//!
//! Bumps a persistent build counter and embeds it, with the build time, into
//! the binaries.

use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = "build_number.txt";

fn read_counter(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    println!("cargo:rerun-if-changed=src");

    let counter_path = Path::new(COUNTER_FILE);
    let build = read_counter(counter_path) + 1;

    if let Err(e) = fs::write(counter_path, build.to_string()) {
        println!("cargo:warning=Could not persist build number: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=NT_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=NT_BUILD_TIMESTAMP={}", timestamp);
}
