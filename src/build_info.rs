//! Build metadata embedded by `build.rs`

use serde::Serialize;

pub const BUILD_NUMBER: u64 = match option_env!("NT_BUILD_NUMBER") {
    Some(s) => parse_u64(s),
    None => 0,
};

pub const BUILD_TIMESTAMP: &str = match option_env!("NT_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Digits of `s` as a number; 0 if anything else is present
const fn parse_u64(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut value: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return 0;
        }
        value = value * 10 + (b - b'0') as u64;
        i += 1;
    }
    value
}

/// Version and build details, as printed by `nutrition-tracker version`
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    pub fn banner(&self) -> String {
        format!(
            "Nutrition Tracker {} (build {}, {})",
            self.version, self.build_number, self.build_timestamp
        )
    }
}

/// Print the banner to stderr so stdout stays machine-readable
pub fn print_startup_banner() {
    eprintln!("{}", BuildInfo::current().banner());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), 42);
        assert_eq!(parse_u64(""), 0);
        assert_eq!(parse_u64("4x"), 0);
    }

    #[test]
    fn test_banner_mentions_version() {
        let info = BuildInfo::current();
        assert!(info.banner().contains(VERSION));
        assert_eq!(info.name, "nutrition-tracker");
    }
}
