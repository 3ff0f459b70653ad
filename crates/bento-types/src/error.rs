//! Error types for bento.

use std::io;

/// Errors produced while loading and preparing a bento page.
///
/// Rendering itself never fails per tile; these errors only surface from
/// startup work (configuration, dataset loading) and from the feed layer
/// before its failures are collapsed into "no videos".
#[derive(Debug, thiserror::Error)]
pub enum BentoError {
    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("feed error: {0}")]
    Feed(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BentoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_error_display() {
        let e = BentoError::Dataset("duplicate id `a`".into());
        assert_eq!(format!("{e}"), "dataset error: duplicate id `a`");
    }

    #[test]
    fn config_error_display() {
        let e = BentoError::Config("missing file".into());
        assert_eq!(format!("{e}"), "config error: missing file");
    }

    #[test]
    fn feed_error_display() {
        let e = BentoError::Feed("status 503".into());
        assert_eq!(format!("{e}"), "feed error: status 503");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: BentoError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: BentoError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: BentoError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }
}
