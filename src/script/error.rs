use thiserror::Error;

/// Errors raised while loading script configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// The style TOML could not be parsed.
    #[error("failed to parse script styles: {0}")]
    StyleParse(#[from] toml::de::Error),

    /// A style or option has a value Playmol cannot use.
    #[error("invalid script option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },
}
