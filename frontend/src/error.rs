use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown machine \"{name}\" (available: {available})")]
    UnknownMachine { name: String, available: String },

    #[error("no machine given; use --list to see the available machines")]
    NoMachine,
}

/// SDL reports most failures as plain strings.
pub fn sdl<E: std::fmt::Display>(e: E) -> FrontendError {
    FrontendError::Sdl(e.to_string())
}
