//! quill library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod storage;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Storage backend selection, exposed on the CLI.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum Backend {
    #[default]
    Json,
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Json => "json",
            Backend::Memory => "memory",
        }
    }
}
