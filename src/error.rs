use thiserror::Error;

use crate::metrics::{Frame, ParticleKind, Regime};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The formula table has no entry for this combination. Only the
    /// interior metric in the distant-observer frame is missing.
    #[error("no {frame} formula for a {kind} in the {regime} regime")]
    UnsupportedCombination {
        regime: Regime,
        kind: ParticleKind,
        frame: Frame,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid scenario: {message}")]
    InvalidScenario { message: String },
}
