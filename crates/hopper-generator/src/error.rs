use thiserror::Error;

/// Errors returned while configuring a generator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid code length {length}; expected {min}..={max}")]
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },
}
