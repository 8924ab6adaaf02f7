use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaromboError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Duplicate name '{0}': names must be unique across records")]
    DuplicateName(String),

    #[error("Parent links form a cycle and never reach the root: {}", .0.join(", "))]
    Cycle(Vec<String>),

    #[error("Tree invariant violated: {0}")]
    Invariant(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TaromboError>;
