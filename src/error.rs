
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OntolithError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid query name: {0}")]
    InvalidQueryName(String),
    #[error("Rule error: {0}")]
    Rule(String),
}

pub type Result<T> = std::result::Result<T, OntolithError>;
