use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Invalid pattern for {rule} rule: {source}")]
    InvalidPattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },
}
