use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("Invalid preference: {0}")]
    InvalidPreference(String),
}
