pub mod error;
pub mod sectors;
pub mod types;

pub use error::*;
pub use types::*;
