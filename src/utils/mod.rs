pub mod error;

pub use error::{ArboristError, Result};
