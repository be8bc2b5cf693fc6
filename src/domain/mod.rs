pub mod errors;

pub use errors::{Category, FailureCondition};
