/*!
 * Error responder
 *
 * Responsibility:
 * - FailureCondition / unknown error -> status + {error, localized_error} body
 * - The lookup table (catalog) is separated from the writing path (core)
 */

pub mod catalog;
mod core;

pub use catalog::{CatalogError, ErrorCatalog, Locale};
pub use self::core::{ErrorEnvelope, ErrorResponder, FailureReport, RespondError};
