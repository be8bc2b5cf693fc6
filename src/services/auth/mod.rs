pub mod claims;
pub mod factory;
pub mod pipeline;
pub mod principal;
pub mod verifier;

pub use claims::{ClaimError, Claims};
pub use factory::build_auth_pipeline;
pub use pipeline::{AuthPipeline, Authenticated, Rejection, Stage, extract_credential};
pub use verifier::{TokenVerifier, VerifierSettings};
