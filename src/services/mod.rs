pub mod auth;
pub mod responder;
