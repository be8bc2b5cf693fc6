/*
 * Responsibility
 * - middleware public interface
 * - auth (bearer pipeline), errors (failure rendering), http (request id / trace / limits)
 */
pub mod auth;
pub mod errors;
pub mod http;
