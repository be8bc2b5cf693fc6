/*
 * Responsibility
 * - The authenticated context as handlers see it
 * - The access middleware verifies and stores it in request extensions;
 *   handlers only ever receive this type
 */

/// Context attached to an authenticated request.
///
/// - `user_id` is the numeric subject of the verified token
/// - read-only for everything downstream of the access middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: u64,
}

impl AuthCtx {
    pub fn new(user_id: u64) -> Self {
        Self { user_id }
    }
}
