//! Authenticated session context.

/// The signed-in user, decoded from the session token.
///
/// Handlers receive this as a request extension and hand it to services
/// explicitly. Nothing reads the current user from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}
