use garage_core::TokenService;
use garage_db::Database;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    /// Signs tokens on login; the role guards hold their own clone for verification.
    pub tokens: TokenService,
}
