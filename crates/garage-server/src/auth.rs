use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use garage_core::error::AppError;
use garage_core::models::Role;
use garage_core::{Claims, TokenService};

use crate::error::ApiError;

/// Routes reserved for the `admin` role.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
/// Routes open to every authenticated role.
pub const STAFF: &[Role] = &[Role::Admin, Role::Editor];

/// State for [`require_role`]: the verifier plus the roles a route group accepts.
#[derive(Clone)]
pub struct RoleGuard {
    tokens: TokenService,
    allowed: &'static [Role],
}

impl RoleGuard {
    pub fn new(tokens: TokenService, allowed: &'static [Role]) -> Self {
        Self { tokens, allowed }
    }

    /// Verify `token` and check its role against the allow-list.
    pub fn authorize(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.tokens.verify(token)?;
        if !self.allowed.contains(&claims.role) {
            tracing::warn!(email = %claims.email, role = %claims.role, "Role not permitted");
            return Err(AppError::Forbidden);
        }
        Ok(claims)
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware that validates `Authorization: Bearer <token>` and enforces the
/// guard's role allow-list. Verified claims are stored as a request extension.
pub async fn require_role(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request).ok_or(AppError::Unauthorized)?;
    let claims = guard.authorize(token)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
