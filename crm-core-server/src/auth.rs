use std::collections::HashMap;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use crm_core_api::CrmError;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, inserted into request extensions by [`require_bearer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser(pub Uuid);

/// Maps a bearer token to the user it was issued to.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Option<ActingUser>;
}

/// Fixed token table loaded from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, Uuid>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: HashMap<String, Uuid>) -> Self {
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Option<ActingUser> {
        self.tokens.get(token).copied().map(ActingUser)
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a valid bearer token before any handler runs.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = bearer_token(&request)
        .and_then(|token| state.verifier.verify(token))
        .ok_or_else(|| CrmError::Unauthorized("missing or invalid bearer token".to_string()))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_static_verifier() {
        let user = Uuid::new_v4();
        let verifier = StaticTokenVerifier::new(HashMap::from([("alpha".to_string(), user)]));
        assert_eq!(verifier.verify("alpha"), Some(ActingUser(user)));
        assert_eq!(verifier.verify("beta"), None);
        assert!(StaticTokenVerifier::default().is_empty());
    }

    #[test]
    fn test_bearer_token_extraction() {
        let request = axum::http::Request::builder()
            .header(AUTHORIZATION, "Bearer alpha")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request), Some("alpha"));

        let basic = axum::http::Request::builder()
            .header(AUTHORIZATION, "Basic YWxwaGE=")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&basic), None);

        let empty = axum::http::Request::builder()
            .header(AUTHORIZATION, "Bearer ")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&empty), None);
    }
}
