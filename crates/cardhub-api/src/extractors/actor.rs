//! Actor attribution extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Header carrying the acting identity for history and audit trails.
pub const ACTOR_HEADER: &str = "x-actor";

/// The identity performing the request.
///
/// Taken from the `x-actor` header when present; handlers fall back to
/// a route-appropriate default (`admin` on admin routes, `public` on
/// the submission route) via [`Actor::or`].
#[derive(Debug, Clone)]
pub struct Actor(pub Option<String>);

impl Actor {
    /// The actor name, or `default` when the header was absent/blank.
    pub fn or(&self, default: &str) -> String {
        match self.0.as_deref() {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => default.to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(Actor(actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default() {
        assert_eq!(Actor(None).or("admin"), "admin");
        assert_eq!(Actor(Some("  ".into())).or("public"), "public");
        assert_eq!(Actor(Some("reviewer".into())).or("admin"), "reviewer");
    }
}
