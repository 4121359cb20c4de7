//! Middleware de actor
//!
//! Lee el identificador del usuario que realiza la petición (cabecera
//! `X-User-Id`) y lo inyecta en las extensions. Los controladores lo usan
//! para firmar `created_by` / `modified_by`. La cabecera es opcional.

use axum::{extract::Request, middleware::Next, response::Response};

/// Cabecera con el identificador del actor
pub const ACTOR_HEADER: &str = "x-user-id";

const MAX_ACTOR_LEN: usize = 100;

/// Actor de la petición actual
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor(pub Option<String>);

impl Actor {
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

/// Extraer el actor de las cabeceras; valores vacíos o no ASCII se ignoran
pub fn actor_from_headers(headers: &axum::http::HeaderMap) -> Actor {
    let actor = headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.chars().take(MAX_ACTOR_LEN).collect());
    Actor(actor)
}

/// Middleware que inyecta el `Actor` en las extensions
pub async fn actor_middleware(mut request: Request, next: Next) -> Response {
    let actor = actor_from_headers(request.headers());
    request.extensions_mut().insert(actor);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn test_actor_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(actor_from_headers(&headers), Actor(None));

        headers.insert(ACTOR_HEADER, HeaderValue::from_static("  dispatcher  "));
        assert_eq!(actor_from_headers(&headers), Actor(Some("dispatcher".to_string())));

        headers.insert(ACTOR_HEADER, HeaderValue::from_static("   "));
        assert_eq!(actor_from_headers(&headers), Actor(None));
    }
}
