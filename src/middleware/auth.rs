use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
}

/// Authenticated caller, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = uuid::Error;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&claims.sub)?,
            username: claims.username,
        })
    }
}

fn unauthorized(reason: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": reason, "code": "unauthorized"})),
    )
        .into_response()
}

pub fn decode_current_user(token: &str, secret: &str) -> Option<CurrentUser> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()?;
    CurrentUser::try_from(data.claims).ok()
}

pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return unauthorized("missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return unauthorized("bad_authorization");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return unauthorized("unsupported_scheme");
    };

    match decode_current_user(token, &state.jwt_secret) {
        Some(user) => {
            tracing::debug!(user_id = %user.id, username = %user.username, "authenticated request");
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => unauthorized("invalid_token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(sub: &str, secret: &str, exp: usize) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            username: "darlene".to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_an_hour() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn valid_token_yields_current_user() {
        let id = Uuid::new_v4();
        let user = decode_current_user(&token(&id.to_string(), "s3cret", in_an_hour()), "s3cret")
            .unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "darlene");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let t = token(&Uuid::new_v4().to_string(), "s3cret", in_an_hour());
        assert!(decode_current_user(&t, "other").is_none());
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let t = token("not-a-uuid", "s3cret", in_an_hour());
        assert!(decode_current_user(&t, "s3cret").is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let past = (chrono::Utc::now().timestamp() - 3600) as usize;
        let t = token(&Uuid::new_v4().to_string(), "s3cret", past);
        assert!(decode_current_user(&t, "s3cret").is_none());
    }
}
