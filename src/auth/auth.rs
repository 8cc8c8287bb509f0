use crate::config::Config;
use crate::models::{Claims, TokenType};
use actix_web::{dev::Payload, error::ErrorUnauthorized, web::Data, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, DecodingKey, Validation};

/// Identity of the caller, decoded from the bearer token. Extracted
/// directly in handlers that need to know who is asking.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub email: String,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )))
            }
        };

        let data = match decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(d) => d,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        if data.claims.token_type != TokenType::Access {
            return ready(Err(ErrorUnauthorized("Not an access token")));
        }

        ready(Ok(AuthUser {
            user_id: data.claims.user_id,
            email: data.claims.sub,
        }))
    }
}
