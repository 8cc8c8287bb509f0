use serde::{Deserialize, Serialize};

/// JWT payload. `sub` carries the account email; `jti` identifies the
/// token so refresh tokens can be revoked individually.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub sub: String,
    pub exp: usize,
    pub jti: String,
    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
