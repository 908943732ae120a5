use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// AUTH MODELS
// ============================================================================

/// Claims carried by a Supabase access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Account id (uuid).
    pub sub: String,
    pub email: Option<String>,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
    pub aud: Option<String>,
    pub role: Option<String>,
}

/// The authenticated caller, inserted into request extensions by the
/// auth middleware after token validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}
