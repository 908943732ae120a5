use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// USER MODELS
// ============================================================================

/// Stored avatar file reference. `url` is resolved by the storage layer
/// from the file path at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarImage {
    pub id: Uuid,
    pub path: String,
    pub url: String,
}

/// A platform account. `provider` marks accounts that offer bookable
/// slots; everyone else books against them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub provider: bool,
    #[serde(default)]
    pub avatar: Option<AvatarImage>,
}

/// Identity embedded in appointment rows: the provider on a client's
/// listing, the client on a provider's schedule. No email, no flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<AvatarImage>,
}

/// Directory listing shape, contact email included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<AvatarImage>,
}

/// Minimal identity used when composing mail payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicProfile {
    fn from(user: User) -> Self {
        PublicProfile {
            id: user.id,
            name: user.name,
            avatar: user.avatar,
        }
    }
}

impl From<User> for ProviderProfile {
    fn from(user: User) -> Self {
        ProviderProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
        }
    }
}

impl From<User> for Party {
    fn from(user: User) -> Self {
        Party {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
