use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Identity of an authenticated caller, as resolved by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: String,
    pub email: String,
}

impl CallerIdentity {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }
}

/// Resolves each inbound request credential to a caller identity.
///
/// `None` means unauthenticated; the facade turns that into
/// `CoreError::Unauthenticated`. How credentials are validated is the
/// gateway's business; the core never sees tokens, only identities.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    async fn resolve(&self, credential: Option<&str>) -> Option<CallerIdentity>;
}

/// Token-to-identity registry used as the development/test gateway.
///
/// Not an authentication system: tokens are opaque strings registered at
/// startup (or issued ad hoc) and looked up verbatim.
pub struct TokenRegistry {
    tokens: RwLock<HashMap<String, CallerIdentity>>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, token: impl Into<String>, identity: CallerIdentity) {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.into(), identity);
    }

    /// Registers a fresh random token for the identity and returns it.
    pub async fn issue(&self, user_id: impl Into<String>, email: impl Into<String>) -> String {
        let token = Uuid::new_v4().to_string();
        self.register(token.clone(), CallerIdentity::new(user_id, email))
            .await;
        token
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityGateway for TokenRegistry {
    async fn resolve(&self, credential: Option<&str>) -> Option<CallerIdentity> {
        let token = credential?;
        let tokens = self.tokens.read().await;
        tokens.get(token).cloned()
    }
}
