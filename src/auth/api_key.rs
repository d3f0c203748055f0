//! API keys for analytics and consent clients.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A known API key, stored under its SHA-256 hash.
#[derive(Debug, Clone)]
pub struct ApiKeyInfo {
    pub key_id: String,
    /// Client (site, plugin install) the key was issued to.
    pub client_id: String,
    pub active: bool,
}

/// API key validator and store.
#[derive(Clone)]
pub struct ApiKeyValidator {
    /// Map of hashed keys to their info.
    keys: Arc<RwLock<HashMap<String, ApiKeyInfo>>>,
}

impl ApiKeyValidator {
    /// Create a validator holding the configured keys.
    pub fn new(configured_keys: Vec<ConfiguredApiKey>) -> Self {
        let keys: HashMap<String, ApiKeyInfo> = configured_keys
            .into_iter()
            .map(|key| {
                (
                    Self::hash_key(&key.key),
                    ApiKeyInfo {
                        key_id: key.id,
                        client_id: key.client_id,
                        active: true,
                    },
                )
            })
            .collect();

        Self {
            keys: Arc::new(RwLock::new(keys)),
        }
    }

    /// Hash an API key for storage and comparison.
    pub fn hash_key(key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Validate an API key and return its info if it is known and active.
    pub async fn validate(&self, key: &str) -> Option<ApiKeyInfo> {
        let hashed = Self::hash_key(key);
        let keys = self.keys.read().await;

        keys.get(&hashed).filter(|info| info.active).cloned()
    }

    /// Deactivate every key with the given ID. Returns whether one was found.
    pub async fn revoke_key(&self, key_id: &str) -> bool {
        let mut keys = self.keys.write().await;
        let mut found = false;
        for info in keys.values_mut().filter(|info| info.key_id == key_id) {
            info.active = false;
            found = true;
        }
        found
    }
}

/// API key configuration from config file.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ConfiguredApiKey {
    pub id: String,
    /// The plain key value; only its hash is kept in memory.
    pub key: String,
    pub client_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(id: &str, key: &str, client_id: &str) -> ConfiguredApiKey {
        ConfiguredApiKey {
            id: id.to_string(),
            key: key.to_string(),
            client_id: client_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_api_key_validation() {
        let validator = ApiKeyValidator::new(vec![configured(
            "key-1",
            "ak-consent-12345",
            "wordpress-site",
        )]);

        let info = validator.validate("ak-consent-12345").await;
        assert_eq!(info.unwrap().client_id, "wordpress-site");

        assert!(validator.validate("wrong-key").await.is_none());
    }

    #[tokio::test]
    async fn test_key_revocation() {
        let validator = ApiKeyValidator::new(vec![configured("key-1", "ak-test", "site")]);

        assert!(validator.validate("ak-test").await.is_some());
        assert!(validator.revoke_key("key-1").await);
        assert!(validator.validate("ak-test").await.is_none());
        assert!(!validator.revoke_key("key-2").await);
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = ApiKeyValidator::hash_key("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
