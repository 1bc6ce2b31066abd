use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::database::utils::get_timestamp;

/// Registry of tokens that must be rejected even though their signature and
/// expiry are still valid.
pub trait RevocationStore: Send + Sync {
    /// Mark `token` as revoked until `expires_at` (unix seconds). Idempotent.
    fn revoke(&self, token: &str, expires_at: i64);

    fn is_revoked(&self, token: &str) -> bool;

    /// Forget entries whose natural expiry is before `now`. Returns how many were dropped.
    fn prune_expired(&self, now: i64) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local revocation set keyed by the raw token.
///
/// Expired tokens fail signature validation anyway, so their entries are
/// dropped on the next write.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    revoked: RwLock<HashMap<String, i64>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RevocationStore for InMemoryRevocationStore {
    fn revoke(&self, token: &str, expires_at: i64) {
        let now = get_timestamp();
        let mut revoked = self.revoked.write().unwrap_or_else(PoisonError::into_inner);
        revoked.retain(|_, exp| *exp >= now);
        revoked
            .entry(token.to_string())
            .and_modify(|exp| *exp = (*exp).max(expires_at))
            .or_insert(expires_at);
        debug!("Token revoked, {} entries tracked", revoked.len());
    }

    fn is_revoked(&self, token: &str) -> bool {
        self.revoked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(token)
    }

    fn prune_expired(&self, now: i64) -> usize {
        let mut revoked = self.revoked.write().unwrap_or_else(PoisonError::into_inner);
        let before = revoked.len();
        revoked.retain(|_, exp| *exp >= now);
        before - revoked.len()
    }

    fn len(&self) -> usize {
        self.revoked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn revoked_token_is_reported() {
        let store = InMemoryRevocationStore::new();
        assert!(!store.is_revoked("t"));
        store.revoke("t", get_timestamp() + 60);
        assert!(store.is_revoked("t"));
        assert!(!store.is_revoked("u"));
    }

    #[test]
    fn revoke_is_idempotent() {
        let store = InMemoryRevocationStore::new();
        let exp = get_timestamp() + 60;
        store.revoke("t", exp);
        store.revoke("t", exp);
        assert!(store.is_revoked("t"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn prune_drops_only_expired_entries() {
        let store = InMemoryRevocationStore::new();
        let now = get_timestamp();
        store.revoke("live", now + 600);
        store.revoke("stale", now + 10);
        assert_eq!(store.prune_expired(now + 100), 1);
        assert!(store.is_revoked("live"));
        assert!(!store.is_revoked("stale"));
    }

    #[test]
    fn writes_prune_opportunistically() {
        let store = InMemoryRevocationStore::new();
        store.revoke("old", get_timestamp() - 10);
        store.revoke("new", get_timestamp() + 60);
        assert!(!store.is_revoked("old"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn concurrent_revocations_are_all_recorded() {
        let store: Arc<dyn RevocationStore> = Arc::new(InMemoryRevocationStore::new());
        let exp = get_timestamp() + 60;
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        store.revoke(&format!("{}-{}", i, j), exp);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 400);
    }
}
