//! Token blacklist service for server-side JWT invalidation.
//!
//! Logged-out tokens are held in memory until they expire naturally, so a
//! revoked token cannot be replayed for the rest of its lifetime.

use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct BlacklistEntry {
    expires_at: Instant,
}

/// Thread-safe token blacklist keyed by a hash of the token.
#[derive(Clone)]
pub struct TokenBlacklist {
    tokens: Arc<DashMap<String, BlacklistEntry>>,
    last_cleanup: Arc<RwLock<Instant>>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(RwLock::new(Instant::now())),
        }
    }

    /// Blacklist a token until its `exp` timestamp (Unix epoch seconds).
    /// Already-expired tokens are not stored.
    pub async fn blacklist_token(&self, token: &str, exp: usize) {
        let now_secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as usize)
            .unwrap_or(0);

        if exp > now_secs {
            let ttl = Duration::from_secs((exp - now_secs) as u64);
            self.tokens.insert(
                Self::hash_token(token),
                BlacklistEntry {
                    expires_at: Instant::now() + ttl,
                },
            );
            debug!("Token blacklisted, will expire in {:?}", ttl);
        }

        self.maybe_cleanup().await;
    }

    /// Check whether a token has been revoked.
    pub fn is_blacklisted(&self, token: &str) -> bool {
        let token_hash = Self::hash_token(token);

        if let Some(entry) = self.tokens.get(&token_hash) {
            if entry.expires_at > Instant::now() {
                return true;
            }
            drop(entry); // release the read lock before removing
            self.tokens.remove(&token_hash);
        }

        false
    }

    // The actual token never touches the map.
    fn hash_token(token: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }

    async fn maybe_cleanup(&self) {
        let should_cleanup = {
            let last = self.last_cleanup.read().await;
            last.elapsed() >= CLEANUP_INTERVAL
        };

        if should_cleanup {
            let mut last = self.last_cleanup.write().await;
            if last.elapsed() >= CLEANUP_INTERVAL {
                self.cleanup();
                *last = Instant::now();
            }
        }
    }

    fn cleanup(&self) {
        let now = Instant::now();
        let before_count = self.tokens.len();

        self.tokens.retain(|_, entry| entry.expires_at > now);

        let removed = before_count - self.tokens.len();
        if removed > 0 {
            info!(
                "Token blacklist cleanup: removed {} expired entries, {} remaining",
                removed,
                self.tokens.len()
            );
        }
    }
}

impl Default for TokenBlacklist {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn future_exp() -> usize {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize
            + 3600
    }

    #[tokio::test]
    async fn test_blacklisted_token_is_rejected() {
        let blacklist = TokenBlacklist::new();
        blacklist.blacklist_token("some.jwt.token", future_exp()).await;

        assert!(blacklist.is_blacklisted("some.jwt.token"));
        assert!(!blacklist.is_blacklisted("another.jwt.token"));
    }

    #[tokio::test]
    async fn test_expired_token_is_not_stored() {
        let blacklist = TokenBlacklist::new();
        blacklist.blacklist_token("old.jwt.token", 0).await;

        assert!(!blacklist.is_blacklisted("old.jwt.token"));
    }
}
