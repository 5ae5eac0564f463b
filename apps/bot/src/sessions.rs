//! Per-actor session registry
//!
//! One [`BrowserSession`] per external actor identity, created on first
//! credential and looked up on every inbound event. Never a process-wide
//! singleton: two actors browsing at once must not see each other's
//! stacks.

use std::sync::Arc;

use dashmap::DashMap;
use reprezzent_catalog_client::{CatalogClient, CatalogResult};
use reprezzent_shared_config::{CatalogConfig, DownloadsConfig};
use tracing::{debug, info};

use crate::browser::BrowserSession;

/// External actor identity as delivered by the chat transport
pub type ActorId = i64;

/// Registry of live browser sessions, keyed by actor
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<ActorId, Arc<BrowserSession>>,
    catalog_config: CatalogConfig,
    downloads_config: DownloadsConfig,
    page_size: usize,
}

impl SessionRegistry {
    pub fn new(
        catalog_config: CatalogConfig,
        downloads_config: DownloadsConfig,
        page_size: usize,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            catalog_config,
            downloads_config,
            page_size,
        }
    }

    /// Bind an actor to a catalog token, replacing any previous session
    ///
    /// # Errors
    /// Fails when the token is empty or the client cannot be built; the
    /// previous session (if any) stays bound in that case.
    pub fn bind(&self, actor: ActorId, token: &str) -> CatalogResult<Arc<BrowserSession>> {
        let catalog =
            CatalogClient::new(&self.catalog_config, self.downloads_config.clone(), token)?;
        let session = Arc::new(BrowserSession::new(catalog, self.page_size));
        self.sessions.insert(actor, Arc::clone(&session));
        info!(actor, "bound catalog session");
        Ok(session)
    }

    /// Look up the actor's session, if one is bound
    pub fn get(&self, actor: ActorId) -> Option<Arc<BrowserSession>> {
        self.sessions.get(&actor).map(|entry| Arc::clone(&entry))
    }

    /// Drop the actor's session entirely
    pub fn unbind(&self, actor: ActorId) -> bool {
        let removed = self.sessions.remove(&actor).is_some();
        if removed {
            debug!(actor, "unbound catalog session");
        }
        removed
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(
            CatalogConfig::with_base_url("http://localhost:9"),
            DownloadsConfig::with_root(std::env::temp_dir()),
            10,
        )
    }

    #[test]
    fn test_bind_and_get() {
        let registry = registry();
        assert!(registry.get(1).is_none());

        registry.bind(1, "token-a").unwrap();
        assert!(registry.get(1).is_some());
        assert!(registry.get(2).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated_per_actor() {
        let registry = registry();
        let a = registry.bind(1, "token-a").unwrap();
        let b = registry.bind(2, "token-b").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_rebind_replaces_session() {
        let registry = registry();
        let first = registry.bind(1, "token-a").unwrap();
        let second = registry.bind(1, "token-b").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&registry.get(1).unwrap(), &second));
    }

    #[test]
    fn test_bind_with_empty_token_fails_and_keeps_previous() {
        let registry = registry();
        let first = registry.bind(1, "token-a").unwrap();
        assert!(registry.bind(1, "").is_err());
        assert!(Arc::ptr_eq(&registry.get(1).unwrap(), &first));
    }

    #[test]
    fn test_unbind() {
        let registry = registry();
        registry.bind(1, "token-a").unwrap();
        assert!(registry.unbind(1));
        assert!(!registry.unbind(1));
        assert!(registry.get(1).is_none());
    }
}
