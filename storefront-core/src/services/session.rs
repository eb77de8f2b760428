//! Session store - the persisted session token slot

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::User;
use crate::ports::KeyValueStorage;
use crate::services::token;

/// Storage key of the session token
pub const TOKEN_KEY: &str = "mock_auth_token";

/// Reads and writes the single persisted session token
///
/// Reading is self-healing: a token that fails to decode or has expired is
/// removed from storage the first time it is read.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Overwrite the stored token
    pub fn save(&self, token: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)
    }

    /// Read the stored token without validating it
    ///
    /// A storage read failure is logged and treated as "no token".
    pub fn load(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "could not read session token");
                None
            }
        }
    }

    /// Remove the stored token
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(TOKEN_KEY)
    }

    /// The signed-in user, if the stored token is valid
    pub fn current_user(&self) -> Option<User> {
        let token = self.load()?;

        let payload = token::decode(&token).filter(|p| p.is_live_at(chrono::Utc::now()));
        match payload {
            Some(payload) => Some(User::new(payload.id, payload.username, token)),
            None => {
                tracing::info!("discarding invalid or expired session token");
                if let Err(e) = self.clear() {
                    tracing::warn!(error = %e, "could not remove invalid session token");
                }
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Gate for views that need a signed-in user
    pub fn require_user(&self) -> Result<User> {
        self.current_user().ok_or(Error::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::adapters::memory::{FailingStorage, MemoryStorage};

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn store() -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());
        (storage, session)
    }

    #[test]
    fn test_save_load_clear() {
        let (_, session) = store();
        assert_eq!(session.load(), None);

        session.save("first").unwrap();
        session.save("second").unwrap();
        assert_eq!(session.load().as_deref(), Some("second"));

        session.clear().unwrap();
        assert_eq!(session.load(), None);
    }

    #[test]
    fn test_current_user_from_valid_token() {
        let (_, session) = store();
        let token = token::encode("demo", 1, DAY);
        session.save(&token).unwrap();

        let user = session.current_user().unwrap();
        assert_eq!(user, User::new(1, "demo", token));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_expired_token_is_purged() {
        let (storage, session) = store();
        let issued = chrono::Utc::now() - chrono::Duration::days(2);
        session.save(&token::encode_at("demo", 1, DAY, issued)).unwrap();

        assert_eq!(session.current_user(), None);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_garbage_token_is_purged() {
        let (storage, session) = store();
        session.save("definitely-not-a-token").unwrap();

        assert_eq!(session.current_user(), None);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_no_token_is_not_authenticated() {
        let (_, session) = store();
        assert!(!session.is_authenticated());
        assert!(matches!(session.require_user(), Err(Error::Unauthorized)));
    }

    #[test]
    fn test_unreadable_storage_means_no_token() {
        let storage = Arc::new(FailingStorage::reads());
        storage
            .inner
            .set(TOKEN_KEY, &token::encode("demo", 1, DAY))
            .unwrap();
        let session = SessionStore::new(storage.clone());

        assert_eq!(session.load(), None);
        assert_eq!(session.current_user(), None);
        assert!(storage.inner.get(TOKEN_KEY).unwrap().is_some());
    }

    #[test]
    fn test_require_user_with_valid_token() {
        let (_, session) = store();
        session.save(&token::encode("demo", 1, DAY)).unwrap();
        assert_eq!(session.require_user().unwrap().username, "demo");
    }
}
