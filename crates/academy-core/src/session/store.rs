//! Process-scoped session service.
//!
//! One `SessionStore` is created at start-up, wrapped in an `Arc`, and handed
//! to the HTTP gateway and every use case. It owns the in-memory state, the
//! durable copy of the credentials, and the broadcast channel that tells the
//! view layer about logins, logouts and expiry.

use super::event::SessionEvent;
use super::state::{AuthSession, SessionPhase, SessionState};
use super::storage::{SessionStorage, TOKEN_KEY, USER_KEY};
use crate::auth::{PhoneNumber, UserProfile};
use crate::error::Result;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: RwLock<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Creates an unauthenticated store over `storage` without reading it.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            storage,
            state: RwLock::new(SessionState::Unauthenticated),
            events,
        }
    }

    /// Creates a store and rebuilds the session from durable storage.
    ///
    /// A token without a readable profile (or the reverse) is discarded, so a
    /// half-written session never counts as authenticated.
    pub fn restore(storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let store = Self::new(storage);
        let token = store.storage.get(TOKEN_KEY)?;
        let user = store.storage.get(USER_KEY)?;

        match (token, user) {
            (Some(token), Some(raw_user)) if !token.is_empty() => {
                match serde_json::from_str::<UserProfile>(&raw_user) {
                    Ok(user) => {
                        tracing::debug!(user_id = user.id, "Restored persisted session");
                        *store.write_state() = SessionState::Authenticated(AuthSession { token, user });
                    }
                    Err(err) => {
                        tracing::warn!("Discarding unreadable persisted profile: {}", err);
                        store.remove_credentials()?;
                    }
                }
            }
            (None, None) => {}
            _ => {
                tracing::warn!("Discarding incomplete persisted session");
                store.remove_credentials()?;
            }
        }

        Ok(store)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.read_state().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.read_state().phase()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.read_state(), SessionState::Authenticated(_))
    }

    /// Bearer token of the authenticated session.
    pub fn token(&self) -> Option<String> {
        match &*self.read_state() {
            SessionState::Authenticated(session) => Some(session.token.clone()),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<UserProfile> {
        match &*self.read_state() {
            SessionState::Authenticated(session) => Some(session.user.clone()),
            _ => None,
        }
    }

    /// Records that an OTP was issued for `phone`.
    pub fn mark_otp_sent(&self, phone: PhoneNumber, reference_id: impl Into<String>) {
        *self.write_state() = SessionState::OtpSent {
            phone,
            reference_id: reference_id.into(),
        };
    }

    /// Phone and reference id of a pending OTP, if one was sent.
    pub fn pending_otp(&self) -> Option<(PhoneNumber, String)> {
        match &*self.read_state() {
            SessionState::OtpSent {
                phone,
                reference_id,
            } => Some((phone.clone(), reference_id.clone())),
            _ => None,
        }
    }

    /// Abandons a pending OTP ("change number").
    pub fn reset_otp(&self) {
        let mut state = self.write_state();
        if matches!(*state, SessionState::OtpSent { .. }) {
            *state = SessionState::Unauthenticated;
        }
    }

    /// Persists the credentials, then marks the session authenticated.
    ///
    /// In-memory state only changes once both keys are written.
    pub fn establish(&self, token: impl Into<String>, user: UserProfile) -> Result<()> {
        let token = token.into();
        let raw_user = serde_json::to_string(&user)?;
        self.storage.set(TOKEN_KEY, &token)?;
        if let Err(err) = self.storage.set(USER_KEY, &raw_user) {
            let _ = self.storage.remove(TOKEN_KEY);
            return Err(err);
        }

        let user_id = user.id;
        *self.write_state() = SessionState::Authenticated(AuthSession { token, user });
        tracing::info!(user_id, "Session established");
        let _ = self.events.send(SessionEvent::LoggedIn { user_id });
        Ok(())
    }

    /// Clears the session after an explicit logout.
    ///
    /// In-memory state is reset even when storage removal fails.
    pub fn clear(&self) -> Result<()> {
        *self.write_state() = SessionState::Unauthenticated;
        let removed = self.remove_credentials();
        let _ = self.events.send(SessionEvent::LoggedOut);
        removed
    }

    /// Tears the session down after the server rejected the token.
    pub fn expire(&self) {
        *self.write_state() = SessionState::Unauthenticated;
        if let Err(err) = self.remove_credentials() {
            tracing::warn!("Failed to clear persisted session after 401: {}", err);
        }
        tracing::warn!("Session expired, credentials discarded");
        let _ = self.events.send(SessionEvent::Expired);
    }

    /// Subscribes to session transitions published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn remove_credentials(&self) -> Result<()> {
        let token = self.storage.remove(TOKEN_KEY);
        let user = self.storage.remove(USER_KEY);
        token.and(user)
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::storage::MemorySessionStorage;

    fn admin() -> UserProfile {
        UserProfile {
            id: 42,
            name: "Asha".into(),
            contact_number: "9876543210".into(),
            role: "ACADEMY_ADMIN".into(),
            organization_id: 1,
            organization_name: Some("Staffpay".into()),
        }
    }

    #[test]
    fn test_establish_persists_both_keys() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = SessionStore::new(storage.clone());

        store.establish("tok-1", admin()).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
        let raw = storage.get(USER_KEY).unwrap().unwrap();
        let user: UserProfile = serde_json::from_str(&raw).unwrap();
        assert_eq!(user, admin());
    }

    #[test]
    fn test_restore_round_trips_through_storage() {
        let storage = Arc::new(MemorySessionStorage::new());
        SessionStore::new(storage.clone())
            .establish("tok-1", admin())
            .unwrap();

        let restored = SessionStore::restore(storage).unwrap();
        assert_eq!(restored.token().as_deref(), Some("tok-1"));
        assert_eq!(restored.user().unwrap().name, "Asha");
    }

    #[test]
    fn test_restore_discards_half_written_session() {
        let storage = Arc::new(MemorySessionStorage::new());
        storage.set(TOKEN_KEY, "tok-1").unwrap();

        let store = SessionStore::restore(storage.clone()).unwrap();
        assert_eq!(store.phase(), SessionPhase::Unauthenticated);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_restore_discards_unreadable_profile() {
        let storage = Arc::new(MemorySessionStorage::new());
        storage.set(TOKEN_KEY, "tok-1").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();

        let store = SessionStore::restore(storage.clone()).unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_otp_state_transitions() {
        let store = SessionStore::new(Arc::new(MemorySessionStorage::new()));
        let phone = PhoneNumber::parse("9876543210").unwrap();

        store.mark_otp_sent(phone.clone(), "ref-1");
        assert_eq!(store.phase(), SessionPhase::OtpSent);
        assert_eq!(store.pending_otp(), Some((phone, "ref-1".to_string())));

        store.reset_otp();
        assert_eq!(store.phase(), SessionPhase::Unauthenticated);
        assert_eq!(store.pending_otp(), None);
    }

    #[tokio::test]
    async fn test_expire_clears_and_notifies() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = SessionStore::new(storage.clone());
        store.establish("tok-1", admin()).unwrap();
        let mut events = store.subscribe();

        store.expire();

        assert!(!store.is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);
    }

    #[tokio::test]
    async fn test_clear_publishes_logged_out() {
        let store = SessionStore::new(Arc::new(MemorySessionStorage::new()));
        let mut events = store.subscribe();
        store.establish("tok-1", admin()).unwrap();
        store.clear().unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::LoggedIn { user_id: 42 }
        );
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedOut);
        assert_eq!(store.token(), None);
    }
}
