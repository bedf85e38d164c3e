use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{Credential, LoginInput, NewCredential, RegisterInput};
use super::errors::AuthError;
use super::repository::{CredentialStore, StoreError};
use crate::audit::{AuditEmitter, AuditEvent};

/// Auth business service independent of web framework.
///
/// Audit delivery is part of each operation: the event is sent synchronously
/// after the store work succeeds, and a delivery failure fails the operation
/// with [`AuthError::AuditDeliveryFailed`]. Store changes already made are kept.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    audit: Arc<dyn AuditEmitter>,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, audit: Arc<dyn AuditEmitter>) -> Self {
        Self { store, audit }
    }

    /// Verify an email/password pair and return the matching credential.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, domain::{LoginInput, RegisterInput}, repo::InMemoryCredentialStore};
    /// use service::audit::emitter::mock::RecordingAuditEmitter;
    /// use std::sync::Arc;
    /// let audit = Arc::new(RecordingAuditEmitter::default());
    /// let svc = AuthService::new(Arc::new(InMemoryCredentialStore::new()), audit.clone());
    /// let register = RegisterInput { email: "u@e.com".into(), password: "p1".into(), first_name: "U".into(), last_name: String::new(), active: true };
    /// tokio_test::block_on(svc.register(register)).unwrap();
    /// let user = tokio_test::block_on(svc.authenticate(LoginInput { email: "u@e.com".into(), password: "p1".into() })).unwrap();
    /// assert_eq!(user.email, "u@e.com");
    /// assert_eq!(audit.events().len(), 2);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn authenticate(&self, input: LoginInput) -> Result<Credential, AuthError> {
        let user = match self.store.get_by_email(&input.email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("no credential for email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                warn!(error = %e, "credential lookup failed");
                return Err(AuthError::InvalidCredentials);
            }
        };

        match self.store.password_matches(&user, &input.password).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(user_id = user.id, "password mismatch");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                warn!(user_id = user.id, error = %e, "password verification failed");
                return Err(AuthError::InvalidCredentials);
            }
        }

        self.record(AuditEvent::authentication(&user.email)).await?;
        info!(user_id = user.id, "user_authenticated");
        Ok(user)
    }

    /// Create a new credential; the email must not be registered yet.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, domain::RegisterInput, errors::AuthError, repo::InMemoryCredentialStore};
    /// use service::audit::emitter::mock::RecordingAuditEmitter;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(InMemoryCredentialStore::new()), Arc::new(RecordingAuditEmitter::default()));
    /// let input = RegisterInput { email: "user@example.com".into(), password: "Secret123".into(), first_name: String::new(), last_name: String::new(), active: true };
    /// let id = tokio_test::block_on(svc.register(input.clone())).unwrap();
    /// assert_eq!(id, 1);
    /// let again = tokio_test::block_on(svc.register(input));
    /// assert!(matches!(again, Err(AuthError::DuplicateUser)));
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<i32, AuthError> {
        match self.store.get_by_email(&input.email).await {
            Ok(Some(existing)) => {
                debug!(user_id = existing.id, "email already registered");
                return Err(AuthError::DuplicateUser);
            }
            Ok(None) => {}
            // the store's own uniqueness still guards the insert below
            Err(e) => warn!(error = %e, "duplicate check failed; attempting insert"),
        }

        let email = input.email.clone();
        let id = match self.store.insert(NewCredential::from(input)).await {
            Ok(id) => id,
            Err(StoreError::Conflict) => return Err(AuthError::DuplicateUser),
            Err(e) => {
                warn!(error = %e, "credential insert failed");
                return Err(AuthError::RegistrationFailed);
            }
        };

        self.record(AuditEvent::registration(id, &email)).await?;
        info!(user_id = id, "user_registered");
        Ok(id)
    }

    async fn record(&self, event: AuditEvent) -> Result<(), AuthError> {
        let category = event.name;
        self.audit.emit(event).await.map_err(|e| {
            warn!(%category, error = %e, "audit event not delivered; failing request");
            AuthError::AuditDeliveryFailed(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::emitter::mock::RecordingAuditEmitter;
    use crate::audit::AuditCategory;
    use crate::auth::domain::Credential;
    use crate::auth::repo::InMemoryCredentialStore;
    use async_trait::async_trait;

    fn register_input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.into(),
            password: password.into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            active: true,
        }
    }

    fn login(email: &str, password: &str) -> LoginInput {
        LoginInput { email: email.into(), password: password.into() }
    }

    fn service() -> (AuthService, Arc<InMemoryCredentialStore>, Arc<RecordingAuditEmitter>) {
        let store = Arc::new(InMemoryCredentialStore::new());
        let audit = Arc::new(RecordingAuditEmitter::default());
        (AuthService::new(store.clone(), audit.clone()), store, audit)
    }

    /// Store whose every call fails.
    struct BrokenStore;

    #[async_trait]
    impl CredentialStore for BrokenStore {
        async fn get_by_email(&self, _email: &str) -> Result<Option<Credential>, StoreError> {
            Err(StoreError::Backend("connection reset".into()))
        }
        async fn insert(&self, _new: NewCredential) -> Result<i32, StoreError> {
            Err(StoreError::Backend("connection reset".into()))
        }
    }

    /// Store that hands back credentials whose hash cannot be parsed.
    struct CorruptHashStore(InMemoryCredentialStore);

    #[async_trait]
    impl CredentialStore for CorruptHashStore {
        async fn get_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
            let found = self.0.get_by_email(email).await?;
            Ok(found.map(|mut c| {
                c.password_hash = "not-a-phc-string".into();
                c
            }))
        }
        async fn insert(&self, new: NewCredential) -> Result<i32, StoreError> {
            self.0.insert(new).await
        }
    }

    #[tokio::test]
    async fn register_then_authenticate_emits_both_events() {
        let (svc, _store, audit) = service();
        let id = svc.register(register_input("a@x.com", "p1")).await.unwrap();
        let user = svc.authenticate(login("a@x.com", "p1")).await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.first_name, "Ada");

        let events = audit.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], AuditEvent::registration(id, "a@x.com"));
        assert_eq!(events[1].name, AuditCategory::Authentication);
        assert_eq!(events[1].data, "a@x.com logged in");
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let (svc, _store, audit) = service();
        svc.register(register_input("a@x.com", "p1")).await.unwrap();

        let unknown = svc.authenticate(login("b@x.com", "p1")).await.unwrap_err();
        let wrong = svc.authenticate(login("a@x.com", "wrong")).await.unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
        // only the registration was audited
        assert_eq!(audit.events().len(), 1);
    }

    #[tokio::test]
    async fn store_failure_on_login_is_invalid_credentials() {
        let svc = AuthService::new(Arc::new(BrokenStore), Arc::new(RecordingAuditEmitter::default()));
        let err = svc.authenticate(login("a@x.com", "p1")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unreadable_hash_is_invalid_credentials() {
        let audit = Arc::new(RecordingAuditEmitter::default());
        let svc = AuthService::new(Arc::new(CorruptHashStore(InMemoryCredentialStore::new())), audit.clone());
        svc.register(register_input("a@x.com", "p1")).await.unwrap();

        let err = svc.authenticate(login("a@x.com", "p1")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_string(), AuthError::InvalidCredentials.to_string());
        let events = audit.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, AuditCategory::Registration);
    }

    #[tokio::test]
    async fn email_format_is_not_validated() {
        let (svc, store, _audit) = service();
        let id = svc.register(register_input("operator", "p1")).await.unwrap();
        assert_eq!(store.get_by_email("operator").await.unwrap().unwrap().id, id);
        assert!(svc.authenticate(login("operator", "p1")).await.is_ok());
    }

    #[tokio::test]
    async fn store_failure_on_register_is_registration_failed() {
        let audit = Arc::new(RecordingAuditEmitter::default());
        let svc = AuthService::new(Arc::new(BrokenStore), audit.clone());
        let err = svc.register(register_input("a@x.com", "p1")).await.unwrap_err();
        assert!(matches!(err, AuthError::RegistrationFailed));
        assert!(audit.events().is_empty());
    }

    #[tokio::test]
    async fn duplicate_registration_keeps_first_record() {
        let (svc, store, audit) = service();
        let first = svc.register(register_input("a@x.com", "p1")).await.unwrap();
        let err = svc.register(register_input("a@x.com", "p2")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser));

        let stored = store.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.id, first);
        assert!(svc.authenticate(login("a@x.com", "p1")).await.is_ok());
        assert!(svc.authenticate(login("a@x.com", "p2")).await.is_err());
        assert_eq!(audit.events().iter().filter(|e| e.name == AuditCategory::Registration).count(), 1);
    }

    #[tokio::test]
    async fn audit_failure_fails_register_without_rollback() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let svc = AuthService::new(store.clone(), Arc::new(RecordingAuditEmitter::failing()));
        let err = svc.register(register_input("a@x.com", "p1")).await.unwrap_err();
        assert!(matches!(err, AuthError::AuditDeliveryFailed(_)));
        assert!(store.get_by_email("a@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn audit_failure_fails_authenticate() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let ok = AuthService::new(store.clone(), Arc::new(RecordingAuditEmitter::default()));
        ok.register(register_input("a@x.com", "p1")).await.unwrap();

        let failing = AuthService::new(store, Arc::new(RecordingAuditEmitter::failing()));
        let err = failing.authenticate(login("a@x.com", "p1")).await.unwrap_err();
        assert!(matches!(err, AuthError::AuditDeliveryFailed(_)));
    }

    #[tokio::test]
    async fn repeated_authentication_is_stable() {
        let (svc, _store, audit) = service();
        svc.register(register_input("a@x.com", "p1")).await.unwrap();
        let first = svc.authenticate(login("a@x.com", "p1")).await.unwrap();
        for _ in 0..3 {
            let again = svc.authenticate(login("a@x.com", "p1")).await.unwrap();
            assert_eq!(again, first);
        }
        assert_eq!(audit.events().len(), 5);
    }
}
