use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::credential::errors::CredentialError;
use crate::credential::models::CredentialRecord;
use crate::credential::models::EmailAddress;
use crate::credential::models::Password;
use crate::credential::ports::CredentialStore;

/// Process-local credential store.
///
/// Records live as long as the process; a restart forgets every registration.
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<String, CredentialRecord>>,
    password_hasher: PasswordHasher,
    /// Verified against when the email is unknown, so both failure paths
    /// cost one Argon2 run.
    dummy_verifier: String,
}

impl InMemoryCredentialStore {
    /// Create an empty store hashing with `password_hasher`.
    ///
    /// # Errors
    /// * `Password` - The hasher could not produce the placeholder verifier
    pub fn new(password_hasher: PasswordHasher) -> Result<Self, CredentialError> {
        let dummy_verifier = password_hasher.hash("placeholder-for-unknown-identities")?;

        Ok(Self {
            records: RwLock::new(HashMap::new()),
            password_hasher,
            dummy_verifier,
        })
    }

    /// Look up the stored record for `email`.
    pub async fn find(&self, email: &EmailAddress) -> Option<CredentialRecord> {
        self.records.read().await.get(email.as_str()).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn hash(&self, password: &Password) -> Result<String, CredentialError> {
        let hasher = self.password_hasher.clone();
        let password = password.expose().to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CredentialError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(CredentialError::from)
    }

    async fn check(&self, password: &Password, verifier: String) -> Result<bool, CredentialError> {
        let hasher = self.password_hasher.clone();
        let password = password.expose().to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &verifier))
            .await
            .map_err(|e| CredentialError::Unknown(format!("Verification task failed: {}", e)))?
            .map_err(CredentialError::from)
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn register(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<(), CredentialError> {
        // Hash outside the lock; the check-and-insert below is the atomic part.
        let password_verifier = self.hash(password).await?;

        let mut records = self.records.write().await;
        match records.entry(email.as_str().to_string()) {
            Entry::Occupied(_) => Err(CredentialError::AlreadyExists(email.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(CredentialRecord {
                    email: email.clone(),
                    password_verifier,
                    created_at: Utc::now(),
                });
                Ok(())
            }
        }
    }

    async fn verify(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<bool, CredentialError> {
        let stored = self
            .records
            .read()
            .await
            .get(email.as_str())
            .map(|record| record.password_verifier.clone());

        match stored {
            Some(verifier) => self.check(password, verifier).await,
            None => {
                self.check(password, self.dummy_verifier.clone()).await?;
                Err(CredentialError::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn store() -> InMemoryCredentialStore {
        let hasher = PasswordHasher::with_cost(1024, 1, 1).expect("Failed to build hasher");
        InMemoryCredentialStore::new(hasher).expect("Failed to build store")
    }

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw.to_string()).unwrap()
    }

    fn password(raw: &str) -> Password {
        Password::new(raw.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_verify() {
        let store = store();
        let alice = email("alice@example.com");

        store
            .register(&alice, &password("secret123"))
            .await
            .expect("Register failed");

        assert!(store.verify(&alice, &password("secret123")).await.unwrap());
        assert!(!store.verify(&alice, &password("wrongpass")).await.unwrap());
    }

    #[tokio::test]
    async fn test_stores_verifier_not_plaintext() {
        let store = store();
        let alice = email("alice@example.com");

        store.register(&alice, &password("secret123")).await.unwrap();

        let record = store.find(&alice).await.expect("Record missing");
        assert_eq!(record.email, alice);
        assert!(record.password_verifier.starts_with("$argon2id$"));
        assert!(!record.password_verifier.contains("secret123"));
    }

    #[tokio::test]
    async fn test_register_duplicate_keeps_original_record() {
        let store = store();
        let alice = email("alice@example.com");

        store.register(&alice, &password("secret123")).await.unwrap();
        let original = store.find(&alice).await.unwrap();

        let result = store.register(&alice, &password("other")).await;
        assert!(matches!(result, Err(CredentialError::AlreadyExists(_))));

        assert_eq!(store.find(&alice).await.unwrap(), original);
        assert!(store.verify(&alice, &password("secret123")).await.unwrap());
        assert!(!store.verify(&alice, &password("other")).await.unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_same_password_gets_distinct_verifiers() {
        let store = store();
        let alice = email("alice@example.com");
        let bob = email("bob@example.com");

        store.register(&alice, &password("secret123")).await.unwrap();
        store.register(&bob, &password("secret123")).await.unwrap();

        let alice_record = store.find(&alice).await.unwrap();
        let bob_record = store.find(&bob).await.unwrap();
        assert_ne!(alice_record.password_verifier, bob_record.password_verifier);

        assert!(store.verify(&alice, &password("secret123")).await.unwrap());
        assert!(store.verify(&bob, &password("secret123")).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_unknown_email() {
        let store = store();

        let result = store
            .verify(&email("bob@example.com"), &password("anything"))
            .await;

        assert!(matches!(result, Err(CredentialError::NotFound)));
        assert!(store.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_register_same_email_single_winner() {
        let store = Arc::new(store());

        let attempts: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .register(
                            &email("alice@example.com"),
                            &password(&format!("password-{}", i)),
                        )
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for attempt in attempts {
            match attempt.await.expect("Task panicked") {
                Ok(()) => successes += 1,
                Err(CredentialError::AlreadyExists(_)) => conflicts += 1,
                Err(e) => panic!("Unexpected error: {}", e),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 7);
        assert_eq!(store.len().await, 1);
    }
}
