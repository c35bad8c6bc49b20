//! Credential store port: trait for durable username/password-hash storage.
//!
//! This trait abstracts the storage backend from the authentication flow.

/// Trait for durable credential storage.
///
/// Implementations own the uniqueness invariant: at most one record per
/// username, matched case-sensitively.
pub trait CredentialStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Register a new user, hashing and persisting the password before
    /// returning.
    ///
    /// Must be atomic under concurrent registration of the same username:
    /// a race never produces two records for one name.
    ///
    /// # Errors
    /// Fails if the username is already present (case-sensitive exact
    /// match) or the store is unavailable.
    fn register(&self, username: &str, password: &str) -> Result<(), Self::Error>;

    /// Check a username/password pair against the stored hash.
    ///
    /// Returns `false` for an unknown username as well as for a wrong
    /// password; callers cannot distinguish the two. This is a deliberate
    /// information-hiding choice to prevent username enumeration.
    ///
    /// # Errors
    /// Returns error if the store is unavailable or corrupt.
    fn verify(&self, username: &str, password: &str) -> Result<bool, Self::Error>;

    /// Get the total number of registered users.
    ///
    /// # Errors
    /// Returns error if the store is unavailable.
    fn user_count(&self) -> Result<usize, Self::Error>;
}
