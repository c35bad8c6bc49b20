//! Authentication service: session gate over the credential store.
//!
//! Signup and login are separate transitions: signup never authenticates,
//! and only a successful login moves the session into `LoggedIn`.

use std::sync::Arc;

use crate::adapters::CredentialError;
use crate::ports::CredentialStore;
use crate::RenoguardError;

/// Authentication state for one running UI process instance.
///
/// Held by the caller and passed explicitly into the service; the library
/// never keeps it in a global. Exactly one session exists per process
/// instance, so no concurrent identities are modeled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn {
        username: String,
    },
}

impl Session {
    /// Whether an identity is currently established.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    /// The authenticated username, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::LoggedIn { username } => Some(username),
            Self::LoggedOut => None,
        }
    }
}

/// Which credential operation the boundary requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Signup,
    Login,
}

/// Outcome of one authentication attempt, surfaced to the UI boundary.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub success: bool,
    pub message: String,
}

impl AuthResult {
    fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Service gating access behind the credential store.
pub struct AuthService<S: CredentialStore> {
    store: Arc<S>,
}

impl<S> AuthService<S>
where
    S: CredentialStore,
    S::Error: Into<CredentialError>,
{
    /// Create a new authentication service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Never authenticates: the caller must log in afterwards.
    ///
    /// # Errors
    /// Returns error if the username exists or the store fails.
    pub fn signup(&self, username: &str, password: &str) -> Result<(), RenoguardError> {
        self.store
            .register(username, password)
            .map_err(|e| RenoguardError::Credential(e.into()))
    }

    /// Attempt to log in, transitioning the session on success.
    ///
    /// On failure the session is left untouched; the caller cannot tell an
    /// unknown username from a wrong password.
    ///
    /// # Errors
    /// Returns error if the store fails.
    pub fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<bool, RenoguardError> {
        let verified = self
            .store
            .verify(username, password)
            .map_err(|e| RenoguardError::Credential(e.into()))?;

        if verified {
            *session = Session::LoggedIn {
                username: username.to_string(),
            };
            tracing::info!("Login accepted");
        } else {
            tracing::info!("Login rejected");
        }

        Ok(verified)
    }

    /// End the session, from any state.
    pub fn logout(&self, session: &mut Session) {
        *session = Session::LoggedOut;
        tracing::info!("Session logged out");
    }

    /// Boundary operation: run one signup or login attempt and describe
    /// the outcome as a user-facing message.
    ///
    /// Recoverable failures (existing username, bad credentials) come back
    /// as unsuccessful results with a message and no state change; storage
    /// failures propagate as errors and must not be rendered as a normal
    /// rejection.
    ///
    /// # Errors
    /// Returns error if the store fails.
    pub fn authenticate(
        &self,
        session: &mut Session,
        mode: AuthMode,
        username: &str,
        password: &str,
    ) -> Result<AuthResult, RenoguardError> {
        match mode {
            AuthMode::Signup => {
                if username.is_empty() || password.is_empty() {
                    return Ok(AuthResult::rejected(
                        "Username and password must not be empty.",
                    ));
                }

                match self.signup(username, password) {
                    Ok(()) => Ok(AuthResult::accepted("Signup successful. Please log in.")),
                    Err(RenoguardError::Credential(CredentialError::AlreadyExists)) => {
                        Ok(AuthResult::rejected("Username already exists."))
                    }
                    Err(e) => Err(e),
                }
            }
            AuthMode::Login => {
                if self.login(session, username, password)? {
                    Ok(AuthResult::accepted("Login successful."))
                } else {
                    // Deliberately the same message for unknown usernames
                    // and wrong passwords.
                    Ok(AuthResult::rejected("Invalid credentials."))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteCredentialStore;

    fn create_service() -> AuthService<SqliteCredentialStore> {
        let store = Arc::new(SqliteCredentialStore::in_memory().expect("Should create db"));
        AuthService::new(store)
    }

    #[test]
    fn signup_never_authenticates() {
        let service = create_service();
        let mut session = Session::default();

        let result = service
            .authenticate(&mut session, AuthMode::Signup, "dr.chase", "surgery")
            .expect("Should not error");

        assert!(result.success);
        assert_eq!(result.message, "Signup successful. Please log in.");
        assert_eq!(session, Session::LoggedOut);
    }

    #[test]
    fn login_transitions_session() {
        let service = create_service();
        let mut session = Session::default();

        service.signup("dr.chase", "surgery").expect("Should signup");
        let result = service
            .authenticate(&mut session, AuthMode::Login, "dr.chase", "surgery")
            .expect("Should not error");

        assert!(result.success);
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("dr.chase"));
    }

    #[test]
    fn failed_login_leaves_session_logged_out() {
        let service = create_service();
        let mut session = Session::default();

        service.signup("dr.chase", "surgery").expect("Should signup");
        let result = service
            .authenticate(&mut session, AuthMode::Login, "dr.chase", "wrong")
            .expect("Should not error");

        assert!(!result.success);
        assert_eq!(result.message, "Invalid credentials.");
        assert_eq!(session, Session::LoggedOut);
    }

    #[test]
    fn unknown_user_gets_the_same_message_as_wrong_password() {
        let service = create_service();
        let mut session = Session::default();

        service.signup("dr.chase", "surgery").expect("Should signup");

        let unknown = service
            .authenticate(&mut session, AuthMode::Login, "never-registered", "x")
            .expect("Should not error");
        let wrong = service
            .authenticate(&mut session, AuthMode::Login, "dr.chase", "wrong")
            .expect("Should not error");

        assert!(!unknown.success);
        assert!(!wrong.success);
        assert_eq!(unknown.message, wrong.message);
    }

    #[test]
    fn duplicate_signup_is_a_message_not_an_error() {
        let service = create_service();
        let mut session = Session::default();

        service.signup("dr.chase", "surgery").expect("Should signup");
        let result = service
            .authenticate(&mut session, AuthMode::Signup, "dr.chase", "other")
            .expect("Should not error");

        assert!(!result.success);
        assert_eq!(result.message, "Username already exists.");
    }

    #[test]
    fn empty_credentials_are_rejected_before_the_store() {
        let service = create_service();
        let mut session = Session::default();

        let result = service
            .authenticate(&mut session, AuthMode::Signup, "", "password")
            .expect("Should not error");
        assert!(!result.success);

        let result = service
            .authenticate(&mut session, AuthMode::Signup, "user", "")
            .expect("Should not error");
        assert!(!result.success);
    }

    #[test]
    fn logout_returns_to_logged_out() {
        let service = create_service();
        let mut session = Session::LoggedIn {
            username: "dr.chase".to_string(),
        };

        service.logout(&mut session);
        assert_eq!(session, Session::LoggedOut);
        assert!(!session.is_authenticated());
    }
}
