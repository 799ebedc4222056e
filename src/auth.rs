//! Sign-in state and the route guard used by privileged commands

use std::sync::RwLock;

use log::debug;
use serde_json::Value;

use crate::client::AuthApi;
use crate::client::models::{LoginRequest, UserRecord};
use crate::error::{ApiError, AuthError};
use crate::session::Session;

/// The only role allowed into the console
pub const PRIVILEGED_ROLE: &str = "superadmin";

/// Owns the in-memory token mirror and the persisted session triple.
pub struct AuthService {
    session: Session,
    token: RwLock<Option<String>>,
}

impl AuthService {
    /// Mirror the persisted token, if any
    pub fn new(session: Session) -> Self {
        let token = session.token();
        Self {
            session,
            token: RwLock::new(token),
        }
    }

    /// Exchange credentials for a session.
    ///
    /// Succeeds only for a successful envelope carrying a token and the
    /// privileged role; the user payload is then persisted as-is.
    pub async fn login(
        &self,
        api: &dyn AuthApi,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, AuthError> {
        let request = LoginRequest {
            username: email.to_string(),
            passcode: password.to_string(),
        };

        let envelope = match api.login(&request).await {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!("Login request failed: {}", e);
                return Err(AuthError::Failed("Login failed".to_string()));
            }
        };

        let rejection = envelope.message_or("Unauthorized access");
        if !envelope.success {
            return Err(AuthError::Rejected(rejection));
        }

        // Access hinges on the token and role alone; other fields are display-only
        let data = envelope.data;
        let token = data
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty());
        let role = data.get("role").and_then(Value::as_str);
        let (Some(token), Some(PRIVILEGED_ROLE)) = (token, role) else {
            return Err(AuthError::Rejected(rejection));
        };
        let token = token.to_string();

        let user_json =
            serde_json::to_string(&data).map_err(|e| AuthError::Failed(e.to_string()))?;
        self.session
            .persist(&token, PRIVILEGED_ROLE, &user_json)
            .map_err(|e| AuthError::Failed(e.to_string()))?;

        let user: UserRecord = serde_json::from_value(data).unwrap_or_else(|e| {
            debug!("Login payload has unexpected fields: {}", e);
            UserRecord {
                token: token.clone(),
                role: PRIVILEGED_ROLE.to_string(),
                ..UserRecord::default()
            }
        });

        self.set_token(Some(token));
        Ok(user)
    }

    /// Token in memory AND the persisted role is privileged.
    ///
    /// The role is re-read on every call.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.session.role().as_deref() == Some(PRIVILEGED_ROLE)
    }

    /// Forget the token and remove the persisted session
    pub fn logout(&self) -> Result<(), crate::error::StorageError> {
        self.set_token(None);
        self.session.clear()
    }

    /// Cached user record; `None` when absent or unreadable
    pub fn get_user(&self) -> Option<UserRecord> {
        let raw = self.session.user_data()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Ignoring unreadable cached user: {}", e);
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }
}

/// Email and password sign-in
#[derive(Debug, Clone)]
pub struct SignInWithPasswordParams {
    pub email: String,
    pub password: String,
}

/// Facade used by commands: sign-in, sign-out and the route guard.
pub struct AuthClient {
    service: AuthService,
}

impl AuthClient {
    pub fn new(session: Session) -> Self {
        Self {
            service: AuthService::new(session),
        }
    }

    pub async fn sign_in_with_password(
        &self,
        api: &dyn AuthApi,
        params: &SignInWithPasswordParams,
    ) -> Result<UserRecord, AuthError> {
        self.service
            .login(api, &params.email, &params.password)
            .await
    }

    /// Signed-in user, only while the session is authenticated
    pub fn get_user(&self) -> Option<UserRecord> {
        if !self.service.is_authenticated() {
            return None;
        }
        self.service.get_user()
    }

    pub fn sign_out(&self) -> Result<(), crate::error::StorageError> {
        self.service.logout()
    }

    pub fn is_authenticated(&self) -> bool {
        self.service.is_authenticated()
    }

    /// Route guard: fails unless a privileged session is present
    pub fn require_session(&self) -> Result<(), ApiError> {
        if self.service.is_authenticated() {
            Ok(())
        } else {
            Err(ApiError::NotSignedIn)
        }
    }

    #[allow(dead_code)]
    pub fn sign_up(&self) -> Result<(), AuthError> {
        Err(AuthError::NotImplemented("Sign up"))
    }

    #[allow(dead_code)]
    pub fn sign_in_with_oauth(&self, _provider: &str) -> Result<(), AuthError> {
        Err(AuthError::NotImplemented("Social authentication"))
    }

    #[allow(dead_code)]
    pub fn reset_password(&self, _email: &str) -> Result<(), AuthError> {
        Err(AuthError::NotImplemented("Password reset"))
    }

    #[allow(dead_code)]
    pub fn update_password(&self, _email: &str) -> Result<(), AuthError> {
        Err(AuthError::NotImplemented("Password update"))
    }
}
