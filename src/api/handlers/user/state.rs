//! Auth state and configuration shared by the user handlers.

use secrecy::SecretString;

use super::store::UserStore;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    session_secret: SecretString,
    secure_cookies: bool,
}

impl AuthConfig {
    #[must_use]
    pub fn new(session_secret: SecretString) -> Self {
        Self {
            session_secret,
            secure_cookies: false,
        }
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn session_secret(&self) -> &SecretString {
        &self.session_secret
    }

    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }
}

pub struct AuthState {
    config: AuthConfig,
    store: UserStore,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, store: UserStore) -> Self {
        Self { config, store }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &UserStore {
        &self.store
    }
}
