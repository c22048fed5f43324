use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use super::gate::Session;
use crate::errors::ServiceError;
use crate::models::{LoginCredentials, User, UserRole};

/// Source of the current identity. The gate's callers read sessions through
/// this trait and never touch the backing store.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    async fn current_session(&self) -> Session;
}

/// Signed-in state held by the identity source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: User,
    pub token: String,
}

struct DemoAccount {
    password: &'static str,
    user: User,
}

fn demo_account(
    id: &str,
    username: &str,
    name: &str,
    password: &'static str,
    role: UserRole,
) -> (String, DemoAccount) {
    (
        username.to_string(),
        DemoAccount {
            password,
            user: User {
                id: id.to_string(),
                username: username.to_string(),
                name: name.to_string(),
                email: format!("{}@stockzy.com", username),
                role,
            },
        },
    )
}

lazy_static! {
    static ref DEMO_ACCOUNTS: HashMap<String, DemoAccount> = HashMap::from([
        demo_account("1", "admin", "Admin User", "password", UserRole::Admin),
        demo_account("2", "dioney", "Dioney User", "123456", UserRole::Admin),
        demo_account("3", "estoquista", "Estoquista User", "123456", UserRole::Operator),
    ]);
}

/// Simulated identity service backed by the built-in demo accounts.
#[derive(Clone, Default)]
pub struct AuthService {
    state: Arc<RwLock<Option<AuthState>>>,
    latency: Duration,
}

impl AuthService {
    pub fn new(latency: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(None)),
            latency,
        }
    }

    /// Checks the credentials against the demo accounts and stores the
    /// resulting session.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: LoginCredentials) -> Result<AuthState, ServiceError> {
        self.simulate_latency().await;

        let account = DEMO_ACCOUNTS
            .get(&credentials.username)
            .filter(|account| account.password == credentials.password);

        let Some(account) = account else {
            warn!("Login failed: invalid username or password");
            return Err(ServiceError::AuthError(
                "Invalid username or password".to_string(),
            ));
        };

        let auth = AuthState {
            user: account.user.clone(),
            token: format!("mock-jwt-token-{}", credentials.username),
        };
        *self.state.write().await = Some(auth.clone());

        info!(role = %auth.user.role, "Login successful");
        Ok(auth)
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Some(previous) = self.state.write().await.take() {
            info!(username = %previous.user.username, "Logged out");
        }
    }

    pub async fn current_user(&self) -> Result<User, ServiceError> {
        self.state
            .read()
            .await
            .as_ref()
            .map(|auth| auth.user.clone())
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.as_ref().map(|auth| auth.token.clone())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl IdentitySource for AuthService {
    async fn current_session(&self) -> Session {
        match self.state.read().await.as_ref() {
            Some(auth) => Session::authenticated(auth.user.role),
            None => Session::anonymous(),
        }
    }
}
