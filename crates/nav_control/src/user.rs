use serde::{Deserialize, Serialize};
use tokio::sync::oneshot::{self, error::TryRecvError};

pub const ANONYMOUS_PROVIDER: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationProvider {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub authentication_provider: AuthenticationProvider,
}

impl AuthenticatedUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            full_name: None,
            email: None,
            roles: Vec::new(),
            authentication_provider: AuthenticationProvider {
                kind: "basic".into(),
                name: "basic1".into(),
            },
        }
    }

    /// Full name when set and non-blank, otherwise the username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.username.as_str())
    }

    pub fn is_anonymous(&self) -> bool {
        self.authentication_provider.kind == ANONYMOUS_PROVIDER
    }
}

/// Completes a [`PendingUser`].
pub struct UserResolver {
    tx: oneshot::Sender<AuthenticatedUser>,
}

impl UserResolver {
    /// Returns false when the pending side is already gone.
    pub fn resolve(self, user: AuthenticatedUser) -> bool {
        self.tx.send(user).is_ok()
    }
}

/// A user that becomes known at most once. A dropped resolver leaves it
/// pending forever.
pub struct PendingUser {
    rx: Option<oneshot::Receiver<AuthenticatedUser>>,
    ready: Option<AuthenticatedUser>,
}

impl PendingUser {
    pub fn channel() -> (UserResolver, PendingUser) {
        let (tx, rx) = oneshot::channel();
        (
            UserResolver { tx },
            PendingUser {
                rx: Some(rx),
                ready: None,
            },
        )
    }

    pub fn resolved(user: AuthenticatedUser) -> Self {
        Self {
            rx: None,
            ready: Some(user),
        }
    }

    /// Takes the user if it has arrived, without waiting.
    pub fn try_take(&mut self) -> Option<AuthenticatedUser> {
        if let Some(user) = self.ready.take() {
            return Some(user);
        }
        let rx = self.rx.as_mut()?;
        match rx.try_recv() {
            Ok(user) => {
                self.rx = None;
                Some(user)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                self.rx = None;
                None
            }
        }
    }

    pub async fn wait(&mut self) -> Option<AuthenticatedUser> {
        if let Some(user) = self.ready.take() {
            return Some(user);
        }
        let rx = self.rx.take()?;
        rx.await.ok()
    }
}
