//! Extra account-menu links registered by other parts of the application,
//! exposed to the menu as a snapshot plus change notification.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMenuLink {
    pub label: String,
    pub href: String,
    pub icon_type: String,
    /// Links without an order sort last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Replaces the built-in profile link, which then moves below the custom links.
    #[serde(default)]
    pub set_as_profile: bool,
}

impl UserMenuLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>, order: i64) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            icon_type: "empty".into(),
            order: Some(order),
            set_as_profile: false,
        }
    }

    pub fn as_profile(mut self) -> Self {
        self.set_as_profile = true;
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkRegistryError {
    #[error("only one custom profile link can be registered")]
    DuplicateProfileLink,
}

fn sort_links(links: &mut [UserMenuLink]) {
    links.sort_by_key(|link| link.order.unwrap_or(i64::MAX));
}

pub struct UserMenuLinkRegistry {
    tx: watch::Sender<Vec<UserMenuLink>>,
}

impl Default for UserMenuLinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UserMenuLinkRegistry {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self { tx }
    }

    /// Adds links and notifies subscribers. Rejects the whole batch if it
    /// would leave more than one custom profile link.
    pub fn register(
        &self,
        links: impl IntoIterator<Item = UserMenuLink>,
    ) -> Result<(), LinkRegistryError> {
        let links: Vec<_> = links.into_iter().collect();
        let existing_profiles = self
            .tx
            .borrow()
            .iter()
            .filter(|link| link.set_as_profile)
            .count();
        let new_profiles = links.iter().filter(|link| link.set_as_profile).count();
        if existing_profiles + new_profiles > 1 {
            return Err(LinkRegistryError::DuplicateProfileLink);
        }

        tracing::debug!(added = links.len(), "registering user menu links");
        self.tx.send_modify(|current| {
            current.extend(links);
            sort_links(current);
        });
        Ok(())
    }

    pub fn links(&self) -> Vec<UserMenuLink> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> LinkSubscription {
        LinkSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

/// Dropping the subscription unsubscribes.
#[derive(Clone)]
pub struct LinkSubscription {
    rx: watch::Receiver<Vec<UserMenuLink>>,
}

impl LinkSubscription {
    /// A subscription over a list that never changes.
    pub fn fixed(links: impl IntoIterator<Item = UserMenuLink>) -> Self {
        let mut links: Vec<_> = links.into_iter().collect();
        sort_links(&mut links);
        let (_tx, rx) = watch::channel(links);
        Self { rx }
    }

    /// Current links, sorted by order. Marks the value as seen.
    pub fn current(&mut self) -> Vec<UserMenuLink> {
        self.rx.borrow_and_update().clone()
    }

    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Waits for the next change. Returns false once the registry is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    pub fn into_stream(self) -> WatchStream<Vec<UserMenuLink>> {
        WatchStream::new(self.rx)
    }
}
