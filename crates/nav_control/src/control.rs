use crate::{
    links::{LinkSubscription, UserMenuLink},
    user::{AuthenticatedUser, PendingUser},
    view::{
        ButtonContent, HeaderButton, MenuItem, NavControlView, Size, UserMenu,
        ACCOUNT_MENU_LABEL, LOGOUT_LINK, PROFILE_LINK, USER_MENU, USER_MENU_AVATAR,
        USER_MENU_BUTTON, USER_MENU_ID,
    },
};

pub struct NavControlProps {
    pub user: PendingUser,
    pub edit_profile_url: String,
    pub logout_url: String,
    pub user_menu_links: LinkSubscription,
}

pub struct SecurityNavControl {
    pending_user: PendingUser,
    edit_profile_url: String,
    logout_url: String,
    link_subscription: LinkSubscription,
    user: Option<AuthenticatedUser>,
    links: Vec<UserMenuLink>,
    is_open: bool,
}

impl SecurityNavControl {
    /// The user is not read here even if it is already available; the first
    /// render always shows the loading trigger.
    pub fn new(props: NavControlProps) -> Self {
        let NavControlProps {
            user,
            edit_profile_url,
            logout_url,
            mut user_menu_links,
        } = props;
        let links = user_menu_links.current();

        Self {
            pending_user: user,
            edit_profile_url,
            logout_url,
            link_subscription: user_menu_links,
            user: None,
            links,
            is_open: false,
        }
    }

    /// Picks up a resolved user and the latest links. Returns true when the
    /// next render differs.
    pub fn refresh(&mut self) -> bool {
        let mut changed = false;
        if self.user.is_none() {
            if let Some(user) = self.pending_user.try_take() {
                tracing::debug!(username = %user.username, "account menu user resolved");
                self.user = Some(user);
                changed = true;
            }
        }
        if self.link_subscription.has_changed() {
            self.links = self.link_subscription.current();
            changed = true;
        }
        changed
    }

    /// Waits until the user resolves, then refreshes. Returns immediately if
    /// the user is already known or can never arrive.
    pub async fn wait_for_user(&mut self) {
        if self.user.is_none() {
            self.user = self.pending_user.wait().await;
        }
        self.refresh();
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Trigger click. The popover only opens once a user is loaded.
    pub fn toggle(&mut self) {
        if self.user.is_none() {
            return;
        }
        self.is_open = !self.is_open;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn render(&self) -> NavControlView {
        let content = match &self.user {
            Some(user) => ButtonContent::Avatar {
                name: user.display_name().to_string(),
                size: Size::S,
                test_subj: USER_MENU_AVATAR,
            },
            None => ButtonContent::LoadingSpinner { size: Size::M },
        };

        let button = HeaderButton {
            aria_controls: USER_MENU_ID,
            aria_expanded: self.is_open,
            aria_haspopup: true,
            aria_label: ACCOUNT_MENU_LABEL,
            test_subj: USER_MENU_BUTTON,
            content,
        };

        let popover = match &self.user {
            Some(user) if self.is_open => Some(UserMenu {
                id: USER_MENU_ID,
                title: user.display_name().to_string(),
                test_subj: USER_MENU,
                items: self.menu_items(user),
            }),
            _ => None,
        };

        NavControlView { button, popover }
    }

    fn menu_items(&self, user: &AuthenticatedUser) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self
            .links
            .iter()
            .map(|link| MenuItem {
                label: link.label.clone(),
                href: link.href.clone(),
                icon_type: link.icon_type.clone(),
                test_subj: format!("userMenuLink__{}", link.label),
            })
            .collect();

        let is_anonymous = user.is_anonymous();
        if !is_anonymous {
            let has_custom_profile_link = self.links.iter().any(|link| link.set_as_profile);
            let profile = MenuItem {
                label: if has_custom_profile_link {
                    "Preferences"
                } else {
                    "Profile"
                }
                .to_string(),
                href: self.edit_profile_url.clone(),
                icon_type: "user".into(),
                test_subj: PROFILE_LINK.into(),
            };
            if has_custom_profile_link {
                items.push(profile);
            } else {
                items.insert(0, profile);
            }
        }

        items.push(MenuItem {
            label: if is_anonymous { "Log in" } else { "Log out" }.to_string(),
            href: self.logout_url.clone(),
            icon_type: "exit".into(),
            test_subj: LOGOUT_LINK.into(),
        });
        items
    }
}

#[cfg(test)]
#[path = "tests/control_tests.rs"]
mod tests;
