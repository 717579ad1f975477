//! Plain-data render output. Test subject ids match the ones the browser
//! suite selects on.

pub const USER_MENU_BUTTON: &str = "userMenuButton";
pub const USER_MENU_AVATAR: &str = "userMenuAvatar";
pub const USER_MENU: &str = "userMenu";
pub const PROFILE_LINK: &str = "profileLink";
pub const LOGOUT_LINK: &str = "logoutLink";
pub const USER_MENU_ID: &str = "headerUserMenu";
pub const ACCOUNT_MENU_LABEL: &str = "Account menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    S,
    M,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonContent {
    LoadingSpinner {
        size: Size,
    },
    Avatar {
        name: String,
        size: Size,
        test_subj: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderButton {
    pub aria_controls: &'static str,
    pub aria_expanded: bool,
    pub aria_haspopup: bool,
    pub aria_label: &'static str,
    pub test_subj: &'static str,
    pub content: ButtonContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub href: String,
    pub icon_type: String,
    pub test_subj: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMenu {
    pub id: &'static str,
    pub title: String,
    pub test_subj: &'static str,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavControlView {
    pub button: HeaderButton,
    pub popover: Option<UserMenu>,
}

impl NavControlView {
    /// Number of rendered elements carrying `test_subj`.
    pub fn find_test_subject(&self, test_subj: &str) -> usize {
        let mut found = usize::from(self.button.test_subj == test_subj);
        if let ButtonContent::Avatar { test_subj: avatar, .. } = &self.button.content {
            found += usize::from(*avatar == test_subj);
        }
        if let Some(menu) = &self.popover {
            found += usize::from(menu.test_subj == test_subj);
            found += menu
                .items
                .iter()
                .filter(|item| item.test_subj == test_subj)
                .count();
        }
        found
    }

    /// Labels of the popover items in display order; empty while closed.
    pub fn menu_item_labels(&self) -> Vec<&str> {
        self.popover
            .iter()
            .flat_map(|menu| menu.items.iter().map(|item| item.label.as_str()))
            .collect()
    }
}
