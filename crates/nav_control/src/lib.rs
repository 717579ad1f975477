//! Headless model of the header account menu: which trigger to show, and
//! which items the popover lists once the current user is known.

pub mod control;
pub mod links;
pub mod user;
pub mod view;

pub use control::{NavControlProps, SecurityNavControl};
pub use links::{LinkRegistryError, LinkSubscription, UserMenuLink, UserMenuLinkRegistry};
pub use user::{AuthenticatedUser, AuthenticationProvider, PendingUser, UserResolver};
pub use view::{ButtonContent, HeaderButton, MenuItem, NavControlView, Size, UserMenu};
