use super::*;
use crate::{
    links::UserMenuLinkRegistry,
    user::{AuthenticationProvider, UserResolver},
};

fn user_named(full_name: &str) -> AuthenticatedUser {
    let mut user = AuthenticatedUser::new("jdoe");
    user.full_name = Some(full_name.to_string());
    user
}

fn props(user: PendingUser, links: Vec<UserMenuLink>) -> NavControlProps {
    NavControlProps {
        user,
        edit_profile_url: "/app/security/account".into(),
        logout_url: "/logout".into(),
        user_menu_links: LinkSubscription::fixed(links),
    }
}

fn three_links() -> Vec<UserMenuLink> {
    vec![
        UserMenuLink::new("link1", "path-to-link-1", 1),
        UserMenuLink::new("link2", "path-to-link-2", 2),
        UserMenuLink::new("link3", "path-to-link-3", 3),
    ]
}

fn pending() -> (UserResolver, PendingUser) {
    PendingUser::channel()
}

#[test]
fn renders_loading_spinner_while_user_is_pending() {
    let (_resolver, user) = pending();
    let mut control = SecurityNavControl::new(props(user, Vec::new()));
    control.refresh();

    let view = control.render();
    assert_eq!(
        view.button,
        HeaderButton {
            aria_controls: "headerUserMenu",
            aria_expanded: false,
            aria_haspopup: true,
            aria_label: "Account menu",
            test_subj: "userMenuButton",
            content: ButtonContent::LoadingSpinner { size: Size::M },
        }
    );
    assert!(view.popover.is_none());
}

#[tokio::test]
async fn renders_avatar_after_user_resolves() {
    let (resolver, user) = pending();
    let mut control = SecurityNavControl::new(props(user, Vec::new()));
    assert!(matches!(
        control.render().button.content,
        ButtonContent::LoadingSpinner { .. }
    ));

    assert!(resolver.resolve(user_named("foo")));
    assert!(control.refresh());

    assert_eq!(
        control.render().button.content,
        ButtonContent::Avatar {
            name: "foo".into(),
            size: Size::S,
            test_subj: "userMenuAvatar",
        }
    );
}

#[tokio::test]
async fn popover_stays_closed_until_user_is_loaded() {
    let mut control = SecurityNavControl::new(props(
        PendingUser::resolved(user_named("foo")),
        Vec::new(),
    ));

    let view = control.render();
    assert_eq!(view.find_test_subject("userMenu"), 0);
    assert_eq!(view.find_test_subject("profileLink"), 0);
    assert_eq!(view.find_test_subject("logoutLink"), 0);

    control.toggle();

    let view = control.render();
    assert!(!control.is_open());
    assert_eq!(view.find_test_subject("userMenu"), 0);
    assert_eq!(view.find_test_subject("profileLink"), 0);
    assert_eq!(view.find_test_subject("logoutLink"), 0);
}

#[tokio::test]
async fn renders_popover_when_avatar_is_clicked() {
    let mut control = SecurityNavControl::new(props(
        PendingUser::resolved(user_named("foo")),
        Vec::new(),
    ));
    control.wait_for_user().await;

    assert_eq!(control.render().find_test_subject("userMenu"), 0);

    control.toggle();

    let view = control.render();
    assert!(view.button.aria_expanded);
    assert_eq!(view.find_test_subject("userMenu"), 1);
    assert_eq!(view.find_test_subject("profileLink"), 1);
    assert_eq!(view.find_test_subject("logoutLink"), 1);
    assert_eq!(view.popover.expect("popover").title, "foo");
}

#[tokio::test]
async fn renders_links_registered_by_other_plugins() {
    let mut control = SecurityNavControl::new(props(
        PendingUser::resolved(user_named("foo")),
        three_links(),
    ));
    control.wait_for_user().await;

    let closed = control.render();
    for subj in ["userMenuLink__link1", "userMenuLink__link2", "userMenuLink__link3"] {
        assert_eq!(closed.find_test_subject(subj), 0);
    }

    control.toggle();

    let open = control.render();
    assert_eq!(open.find_test_subject("userMenu"), 1);
    assert_eq!(open.find_test_subject("profileLink"), 1);
    for subj in ["userMenuLink__link1", "userMenuLink__link2", "userMenuLink__link3"] {
        assert_eq!(open.find_test_subject(subj), 1);
    }
    assert_eq!(open.find_test_subject("logoutLink"), 1);
}

#[tokio::test]
async fn anonymous_user_gets_log_in_and_no_profile_link() {
    let mut user = AuthenticatedUser::new("guest");
    user.authentication_provider = AuthenticationProvider {
        kind: "anonymous".into(),
        name: "does no matter".into(),
    };
    let mut control = SecurityNavControl::new(props(PendingUser::resolved(user), three_links()));
    control.wait_for_user().await;
    control.toggle();

    let view = control.render();
    assert_eq!(view.find_test_subject("userMenu"), 1);
    assert_eq!(view.find_test_subject("profileLink"), 0);
    assert_eq!(view.find_test_subject("logoutLink"), 1);
    assert_eq!(
        view.menu_item_labels(),
        vec!["link1", "link2", "link3", "Log in"]
    );
}

#[tokio::test]
async fn profile_link_leads_without_custom_profile() {
    let mut control = SecurityNavControl::new(props(
        PendingUser::resolved(user_named("foo")),
        vec![
            UserMenuLink::new("link1", "path-to-link-1", 1),
            UserMenuLink::new("link2", "path-to-link-2", 2),
        ],
    ));
    control.wait_for_user().await;
    assert!(control.render().menu_item_labels().is_empty());

    control.toggle();

    assert_eq!(
        control.render().menu_item_labels(),
        vec!["Profile", "link1", "link2", "Log out"]
    );
}

#[tokio::test]
async fn custom_profile_link_moves_preferences_below_links() {
    let mut control = SecurityNavControl::new(props(
        PendingUser::resolved(user_named("foo")),
        vec![
            UserMenuLink::new("link1", "path-to-link-1", 1),
            UserMenuLink::new("link2", "path-to-link-2", 2).as_profile(),
        ],
    ));
    control.wait_for_user().await;
    control.toggle();

    let view = control.render();
    assert_eq!(
        view.menu_item_labels(),
        vec!["link1", "link2", "Preferences", "Log out"]
    );
    let items = view.popover.expect("popover").items;
    assert_eq!(items[2].href, "/app/security/account");
    assert_eq!(items[3].href, "/logout");
}

#[tokio::test]
async fn refresh_picks_up_newly_registered_links() {
    let registry = UserMenuLinkRegistry::new();
    let mut control = SecurityNavControl::new(NavControlProps {
        user: PendingUser::resolved(user_named("foo")),
        edit_profile_url: String::new(),
        logout_url: String::new(),
        user_menu_links: registry.subscribe(),
    });
    control.wait_for_user().await;
    control.toggle();
    assert_eq!(control.render().menu_item_labels(), vec!["Profile", "Log out"]);

    registry
        .register([UserMenuLink::new("link1", "path-to-link-1", 1)])
        .expect("register");

    assert!(control.refresh());
    assert_eq!(
        control.render().menu_item_labels(),
        vec!["Profile", "link1", "Log out"]
    );
    assert!(!control.refresh());
}

#[tokio::test]
async fn toggle_closes_an_open_popover() {
    let mut control = SecurityNavControl::new(props(
        PendingUser::resolved(user_named("foo")),
        Vec::new(),
    ));
    control.wait_for_user().await;

    control.toggle();
    assert!(control.is_open());
    control.toggle();
    assert!(!control.is_open());
    assert!(control.render().popover.is_none());
}
