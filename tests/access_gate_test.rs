use proptest::prelude::*;
use rstest::rstest;
use stockzy::auth::{authorize, AccessGate, Decision, RouteTable, Session};
use stockzy::models::UserRole;
use strum::IntoEnumIterator;

fn role_strategy() -> impl Strategy<Value = UserRole> {
    prop::sample::select(UserRole::iter().collect::<Vec<_>>())
}

#[test]
fn staff_is_sent_to_fallback_from_admin_view() {
    let decision = authorize(
        &Session::authenticated(UserRole::Staff),
        &[UserRole::Admin],
        "/dashboard",
    );
    assert_eq!(decision, Decision::RedirectTo("/dashboard".to_string()));
}

#[test]
fn every_role_reaches_the_dashboard() {
    let table = RouteTable::default();
    for role in UserRole::iter() {
        assert_eq!(
            table.guard(&Session::authenticated(role), "/dashboard"),
            Some(Decision::Allow),
            "{} was refused",
            role
        );
        assert!(table
            .navigation_for(role)
            .iter()
            .any(|item| item.path == "/dashboard"));
    }
}

#[rstest]
#[case(UserRole::Admin, &[UserRole::Admin], Decision::Allow)]
#[case(UserRole::Manager, &[UserRole::Admin, UserRole::Manager], Decision::Allow)]
#[case(UserRole::Staff, &[UserRole::Admin, UserRole::Manager], Decision::RedirectTo("/home".into()))]
#[case(UserRole::Operator, &[UserRole::Admin], Decision::RedirectTo("/home".into()))]
#[case(UserRole::Operator, &[], Decision::Allow)]
fn role_membership_decides(
    #[case] role: UserRole,
    #[case] required: &[UserRole],
    #[case] expected: Decision,
) {
    assert_eq!(
        authorize(&Session::authenticated(role), required, "/home"),
        expected
    );
}

#[test]
fn signed_in_without_role_fails_restricted_views_only() {
    let session = Session {
        is_authenticated: true,
        role: None,
    };
    assert_eq!(
        authorize(&session, &[UserRole::Admin], "/dashboard"),
        Decision::RedirectTo("/dashboard".to_string())
    );
    assert_eq!(authorize(&session, &[], "/dashboard"), Decision::Allow);
}

#[rstest]
#[case("/login", None, Some(Decision::Allow))]
#[case("/dashboard", None, Some(Decision::RedirectTo("/login".into())))]
#[case("/dashboard", Some(UserRole::Staff), Some(Decision::Allow))]
#[case("/products/edit/p3", Some(UserRole::Operator), Some(Decision::Allow))]
#[case("/reports", Some(UserRole::Admin), Some(Decision::Allow))]
#[case("/reports", Some(UserRole::Operator), Some(Decision::RedirectTo("/dashboard".into())))]
#[case("/settings", None, Some(Decision::RedirectTo("/login".into())))]
#[case("/unknown", Some(UserRole::Admin), None)]
fn route_table_guards_dashboard_pages(
    #[case] path: &str,
    #[case] role: Option<UserRole>,
    #[case] expected: Option<Decision>,
) {
    let session = role.map_or_else(Session::anonymous, Session::authenticated);
    assert_eq!(RouteTable::default().guard(&session, path), expected);
}

// Property: the login redirect beats every role check
proptest! {
    #[test]
    fn unauthenticated_never_allowed(
        role in proptest::option::of(role_strategy()),
        required in prop::collection::vec(role_strategy(), 0..4),
        fallback in "/[a-z]{1,10}",
    ) {
        let session = Session { is_authenticated: false, role };
        let gate = AccessGate::new("/sign-in");
        prop_assert_eq!(
            gate.authorize(&session, &required, &fallback),
            Decision::RedirectTo("/sign-in".to_string())
        );
    }

    #[test]
    fn empty_role_set_allows_every_signed_in_role(
        role in role_strategy(),
        fallback in "/[a-z]{1,10}",
    ) {
        prop_assert_eq!(
            authorize(&Session::authenticated(role), &[], &fallback),
            Decision::Allow
        );
    }
}
