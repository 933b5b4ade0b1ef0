use congregate_core::db::{open_db, open_db_in_memory};
use congregate_core::{
    AppShell, ChurchEvent, CoreConfig, DomainStore, LoginError, ManualClock, Member,
    PaymentMethod, ProtectedScreen, ProtectedView, PublicView, Role, RouteState, Screen,
    ScreenProps, Session, SessionRecordRepository, SqliteSessionRecordRepository, StoreSeed,
    ToastKind, Transaction, TransactionType, TransitionOutcome,
};
use std::sync::Arc;
use std::time::Duration;

fn seeded_store() -> DomainStore {
    let mut grace = Member::new("3", "Grace", "Njeri");
    grace.group = "Choir".to_string();
    let john = Member::new("1", "John", "Kamau");
    let mut service = ChurchEvent::new("e-1", "Sunday Service");
    service.attendance.insert("3".to_string());

    DomainStore::from_seed(StoreSeed {
        members: vec![john, grace],
        transactions: vec![gift("t-1", "3", "Grace Njeri", 1_500)],
        events: vec![service, ChurchEvent::new("e-2", "Youth Camp")],
        notifications: Vec::new(),
    })
}

fn gift(id: &str, member_id: &str, member_name: &str, amount: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        member_id: member_id.to_string(),
        member_name: member_name.to_string(),
        amount,
        kind: TransactionType::Offering,
        payment_method: PaymentMethod::Mpesa,
        date: "2024-03-10".to_string(),
        reference: format!("RCP-{id}"),
        category: "Offering".to_string(),
    }
}

fn admin() -> Session {
    Session::new("u-1", "Elder Mwangi", Role::Admin).with_member_id("3")
}

fn member_session() -> Session {
    Session::new("u-7", "Grace Njeri", Role::Member).with_member_id("3")
}

fn config() -> CoreConfig {
    CoreConfig {
        default_branch: "Nairobi Central".to_string(),
        branches: vec!["Mombasa".to_string()],
        ..CoreConfig::default()
    }
}

#[test]
fn start_without_session_shows_login_and_gates_protected_views() {
    let conn = open_db_in_memory().unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );

    assert_eq!(shell.route(), RouteState::Unauthenticated);
    assert_eq!(
        shell.navigate(ProtectedView::Finance),
        TransitionOutcome::Rejected
    );
    assert!(matches!(shell.screen(), Screen::Login));

    shell.navigate(PublicView::Privacy);
    assert!(matches!(
        shell.screen(),
        Screen::Public {
            view: PublicView::Privacy,
            authenticated: false
        }
    ));
}

#[test]
fn login_routes_by_role_and_fills_default_branch() {
    let conn = open_db_in_memory().unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );

    let session = shell.login(admin()).unwrap();
    assert_eq!(session.branch, "Nairobi Central");
    assert_eq!(
        shell.route(),
        RouteState::Authenticated(ProtectedView::Dashboard)
    );

    shell.logout();
    shell.login(member_session()).unwrap();
    assert_eq!(
        shell.route(),
        RouteState::Authenticated(ProtectedView::MyPortal)
    );
}

#[test]
fn restart_restores_session_and_initial_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("console.db");

    {
        let conn = open_db(&path).unwrap();
        let mut shell = AppShell::start(
            SqliteSessionRecordRepository::new(&conn),
            seeded_store(),
            config(),
        );
        shell.login(member_session()).unwrap();
        shell.navigate(ProtectedView::Events);
    }

    let conn = open_db(&path).unwrap();
    let shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );
    assert_eq!(shell.session().unwrap().member_id.as_deref(), Some("3"));
    assert_eq!(
        shell.route(),
        RouteState::Authenticated(ProtectedView::MyPortal)
    );
}

#[test]
fn restored_member_session_with_dangling_link_starts_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("console.db");

    {
        let conn = open_db(&path).unwrap();
        let mut shell = AppShell::start(
            SqliteSessionRecordRepository::new(&conn),
            seeded_store(),
            config(),
        );
        shell.login(member_session()).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        DomainStore::new(),
        config(),
    );
    assert!(shell.session().is_none());
    assert_eq!(shell.route(), RouteState::Unauthenticated);
    assert!(matches!(shell.screen(), Screen::Login));
    assert!(SqliteSessionRecordRepository::new(&conn)
        .load_record()
        .unwrap()
        .is_none());
}

#[test]
fn member_login_must_link_to_existing_member() {
    let conn = open_db_in_memory().unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );

    let err = shell
        .login(Session::new("u-8", "Stranger", Role::Member).with_member_id("404"))
        .unwrap_err();
    assert_eq!(err, LoginError::UnknownMember("404".to_string()));

    let err = shell
        .login(Session::new("u-9", "Unlinked", Role::Member))
        .unwrap_err();
    assert!(matches!(err, LoginError::Invalid(_)));

    assert_eq!(shell.route(), RouteState::Unauthenticated);
    assert!(shell.session().is_none());
    assert!(SqliteSessionRecordRepository::new(&conn)
        .load_record()
        .unwrap()
        .is_none());
    assert!(shell
        .toasts()
        .iter()
        .all(|toast| toast.kind == ToastKind::Error));
}

#[test]
fn switching_to_member_role_re_enters_at_my_portal() {
    let conn = open_db_in_memory().unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );
    shell.login(admin()).unwrap();
    shell.navigate(ProtectedView::Members);

    let switched = shell.switch_role(Role::Member).unwrap();
    assert_eq!(switched.role, Role::Member);
    assert_eq!(
        shell.route(),
        RouteState::Authenticated(ProtectedView::MyPortal)
    );

    match shell.screen() {
        Screen::Protected(ProtectedScreen {
            props: ScreenProps::MyPortal(portal),
            ..
        }) => {
            assert_eq!(portal.display_name, "Grace Njeri");
            assert_eq!(portal.giving.len(), 1);
            assert_eq!(portal.attended_events.len(), 1);
            assert_eq!(portal.events.len(), 2);
        }
        _ => panic!("expected the member portal"),
    }
}

#[test]
fn switching_to_member_role_with_dangling_link_is_refused() {
    let conn = open_db_in_memory().unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );
    shell
        .login(Session::new("u-1", "Elder Mwangi", Role::Admin).with_member_id("404"))
        .unwrap();
    shell.navigate(ProtectedView::Members);

    assert!(shell.switch_role(Role::Member).is_none());
    assert_eq!(shell.session().unwrap().role, Role::Admin);
    assert_eq!(
        shell.route(),
        RouteState::Authenticated(ProtectedView::Members)
    );
    assert_eq!(shell.toasts().last().unwrap().kind, ToastKind::Error);
}

#[test]
fn finance_screen_records_transactions_through_its_handle() {
    let conn = open_db_in_memory().unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );
    shell
        .login(Session::new("u-2", "Ruth", Role::Treasurer))
        .unwrap();
    shell.navigate(ProtectedView::Finance);

    match shell.screen() {
        Screen::Protected(ProtectedScreen {
            props:
                ScreenProps::Finance {
                    transactions,
                    summary,
                    mut actions,
                    ..
                },
            ..
        }) => {
            assert_eq!(transactions.len(), 1);
            assert_eq!(summary.income, 1_500);
            actions.add_transaction(gift("t-2", "1", "John Kamau", 3_000));
        }
        _ => panic!("expected the finance screen"),
    }

    assert_eq!(shell.store().transactions()[0].id, "t-2");
    assert_eq!(shell.toasts().last().unwrap().kind, ToastKind::Success);
}

#[test]
fn events_screen_runs_roll_call_with_replace_semantics() {
    let conn = open_db_in_memory().unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );
    shell
        .login(Session::new("u-4", "Esther", Role::Secretary))
        .unwrap();
    shell.navigate_key("events");

    match shell.screen() {
        Screen::Protected(ProtectedScreen {
            props: ScreenProps::Events { mut actions, .. },
            ..
        }) => {
            actions
                .set_attendance("e-2", vec!["1".to_string()])
                .unwrap();
            actions
                .set_attendance("e-2", vec!["3".to_string()])
                .unwrap();
            let roster = actions.attendance_roster("e-2").unwrap();
            assert_eq!(roster.len(), 1);
            assert_eq!(roster[0].display_name, "Grace Njeri");
        }
        _ => panic!("expected the events screen"),
    }
}

#[test]
fn members_screen_updates_and_deletes_through_its_handle() {
    let conn = open_db_in_memory().unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );
    shell.login(admin()).unwrap();
    shell.navigate(ProtectedView::Members);

    match shell.screen() {
        Screen::Protected(ProtectedScreen {
            props: ScreenProps::Members {
                members,
                mut actions,
            },
            ..
        }) => {
            assert_eq!(members.len(), 2);
            actions.add_member(Member::new("5", "Paul", "Mutua"));
            actions.delete_member("1").unwrap();
            assert!(actions.delete_member("1").is_err());
        }
        _ => panic!("expected the members screen"),
    }

    assert!(shell.store().member("1").is_none());
    assert!(shell.store().member("5").is_some());
    assert_eq!(shell.store().transactions().len(), 1);
}

#[test]
fn unknown_view_key_falls_back_to_dashboard_screen() {
    let conn = open_db_in_memory().unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );
    shell.login(admin()).unwrap();

    assert_eq!(shell.navigate_key("PAYROLL"), TransitionOutcome::Fallback);
    assert_eq!(
        shell.screen().protected_view(),
        Some(ProtectedView::Dashboard)
    );
}

#[test]
fn settings_screen_offers_configured_branches_and_public_back_returns_there() {
    let conn = open_db_in_memory().unwrap();
    let mut shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );
    shell.login(admin()).unwrap();
    shell.navigate(PublicView::Security);
    shell.back();

    match shell.screen() {
        Screen::Protected(ProtectedScreen {
            props: ScreenProps::Settings { branches, session },
            ..
        }) => {
            assert_eq!(branches, vec!["Nairobi Central", "Mombasa"]);
            assert_eq!(session.branch, "Nairobi Central");
        }
        _ => panic!("expected the settings screen"),
    }

    let switched = shell.switch_branch("Mombasa").unwrap();
    assert_eq!(switched.branch, "Mombasa");
}

#[test]
fn logout_returns_to_login_from_any_view_and_forgets_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("console.db");

    {
        let conn = open_db(&path).unwrap();
        let mut shell = AppShell::start(
            SqliteSessionRecordRepository::new(&conn),
            seeded_store(),
            config(),
        );
        shell.login(admin()).unwrap();
        shell.navigate(ProtectedView::Reports);
        shell.logout();

        assert_eq!(shell.route(), RouteState::Unauthenticated);
        assert!(matches!(shell.screen(), Screen::Login));
    }

    let conn = open_db(&path).unwrap();
    let shell = AppShell::start(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
    );
    assert!(shell.session().is_none());
    assert_eq!(shell.route(), RouteState::Unauthenticated);
}

#[test]
fn shell_toasts_expire_on_the_configured_clock() {
    let conn = open_db_in_memory().unwrap();
    let clock = Arc::new(ManualClock::new());
    let mut shell = AppShell::start_with_clock(
        SqliteSessionRecordRepository::new(&conn),
        seeded_store(),
        config(),
        clock.clone(),
    );
    shell.login(admin()).unwrap();

    let welcome = shell.toasts().pop().unwrap();
    assert_eq!(welcome.kind, ToastKind::Info);
    assert!(welcome.message.contains("Elder Mwangi"));

    clock.advance(Duration::from_millis(4000));
    assert!(shell.toasts().is_empty());
    assert_eq!(shell.tick(), vec![welcome.id]);

    shell.switch_branch("Mombasa");
    let notice = shell.toasts().pop().unwrap();
    shell.dismiss_toast(notice.id);
    assert!(shell.toasts().is_empty());
}
