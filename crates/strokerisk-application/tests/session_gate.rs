use std::sync::Arc;
use std::time::Duration;

use strokerisk_application::SessionContext;
use strokerisk_core::auth::AuthService;
use strokerisk_core::config::MockSettings;
use strokerisk_core::session::{GateDecision, SessionState};
use strokerisk_infrastructure::MockAuthService;
use strokerisk_infrastructure::mock_auth_service::{DEMO_EMAIL, DEMO_PASSWORD};
use tokio::time::timeout;

fn backend() -> Arc<MockAuthService> {
    Arc::new(MockAuthService::new(MockSettings::instant()))
}

async fn next(handle: &mut strokerisk_application::GuardHandle) -> GateDecision {
    timeout(Duration::from_secs(1), handle.next_decision())
        .await
        .expect("gate decision timed out")
        .expect("gate task stopped")
}

#[tokio::test]
async fn test_settling_then_single_redirect() {
    let auth = backend();
    let context = SessionContext::start(auth.clone(), "/login");
    let mut gate = context.guard();

    assert_eq!(next(&mut gate).await, GateDecision::Checking);

    auth.settle();
    assert_eq!(next(&mut gate).await, GateDecision::Redirect("/login".to_string()));

    // Signing out while already absent must not redirect again.
    auth.sign_out().await.unwrap();
    assert_eq!(next(&mut gate).await, GateDecision::Hidden);

    gate.unmount().await;
    context.shutdown();
}

#[tokio::test]
async fn test_renders_after_login_and_redirects_again_after_logout() {
    let auth = backend();
    auth.settle();
    let context = SessionContext::start(auth.clone(), "/login");
    let mut gate = context.guard();
    assert!(next(&mut gate).await.is_redirect());

    let user = auth.sign_in_with_email(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
    assert_eq!(next(&mut gate).await, GateDecision::Render(user));

    auth.sign_out().await.unwrap();
    assert!(next(&mut gate).await.is_redirect());
}

#[tokio::test]
async fn test_wait_until_settled() {
    let auth = backend();
    let context = SessionContext::start(auth.clone(), "/login");
    assert!(context.current().is_settling());

    let settler = auth.clone();
    tokio::spawn(async move {
        tokio::task::yield_now().await;
        settler.settle();
    });

    let state = timeout(Duration::from_secs(1), context.wait_until_settled())
        .await
        .unwrap();
    assert_eq!(state, SessionState::Absent);
}

#[tokio::test]
async fn test_shutdown_stops_gate_tasks() {
    let auth = backend();
    let context = SessionContext::start(auth.clone(), "/login");
    let mut gate = context.guard();
    assert_eq!(next(&mut gate).await, GateDecision::Checking);

    context.shutdown();

    let rest = timeout(Duration::from_secs(1), async {
        while gate.next_decision().await.is_some() {}
    })
    .await;
    assert!(rest.is_ok());
    assert!(!gate.is_mounted());
}

#[tokio::test]
async fn test_each_view_has_its_own_gate() {
    let auth = backend();
    auth.settle();
    let context = SessionContext::start(auth.clone(), "/signin");

    let mut first = context.guard();
    let mut second = context.guard();
    assert_eq!(next(&mut first).await, GateDecision::Redirect("/signin".to_string()));
    assert_eq!(next(&mut second).await, GateDecision::Redirect("/signin".to_string()));
}
