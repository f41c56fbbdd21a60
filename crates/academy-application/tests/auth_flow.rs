use academy_application::{AdminConsole, ConsoleOptions};
use academy_core::AcademyError;
use academy_core::session::{SessionEvent, SessionPhase};
use academy_testkit::{
    ADMIN_OTP, EXPIRED_OTP, EXPIRED_TOKEN, FakeBackend, REFERENCE_ID, REGISTERED_PHONE, RIDER_OTP,
    TOKENLESS_OTP, UNAUTHORIZED_OTP,
};
use std::path::Path;
use tempfile::TempDir;

fn console(backend: &FakeBackend, dir: &Path) -> AdminConsole {
    AdminConsole::bootstrap(ConsoleOptions {
        base_dir: Some(dir.to_path_buf()),
        base_url: Some(backend.base_url.clone()),
        ..Default::default()
    })
    .unwrap()
}

fn token_file(dir: &Path) -> std::path::PathBuf {
    dir.join("session").join("token")
}

#[tokio::test]
async fn test_otp_login_persists_session() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let console = console(&backend, dir.path());
    let auth = console.auth();
    assert_eq!(auth.phase(), SessionPhase::Unauthenticated);

    let reference_id = auth.send_otp(REGISTERED_PHONE).await.unwrap();
    assert_eq!(reference_id, REFERENCE_ID);
    assert_eq!(auth.phase(), SessionPhase::OtpSent);

    let user = auth.verify_otp(ADMIN_OTP).await.unwrap();
    assert_eq!(user.name, "Asha Rao");
    assert_eq!(user.role, "ACADEMY_ADMIN");
    assert_eq!(auth.phase(), SessionPhase::Authenticated);
    assert_eq!(
        std::fs::read_to_string(token_file(dir.path())).unwrap(),
        "tok-admin"
    );

    // A fresh process picks the session back up.
    let restarted = AdminConsole::bootstrap(ConsoleOptions {
        base_dir: Some(dir.path().to_path_buf()),
        base_url: Some(backend.base_url.clone()),
        ..Default::default()
    })
    .unwrap();
    assert!(restarted.session().is_authenticated());
    assert_eq!(restarted.session().user().unwrap().id, 42);
}

#[tokio::test]
async fn test_malformed_input_never_reaches_the_server() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let auth = console(&backend, dir.path()).auth();

    assert!(auth.send_otp("98765").await.unwrap_err().is_validation());
    assert!(auth.send_otp("98765432101").await.unwrap_err().is_validation());
    assert!(
        auth.login(REGISTERED_PHONE, "12345", REFERENCE_ID)
            .await
            .unwrap_err()
            .is_validation()
    );
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_unregistered_number_reports_server_message() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let auth = console(&backend, dir.path()).auth();

    let err = auth.send_otp("9000000000").await.unwrap_err();
    assert_eq!(err, AcademyError::api(400, "Number not registered"));
    assert_eq!(auth.phase(), SessionPhase::Unauthenticated);
}

#[tokio::test]
async fn test_verify_without_pending_otp() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let auth = console(&backend, dir.path()).auth();

    let err = auth.verify_otp(ADMIN_OTP).await.unwrap_err();
    assert_eq!(err, AcademyError::validation("Request an OTP first"));

    auth.send_otp(REGISTERED_PHONE).await.unwrap();
    auth.change_number();
    assert_eq!(auth.phase(), SessionPhase::Unauthenticated);
}

#[tokio::test]
async fn test_rejected_otp_uses_server_exception() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let auth = console(&backend, dir.path()).auth();
    auth.send_otp(REGISTERED_PHONE).await.unwrap();

    let err = auth.verify_otp(EXPIRED_OTP).await.unwrap_err();
    assert_eq!(err, AcademyError::validation("OTP has expired"));

    let err = auth.verify_otp("999999").await.unwrap_err();
    assert_eq!(err, AcademyError::validation("Invalid OTP"));
    assert!(!token_file(dir.path()).exists());
}

#[tokio::test]
async fn test_otp_rejected_with_401_can_be_retried() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let console = console(&backend, dir.path());
    let mut events = console.subscribe();
    let auth = console.auth();
    auth.send_otp(REGISTERED_PHONE).await.unwrap();

    let err = auth.verify_otp(UNAUTHORIZED_OTP).await.unwrap_err();
    assert_eq!(err, AcademyError::validation("Invalid OTP"));
    assert_eq!(auth.phase(), SessionPhase::OtpSent);

    let user = auth.verify_otp(ADMIN_OTP).await.unwrap();
    assert_eq!(user.id, 42);
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::LoggedIn { user_id: 42 }
    );
}

#[tokio::test]
async fn test_unauthorized_role_is_not_persisted() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let console = console(&backend, dir.path());
    let auth = console.auth();
    auth.send_otp(REGISTERED_PHONE).await.unwrap();

    let err = auth.verify_otp(RIDER_OTP).await.unwrap_err();
    assert!(matches!(err, AcademyError::AccessDenied(_)));
    assert!(!console.session().is_authenticated());
    assert!(!token_file(dir.path()).exists());
}

#[tokio::test]
async fn test_payload_without_token_is_invalid() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let auth = console(&backend, dir.path()).auth();
    auth.send_otp(REGISTERED_PHONE).await.unwrap();

    let err = auth.verify_otp(TOKENLESS_OTP).await.unwrap_err();
    assert_eq!(err, AcademyError::api(200, "Invalid response from server"));
    assert!(!token_file(dir.path()).exists());
}

#[tokio::test]
async fn test_logout_clears_state_when_server_fails() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let console = console(&backend, dir.path());
    let auth = console.auth();
    auth.send_otp(REGISTERED_PHONE).await.unwrap();
    auth.verify_otp(ADMIN_OTP).await.unwrap();

    backend.set_fail_logout(true);
    let mut events = console.subscribe();
    auth.logout().await.unwrap();

    assert_eq!(backend.requests_to("/auth/logout").len(), 1);
    assert_eq!(auth.phase(), SessionPhase::Unauthenticated);
    assert!(!token_file(dir.path()).exists());
    assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedOut);
}

#[tokio::test]
async fn test_validate_token() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let auth = console(&backend, dir.path()).auth();

    assert!(!auth.validate_token().await);
    assert!(backend.requests().is_empty());

    auth.send_otp(REGISTERED_PHONE).await.unwrap();
    auth.verify_otp(ADMIN_OTP).await.unwrap();
    assert!(auth.validate_token().await);
}

#[tokio::test]
async fn test_expired_token_tears_down_restored_session() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let session_dir = dir.path().join("session");
    std::fs::create_dir_all(&session_dir).unwrap();
    std::fs::write(session_dir.join("token"), EXPIRED_TOKEN).unwrap();
    std::fs::write(
        session_dir.join("user"),
        r#"{"id":42,"name":"Asha Rao","contactNumber":"9876543210","role":"ACADEMY_ADMIN","organizationId":9}"#,
    )
    .unwrap();

    let console = console(&backend, dir.path());
    assert!(console.session().is_authenticated());
    let mut events = console.subscribe();

    let mut catalog = console.video_catalog();
    let err = catalog.load().await.unwrap_err();

    assert_eq!(err, AcademyError::Unauthorized("Token expired".into()));
    assert!(!console.session().is_authenticated());
    assert!(!session_dir.join("token").exists());
    assert!(!session_dir.join("user").exists());
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);
}

#[tokio::test]
async fn test_config_file_overrides_defaults() {
    let backend = FakeBackend::start().await;
    let dir = TempDir::new().unwrap();
    let exports = dir.path().join("csv");
    std::fs::write(
        dir.path().join("config.toml"),
        format!(
            "[api]\nbase_url = \"{}/\"\ntimeout_secs = 5\n\n[export]\ndirectory = \"{}\"\n",
            backend.base_url,
            exports.display()
        ),
    )
    .unwrap();

    let console = AdminConsole::bootstrap(ConsoleOptions {
        base_dir: Some(dir.path().to_path_buf()),
        env_base_url: Some("http://ignored.example".into()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(console.base_url(), backend.base_url);
    assert_eq!(console.export_dir(), exports.as_path());
    assert_eq!(console.config().api.timeout_secs, Some(5));
}
