use academy_core::auth::UserProfile;
use academy_core::session::{SessionPhase, SessionStorage, SessionStore, TOKEN_KEY, USER_KEY};
use academy_infrastructure::{AcademyPaths, FileSessionStorage};
use std::sync::Arc;
use tempfile::TempDir;

fn profile() -> UserProfile {
    UserProfile {
        id: 7,
        name: "Ravi".into(),
        contact_number: "9876543210".into(),
        role: "ADMIN".into(),
        organization_id: 3,
        organization_name: None,
    }
}

fn storage_in(temp_dir: &TempDir) -> Arc<FileSessionStorage> {
    let paths = AcademyPaths::new(Some(temp_dir.path())).unwrap();
    Arc::new(FileSessionStorage::new(paths.session_dir()))
}

#[test]
fn test_session_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let store = SessionStore::new(storage_in(&temp_dir));
    store.establish("tok-abc", profile()).unwrap();
    drop(store);

    let restored = SessionStore::restore(storage_in(&temp_dir)).unwrap();
    assert_eq!(restored.phase(), SessionPhase::Authenticated);
    assert_eq!(restored.token().as_deref(), Some("tok-abc"));
    assert_eq!(restored.user(), Some(profile()));
}

#[test]
fn test_expire_deletes_credential_files() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir);
    let store = SessionStore::new(storage.clone());
    store.establish("tok-abc", profile()).unwrap();

    let session_dir = storage.dir().to_path_buf();
    assert!(session_dir.join(TOKEN_KEY).exists());
    assert!(session_dir.join(USER_KEY).exists());

    store.expire();

    assert!(!session_dir.join(TOKEN_KEY).exists());
    assert!(!session_dir.join(USER_KEY).exists());
    let restored = SessionStore::restore(storage_in(&temp_dir)).unwrap();
    assert!(!restored.is_authenticated());
}

#[test]
fn test_lone_profile_file_is_discarded_on_restore() {
    let temp_dir = TempDir::new().unwrap();
    let storage = storage_in(&temp_dir);
    storage
        .set(USER_KEY, &serde_json::to_string(&profile()).unwrap())
        .unwrap();

    let store = SessionStore::restore(storage.clone()).unwrap();
    assert_eq!(store.phase(), SessionPhase::Unauthenticated);
    assert!(storage.get(USER_KEY).unwrap().is_none());
}
