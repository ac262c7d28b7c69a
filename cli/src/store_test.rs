use super::*;

#[test]
fn missing_file_has_no_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::new(dir.path().join("token"));
    assert_eq!(store.load(), None);
}

#[test]
fn save_creates_parent_dirs_and_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::new(dir.path().join("questify").join("token"));
    store.save("abc123").expect("save");
    assert_eq!(store.load().as_deref(), Some("abc123"));
}

#[test]
fn blank_file_reads_as_no_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("token");
    std::fs::write(&path, "  \n").expect("write");
    assert_eq!(FileTokenStore::new(path).load(), None);
}

#[test]
fn trailing_newline_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("token");
    std::fs::write(&path, "abc123\n").expect("write");
    assert_eq!(FileTokenStore::new(path).load().as_deref(), Some("abc123"));
}

#[test]
fn clear_removes_file_and_tolerates_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::new(dir.path().join("token"));
    store.save("abc123").expect("save");
    store.clear();
    assert!(!store.path().exists());
    store.clear();
    assert_eq!(store.load(), None);
}

#[cfg(unix)]
#[test]
fn saved_token_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::new(dir.path().join("token"));
    store.save("abc123").expect("save");
    let mode = std::fs::metadata(store.path()).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn new_token_file_is_created_owner_only() {
    use std::os::unix::fs::{MetadataExt, PermissionsExt};

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("token");
    let mut file = owner_only_options().open(&path).expect("open");
    std::io::Write::write_all(&mut file, b"abc123").expect("write");
    let metadata = std::fs::metadata(&path).expect("metadata");
    assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
    assert_eq!(metadata.mode() & 0o077, 0);
}

#[cfg(unix)]
#[test]
fn overwriting_a_loose_file_tightens_it() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("token");
    std::fs::write(&path, "old").expect("write");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).expect("chmod");

    let store = FileTokenStore::new(&path);
    store.save("new").expect("save");

    let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(store.load().as_deref(), Some("new"));
}
