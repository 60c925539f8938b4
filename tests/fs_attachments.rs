use crimedesk::error::DeskError;
use crimedesk::id::CaseId;
use crimedesk::store::fs::FsAttachmentStore;
use crimedesk::store::AttachmentStore;
use std::fs;
use tempfile::TempDir;

fn case_id() -> CaseId {
    CaseId::parse("CASE-20240309-AB12CD").unwrap()
}

#[test]
fn put_creates_root_and_prefixes_case_id() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("uploads");
    let mut store = FsAttachmentStore::new(&root);

    let reference = store.put(&case_id(), "photo.jpg", b"jpeg").unwrap();

    assert_eq!(reference.file_name, "photo.jpg");
    assert_eq!(reference.path, root.join("CASE-20240309-AB12CD_photo.jpg"));
    assert_eq!(fs::read(&reference.path).unwrap(), b"jpeg");
}

#[test]
fn read_returns_stored_bytes() {
    let temp = TempDir::new().unwrap();
    let mut store = FsAttachmentStore::new(temp.path());

    let reference = store.put(&case_id(), "statement.txt", b"seen at 9pm").unwrap();
    assert_eq!(store.read(&reference).unwrap(), b"seen at 9pm");
}

#[test]
fn same_name_overwrites() {
    let temp = TempDir::new().unwrap();
    let mut store = FsAttachmentStore::new(temp.path());

    store.put(&case_id(), "a.txt", b"first").unwrap();
    let reference = store.put(&case_id(), "a.txt", b"second").unwrap();

    assert_eq!(store.read(&reference).unwrap(), b"second");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn missing_file_is_attachment_not_found() {
    let temp = TempDir::new().unwrap();
    let mut store = FsAttachmentStore::new(temp.path());

    let reference = store.put(&case_id(), "a.pdf", b"%PDF").unwrap();
    fs::remove_file(&reference.path).unwrap();

    assert!(matches!(
        store.read(&reference),
        Err(DeskError::AttachmentNotFound(_))
    ));
}

#[test]
fn remove_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let mut store = FsAttachmentStore::new(temp.path());

    let reference = store.put(&case_id(), "a.png", b"png").unwrap();
    store.remove(&reference).unwrap();
    assert!(!reference.path.exists());
    store.remove(&reference).unwrap();
}
