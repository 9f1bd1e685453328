use super::*;
use std::cell::RefCell;
use std::collections::HashSet;

/// Storage that refuses writes to selected keys
#[derive(Clone, Default)]
struct FlakyStorage {
    inner: MemoryStorage,
    rejected: Rc<RefCell<HashSet<String>>>,
}

impl FlakyStorage {
    fn reject(&self, key: &str) {
        self.rejected.borrow_mut().insert(key.to_string());
    }
}

impl SessionStorage for FlakyStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.rejected.borrow().contains(key) {
            return Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota exceeded".into(),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

fn assert_paired<S: SessionStorage>(store: &SessionStore<S>) {
    assert_eq!(
        store.get_token().is_some(),
        store.get_user_id().is_some(),
        "token and user id must be observed together"
    );
}

#[test]
fn test_pair_invariant_over_sequences() {
    let store = SessionStore::new(MemoryStorage::new());
    assert_paired(&store);

    let steps: &[Option<(&str, &str)>] = &[
        Some(("t1", "u1")),
        None,
        None,
        Some(("t2", "u2")),
        Some(("t3", "u3")),
        None,
    ];

    for step in steps {
        match step {
            Some((token, user)) => store.set_session(token, user).unwrap(),
            None => store.clear().unwrap(),
        }
        assert_paired(&store);
    }

    assert!(!store.is_authenticated());
}

#[test]
fn test_uses_exact_storage_keys() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());

    store.set_session("abc", "u42").unwrap();

    assert_eq!(storage.get("token").as_deref(), Some("abc"));
    assert_eq!(storage.get("userId").as_deref(), Some("u42"));
    assert_eq!(
        store.session(),
        Some(Session {
            token: "abc".into(),
            user_id: "u42".into()
        })
    );
}

#[test]
fn test_half_written_storage_reads_as_anonymous() {
    let storage = MemoryStorage::new();
    storage.set("token", "orphan").unwrap();
    let store = SessionStore::new(storage.clone());

    assert_eq!(store.get_token(), None);
    assert_eq!(store.get_user_id(), None);

    store.hydrate().unwrap();
    assert_eq!(storage.get("token"), None);
}

#[test]
fn test_failed_second_write_rolls_back() {
    let storage = FlakyStorage::default();
    storage.reject("userId");
    let store = SessionStore::new(storage.clone());

    let err = store.set_session("t", "u").unwrap_err();

    assert!(matches!(err, StorageError::Write { .. }));
    assert_eq!(storage.get("token"), None);
    assert_paired(&store);
}

#[test]
fn test_rejects_incomplete_pair() {
    let store = SessionStore::new(MemoryStorage::new());
    assert_eq!(
        store.set_session("t", ""),
        Err(StorageError::IncompleteSession)
    );
    assert!(!store.is_authenticated());
}

#[test]
fn test_clear_is_idempotent_and_broadcasts_once() {
    let store = SessionStore::new(MemoryStorage::new());
    let events = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let events = events.clone();
        store.subscribe(move |e| events.borrow_mut().push(*e))
    };

    store.set_session("t", "u").unwrap();
    store.clear().unwrap();
    store.clear().unwrap();

    assert_eq!(
        *events.borrow(),
        vec![SessionEvent::SignedIn, SessionEvent::SignedOut]
    );
    assert_eq!(store.epoch(), 2);
}

#[test]
fn test_every_clone_observes_clear() {
    let store = SessionStore::new(MemoryStorage::new());
    let other = store.clone();
    store.set_session("t", "u").unwrap();

    other.clear().unwrap();

    assert!(!store.is_authenticated());
    assert_eq!(store.epoch(), other.epoch());
}
