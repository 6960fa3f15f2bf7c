use super::*;

#[test]
fn memory_store_get_missing_is_none() {
    let store = MemoryStore::new();
    assert!(store.get("nope").unwrap().is_none());
}

#[test]
fn memory_store_set_overwrites() {
    let store = MemoryStore::new();
    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn memory_store_remove_is_idempotent() {
    let store = MemoryStore::new();
    store.set("k", "v").unwrap();
    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert!(store.get("k").unwrap().is_none());
}

#[test]
fn memory_store_clones_share_slots() {
    let store = MemoryStore::new();
    let other = store.clone();
    store.set("k", "v").unwrap();
    assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
}
