//! List Mutation Store
//!
//! Authoritative in-memory collection for one grocery list. Mutations
//! commit only after the backend confirms, and a per-item in-flight
//! guard keeps overlapping edits of the same entry from interleaving.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{ItemPatch, ListItem};

/// List-item persistence operations used by the store
#[async_trait(?Send)]
pub trait ListBackend {
    async fn update_item(&self, id: i64, patch: &ItemPatch) -> Result<ListItem, BackendError>;
    async fn toggle_checked(&self, id: i64) -> Result<ListItem, BackendError>;
    async fn delete_item(&self, id: i64) -> Result<(), BackendError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationError {
    /// Another mutation for the same item is still in flight; the new
    /// attempt is rejected, not queued
    Busy,
    Backend(BackendError),
}

impl MutationError {
    pub fn message(&self) -> String {
        match self {
            MutationError::Busy => "A change for this item is still saving".to_string(),
            MutationError::Backend(error) => error.message(),
        }
    }
}

impl std::fmt::Display for MutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MutationError {}

/// Holds the item collection for the currently viewed list.
///
/// Every mutation swaps in a fresh collection; readers hold cheap `Rc`
/// snapshots and never observe a half-applied update.
#[derive(Debug, Default)]
pub struct ListStore {
    items: RefCell<Rc<Vec<ListItem>>>,
    pending: RefCell<HashSet<i64>>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current collection
    pub fn items(&self) -> Rc<Vec<ListItem>> {
        Rc::clone(&self.items.borrow())
    }

    /// Replace the whole collection (list load / refresh)
    pub fn replace_all(&self, items: Vec<ListItem>) {
        *self.items.borrow_mut() = Rc::new(items);
    }

    /// Prepend a newly added entry, most recent first. An entry with the
    /// same id is replaced in place instead.
    pub fn add(&self, item: ListItem) {
        let current = self.items();
        let next: Vec<ListItem> = if current.iter().any(|existing| existing.id == item.id) {
            current
                .iter()
                .map(|existing| if existing.id == item.id { item.clone() } else { existing.clone() })
                .collect()
        } else {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.push(item);
            next.extend(current.iter().cloned());
            next
        };
        *self.items.borrow_mut() = Rc::new(next);
    }

    /// Update fields on the backend, then replace the confirmed entry.
    /// Nothing changes locally until (and unless) the backend confirms,
    /// so a failure leaves the collection exactly as it was.
    pub async fn update_fields(
        &self,
        api: &impl ListBackend,
        id: i64,
        patch: ItemPatch,
    ) -> Result<(), MutationError> {
        self.claim(id)?;
        let result = api.update_item(id, &patch).await;
        self.release(id);
        let updated = result.map_err(MutationError::Backend)?;
        self.replace_item(updated);
        Ok(())
    }

    /// Toggle on the backend, never a local-only flip. The server item
    /// is authoritative for the checked-by metadata and replaces the
    /// local entry on success.
    pub async fn toggle_checked(
        &self,
        api: &impl ListBackend,
        id: i64,
    ) -> Result<ListItem, MutationError> {
        self.claim(id)?;
        let result = api.toggle_checked(id).await;
        self.release(id);
        let updated = result.map_err(MutationError::Backend)?;
        self.replace_item(updated.clone());
        Ok(updated)
    }

    /// Delete on the backend, then drop the entry. The yes/no gate
    /// happens at the call site before this is invoked.
    pub async fn remove(&self, api: &impl ListBackend, id: i64) -> Result<(), MutationError> {
        self.claim(id)?;
        let result = api.delete_item(id).await;
        self.release(id);
        result.map_err(MutationError::Backend)?;
        let next: Vec<ListItem> = self.items().iter().filter(|item| item.id != id).cloned().collect();
        *self.items.borrow_mut() = Rc::new(next);
        Ok(())
    }

    fn replace_item(&self, updated: ListItem) {
        let next: Vec<ListItem> = self
            .items()
            .iter()
            .map(|item| if item.id == updated.id { updated.clone() } else { item.clone() })
            .collect();
        *self.items.borrow_mut() = Rc::new(next);
    }

    fn claim(&self, id: i64) -> Result<(), MutationError> {
        if self.pending.borrow_mut().insert(id) {
            Ok(())
        } else {
            Err(MutationError::Busy)
        }
    }

    fn release(&self, id: i64) {
        self.pending.borrow_mut().remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    fn entry(id: i64, name: &str) -> ListItem {
        ListItem {
            id,
            grocery_list: 1,
            item: id * 10,
            item_name: Some(name.to_string()),
            custom_name: None,
            quantity: "1".to_string(),
            unit: "pcs".to_string(),
            notes: None,
            is_checked: false,
            checked_by: None,
            checked_by_username: None,
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        fail: bool,
    }

    #[async_trait(?Send)]
    impl ListBackend for FakeBackend {
        async fn update_item(&self, id: i64, patch: &ItemPatch) -> Result<ListItem, BackendError> {
            if self.fail {
                return Err(BackendError::new(vec!["Quantity is invalid".to_string()]));
            }
            let mut item = entry(id, "Apples");
            if let Some(quantity) = &patch.quantity {
                item.quantity = quantity.clone();
            }
            if let Some(unit) = &patch.unit {
                item.unit = unit.clone();
            }
            Ok(item)
        }

        async fn toggle_checked(&self, id: i64) -> Result<ListItem, BackendError> {
            if self.fail {
                return Err(BackendError::generic());
            }
            let mut item = entry(id, "Apples");
            item.is_checked = true;
            item.checked_by = Some(9);
            item.checked_by_username = Some("maria".to_string());
            Ok(item)
        }

        async fn delete_item(&self, _id: i64) -> Result<(), BackendError> {
            if self.fail {
                return Err(BackendError::generic());
            }
            Ok(())
        }
    }

    /// Backend whose first call parks until the test releases it
    struct GatedBackend {
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl GatedBackend {
        fn new(gate: oneshot::Receiver<()>) -> Self {
            Self { gate: RefCell::new(Some(gate)) }
        }
    }

    #[async_trait(?Send)]
    impl ListBackend for GatedBackend {
        async fn update_item(&self, id: i64, _patch: &ItemPatch) -> Result<ListItem, BackendError> {
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(entry(id, "Apples"))
        }

        async fn toggle_checked(&self, id: i64) -> Result<ListItem, BackendError> {
            Ok(entry(id, "Apples"))
        }

        async fn delete_item(&self, _id: i64) -> Result<(), BackendError> {
            Ok(())
        }
    }

    #[test]
    fn add_prepends_and_replaces_by_id() {
        let store = ListStore::new();
        store.add(entry(1, "Apples"));
        store.add(entry(2, "Milk"));

        let items = store.items();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 1]);

        let mut replacement = entry(1, "Apples");
        replacement.quantity = "3".to_string();
        store.add(replacement);

        let items = store.items();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(items[1].quantity, "3");
    }

    #[tokio::test]
    async fn update_replaces_the_confirmed_entry() {
        let store = ListStore::new();
        store.replace_all(vec![entry(1, "Apples"), entry(2, "Milk")]);

        let patch = ItemPatch { quantity: Some("4".to_string()), ..Default::default() };
        store.update_fields(&FakeBackend::default(), 1, patch).await.unwrap();

        let items = store.items();
        assert_eq!(items[0].quantity, "4");
        assert_eq!(items[1], entry(2, "Milk"));
    }

    #[tokio::test]
    async fn update_failure_leaves_the_collection_unchanged() {
        let store = ListStore::new();
        store.replace_all(vec![entry(1, "Apples"), entry(2, "Milk")]);
        let before = store.items();

        let patch = ItemPatch { quantity: Some("".to_string()), ..Default::default() };
        let result = store.update_fields(&FakeBackend { fail: true }, 1, patch).await;

        assert!(matches!(result, Err(MutationError::Backend(_))));
        assert_eq!(*store.items(), *before);
    }

    #[tokio::test]
    async fn toggle_replaces_only_the_target_entry() {
        let store = ListStore::new();
        store.replace_all(vec![entry(1, "Apples"), entry(2, "Milk")]);

        let updated = store.toggle_checked(&FakeBackend::default(), 1).await.unwrap();

        assert!(updated.is_checked);
        let items = store.items();
        assert!(items[0].is_checked);
        assert_eq!(items[0].checked_by_username.as_deref(), Some("maria"));
        assert_eq!(items[1], entry(2, "Milk"));
    }

    #[tokio::test]
    async fn toggle_failure_changes_nothing() {
        let store = ListStore::new();
        store.replace_all(vec![entry(1, "Apples")]);
        let before = store.items();

        let result = store.toggle_checked(&FakeBackend { fail: true }, 1).await;

        assert!(matches!(result, Err(MutationError::Backend(_))));
        assert_eq!(*store.items(), *before);
    }

    #[tokio::test]
    async fn remove_filters_the_entry_on_success() {
        let store = ListStore::new();
        store.replace_all(vec![entry(1, "Apples"), entry(2, "Milk")]);

        store.remove(&FakeBackend::default(), 1).await.unwrap();

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);
    }

    #[tokio::test]
    async fn remove_failure_keeps_the_entry() {
        let store = ListStore::new();
        store.replace_all(vec![entry(1, "Apples")]);

        let result = store.remove(&FakeBackend { fail: true }, 1).await;

        assert!(matches!(result, Err(MutationError::Backend(_))));
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn second_mutation_on_the_same_id_is_rejected() {
        let store = ListStore::new();
        store.replace_all(vec![entry(1, "Apples")]);

        let (release, gate) = oneshot::channel();
        let api = GatedBackend::new(gate);

        let slow = store.update_fields(&api, 1, ItemPatch::default());
        let probe = async {
            // Runs while the first update is parked inside the backend
            let second = store.toggle_checked(&api, 1).await;
            assert!(matches!(second, Err(MutationError::Busy)));
            let _ = release.send(());
        };

        let (first, _) = tokio::join!(slow, probe);
        assert_eq!(first, Ok(()));
    }

    #[tokio::test]
    async fn distinct_ids_proceed_concurrently() {
        let store = ListStore::new();
        store.replace_all(vec![entry(1, "Apples"), entry(2, "Milk")]);

        let (release, gate) = oneshot::channel();
        let api = GatedBackend::new(gate);

        let slow = store.update_fields(&api, 1, ItemPatch::default());
        let probe = async {
            let other = store.update_fields(&api, 2, ItemPatch::default()).await;
            assert_eq!(other, Ok(()));
            let _ = release.send(());
        };

        let (first, _) = tokio::join!(slow, probe);
        assert_eq!(first, Ok(()));
    }

    #[tokio::test]
    async fn guard_is_released_after_a_failure() {
        let store = ListStore::new();
        store.replace_all(vec![entry(1, "Apples")]);

        let failed = store.toggle_checked(&FakeBackend { fail: true }, 1).await;
        assert!(matches!(failed, Err(MutationError::Backend(_))));

        store.toggle_checked(&FakeBackend::default(), 1).await.unwrap();
        assert!(store.items()[0].is_checked);
    }
}
