use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::UserResult;
use crate::models::UserRow;

/// Repository trait for User persistence.
///
/// Absence is reported through `Option`/`bool`; errors are reserved for
/// storage failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the stored row with its new id
    async fn create(&self, name: &str, dob: NaiveDate) -> UserResult<UserRow>;

    /// Get a user by ID
    async fn get_by_id(&self, id: i32) -> UserResult<Option<UserRow>>;

    /// Replace name and dob of an existing user
    async fn update(&self, id: i32, name: &str, dob: NaiveDate) -> UserResult<Option<UserRow>>;

    /// Delete a user by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> UserResult<bool>;

    /// Page through users ordered by id
    async fn list(&self, limit: i64, offset: i64) -> UserResult<Vec<UserRow>>;

    /// Count total users
    async fn count(&self) -> UserResult<u64>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    rows: BTreeMap<i32, UserRow>,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, name: &str, dob: NaiveDate) -> UserResult<UserRow> {
        let mut store = self.store.write().await;

        store.next_id += 1;
        let row = UserRow {
            id: store.next_id,
            name: name.to_string(),
            dob,
        };
        store.rows.insert(row.id, row.clone());

        tracing::info!(user_id = row.id, "Created user");
        Ok(row)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<UserRow>> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn update(&self, id: i32, name: &str, dob: NaiveDate) -> UserResult<Option<UserRow>> {
        let mut store = self.store.write().await;

        let Some(row) = store.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.name = name.to_string();
        row.dob = dob;

        tracing::info!(user_id = id, "Updated user");
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let mut store = self.store.write().await;

        if store.rows.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> UserResult<Vec<UserRow>> {
        let store = self.store.read().await;

        let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);

        Ok(store.rows.values().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self) -> UserResult<u64> {
        let store = self.store.read().await;
        Ok(store.rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 5, 10).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create("Ann", dob()).await.unwrap();
        let second = repo.create("Bob", dob()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.get_by_id(1).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create("Ann", dob()).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());

        let second = repo.create("Bob", dob()).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create("Ann", dob()).await.unwrap();

        let new_dob = NaiveDate::from_ymd_opt(1985, 1, 2).unwrap();
        let updated = repo.update(created.id, "Anna", new_dob).await.unwrap();

        assert_eq!(
            updated,
            Some(UserRow {
                id: created.id,
                name: "Anna".to_string(),
                dob: new_dob,
            })
        );
    }

    #[tokio::test]
    async fn test_missing_rows_report_absence() {
        let repo = InMemoryUserRepository::new();

        assert_eq!(repo.get_by_id(42).await.unwrap(), None);
        assert_eq!(repo.update(42, "Ann", dob()).await.unwrap(), None);
        assert!(!repo.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_pages_in_id_order() {
        let repo = InMemoryUserRepository::new();
        for name in ["a", "b", "c", "d", "e"] {
            repo.create(name, dob()).await.unwrap();
        }

        let page: Vec<i32> = repo
            .list(2, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.id)
            .collect();
        assert_eq!(page, vec![2, 3]);

        assert!(repo.list(10, 10).await.unwrap().is_empty());
        assert_eq!(repo.list(10, -3).await.unwrap().len(), 5);
        assert_eq!(repo.count().await.unwrap(), 5);
    }
}
