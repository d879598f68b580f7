use std::sync::Arc;
use tracing::instrument;

use crate::clock::Clock;
use crate::error::{UserError, UserResult};
use crate::models::{UserRequest, UserResponse, UserWithAge};
use crate::repository::UserRepository;
use crate::validation::validate_user;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Normalize a requested page size: non-positive values fall back to the
/// default, oversized ones are capped.
pub fn clamp_limit(limit: i64) -> i64 {
    if limit <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        limit.min(MAX_PAGE_SIZE)
    }
}

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, clock: impl Clock + 'static) -> Self {
        Self {
            repository: Arc::new(repository),
            clock: Arc::new(clock),
        }
    }

    /// Validate and store a new user
    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: UserRequest) -> UserResult<UserResponse> {
        let valid = validate_user(&request, self.clock.today())?;

        let row = self.repository.create(&valid.name, valid.dob).await?;
        Ok(row.into())
    }

    /// Get a user by ID, with the age computed for today
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i32) -> UserResult<UserWithAge> {
        let row = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(UserWithAge::from_row(row, self.clock.today()))
    }

    /// Replace name and date of birth of an existing user
    #[instrument(skip(self, request))]
    pub async fn update_user(&self, id: i32, request: UserRequest) -> UserResult<UserResponse> {
        let valid = validate_user(&request, self.clock.today())?;

        let row = self
            .repository
            .update(id, &valid.name, valid.dob)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(row.into())
    }

    /// Delete a user
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i32) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }

    /// List a page of users ordered by id
    #[instrument(skip(self))]
    pub async fn list_users(&self, limit: i64, offset: i64) -> UserResult<Vec<UserWithAge>> {
        let rows = self.repository.list(clamp_limit(limit), offset).await?;

        let today = self.clock.today();
        Ok(rows
            .into_iter()
            .map(|row| UserWithAge::from_row(row, today))
            .collect())
    }

    /// Total number of stored users
    pub async fn count_users(&self) -> UserResult<u64> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::UserRow;
    use crate::repository::MockUserRepository;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 14).unwrap()
    }

    fn ann() -> UserRow {
        UserRow {
            id: 1,
            name: "Ann".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 5, 10).unwrap(),
        }
    }

    fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
        UserService::new(repo, FixedClock(today()))
    }

    #[test]
    fn test_clamp_limit() {
        let cases = [(0, 10), (-5, 10), (1, 1), (50, 50), (100, 100), (101, 100), (500, 100)];
        for (input, expected) in cases {
            assert_eq!(clamp_limit(input), expected, "clamp_limit({})", input);
        }
    }

    #[tokio::test]
    async fn test_create_user_stores_parsed_date() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .with(eq("Ann"), eq(ann().dob))
            .times(1)
            .returning(|_, _| Ok(ann()));

        let created = service(mock_repo)
            .create_user(UserRequest::new("Ann", "1990-05-10"))
            .await
            .unwrap();

        assert_eq!(
            created,
            UserResponse {
                id: 1,
                name: "Ann".to_string(),
                dob: "1990-05-10".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_create_user_rejects_future_dob_without_storing() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_create().never();

        let result = service(mock_repo)
            .create_user(UserRequest::new("Ann", "2025-12-15"))
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_user_computes_age() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(ann())));

        let user = service(mock_repo).get_user(1).await.unwrap();

        assert_eq!(user.age, 35);
        assert_eq!(user.dob, "1990-05-10");
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let result = service(mock_repo).get_user(9).await;

        assert!(matches!(result, Err(UserError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update()
            .with(eq(9), eq("Bob"), eq(ann().dob))
            .returning(|_, _, _| Ok(None));

        let result = service(mock_repo)
            .update_user(9, UserRequest::new("Bob", "1990-05-10"))
            .await;

        assert!(matches!(result, Err(UserError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_update_validates_before_storage() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update().never();

        let result = service(mock_repo)
            .update_user(1, UserRequest::new("", "1990-05-10"))
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_delete()
            .with(eq(1))
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete()
            .with(eq(2))
            .returning(|_| Ok(false));

        let service = service(mock_repo);

        assert!(service.delete_user(1).await.is_ok());
        assert!(matches!(
            service.delete_user(2).await,
            Err(UserError::NotFound(2))
        ));
    }

    #[tokio::test]
    async fn test_list_users_clamps_limit_and_passes_offset() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_list()
            .with(eq(100), eq(-3))
            .returning(|_, _| Ok(vec![ann()]));
        mock_repo
            .expect_list()
            .with(eq(10), eq(0))
            .returning(|_, _| Ok(vec![]));

        let service = service(mock_repo);

        let users = service.list_users(500, -3).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].age, 35);

        assert!(service.list_users(0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_| Err(UserError::Storage("connection refused".to_string())));
        mock_repo.expect_count().returning(|| Ok(4));

        let service = service(mock_repo);

        assert!(matches!(service.get_user(1).await, Err(UserError::Storage(_))));
        assert_eq!(service.count_users().await.unwrap(), 4);
    }
}
