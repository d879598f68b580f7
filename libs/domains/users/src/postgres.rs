use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement};

use crate::error::{UserError, UserResult};
use crate::models::UserRow;
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, name: &str, dob: NaiveDate) -> UserResult<UserRow> {
        let sql = "INSERT INTO users (name, dob) VALUES ($1, $2) RETURNING id, name, dob";

        let stmt =
            Statement::from_sql_and_values(DbBackend::Postgres, sql, [name.into(), dob.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| UserError::Storage("insert returned no row".to_string()))?;

        tracing::info!(user_id = row.id, "Created user");
        Ok(row)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<UserRow>> {
        let sql = "SELECT id, name, dob FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        Ok(UserRow::find_by_statement(stmt).one(&self.db).await?)
    }

    async fn update(&self, id: i32, name: &str, dob: NaiveDate) -> UserResult<Option<UserRow>> {
        let sql = "UPDATE users SET name = $1, dob = $2 WHERE id = $3 RETURNING id, name, dob";

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [name.into(), dob.into(), id.into()],
        );

        let row = UserRow::find_by_statement(stmt).one(&self.db).await?;

        if row.is_some() {
            tracing::info!(user_id = id, "Updated user");
        }
        Ok(row)
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let sql = "DELETE FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let result = self.db.execute_raw(stmt).await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(deleted)
    }

    async fn list(&self, limit: i64, offset: i64) -> UserResult<Vec<UserRow>> {
        let sql = "SELECT id, name, dob FROM users ORDER BY id LIMIT $1 OFFSET $2";

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [limit.into(), offset.into()],
        );

        Ok(UserRow::find_by_statement(stmt).all(&self.db).await?)
    }

    async fn count(&self) -> UserResult<u64> {
        let sql = "SELECT COUNT(*) AS count FROM users";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        #[derive(FromQueryResult)]
        struct CountResult {
            count: i64,
        }

        let result = CountResult::find_by_statement(stmt).one(&self.db).await?;

        Ok(result.map(|r| r.count.max(0) as u64).unwrap_or(0))
    }
}
