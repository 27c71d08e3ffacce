use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

use shared::Vaccination;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:vaccinations.db";

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vaccinations (
                id             TEXT PRIMARY KEY,
                name           TEXT NOT NULL,
                last_completed TEXT,
                due_date       TEXT NOT NULL,
                created_at     TEXT NOT NULL,
                updated_at     TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert a new vaccination record.
    /// The store owns id generation and both timestamps.
    pub async fn create_vaccination(&self, name: &str, due_date: NaiveDate) -> Result<Vaccination> {
        let vaccination = Vaccination {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            last_completed: None,
            due_date,
            created_at: Utc::now().to_rfc3339(),
            updated_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            "INSERT INTO vaccinations (id, name, last_completed, due_date, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&vaccination.id)
        .bind(&vaccination.name)
        .bind(vaccination.last_completed)
        .bind(vaccination.due_date)
        .bind(&vaccination.created_at)
        .bind(&vaccination.updated_at)
        .execute(&*self.pool)
        .await?;

        Ok(vaccination)
    }

    /// List all vaccination records ordered by due date ascending
    pub async fn list_vaccinations(&self) -> Result<Vec<Vaccination>> {
        let rows = sqlx::query(
            "SELECT id, name, last_completed, due_date, created_at, updated_at \
             FROM vaccinations ORDER BY due_date ASC",
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.iter().map(vaccination_from_row).collect())
    }

    /// Retrieve a vaccination record by its id
    pub async fn get_vaccination(&self, id: &str) -> Result<Option<Vaccination>> {
        let row = sqlx::query(
            "SELECT id, name, last_completed, due_date, created_at, updated_at \
             FROM vaccinations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.as_ref().map(vaccination_from_row))
    }

    /// Set the completion and due dates of a vaccination record.
    /// Returns false when no record has the given id.
    pub async fn update_vaccination_dates(
        &self,
        id: &str,
        last_completed: NaiveDate,
        due_date: NaiveDate,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE vaccinations SET last_completed = ?, due_date = ?, updated_at = ? WHERE id = ?",
        )
        .bind(last_completed)
        .bind(due_date)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&*self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a vaccination record by its id.
    /// Returns false when no record has the given id.
    pub async fn delete_vaccination(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM vaccinations WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn vaccination_from_row(row: &SqliteRow) -> Vaccination {
    Vaccination {
        id: row.get("id"),
        name: row.get("name"),
        last_completed: row.get("last_completed"),
        due_date: row.get("due_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
