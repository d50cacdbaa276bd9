use super::{StoreError, UserStore};
use crate::users::{NewUser, Token, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Connection, FromRow, PgPool, Row};
use tracing::{debug, instrument};

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

const USER_COLUMNS: &str =
    "id, email, name, password, is_active, is_staff, is_superuser, date_joined";

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: String,
    password: String,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
    date_joined: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            password: row.password,
            is_active: row.is_active,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
            date_joined: row.date_joined,
        }
    }
}

fn map_unique_violation(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict,
        other => StoreError::Database(other),
    }
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `users` and `auth_tokens` tables when missing.
    ///
    /// # Errors
    /// Returns an error if the statements fail.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        debug!("Schema ensured");
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip_all, fields(email = %user.email))]
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (email, name, password, is_active, is_staff, is_superuser) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, UserRow>(&query)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password)
            .bind(user.is_active)
            .bind(user.is_staff)
            .bind(user.is_superuser)
            .fetch_one(&self.pool)
            .await
            .map(User::from)
            .map_err(map_unique_violation)
    }

    #[instrument(skip_all, fields(user_id = user.id))]
    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users SET email = $2, name = $3, password = $4, is_active = $5, \
             is_staff = $6, is_superuser = $7 WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        Ok(sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .map(User::from))
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        Ok(sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::from))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS exists")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("exists")?)
    }

    #[instrument(skip(self))]
    async fn get_or_create_token(&self, user_id: i64) -> Result<Token, StoreError> {
        // A concurrent request may win the insert; either way the stored row is returned.
        sqlx::query(
            "INSERT INTO auth_tokens (key, user_id) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(Token::generate_key())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => StoreError::NotFound,
            other => StoreError::Database(other),
        })?;

        let row = sqlx::query("SELECT key, user_id, created FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(token_from_row(&row)?)
    }

    async fn find_token(&self, key: &str) -> Result<Option<(Token, User)>, StoreError> {
        let row = sqlx::query(
            "SELECT t.key, t.user_id, t.created, u.id, u.email, u.name, u.password, \
             u.is_active, u.is_staff, u.is_superuser, u.date_joined \
             FROM auth_tokens t JOIN users u ON u.id = t.user_id WHERE t.key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let token = token_from_row(&row)?;
                let user = User::from(UserRow::from_row(&row)?);
                Ok(Some((token, user)))
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await?;
        Ok(())
    }
}

fn token_from_row(row: &PgRow) -> Result<Token, sqlx::Error> {
    Ok(Token {
        key: row.try_get("key")?,
        user_id: row.try_get("user_id")?,
        created: row.try_get("created")?,
    })
}
