use crate::error::HrmError;
use crate::model::user::User;
use async_trait::async_trait;
use sqlx::MySqlPool;

/// Persistence contract for users. The engines only ever need existence
/// checks and lookups; the auth layer uses the rest.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, name: &str, email: &str, password_hash: &str)
        -> Result<User, HrmError>;
    async fn get_by_id(&self, id: u64) -> Result<User, HrmError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, HrmError>;
    async fn update(&self, user: &User) -> Result<(), HrmError>;
    async fn delete(&self, id: u64) -> Result<(), HrmError>;
    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<User>, HrmError>;
}

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, HrmError> {
        let result = sqlx::query("INSERT INTO users (name, email, password) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        self.get_by_id(result.last_insert_id()).await
    }

    async fn get_by_id(&self, id: u64) -> Result<User, HrmError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(HrmError::UserNotFound)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, HrmError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), HrmError> {
        let result = sqlx::query("UPDATE users SET name = ?, email = ?, password = ? WHERE id = ?")
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HrmError::UserNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), HrmError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HrmError::UserNotFound);
        }
        Ok(())
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<User>, HrmError> {
        let users =
            sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }
}
