use crate::model::leave_type::DEFAULT_LEAVE_TYPES;
use sqlx::MySqlPool;
use tracing::info;

pub async fn init_db(database_url: &str) -> MySqlPool {
    MySqlPool::connect(database_url)
        .await
        .expect("Failed to connect to database")
}

/// Creates the tables this service owns. Safe to run on every start.
pub async fn init_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password VARCHAR(255) NOT NULL,
            created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
            updated_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
                ON UPDATE CURRENT_TIMESTAMP(6)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS attendances (
            id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            user_id BIGINT UNSIGNED NOT NULL,
            date DATE NOT NULL,
            check_in_time TIMESTAMP(6) NULL,
            check_out_time TIMESTAMP(6) NULL,
            total_work_hours DOUBLE NOT NULL DEFAULT 0,
            created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
            updated_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
                ON UPDATE CURRENT_TIMESTAMP(6),
            UNIQUE KEY uq_attendances_user_date (user_id, date),
            FOREIGN KEY (user_id) REFERENCES users(id)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS breaks (
            id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            attendance_id BIGINT UNSIGNED NOT NULL,
            start_time TIMESTAMP(6) NOT NULL,
            end_time TIMESTAMP(6) NULL,
            duration_minutes DOUBLE NOT NULL DEFAULT 0,
            reason VARCHAR(255) NOT NULL DEFAULT '',
            created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
            updated_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
                ON UPDATE CURRENT_TIMESTAMP(6),
            FOREIGN KEY (attendance_id) REFERENCES attendances(id) ON DELETE CASCADE
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS leave_types (
            id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            code VARCHAR(32) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            description TEXT NOT NULL,
            default_days_per_year INT NOT NULL DEFAULT 0,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            requires_approval BOOLEAN NOT NULL DEFAULT TRUE,
            color VARCHAR(16) NOT NULL DEFAULT '#007bff',
            icon VARCHAR(64) NOT NULL DEFAULT '',
            created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
            updated_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
                ON UPDATE CURRENT_TIMESTAMP(6)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS leaves (
            id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            user_id BIGINT UNSIGNED NOT NULL,
            leave_type VARCHAR(32) NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            days DOUBLE NOT NULL,
            reason VARCHAR(255) NOT NULL,
            description TEXT NULL,
            approved_by BIGINT UNSIGNED NULL,
            approved_at TIMESTAMP(6) NULL,
            rejected_by BIGINT UNSIGNED NULL,
            rejected_at TIMESTAMP(6) NULL,
            reject_reason VARCHAR(255) NULL,
            created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
            updated_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
                ON UPDATE CURRENT_TIMESTAMP(6),
            FOREIGN KEY (user_id) REFERENCES users(id),
            FOREIGN KEY (leave_type) REFERENCES leave_types(code) ON DELETE RESTRICT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS refresh_tokens (
            id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            user_id BIGINT UNSIGNED NOT NULL,
            jti VARCHAR(64) NOT NULL UNIQUE,
            expires_at TIMESTAMP(6) NOT NULL,
            revoked BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
            FOREIGN KEY (user_id) REFERENCES users(id)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Populates an empty leave type catalog with the built-in defaults.
pub async fn seed_leave_types(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leave_types")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    for seed in &DEFAULT_LEAVE_TYPES {
        sqlx::query(
            "INSERT INTO leave_types \
             (code, name, description, default_days_per_year, is_active, requires_approval, \
              color, icon) \
             VALUES (?, ?, ?, ?, TRUE, TRUE, ?, ?)",
        )
        .bind(seed.code)
        .bind(seed.name)
        .bind(seed.description)
        .bind(seed.default_days_per_year)
        .bind(seed.color)
        .bind(seed.icon)
        .execute(pool)
        .await?;
    }

    info!(count = DEFAULT_LEAVE_TYPES.len(), "leave type catalog seeded");
    Ok(())
}
