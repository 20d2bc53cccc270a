//! User profile storage.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{HealthRecordUpdate, UserProfileRow};

/// Get a user's profile.
pub async fn get_profile(pool: &SqlitePool, user_id: &str) -> Result<Option<UserProfileRow>> {
    let record = sqlx::query_as::<_, UserProfileRow>(
        r#"
        SELECT user_id, email, food_history, health_score, health_message,
               suggestions, created_at, updated_at
        FROM user_profiles
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Create an empty profile for a user.
pub async fn create_profile(pool: &SqlitePool, user_id: &str, email: Option<&str>) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (user_id, email)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(email)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "UserProfile",
                    id: user_id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Replace a profile's health record columns.
///
/// Other columns (email, created_at) are left untouched.
pub async fn update_health_record(
    pool: &SqlitePool,
    user_id: &str,
    update: &HealthRecordUpdate,
) -> Result<()> {
    let suggestions = serde_json::to_string(&update.suggestions)
        .expect("string vec serializes to JSON");

    let result = sqlx::query(
        r#"
        UPDATE user_profiles
        SET food_history = ?, health_score = ?, health_message = ?,
            suggestions = ?, updated_at = datetime('now')
        WHERE user_id = ?
        "#,
    )
    .bind(&update.food_history)
    .bind(update.health_score)
    .bind(&update.health_message)
    .bind(&suggestions)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "UserProfile",
            id: user_id.to_string(),
        });
    }

    Ok(())
}
