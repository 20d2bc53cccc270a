//! Transcript turn storage.
//!
//! The transcript is stored one row per turn, ordered by `position`.
//! Mutations follow the read-modify-write model: callers load the full
//! transcript, mutate it in memory, and write it back wholesale.

use assistant_core::Turn;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::TurnRow;

/// Load a user's transcript turns in chronological order.
pub async fn load_turns(pool: &SqlitePool, user_id: &str) -> Result<Vec<TurnRow>> {
    let rows = sqlx::query_as::<_, TurnRow>(
        r#"
        SELECT id, user_id, position, role, content, kind, created_at
        FROM transcript_turns
        WHERE user_id = ?
        ORDER BY position
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Replace a user's transcript with the given turns.
///
/// Runs as a single transaction so readers never observe a half-written
/// transcript.
pub async fn replace_turns(pool: &SqlitePool, user_id: &str, turns: &[Turn]) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM transcript_turns WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    for (position, turn) in turns.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO transcript_turns (user_id, position, role, content, kind)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(position as i64)
        .bind(&turn.role)
        .bind(&turn.content)
        .bind(&turn.kind)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!("Replaced transcript for {} ({} turns)", user_id, turns.len());

    Ok(())
}

/// Convert stored rows into in-memory turns.
pub fn rows_to_turns(rows: Vec<TurnRow>) -> Vec<Turn> {
    rows.into_iter()
        .map(|row| Turn {
            role: row.role,
            content: row.content,
            kind: row.kind,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_load_empty_transcript() {
        let db = test_db().await;
        let rows = load_turns(db.pool(), "uid-1").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_replace_and_load_round_trip() {
        let db = test_db().await;
        let turns = vec![
            Turn::user("Q1", Some("symptom".to_string())),
            Turn::assistant("A1"),
        ];

        replace_turns(db.pool(), "uid-1", &turns).await.unwrap();

        let rows = load_turns(db.pool(), "uid-1").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 0);
        assert_eq!(rows[0].role, "user");
        assert_eq!(rows[0].kind.as_deref(), Some("symptom"));
        assert_eq!(rows[1].role, "assistant");
        assert!(rows[1].kind.is_none());

        assert_eq!(rows_to_turns(rows), turns);
    }

    #[tokio::test]
    async fn test_replace_overwrites_previous_turns() {
        let db = test_db().await;

        let first = vec![Turn::user("old", None), Turn::assistant("old reply")];
        replace_turns(db.pool(), "uid-1", &first).await.unwrap();

        let second = vec![Turn::user("new", None)];
        replace_turns(db.pool(), "uid-1", &second).await.unwrap();

        let rows = load_turns(db.pool(), "uid-1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, "new");
    }

    #[tokio::test]
    async fn test_transcripts_are_per_user() {
        let db = test_db().await;

        replace_turns(db.pool(), "uid-1", &[Turn::user("mine", None)])
            .await
            .unwrap();
        replace_turns(db.pool(), "uid-2", &[Turn::user("yours", None)])
            .await
            .unwrap();

        let rows = load_turns(db.pool(), "uid-1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, "mine");
    }
}
