//! SQL for the `messages` table
//!
//! Every function takes any sqlx executor, so the same statements run against
//! a pooled connection or inside a transaction.

use sqlx::{Executor, Sqlite};

use crate::store::{
    error::Result,
    types::{Message, NewMessage},
};

const COLUMNS: &str = "id, content, is_user, related_id";

/// Insert one row and return it with its assigned id
pub async fn insert<'e, E>(executor: E, msg: &NewMessage) -> Result<Message>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "INSERT INTO messages (content, is_user, related_id) VALUES (?, ?, ?) RETURNING {}",
        COLUMNS
    );

    let row = sqlx::query_as::<_, Message>(&sql)
        .bind(&msg.content)
        .bind(msg.is_user)
        .bind(msg.related_id)
        .fetch_one(executor)
        .await?;

    Ok(row)
}

/// Every row in insertion order
pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Message>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM messages ORDER BY id", COLUMNS);
    let rows = sqlx::query_as::<_, Message>(&sql)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

/// The user row with the given id, if any
pub async fn find_user<'e, E>(executor: E, id: i64) -> Result<Option<Message>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT {} FROM messages WHERE id = ? AND is_user = 1",
        COLUMNS
    );
    let row = sqlx::query_as::<_, Message>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// The generated reply to the user row `related_id`, if any
pub async fn find_bot_reply<'e, E>(executor: E, related_id: i64) -> Result<Option<Message>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT {} FROM messages WHERE related_id = ? AND is_user = 0 ORDER BY id LIMIT 1",
        COLUMNS
    );
    let row = sqlx::query_as::<_, Message>(&sql)
        .bind(related_id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Overwrite a row's content. Returns the number of rows changed.
pub async fn update_content<'e, E>(executor: E, id: i64, content: &str) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE messages SET content = ? WHERE id = ?")
        .bind(content)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Remove a row. Returns the number of rows removed.
pub async fn delete<'e, E>(executor: E, id: i64) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM messages WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

