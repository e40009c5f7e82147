use sqlx::pool::PoolConnection;
use sqlx::{Connection, Sqlite, SqlitePool};
use tracing::debug;

use crate::store::{
    connection::StoreConfig,
    error::Result,
    operations,
    types::{Message, NewMessage},
};

/// Handle to the message table
///
/// Cheap to clone; every clone shares the same pool.
#[derive(Clone)]
pub struct MessageStore {
    pool: SqlitePool,
}

impl MessageStore {
    /// Open the database described by `config` and create the schema if absent
    ///
    /// # Example
    ///
    /// ```no_run
    /// use message_relay::store::{MessageStore, StoreConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let config = StoreConfig::from_url("sqlite://chatbot.db")?;
    ///     let store = MessageStore::connect(config).await?;
    ///     let mut session = store.session().await?;
    ///     let messages = session.list_all().await?;
    ///     println!("{} messages", messages.len());
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        let pool = config.build_pool().await?;
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Apply the embedded migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Acquire a connection for the duration of one request
    ///
    /// The connection goes back to the pool when the session is dropped,
    /// whichever way the request ends.
    pub async fn session(&self) -> Result<Session> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    /// Close the pool, waiting for sessions to be returned
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A request-scoped store connection
///
/// Each write commits on its own, except [`Session::delete_pair`] which
/// removes both rows in one transaction.
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    /// Create one row and return the persisted record
    pub async fn insert(&mut self, msg: NewMessage) -> Result<Message> {
        let row = operations::insert(&mut *self.conn, &msg).await?;
        debug!(id = row.id, is_user = row.is_user, "inserted message");
        Ok(row)
    }

    /// Every row in insertion order
    pub async fn list_all(&mut self) -> Result<Vec<Message>> {
        operations::list_all(&mut *self.conn).await
    }

    /// The user row with this id
    pub async fn find_user(&mut self, id: i64) -> Result<Option<Message>> {
        operations::find_user(&mut *self.conn, id).await
    }

    /// The reply paired with the user row `related_id`
    pub async fn find_bot_reply(&mut self, related_id: i64) -> Result<Option<Message>> {
        operations::find_bot_reply(&mut *self.conn, related_id).await
    }

    /// Overwrite `message`'s content in the table and in the record
    pub async fn update_content(&mut self, message: &mut Message, content: &str) -> Result<()> {
        operations::update_content(&mut *self.conn, message.id, content).await?;
        message.content = content.to_string();
        debug!(id = message.id, "updated message content");
        Ok(())
    }

    /// Remove one row
    pub async fn delete(&mut self, message: &Message) -> Result<()> {
        operations::delete(&mut *self.conn, message.id).await?;
        debug!(id = message.id, "deleted message");
        Ok(())
    }

    /// Remove a user row and, if given, its reply, atomically
    pub async fn delete_pair(&mut self, user: &Message, reply: Option<&Message>) -> Result<()> {
        let mut tx = Connection::begin(&mut *self.conn).await?;

        operations::delete(&mut *tx, user.id).await?;
        if let Some(reply) = reply {
            operations::delete(&mut *tx, reply.id).await?;
        }

        tx.commit().await?;
        debug!(id = user.id, with_reply = reply.is_some(), "deleted message pair");
        Ok(())
    }
}
