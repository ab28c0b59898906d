//! Persisted client and tag state
//!
//! Reads and writes are independently atomic per key; there are no
//! cross-key transactions. Tag values are written back only after the
//! server confirms the send, so the cache never runs ahead of the service.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::types::{Client, TagValue};

/// SQLite-backed store (single connection)
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open or create a store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this store
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    // ============================================
    // Client registration
    // ============================================

    /// Returns the cached client registration, if any
    pub fn get_client(&self) -> Result<Option<Client>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT client_id, application_id, token, environment FROM client WHERE slot = 0",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, application_id, token, environment)) => Ok(Some(Client {
                id,
                application_id,
                token,
                environment: environment.parse()?,
            })),
            None => Ok(None),
        }
    }

    /// Store the client registration, replacing any previous one
    pub fn put_client(&self, client: &Client) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO client (slot, client_id, application_id, token, environment)
            VALUES (0, ?1, ?2, ?3, ?4)
            ON CONFLICT(slot) DO UPDATE SET
                client_id = excluded.client_id,
                application_id = excluded.application_id,
                token = excluded.token,
                environment = excluded.environment
            "#,
            params![
                client.id,
                client.application_id,
                client.token,
                client.environment.as_str()
            ],
        )?;
        Ok(())
    }

    // ============================================
    // Tags
    // ============================================

    /// Returns the last confirmed value for a tag, if any
    pub fn get_tag(&self, name: &str) -> Result<Option<TagValue>> {
        let conn = self.conn.lock().unwrap();
        let tag = conn
            .query_row(
                "SELECT name, value FROM tags WHERE name = ?1",
                params![name],
                |row| {
                    Ok(TagValue {
                        name: row.get(0)?,
                        value: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(tag)
    }

    /// Store a confirmed tag value, replacing any previous one
    pub fn put_tag(&self, tag: &TagValue) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO tags (name, value)
            VALUES (?1, ?2)
            ON CONFLICT(name) DO UPDATE SET value = excluded.value
            "#,
            params![tag.name, tag.value],
        )?;
        Ok(())
    }
}
