// Database service module
// SQLite database connection and schema management

use anyhow::{Context, Result};
use rusqlite::Connection;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file (or ":memory:" for in-memory)
    ///
    /// # Examples
    /// ```
    /// use timeboard::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .context(format!("Failed to open database at {}", path))?;

        // Enable foreign keys
        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("Failed to enable foreign keys")?;

        Ok(Self { conn })
    }

    /// Initialize the database schema
    /// Creates all required tables if they don't exist
    pub fn initialize_schema(&self) -> Result<()> {
        // Events table
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS events (
                    id TEXT PRIMARY KEY,
                    title TEXT NOT NULL,
                    location TEXT,
                    color TEXT,
                    status TEXT NOT NULL DEFAULT 'pending',
                    start_datetime TEXT NOT NULL,
                    end_datetime TEXT NOT NULL,
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .context("Failed to create events table")?;

        // Settings table
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS settings (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    first_hour INTEGER NOT NULL DEFAULT 6,
                    last_hour INTEGER NOT NULL DEFAULT 22,
                    snap_minutes INTEGER NOT NULL DEFAULT 15,
                    days_visible INTEGER NOT NULL DEFAULT 7,
                    hour_height REAL NOT NULL DEFAULT 64.0,
                    theme TEXT NOT NULL DEFAULT 'light',
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .context("Failed to create settings table")?;

        // Insert default settings if not exists
        self.conn
            .execute(
                "INSERT OR IGNORE INTO settings (id, first_hour, last_hour, snap_minutes)
                 VALUES (1, 6, 22, 15)",
                [],
            )
            .context("Failed to insert default settings")?;

        Ok(())
    }

    /// Get a reference to the database connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
