use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS market_rates (
            id TEXT PRIMARY KEY,
            commodity TEXT NOT NULL,
            commodity_marathi TEXT NOT NULL,
            arrival INTEGER NOT NULL,
            min INTEGER NOT NULL,
            max INTEGER NOT NULL,
            modal INTEGER NOT NULL,
            unit TEXT NOT NULL DEFAULT 'Quintal',
            date TEXT NOT NULL,
            prediction TEXT NOT NULL,
            previous_modal INTEGER,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_rates_created ON market_rates(created_at);
        CREATE INDEX IF NOT EXISTS idx_rates_commodity ON market_rates(commodity);
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
