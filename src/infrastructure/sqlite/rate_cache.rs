use crate::domain::entities::market_rate::{PredictedRate, RateUpdate, StoredRate};
use crate::domain::error::DomainError;
use crate::domain::ports::rate_cache::RateCache;
use crate::domain::values::prediction::Prediction;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;
use tracing::warn;

const SELECT_COLS: &str =
    "commodity, commodity_marathi, arrival, min, max, modal, unit, date, prediction, previous_modal";

pub struct SqliteRateCache {
    conn: Mutex<Connection>,
}

impl SqliteRateCache {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_rate(row: &rusqlite::Row) -> Result<PredictedRate, rusqlite::Error> {
        let date_str: String = row.get(7)?;
        let prediction_str: String = row.get(8)?;

        Ok(PredictedRate {
            commodity: row.get(0)?,
            commodity_marathi: row.get(1)?,
            arrival: to_u64(row.get(2)?),
            min: to_u64(row.get(3)?),
            max: to_u64(row.get(4)?),
            modal: to_u64(row.get(5)?),
            unit: row.get(6)?,
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
            })?,
            prediction: prediction_str.parse().unwrap_or_else(|_| {
                warn!(value = %prediction_str, "invalid cached prediction, defaulting to stable");
                Prediction::Stable
            }),
            previous_modal: row.get::<_, Option<i64>>(9)?.map(to_u64),
        })
    }
}

/// Fixed-width RFC 3339 so stored timestamps compare correctly as text.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn to_u64(v: i64) -> u64 {
    v.max(0) as u64
}

fn to_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

fn insert_row(
    conn: &Connection,
    id: &str,
    rate: &PredictedRate,
    created_at: &str,
) -> Result<(), DomainError> {
    conn.prepare_cached(
        "INSERT INTO market_rates (id, commodity, commodity_marathi, arrival, min, max, modal, unit, date, prediction, previous_modal, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            id,
            rate.commodity,
            rate.commodity_marathi,
            to_i64(rate.arrival),
            to_i64(rate.min),
            to_i64(rate.max),
            to_i64(rate.modal),
            rate.unit,
            rate.date.format("%Y-%m-%d").to_string(),
            rate.prediction.to_string(),
            rate.previous_modal.map(to_i64),
            created_at,
        ])
    })
    .map(|_| ())
    .map_err(|e| DomainError::Database(format!("Failed to insert rate: {e}")))
}

impl RateCache for SqliteRateCache {
    fn fresh_since(&self, since: DateTime<Utc>) -> Result<Vec<PredictedRate>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SELECT_COLS} FROM market_rates WHERE created_at >= ?1 ORDER BY commodity COLLATE NOCASE ASC"
            ))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rates = stmt
            .query_map(params![timestamp(since)], Self::row_to_rate)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rates)
    }

    fn replace_all(&self, rates: &[PredictedRate]) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        tx.execute("DELETE FROM market_rates", [])
            .map_err(|e| DomainError::Database(format!("Failed to clear rates: {e}")))?;

        let created_at = timestamp(Utc::now());
        for rate in rates {
            insert_row(&tx, &uuid::Uuid::new_v4().to_string(), rate, &created_at)?;
        }
        tx.commit()
            .map_err(|e| DomainError::Database(format!("Failed to commit rates: {e}")))?;
        Ok(())
    }

    fn insert(&self, rate: &PredictedRate) -> Result<StoredRate, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let id = uuid::Uuid::new_v4().to_string();
        insert_row(&conn, &id, rate, &timestamp(Utc::now()))?;
        Ok(StoredRate {
            id,
            rate: rate.clone(),
        })
    }

    fn update(&self, id: &str, update: &RateUpdate) -> Result<StoredRate, DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut rate = tx
            .query_row(
                &format!("SELECT {SELECT_COLS} FROM market_rates WHERE id = ?1"),
                params![id],
                Self::row_to_rate,
            )
            .optional()
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Rate not found: {id}")))?;
        update.apply(&mut rate);

        tx.execute(
            "UPDATE market_rates SET commodity = ?1, commodity_marathi = ?2, arrival = ?3, min = ?4, max = ?5,
             modal = ?6, date = ?7, prediction = ?8, previous_modal = ?9 WHERE id = ?10",
            params![
                rate.commodity,
                rate.commodity_marathi,
                to_i64(rate.arrival),
                to_i64(rate.min),
                to_i64(rate.max),
                to_i64(rate.modal),
                rate.date.format("%Y-%m-%d").to_string(),
                rate.prediction.to_string(),
                rate.previous_modal.map(to_i64),
                id,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to update rate: {e}")))?;
        tx.commit()
            .map_err(|e| DomainError::Database(format!("Failed to commit rate: {e}")))?;

        Ok(StoredRate {
            id: id.to_string(),
            rate,
        })
    }
}
