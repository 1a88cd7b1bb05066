//! SQLite EventStore implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_query::{Expr, Order, Query, SqliteQueryBuilder};
use sea_query_binder::SqlxBinder;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::model::EventPage;
use crate::storage::helpers::validate_append;
use crate::storage::schema::{Events, CREATE_EVENTS_TABLE};
use crate::storage::{EventStore, Result, StorageError};

/// SQLite implementation of EventStore.
pub struct SqliteEventStore {
    pool: SqlitePool,
}

impl SqliteEventStore {
    /// Create a new SQLite event store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the events table if it does not exist.
    pub async fn init(&self) -> Result<()> {
        sqlx::raw_sql(CREATE_EVENTS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn next_sequence_on(conn: &mut SqliteConnection, domain: &str, root: &str) -> Result<u32> {
        let (sql, values) = Query::select()
            .expr(Expr::col(Events::Sequence).max())
            .from(Events::Table)
            .and_where(Expr::col(Events::Domain).eq(domain))
            .and_where(Expr::col(Events::Root).eq(root))
            .build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_with(&sql, values).fetch_one(&mut *conn).await?;
        let max_seq: Option<i64> = row.try_get(0)?;
        Ok(max_seq.map(|s| s as u32 + 1).unwrap_or(0))
    }

    /// Insert events within an already-started transaction.
    async fn insert_events(
        conn: &mut SqliteConnection,
        domain: &str,
        root: &str,
        events: Vec<EventPage>,
        correlation_id: &str,
    ) -> Result<()> {
        let next = Self::next_sequence_on(conn, domain, root).await?;
        validate_append(&events, next)?;

        for event in events {
            let payload = serde_json::to_string(&event.payload)?;
            let (sql, values) = Query::insert()
                .into_table(Events::Table)
                .columns([
                    Events::Domain,
                    Events::Root,
                    Events::Sequence,
                    Events::EventType,
                    Events::Payload,
                    Events::CreatedAt,
                    Events::CorrelationId,
                ])
                .values_panic([
                    domain.into(),
                    root.into(),
                    event.sequence.into(),
                    event.event_type.into(),
                    payload.into(),
                    event.created_at.to_rfc3339().into(),
                    correlation_id.into(),
                ])
                .build_sqlx(SqliteQueryBuilder);

            sqlx::query_with(&sql, values).execute(&mut *conn).await?;
        }

        Ok(())
    }

    fn decode_row(row: &SqliteRow) -> Result<EventPage> {
        let sequence: i64 = row.try_get("sequence")?;
        let event_type: String = row.try_get("event_type")?;
        let payload: String = row.try_get("payload")?;
        let created_at: String = row.try_get("created_at")?;

        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| StorageError::InvalidTimestamp(e.to_string()))?
            .with_timezone(&Utc);

        Ok(EventPage {
            sequence: sequence as u32,
            event_type,
            payload: serde_json::from_str(&payload)?,
            created_at,
        })
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn add(
        &self,
        domain: &str,
        root: Uuid,
        events: Vec<EventPage>,
        correlation_id: &str,
    ) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }

        let root_str = root.to_string();

        // BEGIN IMMEDIATE takes the write lock up front so the sequence read
        // and the inserts cannot interleave with another writer.
        let mut conn = self.pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        let result = Self::insert_events(&mut conn, domain, &root_str, events, correlation_id).await;

        match result {
            Ok(()) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                Ok(())
            }
            Err(e) => {
                let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
                Err(e)
            }
        }
    }

    async fn get(&self, domain: &str, root: Uuid) -> Result<Vec<EventPage>> {
        self.get_from(domain, root, 0).await
    }

    async fn get_from(&self, domain: &str, root: Uuid, from: u32) -> Result<Vec<EventPage>> {
        let (sql, values) = Query::select()
            .columns([
                Events::Sequence,
                Events::EventType,
                Events::Payload,
                Events::CreatedAt,
            ])
            .from(Events::Table)
            .and_where(Expr::col(Events::Domain).eq(domain))
            .and_where(Expr::col(Events::Root).eq(root.to_string()))
            .and_where(Expr::col(Events::Sequence).gte(from))
            .order_by(Events::Sequence, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_with(&sql, values).fetch_all(&self.pool).await?;
        rows.iter().map(Self::decode_row).collect()
    }

    async fn list_roots(&self, domain: &str) -> Result<Vec<Uuid>> {
        let (sql, values) = Query::select()
            .distinct()
            .column(Events::Root)
            .from(Events::Table)
            .and_where(Expr::col(Events::Domain).eq(domain))
            .build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_with(&sql, values).fetch_all(&self.pool).await?;

        let mut roots = Vec::with_capacity(rows.len());
        for row in rows {
            let root_str: String = row.try_get("root")?;
            roots.push(Uuid::parse_str(&root_str)?);
        }
        Ok(roots)
    }

    async fn get_next_sequence(&self, domain: &str, root: Uuid) -> Result<u32> {
        let mut conn = self.pool.acquire().await?;
        Self::next_sequence_on(&mut conn, domain, &root.to_string()).await
    }
}
