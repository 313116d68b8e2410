use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use voyage_core::Itinerary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItinerary {
    pub trip_id: String,
    pub user_id: String,
    pub title: String,
    pub bookings: usize,
    pub total_cost: f64,
    pub itinerary: Itinerary,
    pub saved_at: DateTime<Utc>,
}

impl SavedItinerary {
    pub fn new(user_id: &str, itinerary: &Itinerary) -> Self {
        Self {
            trip_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: itinerary.title.clone(),
            bookings: itinerary.days.planned_days(),
            total_cost: itinerary.total_cost(),
            itinerary: itinerary.clone(),
            saved_at: Utc::now(),
        }
    }
}

pub trait ItineraryRepository: Send + Sync {
    async fn save_itinerary(&self, user_id: &str, itinerary: &Itinerary) -> Result<SavedItinerary>;
    async fn load_itinerary(&self, trip_id: &str) -> Result<Option<SavedItinerary>>;
    /// Newest first.
    async fn list_itineraries(&self, user_id: &str) -> Result<Vec<SavedItinerary>>;
    async fn delete_itinerary(&self, trip_id: &str) -> Result<bool>;
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    itineraries: Arc<RwLock<HashMap<String, SavedItinerary>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItineraryRepository for MemoryStore {
    async fn save_itinerary(&self, user_id: &str, itinerary: &Itinerary) -> Result<SavedItinerary> {
        let saved = SavedItinerary::new(user_id, itinerary);
        self.itineraries
            .write()
            .insert(saved.trip_id.clone(), saved.clone());
        Ok(saved)
    }

    async fn load_itinerary(&self, trip_id: &str) -> Result<Option<SavedItinerary>> {
        Ok(self.itineraries.read().get(trip_id).cloned())
    }

    async fn list_itineraries(&self, user_id: &str) -> Result<Vec<SavedItinerary>> {
        let mut trips = self
            .itineraries
            .read()
            .values()
            .filter(|trip| trip.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        trips.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(trips)
    }

    async fn delete_itinerary(&self, trip_id: &str) -> Result<bool> {
        Ok(self.itineraries.write().remove(trip_id).is_some())
    }
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("failed connecting to sqlite at {}", database_url))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS itineraries (
              trip_id TEXT PRIMARY KEY,
              user_id TEXT NOT NULL,
              title TEXT NOT NULL,
              bookings INTEGER NOT NULL,
              total_cost REAL NOT NULL,
              itinerary_json TEXT NOT NULL,
              saved_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS itineraries_user ON itineraries (user_id, saved_at)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn row_to_saved(row: sqlx::sqlite::SqliteRow) -> Result<SavedItinerary> {
    let itinerary_json: String = row.get("itinerary_json");
    let itinerary = serde_json::from_str(&itinerary_json)
        .context("stored itinerary is not valid json")?;
    let bookings: i64 = row.get("bookings");

    Ok(SavedItinerary {
        trip_id: row.get("trip_id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        bookings: bookings.max(0) as usize,
        total_cost: row.get("total_cost"),
        itinerary,
        saved_at: row
            .get::<String, _>("saved_at")
            .parse()
            .unwrap_or_else(|_| Utc::now()),
    })
}

impl ItineraryRepository for SqliteStore {
    async fn save_itinerary(&self, user_id: &str, itinerary: &Itinerary) -> Result<SavedItinerary> {
        let saved = SavedItinerary::new(user_id, itinerary);
        let itinerary_json = serde_json::to_string(&saved.itinerary)?;

        sqlx::query(
            r#"
            INSERT INTO itineraries (trip_id, user_id, title, bookings, total_cost, itinerary_json, saved_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&saved.trip_id)
        .bind(&saved.user_id)
        .bind(&saved.title)
        .bind(saved.bookings as i64)
        .bind(saved.total_cost)
        .bind(itinerary_json)
        .bind(saved.saved_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn load_itinerary(&self, trip_id: &str) -> Result<Option<SavedItinerary>> {
        let row = sqlx::query(
            r#"
            SELECT trip_id, user_id, title, bookings, total_cost, itinerary_json, saved_at
            FROM itineraries
            WHERE trip_id = ?1
            "#,
        )
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_saved).transpose()
    }

    async fn list_itineraries(&self, user_id: &str) -> Result<Vec<SavedItinerary>> {
        let rows = sqlx::query(
            r#"
            SELECT trip_id, user_id, title, bookings, total_cost, itinerary_json, saved_at
            FROM itineraries
            WHERE user_id = ?1
            ORDER BY saved_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_saved).collect()
    }

    async fn delete_itinerary(&self, trip_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM itineraries WHERE trip_id = ?1")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub enum Store {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl Store {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    pub async fn sqlite(database_url: &str) -> Result<Self> {
        let sqlite = SqliteStore::connect(database_url).await?;
        Ok(Self::Sqlite(sqlite))
    }

    /// SQLite when a database url is configured, memory otherwise.
    pub async fn from_url(database_url: Option<&str>) -> Result<Self> {
        match database_url {
            Some(url) => Self::sqlite(url).await,
            None => Ok(Self::memory()),
        }
    }
}

impl ItineraryRepository for Store {
    async fn save_itinerary(&self, user_id: &str, itinerary: &Itinerary) -> Result<SavedItinerary> {
        match self {
            Store::Memory(store) => store.save_itinerary(user_id, itinerary).await,
            Store::Sqlite(store) => store.save_itinerary(user_id, itinerary).await,
        }
    }

    async fn load_itinerary(&self, trip_id: &str) -> Result<Option<SavedItinerary>> {
        match self {
            Store::Memory(store) => store.load_itinerary(trip_id).await,
            Store::Sqlite(store) => store.load_itinerary(trip_id).await,
        }
    }

    async fn list_itineraries(&self, user_id: &str) -> Result<Vec<SavedItinerary>> {
        match self {
            Store::Memory(store) => store.list_itineraries(user_id).await,
            Store::Sqlite(store) => store.list_itineraries(user_id).await,
        }
    }

    async fn delete_itinerary(&self, trip_id: &str) -> Result<bool> {
        match self {
            Store::Memory(store) => store.delete_itinerary(trip_id).await,
            Store::Sqlite(store) => store.delete_itinerary(trip_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use voyage_core::{recommendation_catalog, DayPlans, TripSetup, TripType};

    use super::*;

    fn itinerary() -> Itinerary {
        let setup = TripSetup::new(
            "Tokyo, Japan",
            "2024-09-10".parse().unwrap(),
            "2024-09-11".parse().unwrap(),
            2,
            0,
            TripType::Friends,
        )
        .unwrap();
        let mut days = DayPlans::generate(&setup, &recommendation_catalog()[..1]);
        days.select_option(0, "1").unwrap();
        Itinerary::new(setup, days)
    }

    #[tokio::test]
    async fn memory_store_round_trips_by_trip_id() {
        let store = Store::memory();
        let saved = store.save_itinerary("user-1", &itinerary()).await.unwrap();
        assert_eq!(saved.bookings, 1);
        assert_eq!(saved.total_cost, 190.0);

        let loaded = store.load_itinerary(&saved.trip_id).await.unwrap().unwrap();
        assert_eq!(loaded.itinerary, saved.itinerary);
        assert!(store.load_itinerary("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_is_scoped_to_user() {
        let store = MemoryStore::new();
        store.save_itinerary("user-1", &itinerary()).await.unwrap();
        store.save_itinerary("user-1", &itinerary()).await.unwrap();
        store.save_itinerary("user-2", &itinerary()).await.unwrap();

        let trips = store.list_itineraries("user-1").await.unwrap();
        assert_eq!(trips.len(), 2);
        assert!(trips[0].saved_at >= trips[1].saved_at);

        assert!(store.delete_itinerary(&trips[0].trip_id).await.unwrap());
        assert!(!store.delete_itinerary(&trips[0].trip_id).await.unwrap());
        assert_eq!(store.list_itineraries("user-1").await.unwrap().len(), 1);
    }
}
