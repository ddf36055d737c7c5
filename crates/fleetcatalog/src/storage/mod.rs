//! Storage layer for fleetcatalog.
//!
//! This module provides the `SQLite`-backed [`Repository`] that owns the
//! authoritative aircraft collection.
//!
//! Every operation opens its own connection and drops it before returning, so
//! no handle is shared between calls. The public surface is fail-soft: storage
//! faults are logged and turned into an empty or failed result. The `try_*`
//! methods expose the same operations with the underlying [`Error`].

pub mod schema;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::{debug, error, info, warn};

use crate::aircraft::{Aircraft, AircraftSpec};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::factory;

use schema::AIRCRAFT_COLUMNS;

/// Default time a connection waits on a locked database.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Result of an update addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record existed and every field was rewritten.
    Updated,
    /// No record has that id (or the aircraft has no id). Nothing changed.
    NotFound,
    /// A storage fault prevented the update. The fault has been logged.
    Failed,
}

/// Persistent aircraft repository.
#[derive(Debug, Clone)]
pub struct Repository {
    /// Path to the database file.
    path: PathBuf,
    /// Busy timeout applied to every connection.
    busy_timeout: Duration,
}

impl Repository {
    /// Open or create a repository database at the given path.
    ///
    /// Creates the parent directories, the database file and the schema if
    /// they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or the schema
    /// cannot be initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open a repository using the storage settings from `config`.
    ///
    /// # Errors
    ///
    /// See [`Repository::open`].
    pub fn open_from_config(config: &Config) -> Result<Self> {
        Self::open_with_timeout(config.database_path(), config.busy_timeout())
    }

    /// Open a repository with an explicit busy timeout.
    ///
    /// # Errors
    ///
    /// See [`Repository::open`].
    pub fn open_with_timeout(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Creating database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        schema::initialize_schema(&conn)?;
        drop(conn);

        info!("Aircraft repository ready at {}", path.display());
        Ok(Self { path, busy_timeout })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a connection for a single operation.
    ///
    /// The database must already exist; a missing file is a fault rather than
    /// a fresh empty catalog.
    fn connect(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn =
            Connection::open_with_flags(&self.path, flags).map_err(|source| Error::DatabaseOpen {
                path: self.path.clone(),
                source,
            })?;
        conn.busy_timeout(self.busy_timeout)?;
        debug!("Acquired connection to {}", self.path.display());
        Ok(conn)
    }

    // === Fail-soft surface ===

    /// Every stored aircraft in storage order.
    ///
    /// Returns an empty list if the store cannot be read.
    #[must_use]
    pub fn list_all(&self) -> Vec<Aircraft> {
        self.try_list_all().unwrap_or_else(|e| {
            error!("Failed to load aircraft from {}: {}", self.path.display(), e);
            Vec::new()
        })
    }

    /// Persist a new aircraft and return it with its assigned id.
    ///
    /// Any id already on `aircraft` is ignored. Returns `None` on a storage
    /// fault.
    #[must_use]
    pub fn create(&self, aircraft: &Aircraft) -> Option<Aircraft> {
        match self.try_create(aircraft) {
            Ok(created) => Some(created),
            Err(e) => {
                error!("Failed to add aircraft '{}': {}", aircraft.model(), e);
                None
            }
        }
    }

    /// Rewrite every field of the record addressed by `aircraft`'s id.
    #[must_use]
    pub fn update(&self, aircraft: &Aircraft) -> UpdateOutcome {
        match self.try_update(aircraft) {
            Ok(true) => UpdateOutcome::Updated,
            Ok(false) => UpdateOutcome::NotFound,
            Err(e) => {
                error!(
                    "Failed to update aircraft '{}' (id {:?}): {}",
                    aircraft.model(),
                    aircraft.id(),
                    e
                );
                UpdateOutcome::Failed
            }
        }
    }

    /// Delete the record with the given id.
    ///
    /// Returns `true` iff a record existed and was removed. A storage fault
    /// returns `false`.
    #[must_use]
    pub fn delete(&self, id: i64) -> bool {
        self.try_delete(id).unwrap_or_else(|e| {
            error!("Failed to delete aircraft {}: {}", id, e);
            false
        })
    }

    /// Get a single aircraft by id. Returns `None` if absent or on a fault.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<Aircraft> {
        self.try_get(id).unwrap_or_else(|e| {
            error!("Failed to read aircraft {}: {}", id, e);
            None
        })
    }

    /// Number of stored aircraft. Returns 0 on a fault.
    #[must_use]
    pub fn count(&self) -> usize {
        self.try_count().unwrap_or_else(|e| {
            error!("Failed to count aircraft: {}", e);
            0
        })
    }

    /// Find the id of the first aircraft whose model matches, ignoring case.
    ///
    /// Model names are not unique; this returns the lowest id among matches.
    #[must_use]
    pub fn find_id_by_model(&self, model: &str) -> Option<i64> {
        let needle = model.to_lowercase();
        self.list_all()
            .into_iter()
            .find(|aircraft| aircraft.model().to_lowercase() == needle)
            .and_then(|aircraft| aircraft.id())
    }

    // === Fallible surface ===

    /// Load every stored aircraft in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be read or a row is malformed.
    pub fn try_list_all(&self) -> Result<Vec<Aircraft>> {
        let conn = self.connect()?;
        let sql = format!("SELECT {AIRCRAFT_COLUMNS} FROM aircraft ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map([], StoredRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let aircraft = rows
            .into_iter()
            .map(StoredRow::into_aircraft)
            .collect::<Result<Vec<_>>>()?;

        debug!("Loaded {} aircraft", aircraft.len());
        Ok(aircraft)
    }

    /// Insert a new aircraft.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn try_create(&self, aircraft: &Aircraft) -> Result<Aircraft> {
        let conn = self.connect()?;
        conn.execute(
            r"
            INSERT INTO aircraft (variant, model, passenger_capacity, cargo_capacity, range_km,
                                  fuel_consumption, cruising_speed, max_speed,
                                  service_ceiling, image_reference)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
            params![
                aircraft.variant_kind().label(),
                aircraft.model(),
                i64::from(aircraft.passenger_capacity()),
                aircraft.cargo_capacity(),
                i64::from(aircraft.range()),
                aircraft.fuel_consumption(),
                aircraft.cruising_speed(),
                aircraft.max_speed(),
                aircraft.service_ceiling(),
                aircraft.image_reference(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!(
            "Aircraft '{}' added with id {} ({})",
            aircraft.model(),
            id,
            aircraft.variant_kind()
        );
        Ok(aircraft.clone().with_id(id))
    }

    /// Update the record addressed by `aircraft`'s id.
    ///
    /// Returns `Ok(false)` when no record has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn try_update(&self, aircraft: &Aircraft) -> Result<bool> {
        let Some(id) = aircraft.id() else {
            warn!(
                "Update attempted for aircraft '{}' without an id",
                aircraft.model()
            );
            return Ok(false);
        };

        let conn = self.connect()?;
        let affected = conn.execute(
            r"
            UPDATE aircraft SET
                variant = ?1, model = ?2, passenger_capacity = ?3, cargo_capacity = ?4,
                range_km = ?5, fuel_consumption = ?6, cruising_speed = ?7, max_speed = ?8,
                service_ceiling = ?9, image_reference = ?10
            WHERE id = ?11
            ",
            params![
                aircraft.variant_kind().label(),
                aircraft.model(),
                i64::from(aircraft.passenger_capacity()),
                aircraft.cargo_capacity(),
                i64::from(aircraft.range()),
                aircraft.fuel_consumption(),
                aircraft.cruising_speed(),
                aircraft.max_speed(),
                aircraft.service_ceiling(),
                aircraft.image_reference(),
                id,
            ],
        )?;

        if affected > 0 {
            info!("Aircraft '{}' (id {}) updated", aircraft.model(), id);
            Ok(true)
        } else {
            warn!("Update attempted for non-existent aircraft id {}", id);
            Ok(false)
        }
    }

    /// Delete the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn try_delete(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let affected = conn.execute("DELETE FROM aircraft WHERE id = ?1", [id])?;

        if affected > 0 {
            info!("Aircraft {} deleted", id);
            Ok(true)
        } else {
            warn!("Delete attempted for non-existent aircraft id {}", id);
            Ok(false)
        }
    }

    /// Get a single aircraft by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or the row is malformed.
    pub fn try_get(&self, id: i64) -> Result<Option<Aircraft>> {
        let conn = self.connect()?;
        let sql = format!("SELECT {AIRCRAFT_COLUMNS} FROM aircraft WHERE id = ?1");
        conn.query_row(&sql, [id], StoredRow::from_row)
            .optional()?
            .map(StoredRow::into_aircraft)
            .transpose()
    }

    /// Count stored aircraft.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn try_count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM aircraft", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

/// A row as persisted, before the variant rules are re-applied.
#[derive(Debug)]
struct StoredRow {
    id: i64,
    variant: String,
    model: String,
    passenger_capacity: i64,
    cargo_capacity: f64,
    range_km: i64,
    fuel_consumption: f64,
    cruising_speed: f64,
    max_speed: f64,
    service_ceiling: i64,
    image_reference: Option<String>,
}

impl StoredRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            variant: row.get(1)?,
            model: row.get(2)?,
            passenger_capacity: row.get(3)?,
            cargo_capacity: row.get(4)?,
            range_km: row.get(5)?,
            fuel_consumption: row.get(6)?,
            cruising_speed: row.get(7)?,
            max_speed: row.get(8)?,
            service_ceiling: row.get(9)?,
            image_reference: row.get(10)?,
        })
    }

    /// Rebuild the aircraft through the factory so the variant rules hold for
    /// rows written by older or foreign writers too.
    fn into_aircraft(self) -> Result<Aircraft> {
        let id = self.id;
        let kind = factory::parse_variant(&self.variant)
            .map_err(|_| Error::malformed_row(id, format!("unknown variant '{}'", self.variant)))?;
        let passenger_capacity = u32::try_from(self.passenger_capacity).map_err(|_| {
            Error::malformed_row(
                id,
                format!("passenger_capacity out of range: {}", self.passenger_capacity),
            )
        })?;
        let range = u32::try_from(self.range_km)
            .map_err(|_| Error::malformed_row(id, format!("range_km out of range: {}", self.range_km)))?;
        let service_ceiling = i32::try_from(self.service_ceiling).map_err(|_| {
            Error::malformed_row(
                id,
                format!("service_ceiling out of range: {}", self.service_ceiling),
            )
        })?;

        let spec = AircraftSpec {
            model: self.model,
            passenger_capacity,
            cargo_capacity: self.cargo_capacity,
            range,
            fuel_consumption: self.fuel_consumption,
            cruising_speed: self.cruising_speed,
            max_speed: self.max_speed,
            service_ceiling,
        };
        let aircraft = factory::build(kind, spec)
            .map_err(|e| Error::malformed_row(id, e.to_string()))?
            .with_id(id);

        Ok(match self.image_reference {
            Some(reference) => aircraft.with_image_reference(reference),
            None => aircraft,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::VariantKind;
    use crate::factory::create_aircraft;
    use tempfile::TempDir;

    fn create_test_repository() -> (TempDir, Repository) {
        crate::logging::init_test_logging();
        let dir = TempDir::new().expect("failed to create temp dir");
        let repo = Repository::open(dir.path().join("fleet.db")).expect("failed to open repository");
        (dir, repo)
    }

    fn boeing() -> Aircraft {
        create_aircraft(
            "Passenger",
            "Boeing 737",
            180,
            20.0,
            3500,
            2.7,
            800.0,
            900.0,
            12000,
        )
        .unwrap()
    }

    fn antonov() -> Aircraft {
        create_aircraft(
            "Cargo",
            "Antonov AN-124",
            50,
            150.0,
            4800,
            12.6,
            800.0,
            865.0,
            12000,
        )
        .unwrap()
    }

    fn raw_connection(repo: &Repository) -> Connection {
        Connection::open(repo.path()).unwrap()
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested/deeper/fleet.db");
        let repo = Repository::open(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(repo.path(), nested);
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_round_trip() {
        let (_dir, repo) = create_test_repository();
        let original = boeing().with_image_reference("images/737.png");

        let created = repo.create(&original).unwrap();
        assert!(created.id().is_some());

        let all = repo.list_all();
        assert_eq!(all.len(), 1);
        assert!(all[0].same_record(&original));
        assert_eq!(all[0].id(), created.id());
        assert_eq!(all[0], created);
    }

    #[test]
    fn test_create_ignores_input_id() {
        let (_dir, repo) = create_test_repository();
        let created = repo.create(&boeing().with_id(999)).unwrap();
        assert_ne!(created.id(), Some(999));
        assert!(repo.get(999).is_none());
    }

    #[test]
    fn test_unknown_variant_adds_nothing() {
        let (_dir, repo) = create_test_repository();

        let created = create_aircraft("UFO", "Saucer", 3, 1.0, 1, 1.0, 1.0, 1.0, 1)
            .map(|aircraft| repo.create(&aircraft));
        assert!(matches!(created, Err(Error::UnknownVariant { .. })));

        assert_eq!(repo.count(), 0);
        assert!(repo.list_all().is_empty());
    }

    #[test]
    fn test_ids_are_distinct() {
        let (_dir, repo) = create_test_repository();
        let a = repo.create(&boeing()).unwrap();
        let b = repo.create(&boeing()).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn test_list_all_in_storage_order() {
        let (_dir, repo) = create_test_repository();
        let first = repo.create(&antonov()).unwrap();
        let second = repo.create(&boeing()).unwrap();

        let ids: Vec<_> = repo.list_all().iter().map(Aircraft::id).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
    }

    #[test]
    fn test_list_all_rereads_store() {
        let (_dir, repo) = create_test_repository();
        assert!(repo.list_all().is_empty());
        repo.create(&boeing()).unwrap();
        assert_eq!(repo.list_all().len(), 1);
    }

    #[test]
    fn test_update_rewrites_all_fields() {
        let (_dir, repo) = create_test_repository();
        let created = repo.create(&boeing()).unwrap();
        let id = created.id().unwrap();

        let replacement = create_aircraft(
            "Business Jet",
            "Gulfstream G650",
            18,
            2.5,
            12964,
            1.8,
            904.0,
            982.0,
            15545,
        )
        .unwrap()
        .with_id(id)
        .with_image_reference("g650.jpg");

        assert_eq!(repo.update(&replacement), UpdateOutcome::Updated);
        let stored = repo.get(id).unwrap();
        assert_eq!(stored, replacement);
        assert_eq!(stored.variant_kind(), VariantKind::BusinessJet);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let (_dir, repo) = create_test_repository();
        repo.create(&boeing()).unwrap();
        let before = repo.list_all();

        assert_eq!(repo.update(&antonov().with_id(42)), UpdateOutcome::NotFound);
        assert_eq!(repo.list_all(), before);
    }

    #[test]
    fn test_update_without_id_is_not_found() {
        let (_dir, repo) = create_test_repository();
        repo.create(&boeing()).unwrap();
        assert_eq!(repo.update(&antonov()), UpdateOutcome::NotFound);
        assert_eq!(repo.list_all()[0].model(), "Boeing 737");
    }

    #[test]
    fn test_delete_idempotence() {
        let (_dir, repo) = create_test_repository();
        let id = repo.create(&boeing()).unwrap().id().unwrap();

        assert!(repo.delete(id));
        assert!(!repo.delete(id));
        assert!(repo.list_all().is_empty());
    }

    #[test]
    fn test_delete_nonexistent_leaves_repository_unchanged() {
        let (_dir, repo) = create_test_repository();
        repo.create(&boeing()).unwrap();
        repo.create(&antonov()).unwrap();
        let before = repo.list_all();

        assert!(!repo.delete(7));
        assert_eq!(repo.list_all(), before);
    }

    #[test]
    fn test_find_id_by_model_case_insensitive() {
        let (_dir, repo) = create_test_repository();
        repo.create(&antonov()).unwrap();
        let id = repo.create(&boeing()).unwrap().id();

        assert_eq!(repo.find_id_by_model("boeing 737"), id);
        assert_eq!(repo.find_id_by_model("BOEING 737"), id);
        assert_eq!(repo.find_id_by_model("Boeing"), None);
        assert_eq!(repo.find_id_by_model("Concorde"), None);
    }

    #[test]
    fn test_find_id_by_model_returns_first_match() {
        let (_dir, repo) = create_test_repository();
        let first = repo.create(&boeing()).unwrap().id();
        repo.create(&boeing()).unwrap();
        assert_eq!(repo.find_id_by_model("Boeing 737"), first);
    }

    #[test]
    fn test_get_nonexistent() {
        let (_dir, repo) = create_test_repository();
        assert!(repo.get(99_999).is_none());
        assert!(repo.try_get(99_999).unwrap().is_none());
    }

    #[test]
    fn test_capacity_rule_reapplied_on_read() {
        let (_dir, repo) = create_test_repository();
        raw_connection(&repo)
            .execute(
                r"INSERT INTO aircraft (variant, model, passenger_capacity, cargo_capacity,
                    range_km, fuel_consumption, cruising_speed, max_speed, service_ceiling)
                  VALUES ('fighter', 'F-16', 12, 0.0, 4220, 3.5, 900.0, 2120.0, 15240)",
                [],
            )
            .unwrap();

        let all = repo.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].variant_kind(), VariantKind::Fighter);
        assert_eq!(all[0].passenger_capacity(), 0);
    }

    #[test]
    fn test_malformed_row_degrades_to_empty_list() {
        let (_dir, repo) = create_test_repository();
        repo.create(&boeing()).unwrap();
        raw_connection(&repo)
            .execute(
                r"INSERT INTO aircraft (variant, model, passenger_capacity, cargo_capacity,
                    range_km, fuel_consumption, cruising_speed, max_speed, service_ceiling)
                  VALUES ('Zeppelin', 'LZ 129', 72, 10.0, 14000, 1.0, 110.0, 135.0, 2000)",
                [],
            )
            .unwrap();

        assert!(repo.list_all().is_empty());
        let err = repo.try_list_all().unwrap_err();
        assert!(matches!(err, Error::MalformedRow { .. }));
        assert!(err.to_string().contains("Zeppelin"));
    }

    #[test]
    fn test_negative_column_is_malformed() {
        let (_dir, repo) = create_test_repository();
        raw_connection(&repo)
            .execute(
                r"INSERT INTO aircraft (variant, model, passenger_capacity, cargo_capacity,
                    range_km, fuel_consumption, cruising_speed, max_speed, service_ceiling)
                  VALUES ('Passenger', 'Broken', 10, 1.0, -5, 1.0, 1.0, 1.0, 1)",
                [],
            )
            .unwrap();

        let err = repo.try_list_all().unwrap_err();
        assert!(err.to_string().contains("range_km"));
    }

    #[test]
    fn test_missing_database_is_fail_soft() {
        let (dir, repo) = create_test_repository();
        let id = repo.create(&boeing()).unwrap().id().unwrap();
        drop(dir);

        assert!(repo.list_all().is_empty());
        assert!(repo.create(&antonov()).is_none());
        assert_eq!(repo.update(&boeing().with_id(id)), UpdateOutcome::Failed);
        assert!(!repo.delete(id));
        assert!(repo.get(id).is_none());
        assert_eq!(repo.count(), 0);
        assert_eq!(repo.find_id_by_model("Boeing 737"), None);

        let err = repo.try_list_all().unwrap_err();
        assert!(err.is_storage_fault());
    }

    #[test]
    fn test_dropped_table_is_fail_soft() {
        let (_dir, repo) = create_test_repository();
        let id = repo.create(&boeing()).unwrap().id().unwrap();
        raw_connection(&repo)
            .execute("DROP TABLE aircraft", [])
            .unwrap();

        assert!(repo.list_all().is_empty());
        assert!(repo.create(&boeing()).is_none());
        assert_eq!(repo.update(&boeing().with_id(id)), UpdateOutcome::Failed);
        assert!(!repo.delete(id));
        assert!(matches!(
            repo.try_delete(id),
            Err(Error::DatabaseQuery(_))
        ));
    }

    #[test]
    fn test_unicode_model() {
        let (_dir, repo) = create_test_repository();
        let plane = create_aircraft("Light Plane", "Ан-2 «Кукурузник»", 12, 1.5, 990, 0.2, 190.0, 258.0, 4400)
            .unwrap();
        repo.create(&plane).unwrap();

        assert_eq!(repo.list_all()[0].model(), "Ан-2 «Кукурузник»");
        assert!(repo.find_id_by_model("ан-2 «кукурузник»").is_some());
    }

    #[test]
    fn test_open_from_config() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.database_path = Some(dir.path().join("configured.db"));
        config.storage.busy_timeout_ms = 250;

        let repo = Repository::open_from_config(&config).unwrap();
        assert_eq!(repo.path(), dir.path().join("configured.db"));
        assert!(repo.create(&boeing()).is_some());
    }
}
