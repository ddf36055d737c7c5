//! `SQLite` schema definitions for fleetcatalog.

use rusqlite::Connection;

use crate::error::Result;

/// SQL statement to create the aircraft table.
pub const CREATE_AIRCRAFT_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS aircraft (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    variant TEXT NOT NULL,
    model TEXT NOT NULL,
    passenger_capacity INTEGER NOT NULL,
    cargo_capacity REAL NOT NULL,
    range_km INTEGER NOT NULL,
    fuel_consumption REAL NOT NULL,
    cruising_speed REAL NOT NULL,
    max_speed REAL NOT NULL,
    service_ceiling INTEGER NOT NULL,
    image_reference TEXT
)
";

/// Index used by variant-restricted scans.
pub const CREATE_VARIANT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_aircraft_variant ON aircraft(variant)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_AIRCRAFT_TABLE, CREATE_VARIANT_INDEX];

/// Column list shared by every `SELECT`, in the order `StoredRow::from_row` reads it.
pub const AIRCRAFT_COLUMNS: &str = "id, variant, model, passenger_capacity, cargo_capacity, \
     range_km, fuel_consumption, cruising_speed, max_speed, service_ceiling, image_reference";

/// Create the tables and indexes if they don't exist.
///
/// # Errors
///
/// Returns an error if any statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}
