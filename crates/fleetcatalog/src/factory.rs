//! Variant factory: turns a variant name and raw attributes into an
//! [`Aircraft`].
//!
//! Names are matched case-insensitively, ignoring whitespace, `_` and `-`, so
//! "Business Jet", "business_jet" and "BUSINESSJET" all select
//! [`VariantKind::BusinessJet`].

use tracing::debug;

use crate::aircraft::{Aircraft, AircraftSpec, VariantKind};
use crate::error::{Error, Result};

/// Supported variant names, in the order offered to selection UIs.
pub const SUPPORTED_VARIANTS: [&str; 8] = [
    "Passenger",
    "Cargo",
    "Business Jet",
    "Light Plane",
    "Fighter",
    "Bomber",
    "Attack Aircraft",
    "Interceptor",
];

/// The supported variant names.
#[must_use]
pub fn supported_variants() -> &'static [&'static str] {
    &SUPPORTED_VARIANTS
}

/// Resolve a variant name to its tag.
///
/// # Errors
///
/// Returns [`Error::UnknownVariant`] if the name matches no supported variant.
pub fn parse_variant(name: &str) -> Result<VariantKind> {
    let normalized: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();

    match normalized.as_str() {
        "passenger" => Ok(VariantKind::Passenger),
        "cargo" => Ok(VariantKind::Cargo),
        "businessjet" => Ok(VariantKind::BusinessJet),
        "lightplane" => Ok(VariantKind::LightPlane),
        "fighter" => Ok(VariantKind::Fighter),
        "bomber" => Ok(VariantKind::Bomber),
        "attackaircraft" => Ok(VariantKind::AttackAircraft),
        "interceptor" => Ok(VariantKind::Interceptor),
        _ => Err(Error::unknown_variant(name)),
    }
}

/// Create an aircraft from a variant name and its attributes.
///
/// # Errors
///
/// Returns [`Error::UnknownVariant`] for an unsupported name, or
/// [`Error::InvalidAttribute`] if a floating-point attribute is malformed.
#[allow(clippy::too_many_arguments)]
pub fn create_aircraft(
    variant_name: &str,
    model: &str,
    passenger_capacity: u32,
    cargo_capacity: f64,
    range: u32,
    fuel_consumption: f64,
    cruising_speed: f64,
    max_speed: f64,
    service_ceiling: i32,
) -> Result<Aircraft> {
    let kind = parse_variant(variant_name)?;
    build(
        kind,
        AircraftSpec {
            model: model.to_string(),
            passenger_capacity,
            cargo_capacity,
            range,
            fuel_consumption,
            cruising_speed,
            max_speed,
            service_ceiling,
        },
    )
}

/// Build an aircraft of a known variant.
///
/// Variants that carry no passengers get a passenger capacity of zero no
/// matter what `spec` requests.
///
/// # Errors
///
/// Returns [`Error::InvalidAttribute`] if a floating-point attribute is NaN or
/// infinite, or if cargo capacity or fuel consumption is negative.
pub fn build(kind: VariantKind, spec: AircraftSpec) -> Result<Aircraft> {
    check_non_negative("cargo_capacity", spec.cargo_capacity)?;
    check_non_negative("fuel_consumption", spec.fuel_consumption)?;
    check_finite("cruising_speed", spec.cruising_speed)?;
    check_finite("max_speed", spec.max_speed)?;

    let passenger_capacity = if kind.carries_passengers() {
        spec.passenger_capacity
    } else {
        if spec.passenger_capacity != 0 {
            debug!(
                "Ignoring passenger capacity {} for {} variant",
                spec.passenger_capacity, kind
            );
        }
        0
    };

    Ok(Aircraft {
        id: None,
        variant_kind: kind,
        model: spec.model,
        passenger_capacity,
        cargo_capacity: positive_zero(spec.cargo_capacity),
        range: spec.range,
        fuel_consumption: positive_zero(spec.fuel_consumption),
        cruising_speed: positive_zero(spec.cruising_speed),
        max_speed: positive_zero(spec.max_speed),
        service_ceiling: spec.service_ceiling,
        image_reference: None,
    })
}

/// Fold `-0.0` into `0.0`; sorting uses `total_cmp`, which tells them apart.
fn positive_zero(value: f64) -> f64 {
    value + 0.0
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_attribute(field, value))
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(Error::invalid_attribute(field, value));
    }
    Ok(())
}
