//! Core aircraft types for fleetcatalog.
//!
//! An [`Aircraft`] is a single record shape tagged with a [`VariantKind`].
//! Everything that differs between variants (display label, whether the
//! variant carries passengers) is decided by matching on the tag.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The closed set of aircraft variants known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// Scheduled passenger airliner.
    Passenger,
    /// Freighter; carries no passengers.
    Cargo,
    /// Small executive jet.
    BusinessJet,
    /// General aviation light aircraft.
    LightPlane,
    /// Air superiority fighter.
    Fighter,
    /// Strategic or tactical bomber.
    Bomber,
    /// Ground attack aircraft.
    AttackAircraft,
    /// Interceptor.
    Interceptor,
}

impl VariantKind {
    /// Every variant, in the order offered to selection UIs.
    pub const ALL: [VariantKind; 8] = [
        Self::Passenger,
        Self::Cargo,
        Self::BusinessJet,
        Self::LightPlane,
        Self::Fighter,
        Self::Bomber,
        Self::AttackAircraft,
        Self::Interceptor,
    ];

    /// Human-readable label. This is also the value persisted in storage.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Passenger => "Passenger",
            Self::Cargo => "Cargo",
            Self::BusinessJet => "Business Jet",
            Self::LightPlane => "Light Plane",
            Self::Fighter => "Fighter",
            Self::Bomber => "Bomber",
            Self::AttackAircraft => "Attack Aircraft",
            Self::Interceptor => "Interceptor",
        }
    }

    /// Whether this variant keeps a caller-supplied passenger capacity.
    ///
    /// Variants returning `false` always have a passenger capacity of zero.
    #[must_use]
    pub fn carries_passengers(self) -> bool {
        match self {
            Self::Passenger | Self::BusinessJet | Self::LightPlane => true,
            Self::Cargo
            | Self::Fighter
            | Self::Bomber
            | Self::AttackAircraft
            | Self::Interceptor => false,
        }
    }

    /// Whether this is a military variant.
    #[must_use]
    pub fn is_military(self) -> bool {
        matches!(
            self,
            Self::Fighter | Self::Bomber | Self::AttackAircraft | Self::Interceptor
        )
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VariantKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::factory::parse_variant(s)
    }
}

/// Raw attributes supplied by a caller when constructing an aircraft.
///
/// The factory turns this into an [`Aircraft`], applying the variant rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AircraftSpec {
    /// Model name, e.g. "Boeing 737".
    pub model: String,
    /// Requested passenger seats. Ignored by variants that carry no passengers.
    pub passenger_capacity: u32,
    /// Cargo capacity in tons.
    pub cargo_capacity: f64,
    /// Range in kilometers.
    pub range: u32,
    /// Fuel consumption in liters per hour.
    pub fuel_consumption: f64,
    /// Cruising speed in km/h.
    pub cruising_speed: f64,
    /// Maximum speed in km/h.
    pub max_speed: f64,
    /// Service ceiling in meters.
    pub service_ceiling: i32,
}

/// A single aircraft record in the catalog.
///
/// Fields are read through accessors so the passenger capacity rule applied
/// at construction cannot be bypassed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aircraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<i64>,
    pub(crate) variant_kind: VariantKind,
    pub(crate) model: String,
    pub(crate) passenger_capacity: u32,
    pub(crate) cargo_capacity: f64,
    pub(crate) range: u32,
    pub(crate) fuel_consumption: f64,
    pub(crate) cruising_speed: f64,
    pub(crate) max_speed: f64,
    pub(crate) service_ceiling: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) image_reference: Option<String>,
}

impl Aircraft {
    /// Storage-assigned identifier, `None` until first persisted.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// The variant tag.
    #[must_use]
    pub fn variant_kind(&self) -> VariantKind {
        self.variant_kind
    }

    /// Model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Passenger seats.
    #[must_use]
    pub fn passenger_capacity(&self) -> u32 {
        self.passenger_capacity
    }

    /// Cargo capacity in tons.
    #[must_use]
    pub fn cargo_capacity(&self) -> f64 {
        self.cargo_capacity
    }

    /// Range in kilometers.
    #[must_use]
    pub fn range(&self) -> u32 {
        self.range
    }

    /// Fuel consumption in liters per hour.
    #[must_use]
    pub fn fuel_consumption(&self) -> f64 {
        self.fuel_consumption
    }

    /// Cruising speed in km/h.
    #[must_use]
    pub fn cruising_speed(&self) -> f64 {
        self.cruising_speed
    }

    /// Maximum speed in km/h.
    #[must_use]
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Service ceiling in meters.
    #[must_use]
    pub fn service_ceiling(&self) -> i32 {
        self.service_ceiling
    }

    /// Opaque image reference owned by the media collaborator.
    #[must_use]
    pub fn image_reference(&self) -> Option<&str> {
        self.image_reference.as_deref()
    }

    /// Attach an image reference. The value is stored verbatim.
    #[must_use]
    pub fn with_image_reference(mut self, image_reference: impl Into<String>) -> Self {
        self.image_reference = Some(image_reference.into());
        self
    }

    /// Address this aircraft at an existing record, e.g. before an update.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Compare every field except `id`.
    #[must_use]
    pub fn same_record(&self, other: &Aircraft) -> bool {
        Aircraft { id: None, ..self.clone() } == Aircraft { id: None, ..other.clone() }
    }
}

impl std::fmt::Display for Aircraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} | pax {} | cargo {:.2} t | range {} km | fuel {:.2} l/h | cruise {:.1} km/h | max {:.1} km/h | ceiling {} m",
            self.variant_kind,
            self.model,
            self.passenger_capacity,
            self.cargo_capacity,
            self.range,
            self.fuel_consumption,
            self.cruising_speed,
            self.max_speed,
            self.service_ceiling,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::build;

    fn spec(model: &str, passengers: u32) -> AircraftSpec {
        AircraftSpec {
            model: model.to_string(),
            passenger_capacity: passengers,
            cargo_capacity: 10.0,
            range: 2000,
            fuel_consumption: 1.5,
            cruising_speed: 700.0,
            max_speed: 850.0,
            service_ceiling: 11000,
        }
    }

    #[test]
    fn test_all_variants_listed_once() {
        let mut seen = std::collections::HashSet::new();
        for kind in VariantKind::ALL {
            assert!(seen.insert(kind));
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_labels() {
        assert_eq!(VariantKind::BusinessJet.label(), "Business Jet");
        assert_eq!(VariantKind::AttackAircraft.to_string(), "Attack Aircraft");
        assert_eq!(VariantKind::Cargo.to_string(), "Cargo");
    }

    #[test]
    fn test_carries_passengers() {
        assert!(VariantKind::Passenger.carries_passengers());
        assert!(VariantKind::BusinessJet.carries_passengers());
        assert!(VariantKind::LightPlane.carries_passengers());
        assert!(!VariantKind::Cargo.carries_passengers());
        assert!(!VariantKind::Interceptor.carries_passengers());
    }

    #[test]
    fn test_is_military() {
        assert!(VariantKind::Bomber.is_military());
        assert!(!VariantKind::Cargo.is_military());
        assert!(!VariantKind::Passenger.is_military());
    }

    #[test]
    fn test_from_str_round_trips_labels() {
        for kind in VariantKind::ALL {
            assert_eq!(kind.label().parse::<VariantKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_new_aircraft_has_no_id() {
        let aircraft = build(VariantKind::Passenger, spec("A320", 150)).unwrap();
        assert!(aircraft.id().is_none());
        assert!(aircraft.image_reference().is_none());
    }

    #[test]
    fn test_with_image_reference_is_verbatim() {
        let aircraft = build(VariantKind::LightPlane, spec("Cessna 172", 4))
            .unwrap()
            .with_image_reference("../img/C:\\weird path?.png");
        assert_eq!(aircraft.image_reference(), Some("../img/C:\\weird path?.png"));
    }

    #[test]
    fn test_same_record_ignores_id() {
        let a = build(VariantKind::Passenger, spec("A320", 150)).unwrap();
        let b = a.clone().with_id(42);
        assert_ne!(a, b);
        assert!(a.same_record(&b));

        let c = build(VariantKind::Passenger, spec("A321", 150)).unwrap();
        assert!(!a.same_record(&c));
    }

    #[test]
    fn test_serialize_skips_missing_id() {
        let aircraft = build(VariantKind::Cargo, spec("An-124", 0)).unwrap();
        let json = serde_json::to_string(&aircraft).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(json.contains("\"variant_kind\":\"cargo\""));

        let json = serde_json::to_string(&aircraft.with_id(3)).unwrap();
        assert!(json.contains("\"id\":3"));
    }

    #[test]
    fn test_display_contains_model_and_label() {
        let aircraft = build(VariantKind::BusinessJet, spec("Gulfstream G650", 18)).unwrap();
        let text = aircraft.to_string();
        assert!(text.contains("[Business Jet]"));
        assert!(text.contains("Gulfstream G650"));
        assert!(text.contains("pax 18"));
    }
}
