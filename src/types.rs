//! Core data types for flightplot
//!
//! This module contains the input data model produced by a flight
//! simulator run and consumed by the plot engine.
//!
//! # Main Types
//!
//! - [`DataType`] - A measured quantity (time, altitude, velocity, ...)
//! - [`UnitGroup`] / [`Unit`] - Unit families and display units
//! - [`EventType`] / [`FlightEvent`] - Discrete flight events
//! - [`FlightDataBranch`] - Samples and events of one simulated stage
//! - [`SimulationData`] - All branches of a simulation run
//!
//! # Units
//!
//! Raw samples are stored in SI units. A [`Unit`] converts an SI value
//! into its display unit through the [`UnitConverter`] trait, so the plot
//! engine never needs to know which unit family it is working with.
//!
//! # Branches
//!
//! Branch 0 is the primary branch (the full vehicle from launch). Branches
//! 1..N are secondary branches that start at a stage separation and only
//! carry samples from that point on.

use crate::error::{PlotError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Converts a raw SI sample into a display unit
#[cfg_attr(test, mockall::automock)]
pub trait UnitConverter {
    /// Convert an SI value into this unit
    fn to_unit(&self, value: f64) -> f64;
}

/// A display unit: `display = si / multiplier + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Unit symbol shown in labels (may be empty)
    pub symbol: &'static str,
    /// Size of one display unit in SI units
    pub multiplier: f64,
    /// Offset added after scaling (temperatures)
    pub offset: f64,
}

impl Unit {
    /// Create a purely multiplicative unit
    pub const fn new(symbol: &'static str, multiplier: f64) -> Self {
        Self {
            symbol,
            multiplier,
            offset: 0.0,
        }
    }

    /// Create a unit with an additive offset
    pub const fn with_offset(symbol: &'static str, multiplier: f64, offset: f64) -> Self {
        Self {
            symbol,
            multiplier,
            offset,
        }
    }
}

impl UnitConverter for Unit {
    fn to_unit(&self, value: f64) -> f64 {
        value / self.multiplier + self.offset
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

const UNITS_NONE: &[Unit] = &[Unit::new("", 1.0)];
const UNITS_COEFFICIENT: &[Unit] = &[Unit::new("", 1.0)];
const UNITS_TIME: &[Unit] = &[
    Unit::new("s", 1.0),
    Unit::new("ms", 0.001),
    Unit::new("min", 60.0),
];
const UNITS_LENGTH: &[Unit] = &[
    Unit::new("m", 1.0),
    Unit::new("km", 1000.0),
    Unit::new("ft", 0.3048),
    Unit::new("mi", 1609.344),
];
const UNITS_VELOCITY: &[Unit] = &[
    Unit::new("m/s", 1.0),
    Unit::new("km/h", 1.0 / 3.6),
    Unit::new("ft/s", 0.3048),
    Unit::new("mph", 0.447_04),
];
const UNITS_ACCELERATION: &[Unit] = &[
    Unit::new("m/s²", 1.0),
    Unit::new("ft/s²", 0.3048),
    Unit::new("G", 9.806_65),
];
const UNITS_MASS: &[Unit] = &[
    Unit::new("kg", 1.0),
    Unit::new("g", 0.001),
    Unit::new("lb", 0.453_592_37),
];
const UNITS_FORCE: &[Unit] = &[
    Unit::new("N", 1.0),
    Unit::new("lbf", 4.448_222),
];
const UNITS_ANGLE: &[Unit] = &[
    Unit::new("°", std::f64::consts::PI / 180.0),
    Unit::new("rad", 1.0),
];
const UNITS_TEMPERATURE: &[Unit] = &[
    Unit::with_offset("°C", 1.0, -273.15),
    Unit::with_offset("°F", 1.0 / 1.8, -459.67),
    Unit::new("K", 1.0),
];
const UNITS_PRESSURE: &[Unit] = &[
    Unit::new("mbar", 100.0),
    Unit::new("Pa", 1.0),
    Unit::new("psi", 6894.757),
];
const UNITS_STABILITY: &[Unit] = &[Unit::new("cal", 1.0), Unit::new("%", 0.01)];

/// Family of units a data type can be displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitGroup {
    /// Dimensionless quantity without a unit
    #[default]
    None,
    /// Aerodynamic coefficient (dimensionless)
    Coefficient,
    Time,
    Length,
    Velocity,
    Acceleration,
    Mass,
    Force,
    Angle,
    Temperature,
    Pressure,
    /// Stability margin in calibers
    Stability,
}

impl UnitGroup {
    /// All units of this group, default unit first
    pub fn units(&self) -> &'static [Unit] {
        match self {
            UnitGroup::None => UNITS_NONE,
            UnitGroup::Coefficient => UNITS_COEFFICIENT,
            UnitGroup::Time => UNITS_TIME,
            UnitGroup::Length => UNITS_LENGTH,
            UnitGroup::Velocity => UNITS_VELOCITY,
            UnitGroup::Acceleration => UNITS_ACCELERATION,
            UnitGroup::Mass => UNITS_MASS,
            UnitGroup::Force => UNITS_FORCE,
            UnitGroup::Angle => UNITS_ANGLE,
            UnitGroup::Temperature => UNITS_TEMPERATURE,
            UnitGroup::Pressure => UNITS_PRESSURE,
            UnitGroup::Stability => UNITS_STABILITY,
        }
    }

    /// The default display unit of this group
    pub fn default_unit(&self) -> Unit {
        self.units()[0]
    }

    /// Look up a unit of this group by its symbol
    pub fn find_unit(&self, symbol: &str) -> Option<Unit> {
        self.units().iter().copied().find(|u| u.symbol == symbol)
    }

    /// Returns true if values of this group are shown without a unit suffix
    pub fn is_dimensionless(&self) -> bool {
        matches!(self, UnitGroup::None | UnitGroup::Coefficient)
    }
}

/// A measured quantity recorded by the simulator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    /// Stable identifier used as the sample key in branches
    pub key: String,
    /// Human-readable (already translated) name
    pub name: String,
    /// Unit family of the raw samples
    #[serde(default)]
    pub unit_group: UnitGroup,
}

impl DataType {
    /// Key of the simulation time data type
    pub const TIME_KEY: &'static str = "time";

    /// Create a new data type
    pub fn new(key: impl Into<String>, name: impl Into<String>, unit_group: UnitGroup) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            unit_group,
        }
    }

    /// The simulation time data type
    pub fn time() -> Self {
        Self::new(Self::TIME_KEY, "Time", UnitGroup::Time)
    }

    /// Returns true if this is the simulation time data type
    pub fn is_time(&self) -> bool {
        self.key == Self::TIME_KEY
    }

    /// Axis/series label: `"<name> (<unit>)"`, without suffix for unitless values
    pub fn label(&self, unit: &Unit) -> String {
        if self.unit_group.is_dimensionless() || unit.symbol.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, unit.symbol)
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Type of a discrete flight event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Launch,
    Ignition,
    Liftoff,
    LaunchRod,
    Burnout,
    EjectionCharge,
    StageSeparation,
    Apogee,
    RecoveryDeviceDeployment,
    GroundHit,
    SimulationEnd,
    /// Fired on every altitude sample, never a discrete occurrence
    Altitude,
    Tumble,
    Exception,
}

impl EventType {
    /// Get all event types
    pub fn all() -> &'static [EventType] {
        &[
            EventType::Launch,
            EventType::Ignition,
            EventType::Liftoff,
            EventType::LaunchRod,
            EventType::Burnout,
            EventType::EjectionCharge,
            EventType::StageSeparation,
            EventType::Apogee,
            EventType::RecoveryDeviceDeployment,
            EventType::GroundHit,
            EventType::SimulationEnd,
            EventType::Altitude,
            EventType::Tumble,
            EventType::Exception,
        ]
    }

    /// Get the display name for this event type
    pub fn display_name(&self) -> &'static str {
        match self {
            EventType::Launch => "Launch",
            EventType::Ignition => "Motor ignition",
            EventType::Liftoff => "Lift-off",
            EventType::LaunchRod => "Launch rod clearance",
            EventType::Burnout => "Motor burnout",
            EventType::EjectionCharge => "Ejection charge",
            EventType::StageSeparation => "Stage separation",
            EventType::Apogee => "Apogee",
            EventType::RecoveryDeviceDeployment => "Recovery device deployment",
            EventType::GroundHit => "Ground hit",
            EventType::SimulationEnd => "Simulation end",
            EventType::Altitude => "Altitude change",
            EventType::Tumble => "Tumbling",
            EventType::Exception => "Exception",
        }
    }

    /// Get the marker color for this event type (RGBA)
    pub fn color(&self) -> [u8; 4] {
        match self {
            EventType::Launch => [255, 0, 0, 255],
            EventType::Ignition => [240, 0, 0, 255],
            EventType::Liftoff => [0, 160, 0, 255],
            EventType::LaunchRod => [0, 200, 0, 255],
            EventType::Burnout => [0, 0, 255, 255],
            EventType::EjectionCharge => [0, 160, 160, 255],
            EventType::StageSeparation => [160, 0, 160, 255],
            EventType::Apogee => [200, 0, 0, 255],
            EventType::RecoveryDeviceDeployment => [0, 160, 160, 255],
            EventType::GroundHit => [0, 0, 0, 255],
            EventType::SimulationEnd => [128, 0, 0, 255],
            EventType::Altitude => [128, 128, 128, 255],
            EventType::Tumble => [196, 0, 255, 255],
            EventType::Exception => [255, 0, 0, 255],
        }
    }

    /// Icon identifier used for image annotations, if the type has one
    pub fn icon(&self) -> Option<&'static str> {
        match self {
            EventType::Launch => Some("event-launch"),
            EventType::Ignition => Some("event-ignition"),
            EventType::Liftoff => Some("event-liftoff"),
            EventType::LaunchRod => Some("event-launchrod"),
            EventType::Burnout => Some("event-burnout"),
            EventType::EjectionCharge => Some("event-ejection-charge"),
            EventType::StageSeparation => Some("event-stage-separation"),
            EventType::Apogee => Some("event-apogee"),
            EventType::RecoveryDeviceDeployment => Some("event-recovery-device-deployment"),
            EventType::GroundHit => Some("event-ground-hit"),
            EventType::SimulationEnd => Some("event-simulation-end"),
            EventType::Altitude => None,
            EventType::Tumble => Some("event-tumble"),
            EventType::Exception => Some("event-exception"),
        }
    }

    /// Returns true for event types that fire on every step
    pub fn is_continuous(&self) -> bool {
        matches!(self, EventType::Altitude)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A discrete event recorded within a branch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Simulation time of the event in seconds
    pub time: f64,
}

impl FlightEvent {
    pub fn new(event_type: EventType, time: f64) -> Self {
        Self { event_type, time }
    }
}

/// Samples and events of one simulated trajectory segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightDataBranch {
    /// Branch (stage) name
    pub name: String,
    /// Raw SI samples keyed by data type key, one value per time step
    #[serde(default)]
    pub samples: BTreeMap<String, Vec<f64>>,
    /// Events in recording order
    #[serde(default)]
    pub events: Vec<FlightEvent>,
}

impl FlightDataBranch {
    /// Create an empty branch
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the samples of a data type
    pub fn with_samples(mut self, data_type: &DataType, values: Vec<f64>) -> Self {
        self.samples.insert(data_type.key.clone(), values);
        self
    }

    /// Append an event
    pub fn with_event(mut self, event_type: EventType, time: f64) -> Self {
        self.events.push(FlightEvent::new(event_type, time));
        self
    }

    /// Get the branch name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Samples recorded for a data type, if any
    pub fn get(&self, data_type: &DataType) -> Option<&[f64]> {
        self.samples.get(&data_type.key).map(Vec::as_slice)
    }

    /// Samples of the simulation time data type
    pub fn time(&self) -> Option<&[f64]> {
        self.samples.get(DataType::TIME_KEY).map(Vec::as_slice)
    }

    /// Time of the first sample of this branch
    pub fn first_time(&self) -> Option<f64> {
        self.time().and_then(|t| t.first().copied())
    }

    /// Events recorded in this branch
    pub fn events(&self) -> &[FlightEvent] {
        &self.events
    }

    /// Number of time steps in this branch
    pub fn len(&self) -> usize {
        self.time().map_or(0, <[f64]>::len)
    }

    /// Check if the branch has no time steps
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The complete result of a simulation run
///
/// Deserialization rejects simulations without branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimulationData")]
pub struct SimulationData {
    /// Simulation name (used as the plot title)
    pub name: String,
    /// Data types recorded by the simulator
    pub types: Vec<DataType>,
    /// Branches; index 0 is the primary branch
    branches: Vec<FlightDataBranch>,
}

/// Serialized form of [`SimulationData`], before validation
#[derive(Debug, Deserialize)]
struct RawSimulationData {
    name: String,
    #[serde(default)]
    types: Vec<DataType>,
    branches: Vec<FlightDataBranch>,
}

impl TryFrom<RawSimulationData> for SimulationData {
    type Error = PlotError;

    fn try_from(raw: RawSimulationData) -> Result<Self> {
        Self::new(raw.name, raw.types, raw.branches)
    }
}

impl SimulationData {
    /// Create simulation data, requiring at least one branch
    pub fn new(
        name: impl Into<String>,
        types: Vec<DataType>,
        branches: Vec<FlightDataBranch>,
    ) -> Result<Self> {
        if branches.is_empty() {
            return Err(PlotError::EmptySimulation);
        }
        Ok(Self {
            name: name.into(),
            types,
            branches,
        })
    }

    /// Parse simulation data from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawSimulationData = serde_json::from_str(content).map_err(|e| {
            PlotError::Serialization(format!("Failed to parse simulation data: {}", e))
        })?;
        Self::try_from(raw)
    }

    /// Load simulation data from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let data = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded simulation '{}' with {} branches from {:?}",
            data.name,
            data.branch_count(),
            path.as_ref()
        );
        Ok(data)
    }

    /// Number of branches (always at least 1)
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Get a branch by index
    pub fn branch(&self, index: usize) -> Option<&FlightDataBranch> {
        self.branches.get(index)
    }

    /// The primary branch
    pub fn primary(&self) -> &FlightDataBranch {
        &self.branches[0]
    }

    /// All branches in order
    pub fn branches(&self) -> &[FlightDataBranch] {
        &self.branches
    }

    /// Find a data type by key; the time type is always known
    pub fn find_type(&self, key: &str) -> Option<DataType> {
        self.types
            .iter()
            .find(|t| t.key == key)
            .cloned()
            .or_else(|| (key == DataType::TIME_KEY).then(DataType::time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        let km = UnitGroup::Length.find_unit("km").unwrap();
        assert_eq!(km.to_unit(1500.0), 1.5);

        let celsius = UnitGroup::Temperature.find_unit("°C").unwrap();
        assert!((celsius.to_unit(273.15)).abs() < 1e-9);

        let fahrenheit = UnitGroup::Temperature.find_unit("°F").unwrap();
        assert!((fahrenheit.to_unit(273.15) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_units() {
        assert_eq!(UnitGroup::Time.default_unit().symbol, "s");
        assert_eq!(UnitGroup::Length.default_unit().symbol, "m");
        assert_eq!(UnitGroup::None.default_unit().symbol, "");
        assert!(UnitGroup::Velocity.find_unit("furlong/fortnight").is_none());
    }

    #[test]
    fn test_data_type_label() {
        let altitude = DataType::new("altitude", "Altitude", UnitGroup::Length);
        assert_eq!(altitude.label(&Unit::new("m", 1.0)), "Altitude (m)");

        let mach = DataType::new("mach", "Mach number", UnitGroup::Coefficient);
        assert_eq!(mach.label(&UnitGroup::Coefficient.default_unit()), "Mach number");

        let weird = DataType::new("x", "X", UnitGroup::Length);
        assert_eq!(weird.label(&Unit::new("", 1.0)), "X");
    }

    #[test]
    fn test_event_type_metadata() {
        for event_type in EventType::all() {
            let _color = event_type.color();
            assert!(!event_type.display_name().is_empty());
        }
        assert!(EventType::Altitude.is_continuous());
        assert!(EventType::Altitude.icon().is_none());
        assert!(!EventType::Apogee.is_continuous());
        assert_eq!(EventType::Apogee.to_string(), "Apogee");
    }

    #[test]
    fn test_branch_accessors() {
        let time = DataType::time();
        let branch = FlightDataBranch::new("Booster")
            .with_samples(&time, vec![2.0, 3.0, 4.0])
            .with_event(EventType::StageSeparation, 2.0);

        assert_eq!(branch.name(), "Booster");
        assert_eq!(branch.len(), 3);
        assert_eq!(branch.first_time(), Some(2.0));
        assert_eq!(branch.events().len(), 1);

        let missing = DataType::new("thrust", "Thrust", UnitGroup::Force);
        assert!(branch.get(&missing).is_none());
    }

    #[test]
    fn test_simulation_requires_branch() {
        let err = SimulationData::new("empty", vec![], vec![]).unwrap_err();
        assert!(matches!(err, PlotError::EmptySimulation));
    }

    #[test]
    fn test_deserialize_rejects_empty_simulation() {
        let json = r#"{"name": "x", "types": [], "branches": []}"#;
        let err = serde_json::from_str::<SimulationData>(json).unwrap_err();
        assert!(err.to_string().contains(&PlotError::EmptySimulation.to_string()));

        let json = r#"{"name": "x", "branches": [{"name": "Main"}]}"#;
        let sim: SimulationData = serde_json::from_str(json).unwrap();
        assert_eq!(sim.primary().name(), "Main");
    }

    #[test]
    fn test_simulation_json_parsing() {
        let json = r#"{
            "name": "Two stage",
            "types": [
                {"key": "time", "name": "Time", "unit_group": "time"},
                {"key": "altitude", "name": "Altitude", "unit_group": "length"}
            ],
            "branches": [
                {
                    "name": "Sustainer",
                    "samples": {"time": [0.0, 1.0], "altitude": [0.0, 10.0]},
                    "events": [{"type": "launch", "time": 0.0}]
                }
            ]
        }"#;
        let sim = SimulationData::from_json_str(json).unwrap();
        assert_eq!(sim.branch_count(), 1);
        assert_eq!(sim.primary().events()[0].event_type, EventType::Launch);
        assert_eq!(sim.find_type("altitude").unwrap().unit_group, UnitGroup::Length);
        assert!(sim.find_type("velocity").is_none());

        let no_branches = r#"{"name": "x", "branches": []}"#;
        assert!(matches!(
            SimulationData::from_json_str(no_branches),
            Err(PlotError::EmptySimulation)
        ));
    }

    #[test]
    fn test_time_type_always_known() {
        let sim = SimulationData::new("s", vec![], vec![FlightDataBranch::new("Main")]).unwrap();
        assert!(sim.find_type("time").unwrap().is_time());
    }
}
