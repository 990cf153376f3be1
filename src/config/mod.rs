//! Configuration module for flightplot
//!
//! This module handles plot configuration:
//! - Which data types are plotted, in which unit, on which value axis
//! - The domain (X) axis data type and unit
//! - Which flight events are shown and how near-simultaneous events collapse
//!
//! A [`PlotConfiguration`] is the user-facing, serializable form. It refers
//! to data types and units by key/symbol and is checked against a concrete
//! simulation by [`PlotConfiguration::resolve`], which produces the
//! [`ResolvedConfiguration`] consumed by the plot engine.
//!
//! # Files
//!
//! Configurations are stored as TOML (`.toml`) or JSON (any other
//! extension):
//!
//! ```toml
//! name = "Vertical motion vs. time"
//!
//! [domain]
//! data_type = "time"
//! unit = "s"
//!
//! [[series]]
//! data_type = "altitude"
//! unit = "m"
//! axis = 0
//!
//! [events]
//! active = ["apogee", "burnout"]
//! anchor = "group_start"
//! ```

use crate::error::{PlotError, Result};
use crate::plot::events::{CollapseAnchor, EVENT_COLLAPSE_TOLERANCE};
use crate::types::{DataType, EventType, SimulationData, Unit};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Number of value axes a plot can carry
pub const AXIS_COUNT: usize = 2;

/// Index of the left value axis
pub const LEFT_AXIS: u8 = 0;

/// Index of the right value axis
pub const RIGHT_AXIS: u8 = 1;

// ==================== Plot Configuration ====================

/// Domain (X) axis selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSelection {
    /// Data type key
    pub data_type: String,
    /// Unit symbol; the data type's default unit when omitted
    #[serde(default)]
    pub unit: Option<String>,
}

/// A plotted data type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSelection {
    /// Data type key
    pub data_type: String,
    /// Unit symbol; the data type's default unit when omitted
    #[serde(default)]
    pub unit: Option<String>,
    /// Value axis (0 = left, 1 = right)
    #[serde(default)]
    pub axis: u8,
}

/// Event display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSettings {
    /// Event types to show; every type when `None`
    #[serde(default)]
    pub active: Option<Vec<EventType>>,

    /// Events closer than this (in seconds) collapse into one marker
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Reference point of the collapse tolerance
    #[serde(default)]
    pub anchor: CollapseAnchor,
}

fn default_tolerance() -> f64 {
    EVENT_COLLAPSE_TOLERANCE
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            active: None,
            tolerance: EVENT_COLLAPSE_TOLERANCE,
            anchor: CollapseAnchor::default(),
        }
    }
}

impl EventSettings {
    /// Returns true if events of this type should be displayed
    ///
    /// Continuous-sampling events are never active.
    pub fn is_event_active(&self, event_type: EventType) -> bool {
        if event_type.is_continuous() {
            return false;
        }
        match &self.active {
            Some(active) => active.contains(&event_type),
            None => true,
        }
    }
}

/// User-facing plot configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotConfiguration {
    /// Configuration name (shown as the plot subtitle)
    #[serde(default)]
    pub name: String,

    /// Domain axis selection
    #[serde(default)]
    pub domain: Option<DomainSelection>,

    /// Plotted data types in selection order
    #[serde(default)]
    pub series: Vec<SeriesSelection>,

    /// Event display settings
    #[serde(default)]
    pub events: EventSettings,
}

impl PlotConfiguration {
    /// Create an empty configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Time-domain configuration plotting the first two recorded data types
    ///
    /// The first type goes on the left axis, the second on the right one.
    pub fn default_for(simulation: &SimulationData) -> Self {
        let plotted: Vec<&DataType> = simulation
            .types
            .iter()
            .filter(|t| !t.is_time())
            .take(AXIS_COUNT)
            .collect();
        let name = match plotted.as_slice() {
            [] => "Time".to_string(),
            [only] => format!("{} vs. time", only.name),
            [first, second, ..] => format!("{} and {} vs. time", first.name, second.name),
        };

        plotted.iter().zip([LEFT_AXIS, RIGHT_AXIS]).fold(
            Self::new(name).with_domain(DataType::TIME_KEY, None),
            |config, (data_type, axis)| config.with_series(data_type.key.clone(), None, axis),
        )
    }

    /// Set the domain axis
    pub fn with_domain(mut self, data_type: impl Into<String>, unit: Option<&str>) -> Self {
        self.domain = Some(DomainSelection {
            data_type: data_type.into(),
            unit: unit.map(str::to_string),
        });
        self
    }

    /// Add a plotted data type
    pub fn with_series(mut self, data_type: impl Into<String>, unit: Option<&str>, axis: u8) -> Self {
        self.series.push(SeriesSelection {
            data_type: data_type.into(),
            unit: unit.map(str::to_string),
            axis,
        });
        self
    }

    /// Restrict the displayed event types
    pub fn with_active_events(mut self, active: Vec<EventType>) -> Self {
        self.events.active = Some(active);
        self
    }

    /// Set the event collapse anchor
    pub fn with_collapse_anchor(mut self, anchor: CollapseAnchor) -> Self {
        self.events.anchor = anchor;
        self
    }

    /// Parse a configuration from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| PlotError::Config(format!("Failed to parse plot configuration: {}", e)))
    }

    /// Load a configuration file (TOML for `.toml`, JSON otherwise)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlotError::Config(format!("Failed to read plot configuration {:?}: {}", path, e))
        })?;

        if is_toml(path) {
            Self::from_toml_str(&content)
        } else {
            serde_json::from_str(&content).map_err(|e| {
                PlotError::Config(format!("Failed to parse plot configuration {:?}: {}", path, e))
            })
        }
    }

    /// Save the configuration (TOML for `.toml`, JSON otherwise)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlotError::Config(format!("Failed to create configuration directory: {}", e))
            })?;
        }

        let content = if is_toml(path) {
            toml::to_string_pretty(self).map_err(|e| {
                PlotError::Serialization(format!("Failed to serialize configuration: {}", e))
            })?
        } else {
            serde_json::to_string_pretty(self).map_err(|e| {
                PlotError::Serialization(format!("Failed to serialize configuration: {}", e))
            })?
        };

        std::fs::write(path, content).map_err(|e| {
            PlotError::Config(format!("Failed to write plot configuration {:?}: {}", path, e))
        })
    }

    /// Validate the configuration against a simulation and resolve keys and units
    pub fn resolve(&self, simulation: &SimulationData) -> Result<ResolvedConfiguration> {
        let domain = self.domain.as_ref().ok_or(PlotError::MissingDomainType)?;
        let domain_type = lookup_type(simulation, &domain.data_type)?;
        let domain_unit = lookup_unit(&domain_type, domain.unit.as_deref())?;

        let mut seen = HashSet::new();
        let mut types = Vec::with_capacity(self.series.len());
        for selection in &self.series {
            if !seen.insert(selection.data_type.as_str()) {
                return Err(PlotError::DuplicateType(selection.data_type.clone()));
            }
            if usize::from(selection.axis) >= AXIS_COUNT {
                return Err(PlotError::InvalidAxis {
                    data_type: selection.data_type.clone(),
                    axis: selection.axis,
                });
            }
            let data_type = lookup_type(simulation, &selection.data_type)?;
            let unit = lookup_unit(&data_type, selection.unit.as_deref())?;
            types.push(TypeSelection {
                data_type,
                unit,
                axis: selection.axis,
            });
        }

        if !self.events.tolerance.is_finite() || self.events.tolerance < 0.0 {
            return Err(PlotError::Config(format!(
                "Event collapse tolerance must be a non-negative number, got {}",
                self.events.tolerance
            )));
        }

        Ok(ResolvedConfiguration {
            name: self.name.clone(),
            domain_type,
            domain_unit,
            types,
            events: self.events.clone(),
        })
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("toml")
}

fn lookup_type(simulation: &SimulationData, key: &str) -> Result<DataType> {
    simulation
        .find_type(key)
        .ok_or_else(|| PlotError::UnknownDataType(key.to_string()))
}

fn lookup_unit(data_type: &DataType, symbol: Option<&str>) -> Result<Unit> {
    match symbol {
        None => Ok(data_type.unit_group.default_unit()),
        Some(symbol) => data_type
            .unit_group
            .find_unit(symbol)
            .ok_or_else(|| PlotError::UnknownUnit {
                unit: symbol.to_string(),
                data_type: data_type.key.clone(),
            }),
    }
}

// ==================== Resolved Configuration ====================

/// A plotted data type with its resolved unit and axis
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSelection {
    pub data_type: DataType,
    pub unit: Unit,
    /// Value axis (0 = left, 1 = right)
    pub axis: u8,
}

/// A validated configuration with data types and units resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfiguration {
    pub name: String,
    pub domain_type: DataType,
    pub domain_unit: Unit,
    pub types: Vec<TypeSelection>,
    pub events: EventSettings,
}

impl ResolvedConfiguration {
    /// Number of selected data types
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the domain axis is simulation time
    pub fn is_time_domain(&self) -> bool {
        self.domain_type.is_time()
    }

    /// Label of the domain axis
    pub fn domain_label(&self) -> String {
        self.domain_type.label(&self.domain_unit)
    }

    /// Returns true if events of this type should be displayed
    pub fn is_event_active(&self, event_type: EventType) -> bool {
        self.events.is_event_active(event_type)
    }
}

// ==================== Tests ====================
