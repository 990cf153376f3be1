//! Flight event aggregation
//!
//! Events of all branches are collected, sorted by time and collapsed into
//! display groups: an event within the collapse tolerance of the current
//! group joins it (its type is appended to the label once), anything else
//! opens a new group. Collapsing is a greedy left-to-right scan, not a
//! symmetric clustering.
//!
//! Two reference points for the tolerance are supported, see
//! [`CollapseAnchor`]. They only differ for bursts of events spanning more
//! than the tolerance.

use crate::types::{EventType, SimulationData};
use serde::{Deserialize, Serialize};

/// Default time window (seconds) within which events collapse into one group
pub const EVENT_COLLAPSE_TOLERANCE: f64 = 0.05;

/// Reference time that an event's distance is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapseAnchor {
    /// Distance to the event that opened the group
    #[default]
    GroupStart,
    /// Distance to the most recent event merged into the group
    PreviousEvent,
}

/// One event together with the branch it was recorded in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventDisplayInfo {
    /// Branch (stage) index
    pub stage: usize,
    pub time: f64,
    pub event_type: EventType,
}

/// Near-simultaneous events merged into one marker
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEventGroup {
    /// Branch of the event that opened the group
    pub stage: usize,
    /// Representative time (the opening event's time)
    pub time: f64,
    /// Time of the latest event merged into the group
    pub end_time: f64,
    /// Comma-separated display names of the distinct event types
    pub label: String,
    /// Representative type: the last distinct type merged
    pub event_type: EventType,
    /// Distinct event types in merge order
    pub event_types: Vec<EventType>,
}

impl DisplayEventGroup {
    fn open(info: &EventDisplayInfo) -> Self {
        Self {
            stage: info.stage,
            time: info.time,
            end_time: info.time,
            label: info.event_type.to_string(),
            event_type: info.event_type,
            event_types: vec![info.event_type],
        }
    }

    fn reference_time(&self, anchor: CollapseAnchor) -> f64 {
        match anchor {
            CollapseAnchor::GroupStart => self.time,
            CollapseAnchor::PreviousEvent => self.end_time,
        }
    }

    fn absorb(&mut self, info: &EventDisplayInfo) {
        self.end_time = info.time;
        if self.event_types.contains(&info.event_type) {
            return;
        }
        self.label.push_str(", ");
        self.label.push_str(info.event_type.display_name());
        self.event_type = info.event_type;
        self.event_types.push(info.event_type);
    }

    /// Marker color (of the representative type)
    pub fn color(&self) -> [u8; 4] {
        self.event_type.color()
    }

    /// Annotation icon (of the representative type)
    pub fn icon(&self) -> Option<&'static str> {
        self.event_type.icon()
    }
}

/// Collect displayable events of all branches, sorted by time
///
/// Continuous-sampling events are always dropped. Events with equal times
/// keep branch-then-recording order.
pub fn collect_events(
    simulation: &SimulationData,
    is_active: impl Fn(EventType) -> bool,
) -> Vec<EventDisplayInfo> {
    let mut events: Vec<EventDisplayInfo> = simulation
        .branches()
        .iter()
        .enumerate()
        .flat_map(|(stage, branch)| {
            branch.events().iter().map(move |event| EventDisplayInfo {
                stage,
                time: event.time,
                event_type: event.event_type,
            })
        })
        .filter(|info| !info.event_type.is_continuous() && is_active(info.event_type))
        .collect();

    events.sort_by(|a, b| a.time.total_cmp(&b.time));
    events
}

/// Collapse time-sorted events into display groups
///
/// With `stage = Some(i)` only events of branch `i` take part. An event
/// exactly `tolerance` away from the reference time still merges.
pub fn aggregate_events(
    events: &[EventDisplayInfo],
    stage: Option<usize>,
    tolerance: f64,
    anchor: CollapseAnchor,
) -> Vec<DisplayEventGroup> {
    events
        .iter()
        .filter(|info| stage.map_or(true, |s| info.stage == s))
        .fold(Vec::new(), |mut groups: Vec<DisplayEventGroup>, info| {
            let merges = groups
                .last()
                .is_some_and(|g| (info.time - g.reference_time(anchor)).abs() <= tolerance);
            if let Some(group) = groups.last_mut().filter(|_| merges) {
                group.absorb(info);
            } else {
                groups.push(DisplayEventGroup::open(info));
            }
            groups
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlightDataBranch;

    fn info(stage: usize, time: f64, event_type: EventType) -> EventDisplayInfo {
        EventDisplayInfo {
            stage,
            time,
            event_type,
        }
    }

    fn burst() -> Vec<EventDisplayInfo> {
        vec![
            info(0, 10.0, EventType::Burnout),
            info(0, 10.03, EventType::EjectionCharge),
            info(0, 10.06, EventType::RecoveryDeviceDeployment),
            info(0, 20.0, EventType::GroundHit),
        ]
    }

    #[test]
    fn test_burst_anchored_to_group_start() {
        let groups = aggregate_events(
            &burst(),
            None,
            EVENT_COLLAPSE_TOLERANCE,
            CollapseAnchor::GroupStart,
        );

        // |10.06 - 10.0| > 0.05 opens a new group
        let times: Vec<f64> = groups.iter().map(|g| g.time).collect();
        assert_eq!(times, vec![10.0, 10.06, 20.0]);
        assert_eq!(groups[0].label, "Motor burnout, Ejection charge");
        assert_eq!(groups[1].label, "Recovery device deployment");
    }

    #[test]
    fn test_burst_anchored_to_previous_event() {
        let groups = aggregate_events(
            &burst(),
            None,
            EVENT_COLLAPSE_TOLERANCE,
            CollapseAnchor::PreviousEvent,
        );

        let times: Vec<f64> = groups.iter().map(|g| g.time).collect();
        assert_eq!(times, vec![10.0, 20.0]);
        assert_eq!(
            groups[0].label,
            "Motor burnout, Ejection charge, Recovery device deployment"
        );
        assert_eq!(groups[0].end_time, 10.06);
        assert_eq!(groups[1].label, "Ground hit");
    }

    #[test]
    fn test_tolerance_boundary_inclusive() {
        let events = vec![
            info(0, 0.0, EventType::Launch),
            info(0, 0.05, EventType::Ignition),
            info(0, 0.25, EventType::Liftoff),
        ];
        let groups = aggregate_events(&events, None, 0.05, CollapseAnchor::GroupStart);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].event_types, vec![EventType::Launch, EventType::Ignition]);

        let wider = aggregate_events(&events, None, 0.25, CollapseAnchor::GroupStart);
        assert_eq!(wider.len(), 1);
    }

    #[test]
    fn test_duplicate_type_absorbed_once() {
        let events = vec![
            info(0, 5.0, EventType::Burnout),
            info(1, 5.01, EventType::Burnout),
            info(0, 5.02, EventType::Apogee),
        ];
        let groups = aggregate_events(&events, None, 0.05, CollapseAnchor::GroupStart);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Motor burnout, Apogee");
        assert_eq!(groups[0].event_types.len(), 2);
    }

    #[test]
    fn test_last_distinct_type_wins() {
        let events = vec![
            info(0, 1.0, EventType::Burnout),
            info(0, 1.01, EventType::Apogee),
            info(0, 1.02, EventType::Burnout),
        ];
        let groups = aggregate_events(&events, None, 0.05, CollapseAnchor::GroupStart);
        assert_eq!(groups[0].event_type, EventType::Apogee);
        assert_eq!(groups[0].color(), EventType::Apogee.color());
        assert_eq!(groups[0].icon(), EventType::Apogee.icon());
    }

    #[test]
    fn test_stage_filter_applied_before_collapse() {
        let events = vec![
            info(0, 3.0, EventType::Burnout),
            info(1, 3.01, EventType::StageSeparation),
            info(1, 8.0, EventType::GroundHit),
        ];

        let all = aggregate_events(&events, None, 0.05, CollapseAnchor::GroupStart);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].stage, 0);

        let booster = aggregate_events(&events, Some(1), 0.05, CollapseAnchor::GroupStart);
        assert_eq!(booster.len(), 2);
        assert!(booster.iter().all(|g| g.stage == 1));
        assert_eq!(booster[0].label, "Stage separation");
    }

    #[test]
    fn test_empty_events() {
        let groups = aggregate_events(&[], None, 0.05, CollapseAnchor::PreviousEvent);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_collect_events_sorted_and_filtered() {
        let main = FlightDataBranch::new("Sustainer")
            .with_event(EventType::Launch, 0.0)
            .with_event(EventType::Altitude, 0.5)
            .with_event(EventType::Apogee, 12.0);
        let booster = FlightDataBranch::new("Booster")
            .with_event(EventType::StageSeparation, 3.0)
            .with_event(EventType::GroundHit, 9.0);
        let sim = SimulationData::new("s", vec![], vec![main, booster]).unwrap();

        let events = collect_events(&sim, |t| t != EventType::GroundHit);
        let types: Vec<EventType> = events.iter().map(|e| e.event_type).collect();
        assert_eq!(
            types,
            vec![EventType::Launch, EventType::StageSeparation, EventType::Apogee]
        );
        assert_eq!(events[1].stage, 1);
    }

    #[test]
    fn test_collect_events_stable_for_equal_times() {
        let main = FlightDataBranch::new("Main").with_event(EventType::Burnout, 2.0);
        let stage = FlightDataBranch::new("Stage").with_event(EventType::StageSeparation, 2.0);
        let sim = SimulationData::new("s", vec![], vec![main, stage]).unwrap();

        let events = collect_events(&sim, |_| true);
        assert_eq!(events[0].stage, 0);
        assert_eq!(events[1].stage, 1);
    }
}
