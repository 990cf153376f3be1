//! Test data builders for creating simulation results

use flightplot::{DataType, EventType, FlightDataBranch, SimulationData, UnitGroup};

pub fn altitude() -> DataType {
    DataType::new("altitude", "Altitude", UnitGroup::Length)
}

pub fn velocity() -> DataType {
    DataType::new("velocity", "Vertical velocity", UnitGroup::Velocity)
}

pub fn drag_coefficient() -> DataType {
    DataType::new("drag_coefficient", "Drag coefficient", UnitGroup::Coefficient)
}

/// Builder for one branch sampled at a fixed time step
pub struct BranchBuilder {
    name: String,
    start: f64,
    step: f64,
    steps: usize,
    columns: Vec<(DataType, Box<dyn Fn(f64) -> f64>)>,
    events: Vec<(EventType, f64)>,
}

impl BranchBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: 0.0,
            step: 1.0,
            steps: 10,
            columns: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Sample times `start, start + step, ...` for `steps` steps
    pub fn timeline(mut self, start: f64, step: f64, steps: usize) -> Self {
        self.start = start;
        self.step = step;
        self.steps = steps;
        self
    }

    /// Record a data type as a function of time
    pub fn column(mut self, data_type: DataType, f: impl Fn(f64) -> f64 + 'static) -> Self {
        self.columns.push((data_type, Box::new(f)));
        self
    }

    pub fn event(mut self, event_type: EventType, time: f64) -> Self {
        self.events.push((event_type, time));
        self
    }

    pub fn build(self) -> FlightDataBranch {
        let time: Vec<f64> = (0..self.steps)
            .map(|i| self.start + i as f64 * self.step)
            .collect();

        let mut branch = FlightDataBranch::new(self.name);
        for (data_type, f) in &self.columns {
            branch = branch.with_samples(data_type, time.iter().map(|&t| f(t)).collect());
        }
        branch = branch.with_samples(&DataType::time(), time);
        self.events
            .into_iter()
            .fold(branch, |branch, (event_type, t)| branch.with_event(event_type, t))
    }
}

/// Builder for a complete simulation result
pub struct SimulationBuilder {
    name: String,
    types: Vec<DataType>,
    branches: Vec<FlightDataBranch>,
}

impl SimulationBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            types: vec![DataType::time()],
            branches: Vec::new(),
        }
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.types.push(data_type);
        self
    }

    pub fn branch(mut self, branch: FlightDataBranch) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn build(self) -> SimulationData {
        SimulationData::new(self.name, self.types, self.branches)
            .expect("Simulation needs at least one branch")
    }
}

/// A two-stage flight: a sustainer flying 0..=20 s and a booster
/// separating at 4.5 s and falling back by 12.5 s
pub fn two_stage_flight() -> SimulationData {
    let sustainer = BranchBuilder::new("Sustainer")
        .timeline(0.0, 1.0, 21)
        .column(altitude(), |t| 100.0 * t - 2.5 * t * t)
        .column(velocity(), |t| 100.0 - 5.0 * t)
        .event(EventType::Launch, 0.0)
        .event(EventType::Altitude, 1.0)
        .event(EventType::Burnout, 4.5)
        .event(EventType::EjectionCharge, 4.52)
        .event(EventType::Apogee, 20.0)
        .build();

    let booster = BranchBuilder::new("Booster")
        .timeline(4.5, 1.0, 9)
        .column(altitude(), |t| 400.0 - 30.0 * (t - 4.5))
        .column(velocity(), |t| -10.0 * (t - 4.5))
        .event(EventType::StageSeparation, 4.5)
        .event(EventType::GroundHit, 12.5)
        .build();

    SimulationBuilder::new("Two stage flight")
        .data_type(altitude())
        .data_type(velocity())
        .data_type(drag_coefficient())
        .branch(sustainer)
        .branch(booster)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_builder() {
        let branch = BranchBuilder::new("Main")
            .timeline(1.0, 0.5, 3)
            .column(altitude(), |t| t * 2.0)
            .event(EventType::Apogee, 1.5)
            .build();

        assert_eq!(branch.time().unwrap(), &[1.0, 1.5, 2.0]);
        assert_eq!(branch.get(&altitude()).unwrap(), &[2.0, 3.0, 4.0]);
        assert_eq!(branch.events().len(), 1);
    }
}
