//! Test to verify test infrastructure works correctly

mod common;

use common::builders::{altitude, two_stage_flight, BranchBuilder, SimulationBuilder};
use flightplot::EventType;

#[test]
fn test_infrastructure_setup() {
    let sim = SimulationBuilder::new("Hop")
        .data_type(altitude())
        .branch(
            BranchBuilder::new("Main")
                .timeline(0.0, 0.5, 4)
                .column(altitude(), |t| 10.0 * t)
                .event(EventType::Launch, 0.0)
                .build(),
        )
        .build();

    assert_eq!(sim.branch_count(), 1);
    assert_eq!(sim.primary().get(&altitude()).unwrap(), &[0.0, 5.0, 10.0, 15.0]);
    assert!(sim.find_type("time").is_some());
}

#[test]
fn test_two_stage_fixture() {
    let sim = two_stage_flight();
    assert_eq!(sim.branch_count(), 2);
    assert_eq!(sim.primary().len(), 21);
    assert_eq!(sim.branch(1).unwrap().first_time(), Some(4.5));
}

#[test]
fn test_float_comparison() {
    common::assert_float_eq(1.0, 1.0000001, 0.001);
}

#[test]
#[should_panic]
fn test_float_comparison_fails() {
    common::assert_float_eq(1.0, 2.0, 0.001);
}
