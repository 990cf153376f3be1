//! Temporary file helpers

use flightplot::SimulationData;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a simulation result as JSON into `dir`
pub fn write_simulation(dir: &TempDir, file_name: &str, simulation: &SimulationData) -> PathBuf {
    let path = dir.path().join(file_name);
    let json = serde_json::to_string_pretty(simulation).expect("Failed to serialize simulation");
    std::fs::write(&path, json).expect("Failed to write simulation");
    path
}

/// Write raw text into `dir`
pub fn write_text(dir: &TempDir, file_name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(file_name);
    std::fs::write(&path, content).expect("Failed to write file");
    path
}
