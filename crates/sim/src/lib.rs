//! Domus Sim
//!
//! Agent-based simulation orchestration: generates a consumer population
//! over a housing market built from listing records, accumulates savings,
//! runs the clearing mechanism and summarizes the outcome.

mod config;
mod population;
mod simulation;

pub use config::{ChildrenRange, IncomeDistribution, SimulationConfig};
pub use population::{HouseRecord, build_market, training_set};
pub use simulation::{Simulation, SimulationResults};
