//! Space Miner library
//!
//! A small 3D flight toy: steer a craft through a scattered asteroid field,
//! click an asteroid to lock on, and drain its resources until it is used up
//! and removed.  The simulation core ([`simulation::SimulationPlugin`]) runs
//! headless; [`rendering::PresentationPlugin`] adds camera, visuals and HUD.

pub mod asteroid;
pub mod camera;
pub mod config;
pub mod constants;
pub mod control;
pub mod craft;
pub mod error;
pub mod hud;
pub mod math;
pub mod mining;
pub mod rendering;
pub mod selection;
pub mod simulation;
