//! Headless simulation plugin: resources, messages and system ordering.
//!
//! Everything here runs under `MinimalPlugins`; no window, renderer or asset
//! server is required.  Presentation lives in [`crate::rendering`],
//! [`crate::camera`] and [`crate::hud`] and hooks into the same sets.
//!
//! ## Frame order (`Update`, chained)
//!
//! | Set            | Systems                                         |
//! |----------------|-------------------------------------------------|
//! | `Input`        | keyboard → craft, pointer → [`TargetPicked`]    |
//! | `Selection`    | [`selection_system`]                            |
//! | `Kinematics`   | [`craft_kinematics_system`]                     |
//! | `Mining`       | [`mining_tick_system`]                          |
//! | `Presentation` | transform sync, camera follow, HUD              |

use crate::asteroid::{spawn_asteroid_field, spawn_celestial_bodies};
use crate::config::{load_flight_config, FlightConfig};
use crate::control::keyboard_control_system;
use crate::craft::{craft_kinematics_system, spawn_craft};
use crate::mining::{mining_tick_system, TargetStatus};
use crate::selection::{selection_system, TargetPicked};
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;

/// Ordered stages of one simulation frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Selection,
    Kinematics,
    Mining,
    Presentation,
}

/// Which startup content the plugin spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldSetup {
    /// Read `assets/flight.toml`, then spawn craft, asteroid field and Earth.
    Full,
    /// Spawn nothing; callers (tests) build the world themselves.
    Empty,
}

pub struct SimulationPlugin {
    pub setup: WorldSetup,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            setup: WorldSetup::Full,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<FlightConfig>() {
            app.insert_resource(FlightConfig::default());
        }
        // Normally registered by InputPlugin; repeated registration is a no-op,
        // and headless apps need it for the keyboard system.
        app.add_message::<KeyboardInput>();

        app.init_resource::<TargetStatus>()
            .add_message::<TargetPicked>()
            .configure_sets(
                Update,
                (
                    SimSet::Input,
                    SimSet::Selection,
                    SimSet::Kinematics,
                    SimSet::Mining,
                    SimSet::Presentation,
                )
                    .chain(),
            )
            .add_systems(Update, keyboard_control_system.in_set(SimSet::Input))
            .add_systems(Update, selection_system.in_set(SimSet::Selection))
            .add_systems(Update, craft_kinematics_system.in_set(SimSet::Kinematics))
            .add_systems(Update, mining_tick_system.in_set(SimSet::Mining));

        if self.setup == WorldSetup::Full {
            app.add_systems(
                Startup,
                (
                    load_flight_config,
                    (spawn_craft, spawn_asteroid_field, spawn_celestial_bodies),
                )
                    .chain(),
            );
        }
    }
}
