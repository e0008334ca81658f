use bevy::prelude::*;
use bevy::window::WindowResolution;
use space_miner::rendering::PresentationPlugin;
use space_miner::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Space Miner".into(),
                resolution: WindowResolution::new(1920, 1080),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Config is loaded from assets/flight.toml by the simulation plugin's
        // first startup system; every other startup system runs after it.
        .add_plugins(SimulationPlugin::default())
        .add_plugins(PresentationPlugin)
        .run();
}
