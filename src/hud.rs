//! HUD text: collected-resource ledger and the target status line.
//!
//! Both lines only observe simulation state; nothing here writes back.

use crate::config::FlightConfig;
use crate::craft::Craft;
use crate::mining::TargetStatus;
use bevy::prelude::*;

/// Marker for the ledger text node.
#[derive(Component)]
pub struct LedgerText;

/// Marker for the status text node.
#[derive(Component)]
pub struct StatusText;

/// `"Collected resources: <n>kg"`.
pub fn ledger_line(collected: u32) -> String {
    format!("Collected resources: {collected}kg")
}

/// Startup system: spawn both HUD lines in the top-left corner.
pub fn setup_hud(mut commands: Commands, config: Res<FlightConfig>) {
    let font = TextFont {
        font_size: config.hud_font_size,
        ..default()
    };
    commands.spawn((
        Text::new(ledger_line(0)),
        font.clone(),
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            ..default()
        },
        LedgerText,
    ));
    commands.spawn((
        Text::new(TargetStatus::NoTarget.to_string()),
        font,
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(28.0 + config.hud_font_size),
            ..default()
        },
        StatusText,
    ));
}

/// Refresh both HUD lines from the craft ledger and [`TargetStatus`].
pub fn hud_update_system(
    q_craft: Query<&Craft, Changed<Craft>>,
    status: Res<TargetStatus>,
    mut q_ledger: Query<&mut Text, (With<LedgerText>, Without<StatusText>)>,
    mut q_status: Query<&mut Text, (With<StatusText>, Without<LedgerText>)>,
) {
    if let (Ok(craft), Ok(mut text)) = (q_craft.single(), q_ledger.single_mut()) {
        text.0 = ledger_line(craft.collected());
    }
    if status.is_changed() {
        if let Ok(mut text) = q_status.single_mut() {
            text.0 = status.to_string();
        }
    }
}
