//! Orbit camera rig that follows the craft, plus pointer handling.
//!
//! Left-button drag orbits the rig around the craft; the scroll wheel zooms.
//! A press/release pair that moves less than `click_drag_threshold` pixels is a
//! click instead, which ray-picks the scene and writes a
//! [`TargetPicked`](crate::selection::TargetPicked) message.

use crate::config::FlightConfig;
use crate::constants::{CAMERA_FAR_CLIP, CAMERA_PITCH_LIMIT, CAMERA_YAW_LIMIT};
use crate::craft::Craft;
use crate::rendering::{pick_nearest, PickRadius};
use crate::selection::TargetPicked;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Pixel-unit scroll deltas are divided by this to approximate lines.
const PIXELS_PER_SCROLL_LINE: f32 = 20.0;

/// Cursor position and angles captured when the button went down.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    cursor: Vec2,
    pitch: f32,
    yaw: f32,
}

/// Orbit state of the follow camera.  Angles in degrees.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub pitch: f32,
    pub yaw: f32,
    pub distance: f32,
    min_distance: f32,
    zoom_speed: f32,
    click_threshold: f32,
    anchor: Option<DragAnchor>,
}

impl CameraRig {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            distance: config.camera_distance,
            min_distance: config.camera_min_distance,
            zoom_speed: config.camera_zoom_speed,
            click_threshold: config.click_drag_threshold,
            anchor: None,
        }
    }

    pub fn begin_drag(&mut self, cursor: Vec2) {
        self.anchor = Some(DragAnchor {
            cursor,
            pitch: self.pitch,
            yaw: self.yaw,
        });
    }

    /// Orbit relative to the press anchor.  Pitch and yaw are clamped.
    pub fn drag_to(&mut self, cursor: Vec2) {
        let Some(a) = self.anchor else {
            return;
        };
        self.pitch =
            (a.pitch - (a.cursor.y - cursor.y)).clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
        self.yaw = (a.yaw + (a.cursor.x - cursor.x)).clamp(-CAMERA_YAW_LIMIT, CAMERA_YAW_LIMIT);
    }

    /// Finish a drag.  Returns `true` when the cursor barely moved, i.e. the
    /// gesture was a click.
    pub fn end_drag(&mut self, cursor: Vec2) -> bool {
        match self.anchor.take() {
            Some(a) => a.cursor.distance(cursor) < self.click_threshold,
            None => false,
        }
    }

    /// Move toward (positive) or away from (negative) the craft.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance - lines * self.zoom_speed).max(self.min_distance);
    }

    /// Camera transform for a rig centred on `focus`.
    ///
    /// At zero orbit angles the camera sits on the -Z side of the focus
    /// looking toward +Z, the direction forward thrust carries the craft.
    pub fn transform(&self, focus: Vec3) -> Transform {
        let rotation = Quat::from_rotation_x(self.pitch.to_radians())
            * Quat::from_rotation_y(self.yaw.to_radians())
            * Quat::from_rotation_y(std::f32::consts::PI);
        Transform {
            translation: focus + rotation * Vec3::Z * self.distance,
            rotation,
            ..default()
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_config(&FlightConfig::default())
    }
}

/// Startup system: spawn the perspective camera with a far clip wide enough
/// for the whole field.
pub fn setup_camera(mut commands: Commands, config: Res<FlightConfig>) {
    let rig = CameraRig::from_config(&config);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            near: 1.0,
            far: CAMERA_FAR_CLIP,
            ..default()
        }),
        rig.transform(Vec3::ZERO),
    ));
    commands.insert_resource(rig);
    info!("Camera spawned");
}

/// Orbit, zoom and click handling.
pub fn pointer_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mut wheel: MessageReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform)>,
    q_pickable: Query<(Entity, &GlobalTransform, &PickRadius)>,
    mut rig: ResMut<CameraRig>,
    mut picks: MessageWriter<TargetPicked>,
) {
    for ev in wheel.read() {
        let lines = match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_SCROLL_LINE,
        };
        rig.zoom(lines);
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        rig.begin_drag(cursor);
    } else if buttons.pressed(MouseButton::Left) {
        rig.drag_to(cursor);
    }

    if !buttons.just_released(MouseButton::Left) || !rig.end_drag(cursor) {
        return;
    }

    let Ok((camera, camera_transform)) = q_camera.single() else {
        return;
    };
    let entity = match camera.viewport_to_world(camera_transform, cursor) {
        Ok(ray) => pick_nearest(
            ray.origin,
            *ray.direction,
            q_pickable.iter().map(|(e, gt, r)| {
                let scale = gt.compute_transform().scale.max_element();
                (e, gt.translation(), r.0 * scale)
            }),
        ),
        Err(e) => {
            debug!("Cursor ray unavailable: {e:?}");
            None
        }
    };
    debug!("Pointer click picked {entity:?}");
    picks.write(TargetPicked { entity });
}

/// Keep the rig centred on the craft.
pub fn camera_follow_system(
    q_craft: Query<&Craft>,
    mut q_camera: Query<&mut Transform, With<Camera3d>>,
    rig: Res<CameraRig>,
) {
    let Ok(craft) = q_craft.single() else {
        return;
    };
    let Ok(mut cam) = q_camera.single_mut() else {
        return;
    };
    *cam = rig.transform(craft.position().as_vec3());
}
