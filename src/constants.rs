//! Centralised flight and mining constants.
//!
//! Every tunable value lives here so it can be found and changed in one
//! place.  [`crate::config::FlightConfig`] mirrors these as runtime-overridable
//! fields; this file stays the **authoritative default** source.

// ── Craft: Kinematics ─────────────────────────────────────────────────────────

/// Change in forward velocity per thrust step (world units / tick).
///
/// Five forward presses from rest give a velocity of -5, i.e. the craft covers
/// 5 units along its heading on the next tick.
pub const LINEAR_ACCELERATION: f64 = 1.0;

/// Change in angular velocity per rotation step (degrees / tick).
pub const ANGULAR_ACCELERATION: f64 = 0.01;

/// Multiplicative decay applied to every velocity component each tick.
///
/// Applied unconditionally.  There is no snap-to-zero floor, so a craft that
/// has ever moved keeps a vanishing residual drift.
pub const DAMPING: f64 = 0.98;

/// Mounting rotation (degrees, X/Y/Z) of the craft model relative to its
/// flight frame.  Presentation only; never enters the kinematics.
pub const CRAFT_MODEL_ROTATION: [f64; 3] = [-90.0, 0.0, 0.0];

/// glTF scene used for the craft.  Falls back to a procedural hull if absent.
pub const CRAFT_MODEL_PATH: &str = "models/craft/hst.glb";

// ── Mining ────────────────────────────────────────────────────────────────────

/// Resource units drained from the target per mining tick.
pub const DRAIN_PER_TICK: u32 = 1;

// ── Asteroid Field ────────────────────────────────────────────────────────────

/// Number of asteroids scattered at startup.
pub const ASTEROID_COUNT: usize = 1000;

/// Half-extent of the cube the field is scattered in (world units).
///
/// Each coordinate is drawn uniformly from `[-FIELD_RADIUS, FIELD_RADIUS]`.
pub const FIELD_RADIUS: f64 = 100_000.0;

/// Smallest starting resource count of a freshly spawned asteroid (inclusive).
pub const RESOURCE_MIN: u32 = 10;

/// Largest starting resource count of a freshly spawned asteroid (inclusive).
pub const RESOURCE_MAX: u32 = 500;

/// Uniform scale applied to asteroid visuals.
pub const ASTEROID_SCALE: f32 = 30.0;

/// Radius of the procedural rock mesh before [`ASTEROID_SCALE`] is applied.
pub const ASTEROID_BASE_RADIUS: f32 = 10.0;

/// Range of the cosmetic spin speed (degrees / second) about the (1,1,1) axis.
pub const SPIN_SPEED_MIN: f32 = 1.0;
pub const SPIN_SPEED_MAX: f32 = 5.0;

/// Asteroid model variants; one is picked per asteroid at random.
pub const ASTEROID_MODELS: [&str; 8] = [
    "models/asteroid/asteroid1.glb",
    "models/asteroid/asteroid2.glb",
    "models/asteroid/asteroid3.glb",
    "models/asteroid/asteroid4.glb",
    "models/asteroid/asteroid5.glb",
    "models/asteroid/asteroid6.glb",
    "models/asteroid/asteroid7.glb",
    "models/asteroid/asteroid8.glb",
];

// ── Celestial Bodies ──────────────────────────────────────────────────────────

/// Radius of the Earth sphere (world units).
pub const EARTH_RADIUS: f32 = 10_000.0;

/// Earth centre, placed far ahead of the craft's starting position.
pub const EARTH_POSITION: [f32; 3] = [0.0, 0.0, 200_000.0];

/// Diffuse texture for the Earth sphere; plain blue when missing.
pub const EARTH_TEXTURE_PATH: &str = "textures/earth/earth.jpg";

// ── Camera ────────────────────────────────────────────────────────────────────

/// Default distance of the camera behind the craft (world units).
pub const CAMERA_DISTANCE: f32 = 2000.0;

/// Closest the scroll wheel may bring the camera to the craft.
pub const CAMERA_MIN_DISTANCE: f32 = 100.0;

/// World units of zoom per scroll line.
pub const CAMERA_ZOOM_SPEED: f32 = 40.0;

/// Orbit pitch limit (degrees, symmetric).
pub const CAMERA_PITCH_LIMIT: f32 = 90.0;

/// Orbit yaw limit (degrees, symmetric).
pub const CAMERA_YAW_LIMIT: f32 = 180.0;

/// Far clip plane; the field is 200 000 units across.
pub const CAMERA_FAR_CLIP: f32 = 1_000_000.0;

/// Cursor travel (pixels) between press and release beyond which a press is a
/// drag and not a selection click.
pub const CLICK_DRAG_THRESHOLD: f32 = 4.0;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Font size of both HUD text lines.
pub const HUD_FONT_SIZE: f32 = 28.0;
