//! Presentation: meshes, materials, lights, ray-pick geometry and the
//! per-frame sync from simulation state to `Transform`s.
//!
//! Domain entities (craft, asteroids) never hold rendering data.  Their
//! visuals are spawned as **child** entities when the domain component is
//! first added, so a pick that lands on a visual walks up the hierarchy to the
//! domain entity.
//!
//! | Visual         | Source                               | Fallback            |
//! |----------------|--------------------------------------|---------------------|
//! | Asteroid       | `asteroid_models[variant]` glTF scene | faceted rock mesh   |
//! | Craft          | `craft_model_path` glTF scene        | cone hull           |
//! | Earth          | sphere + `earth_texture_path`        | plain blue sphere   |
//!
//! A missing file is reported once as
//! [`SimError::MissingAsset`](crate::error::SimError::MissingAsset) and the
//! fallback is used; it never stops the simulation.

use crate::asteroid::{Asteroid, AsteroidSpin, CelestialBody};
use crate::camera::{camera_follow_system, pointer_system, setup_camera};
use crate::config::{load_flight_config, FlightConfig};
use crate::constants::ASTEROID_BASE_RADIUS;
use crate::craft::Craft;
use crate::error::require_asset;
use crate::hud::{hud_update_system, setup_hud};
use crate::math::combined_rotation;
use crate::simulation::SimSet;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Radius of the craft's pick sphere before scaling.
const CRAFT_PICK_RADIUS: f32 = 60.0;

/// Fraction of the radius by which fallback rock vertices are jittered.
const ROCK_JITTER: f32 = 0.3;

// ── Components & Resources ────────────────────────────────────────────────────

/// Bounding sphere used by the pointer ray-pick (local units; the entity's
/// global scale is applied at pick time).
#[derive(Component, Debug, Clone, Copy)]
pub struct PickRadius(pub f32);

/// Marker for the child entity that renders an asteroid.
#[derive(Component)]
pub struct AsteroidVisual;

/// Marker for the child entity that renders the craft.
#[derive(Component)]
pub struct CraftVisual;

/// Handles shared by every asteroid visual, built once at startup.
#[derive(Resource)]
pub struct AsteroidAssets {
    /// One entry per configured model; `None` when the file is missing.
    scenes: Vec<Option<Handle<Scene>>>,
    /// Fallback rock meshes, one per variant.
    rocks: Vec<Handle<Mesh>>,
    material: Handle<StandardMaterial>,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Camera, visuals, HUD and pointer input.  Requires `DefaultPlugins`.
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_camera, setup_lighting, setup_asteroid_assets, setup_hud)
                .after(load_flight_config),
        )
        .add_systems(Update, pointer_system.in_set(SimSet::Input))
        .add_systems(
            Update,
            (
                attach_asteroid_visual_system,
                attach_craft_visual_system,
                attach_celestial_visual_system,
                asteroid_spin_system,
                sync_craft_transform_system,
                camera_follow_system,
                hud_update_system,
            )
                .chain()
                .in_set(SimSet::Presentation),
        );
    }
}

// ── Ray-pick ──────────────────────────────────────────────────────────────────

/// Distance along a unit-length ray to the first intersection with a sphere,
/// or `None` if the ray misses it or the sphere is entirely behind the origin.
pub fn ray_sphere_distance(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    let near = -b - sqrt;
    let far = -b + sqrt;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // Origin inside the sphere.
        Some(0.0)
    } else {
        None
    }
}

/// Nearest candidate sphere hit by the ray.
pub fn pick_nearest(
    origin: Vec3,
    dir: Vec3,
    candidates: impl IntoIterator<Item = (Entity, Vec3, f32)>,
) -> Option<Entity> {
    candidates
        .into_iter()
        .filter_map(|(e, center, radius)| {
            ray_sphere_distance(origin, dir, center, radius).map(|d| (e, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(e, _)| e)
}

// ── Meshes ────────────────────────────────────────────────────────────────────

/// Unit icosahedron: vertices and outward-facing triangles.
fn icosahedron() -> ([Vec3; 12], [[u32; 3]; 20]) {
    let phi = (1.0 + 5f32.sqrt()) / 2.0;
    let v = [
        Vec3::new(-1.0, phi, 0.0),
        Vec3::new(1.0, phi, 0.0),
        Vec3::new(-1.0, -phi, 0.0),
        Vec3::new(1.0, -phi, 0.0),
        Vec3::new(0.0, -1.0, phi),
        Vec3::new(0.0, 1.0, phi),
        Vec3::new(0.0, -1.0, -phi),
        Vec3::new(0.0, 1.0, -phi),
        Vec3::new(phi, 0.0, -1.0),
        Vec3::new(phi, 0.0, 1.0),
        Vec3::new(-phi, 0.0, -1.0),
        Vec3::new(-phi, 0.0, 1.0),
    ]
    .map(Vec3::normalize);
    let faces = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    (v, faces)
}

/// Faceted rock: an icosahedron with each vertex pushed in or out by up to
/// `ROCK_JITTER` of `radius`.  Same `seed`, same rock.
pub fn rock_mesh(radius: f32, seed: u64) -> Mesh {
    let mut rng = StdRng::seed_from_u64(seed);
    let (verts, faces) = icosahedron();
    let positions: Vec<[f32; 3]> = verts
        .iter()
        .map(|v| (*v * radius * (1.0 + rng.gen_range(-ROCK_JITTER..ROCK_JITTER))).to_array())
        .collect();
    let indices = Indices::U32(faces.iter().flatten().copied().collect());

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(indices);
    // Flat shading needs one vertex per face corner.
    mesh.duplicate_vertices();
    mesh.compute_flat_normals();
    mesh
}

// ── Startup ───────────────────────────────────────────────────────────────────

fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Load the asteroid scenes that exist and build one fallback rock per
/// variant.
fn setup_asteroid_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<FlightConfig>,
) {
    let scenes: Vec<Option<Handle<Scene>>> = config
        .asteroid_models
        .iter()
        .map(|path| match require_asset(path) {
            Ok(path) => {
                Some(asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.to_owned())))
            }
            Err(e) => {
                warn!("{e}; using procedural rock");
                None
            }
        })
        .collect();
    let variants = config.asteroid_models.len().max(1);
    let rocks = (0..variants)
        .map(|i| meshes.add(rock_mesh(ASTEROID_BASE_RADIUS, i as u64)))
        .collect();
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.42, 0.4),
        perceptual_roughness: 0.95,
        ..default()
    });
    commands.insert_resource(AsteroidAssets {
        scenes,
        rocks,
        material,
    });
}

// ── Visual attachment ─────────────────────────────────────────────────────────

/// Give each newly spawned asteroid a visual child carrying the pick sphere.
pub fn attach_asteroid_visual_system(
    mut commands: Commands,
    query: Query<(Entity, &Asteroid), Added<Asteroid>>,
    assets: Res<AsteroidAssets>,
    config: Res<FlightConfig>,
) {
    for (entity, asteroid) in query.iter() {
        let variant = asteroid.variant();
        let transform = Transform::from_scale(Vec3::splat(config.asteroid_scale));
        let mut child = commands.spawn((
            AsteroidVisual,
            PickRadius(ASTEROID_BASE_RADIUS),
            transform,
            ChildOf(entity),
        ));
        match assets.scenes.get(variant).cloned().flatten() {
            Some(scene) => {
                child.insert(SceneRoot(scene));
            }
            None => {
                let rock = assets.rocks[variant % assets.rocks.len()].clone();
                child.insert((Mesh3d(rock), MeshMaterial3d(assets.material.clone())));
            }
        }
    }
}

/// Give the craft a visual child in its model's mounting orientation.
pub fn attach_craft_visual_system(
    mut commands: Commands,
    query: Query<Entity, Added<Craft>>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<FlightConfig>,
) {
    for entity in query.iter() {
        let [x, y, z] = config.craft_model_rotation;
        let mount = Quat::from_mat3(&combined_rotation(x, y, z).as_mat3());
        let mut child = commands.spawn((
            CraftVisual,
            PickRadius(CRAFT_PICK_RADIUS),
            Transform::from_rotation(mount),
            ChildOf(entity),
        ));
        match require_asset(&config.craft_model_path) {
            Ok(path) => {
                child.insert(SceneRoot(
                    asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.to_owned())),
                ));
            }
            Err(e) => {
                warn!("{e}; using procedural hull");
                child.insert((
                    Mesh3d(meshes.add(Cone::new(25.0, 80.0))),
                    MeshMaterial3d(materials.add(Color::srgb(0.8, 0.8, 0.85))),
                ));
            }
        }
    }
}

/// Attach a sphere mesh to each celestial body.  The body itself is pickable
/// but never minable.
pub fn attach_celestial_visual_system(
    mut commands: Commands,
    query: Query<(Entity, &CelestialBody), Added<CelestialBody>>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, body) in query.iter() {
        let texture = match require_asset(&body.texture_path) {
            Ok(path) => Some(asset_server.load(path.to_owned())),
            Err(e) => {
                warn!("{e}; {} rendered untextured", body.name);
                None
            }
        };
        let material = materials.add(StandardMaterial {
            base_color: if texture.is_some() {
                Color::WHITE
            } else {
                body.color
            },
            base_color_texture: texture,
            ..default()
        });
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Sphere::new(body.radius))),
            MeshMaterial3d(material),
            PickRadius(body.radius),
        ));
    }
}

// ── Per-frame ─────────────────────────────────────────────────────────────────

/// Rotate asteroids about (1,1,1) at their individual spin speed.
pub fn asteroid_spin_system(time: Res<Time>, mut q: Query<(&AsteroidSpin, &mut Transform)>) {
    let axis = Vec3::ONE.normalize();
    let dt = time.delta_secs();
    for (spin, mut transform) in q.iter_mut() {
        transform.rotate(Quat::from_axis_angle(axis, (spin.0 * dt).to_radians()));
    }
}

/// Copy the craft's simulated pose into its `Transform`.
pub fn sync_craft_transform_system(mut q: Query<(&Craft, &mut Transform)>) {
    for (craft, mut transform) in q.iter_mut() {
        transform.translation = craft.position().as_vec3();
        transform.rotation = Quat::from_mat3(&craft.rotation_matrix().as_mat3());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: u32) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn ray_hits_sphere_in_front() {
        let d = ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -10.0), 2.0);
        assert!((d.unwrap() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_sphere_behind_or_aside() {
        let behind = Vec3::new(0.0, 0.0, 10.0);
        let aside = Vec3::new(5.0, 0.0, -10.0);
        assert!(ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, behind, 2.0).is_none());
        assert!(ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, aside, 2.0).is_none());
    }

    #[test]
    fn ray_from_inside_sphere_hits_at_zero() {
        assert_eq!(
            ray_sphere_distance(Vec3::ZERO, Vec3::X, Vec3::ZERO, 1.0),
            Some(0.0)
        );
    }

    #[test]
    fn nearest_of_several_hits_wins() {
        let e = entities(3);
        let picked = pick_nearest(
            Vec3::ZERO,
            Vec3::NEG_Z,
            [
                (e[0], Vec3::new(0.0, 0.0, -50.0), 5.0),
                (e[1], Vec3::new(0.0, 0.0, -20.0), 5.0),
                (e[2], Vec3::new(30.0, 0.0, -10.0), 5.0),
            ],
        );
        assert_eq!(picked, Some(e[1]));
    }

    #[test]
    fn empty_scene_picks_nothing() {
        assert_eq!(pick_nearest(Vec3::ZERO, Vec3::X, []), None);
    }

    #[test]
    fn rock_mesh_is_deterministic_per_seed() {
        let positions = |m: &Mesh| {
            m.attribute(Mesh::ATTRIBUTE_POSITION)
                .and_then(|a| a.as_float3())
                .map(|p| p.to_vec())
                .unwrap()
        };
        let a = rock_mesh(10.0, 3);
        let b = rock_mesh(10.0, 3);
        let c = rock_mesh(10.0, 4);
        assert_eq!(positions(&a), positions(&b));
        assert_ne!(positions(&a), positions(&c));
        // 20 faces × 3 corners after flattening.
        assert_eq!(positions(&a).len(), 60);
        assert!(a.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
    }
}
