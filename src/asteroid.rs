//! Asteroids (depletable resource nodes) and the startup field generator.
//!
//! An asteroid entity carries the [`Asteroid`] component and a `Transform`.
//! Its visual lives on a child entity attached by
//! [`crate::rendering::attach_asteroid_visual_system`]; the domain entity never
//! refers to its renderable.

use crate::config::FlightConfig;
use crate::constants::FIELD_RADIUS;
use bevy::math::DVec3;
use bevy::prelude::*;
use rand::Rng;
use std::ops::RangeInclusive;

/// A depletable resource node.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Asteroid {
    name: String,
    remaining: u32,
    /// Index into [`FlightConfig::asteroid_models`].
    variant: usize,
    removed: bool,
}

/// Result of a single [`Asteroid::mine`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MineOutcome {
    /// Units actually removed (`min(remaining, amount)`).
    pub mined: u32,
    /// Units left after this call.
    pub remaining: u32,
    /// `true` only on the call that emptied the asteroid.  The owner must
    /// remove the entity when it sees this; it is never reported twice.
    pub depleted: bool,
}

impl Asteroid {
    pub fn new(name: impl Into<String>, remaining: u32, variant: usize) -> Self {
        Self {
            name: name.into(),
            remaining,
            variant,
            removed: remaining == 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn variant(&self) -> usize {
        self.variant
    }

    /// Whether the asteroid has been emptied and reported for removal.
    pub fn is_depleted(&self) -> bool {
        self.removed
    }

    /// Remove up to `amount` units.
    ///
    /// Mining an emptied asteroid is a no-op returning `mined = 0`.
    pub fn mine(&mut self, amount: u32) -> MineOutcome {
        if self.removed {
            return MineOutcome {
                mined: 0,
                remaining: 0,
                depleted: false,
            };
        }
        let mined = self.remaining.min(amount);
        self.remaining -= mined;
        let depleted = self.remaining == 0;
        self.removed = depleted;
        MineOutcome {
            mined,
            remaining: self.remaining,
            depleted,
        }
    }
}

/// Cosmetic rotation about the (1,1,1) axis, degrees per second.
#[derive(Component, Debug, Clone, Copy)]
pub struct AsteroidSpin(pub f32);

/// Everything needed to spawn one asteroid.
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidSeed {
    pub name: String,
    pub position: DVec3,
    pub resources: u32,
    pub variant: usize,
    pub spin_speed: f32,
}

/// Sampling parameters for [`populate`].
#[derive(Debug, Clone)]
pub struct FieldParams {
    pub count: usize,
    pub bounding_radius: f64,
    pub resources: RangeInclusive<u32>,
    pub variants: usize,
    pub spin_speed: (f32, f32),
}

/// Largest radius whose `[-r, r]` span is still finite when sampled.
const MAX_SAMPLE_RADIUS: f64 = f64::MAX / 4.0;

/// Clamp a configured radius to something [`populate`] can sample.
/// NaN collapses to zero; infinities and huge values hit the ceiling.
fn sample_radius(radius: f64) -> f64 {
    if radius.is_nan() {
        0.0
    } else {
        radius.abs().min(MAX_SAMPLE_RADIUS)
    }
}

impl FieldParams {
    pub fn from_config(config: &FlightConfig) -> Self {
        let bounding_radius = if config.field_radius.is_finite() {
            sample_radius(config.field_radius)
        } else {
            warn!(
                "field_radius {} is not finite; using {FIELD_RADIUS}",
                config.field_radius
            );
            FIELD_RADIUS
        };
        Self {
            count: config.asteroid_count,
            bounding_radius,
            resources: config.resource_range(),
            variants: config.asteroid_models.len(),
            spin_speed: (config.spin_speed_min, config.spin_speed_max),
        }
    }
}

/// Generate `params.count` asteroid seeds.
///
/// Each coordinate is drawn independently and uniformly from
/// `[-bounding_radius, bounding_radius]`; starting resources are uniform over
/// `params.resources`.  Names are `Asteroid0`, `Asteroid1`, …
pub fn populate(rng: &mut impl Rng, params: &FieldParams) -> Vec<AsteroidSeed> {
    let r = sample_radius(params.bounding_radius);
    let (spin_lo, spin_hi) = params.spin_speed;
    (0..params.count)
        .map(|i| {
            let mut coord = || {
                if r > 0.0 {
                    rng.gen_range(-r..=r)
                } else {
                    0.0
                }
            };
            let position = DVec3::new(coord(), coord(), coord());
            let spin_speed = if spin_hi > spin_lo {
                rng.gen_range(spin_lo..spin_hi)
            } else {
                spin_lo
            };
            AsteroidSeed {
                name: format!("Asteroid{i}"),
                position,
                resources: rng.gen_range(params.resources.clone()),
                variant: if params.variants > 0 {
                    rng.gen_range(0..params.variants)
                } else {
                    0
                },
                spin_speed,
            }
        })
        .collect()
}

/// Spawn a single asteroid entity from its seed.
pub fn spawn_asteroid(commands: &mut Commands, seed: AsteroidSeed) -> Entity {
    commands
        .spawn((
            Name::new(seed.name.clone()),
            Asteroid::new(seed.name, seed.resources, seed.variant),
            AsteroidSpin(seed.spin_speed),
            Transform::from_translation(seed.position.as_vec3()),
            Visibility::default(),
        ))
        .id()
}

/// Startup system: scatter the asteroid field.
pub fn spawn_asteroid_field(mut commands: Commands, config: Res<FlightConfig>) {
    let params = FieldParams::from_config(&config);
    let seeds = populate(&mut rand::thread_rng(), &params);
    let total: u64 = seeds.iter().map(|s| u64::from(s.resources)).sum();
    for seed in seeds {
        spawn_asteroid(&mut commands, seed);
    }
    info!(
        "Asteroid field: {} asteroids within ±{} units, {} resources total",
        params.count, params.bounding_radius, total
    );
}

// ── Celestial bodies ──────────────────────────────────────────────────────────

/// A large static body (planet).  Pickable but never minable.
#[derive(Component, Debug, Clone)]
pub struct CelestialBody {
    pub name: String,
    pub radius: f32,
    pub color: Color,
    pub texture_path: String,
}

/// Startup system: place Earth.
pub fn spawn_celestial_bodies(mut commands: Commands, config: Res<FlightConfig>) {
    let [x, y, z] = config.earth_position;
    commands.spawn((
        Name::new("Earth"),
        CelestialBody {
            name: "Earth".into(),
            radius: config.earth_radius,
            color: Color::srgb(0.1, 0.2, 0.9),
            texture_path: config.earth_texture_path.clone(),
        },
        Transform::from_xyz(x, y, z),
        Visibility::default(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(count: usize, radius: f64) -> FieldParams {
        FieldParams {
            count,
            bounding_radius: radius,
            resources: 10..=500,
            variants: 8,
            spin_speed: (1.0, 5.0),
        }
    }

    // ── mine ──────────────────────────────────────────────────────────────────

    #[test]
    fn mining_thirty_seven_units_one_at_a_time() {
        let mut a = Asteroid::new("Asteroid0", 37, 0);
        for i in 1..37 {
            let out = a.mine(1);
            assert_eq!(out.mined, 1);
            assert_eq!(out.remaining, 37 - i);
            assert!(!out.depleted);
        }
        let last = a.mine(1);
        assert_eq!(
            last,
            MineOutcome {
                mined: 1,
                remaining: 0,
                depleted: true
            }
        );
        assert!(a.is_depleted());

        let after = a.mine(1);
        assert_eq!(after.mined, 0);
        assert!(!after.depleted, "removal must only be reported once");
    }

    #[test]
    fn removal_is_reported_exactly_once_for_any_size() {
        for r in [1, 2, 10, 123, 500] {
            let mut a = Asteroid::new("A", r, 0);
            let removals = (0..r + 5).filter(|_| a.mine(1).depleted).count();
            assert_eq!(removals, 1, "start={r}");
            assert_eq!(a.remaining(), 0);
        }
    }

    #[test]
    fn large_request_is_capped_at_remaining() {
        let mut a = Asteroid::new("A", 4, 0);
        let out = a.mine(10);
        assert_eq!(out.mined, 4);
        assert!(out.depleted);
    }

    #[test]
    fn empty_asteroid_never_underflows() {
        let mut a = Asteroid::new("A", 0, 0);
        assert!(a.is_depleted());
        for _ in 0..3 {
            let out = a.mine(1);
            assert_eq!(out.mined, 0);
            assert_eq!(out.remaining, 0);
        }
    }

    #[test]
    fn zero_amount_mines_nothing() {
        let mut a = Asteroid::new("A", 5, 0);
        let out = a.mine(0);
        assert_eq!(out.mined, 0);
        assert_eq!(a.remaining(), 5);
        assert!(!out.depleted);
    }

    // ── populate ──────────────────────────────────────────────────────────────

    #[test]
    fn populate_thousand_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let seeds = populate(&mut rng, &params(1000, 100_000.0));
        assert_eq!(seeds.len(), 1000);
        for s in &seeds {
            for c in [s.position.x, s.position.y, s.position.z] {
                assert!((-100_000.0..=100_000.0).contains(&c), "{c} out of range");
            }
            assert!((10..=500).contains(&s.resources));
            assert!(s.variant < 8);
            assert!((1.0..5.0).contains(&s.spin_speed));
        }
    }

    #[test]
    fn populate_spreads_across_the_whole_cube() {
        let mut rng = StdRng::seed_from_u64(11);
        let seeds = populate(&mut rng, &params(1000, 100_000.0));
        // Every octant should be hit with 1000 samples.
        let mut octants = [0usize; 8];
        for s in &seeds {
            let idx = (s.position.x > 0.0) as usize
                | ((s.position.y > 0.0) as usize) << 1
                | ((s.position.z > 0.0) as usize) << 2;
            octants[idx] += 1;
        }
        assert!(octants.iter().all(|&n| n > 0), "{octants:?}");
    }

    #[test]
    fn populate_names_are_sequential() {
        let mut rng = StdRng::seed_from_u64(1);
        let seeds = populate(&mut rng, &params(3, 10.0));
        let names: Vec<_> = seeds.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Asteroid0", "Asteroid1", "Asteroid2"]);
    }

    #[test]
    fn populate_is_deterministic_for_a_fixed_seed() {
        let a = populate(&mut StdRng::seed_from_u64(99), &params(50, 500.0));
        let b = populate(&mut StdRng::seed_from_u64(99), &params(50, 500.0));
        assert_eq!(a, b);
    }

    #[test]
    fn populate_survives_overflowing_radius() {
        for r in [1e308, f64::MAX, f64::INFINITY, f64::NAN] {
            let seeds = populate(&mut StdRng::seed_from_u64(5), &params(20, r));
            assert_eq!(seeds.len(), 20);
            assert!(seeds.iter().all(|s| s.position.is_finite()), "radius {r}");
        }
    }

    #[test]
    fn non_finite_config_radius_falls_back_to_default() {
        let config = FlightConfig {
            field_radius: f64::INFINITY,
            ..Default::default()
        };
        assert_eq!(FieldParams::from_config(&config).bounding_radius, FIELD_RADIUS);
    }

    #[test]
    fn zero_resource_floor_never_spawns_empty_asteroids() {
        let config = FlightConfig {
            resource_min: 0,
            resource_max: 2,
            ..Default::default()
        };
        let field = FieldParams::from_config(&config);
        let seeds = populate(&mut StdRng::seed_from_u64(8), &FieldParams { count: 200, ..field });
        assert!(seeds.iter().all(|s| s.resources >= 1));
    }

    #[test]
    fn populate_zero_radius_puts_everything_at_origin() {
        let seeds = populate(&mut StdRng::seed_from_u64(3), &params(5, 0.0));
        assert!(seeds.iter().all(|s| s.position == DVec3::ZERO));
    }
}
