//! Mining sessions: draining a selected asteroid into the craft's ledger.
//!
//! ## Lifecycle
//!
//! | State      | Entered when                                  | Terminal |
//! |------------|-----------------------------------------------|----------|
//! | (Idle)     | craft carries no [`MiningSession`] component  | no       |
//! | `Active`   | a selection resolves to a minable asteroid    | no       |
//! | `Depleted` | the target reports removal after a drain      | yes      |
//! | `Stopped`  | superseded by a new selection, or target lost | yes      |
//!
//! A new selection always builds a fresh session; terminal sessions are never
//! reused.  [`mining_tick_system`] drives the craft's session once per frame
//! and publishes a [`TargetStatus`] value that the HUD polls.

use crate::asteroid::Asteroid;
use crate::craft::Craft;
use bevy::prelude::*;
use std::fmt;

/// Where a [`MiningSession`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Depleted,
    Stopped,
}

/// What one active tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningReport {
    /// Drained `mined` units; the target still holds `remaining`.
    Progress { mined: u32, remaining: u32 },
    /// Drained the last `mined` units; the target must now be removed.
    Depleted { mined: u32 },
}

/// A craft's ongoing drain of one asteroid.  Lives on the craft entity.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct MiningSession {
    target: Entity,
    drain: u32,
    state: SessionState,
}

impl MiningSession {
    /// Start an active session on `target`, draining `drain` units per tick.
    pub fn start(target: Entity, drain: u32) -> Self {
        Self {
            target,
            drain: drain.max(1),
            state: SessionState::Active,
        }
    }

    pub fn target(&self) -> Entity {
        self.target
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Stop immediately.  No effect on a session that already ended.
    pub fn stop(&mut self) {
        if self.is_active() {
            self.state = SessionState::Stopped;
        }
    }

    /// Drain the target once and credit the craft.
    ///
    /// Returns `None` unless the session is active.  A target that turns out
    /// to be already empty ends the session as `Depleted` without crediting.
    pub fn tick(&mut self, target: &mut Asteroid, craft: &mut Craft) -> Option<MiningReport> {
        if !self.is_active() {
            return None;
        }
        if target.is_depleted() {
            self.state = SessionState::Depleted;
            return Some(MiningReport::Depleted { mined: 0 });
        }
        let out = target.mine(self.drain);
        craft.collect(out.mined);
        if out.depleted {
            self.state = SessionState::Depleted;
            Some(MiningReport::Depleted { mined: out.mined })
        } else {
            Some(MiningReport::Progress {
                mined: out.mined,
                remaining: out.remaining,
            })
        }
    }
}

/// Status line shown to the player.  Written by selection and mining, read by
/// the HUD.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetStatus {
    #[default]
    NoTarget,
    Remaining {
        name: String,
        remaining: u32,
    },
    Depleted {
        name: String,
    },
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetStatus::NoTarget => write!(f, "No target selected."),
            TargetStatus::Remaining { name, remaining } => {
                write!(f, "{name} has {remaining} resources left.")
            }
            TargetStatus::Depleted { name } => write!(f, "{name} has been depleted and removed."),
        }
    }
}

/// Drive every craft's active session by one drain.
///
/// Depleted targets are despawned here, exactly once.  A session whose
/// target vanished is stopped.
pub fn mining_tick_system(
    mut commands: Commands,
    mut q_craft: Query<(&mut Craft, &mut MiningSession)>,
    mut q_asteroid: Query<&mut Asteroid>,
    mut status: ResMut<TargetStatus>,
) {
    for (mut craft, mut session) in q_craft.iter_mut() {
        if !session.is_active() {
            continue;
        }
        let target = session.target();
        let Ok(mut asteroid) = q_asteroid.get_mut(target) else {
            warn!("Mining target {target:?} no longer exists; stopping session");
            session.stop();
            *status = TargetStatus::NoTarget;
            continue;
        };

        match session.tick(&mut asteroid, &mut craft) {
            Some(MiningReport::Progress { remaining, .. }) => {
                debug!("Mining {}: {} left", asteroid.name(), remaining);
                *status = TargetStatus::Remaining {
                    name: asteroid.name().to_string(),
                    remaining,
                };
            }
            Some(MiningReport::Depleted { .. }) => {
                info!(
                    "{} depleted and removed; craft holds {}",
                    asteroid.name(),
                    craft.collected()
                );
                *status = TargetStatus::Depleted {
                    name: asteroid.name().to_string(),
                };
                commands.entity(target).despawn();
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Entity {
        Entity::PLACEHOLDER
    }

    #[test]
    fn active_session_drains_one_unit_per_tick() {
        let mut craft = Craft::default();
        let mut rock = Asteroid::new("Asteroid3", 3, 0);
        let mut s = MiningSession::start(target(), 1);

        assert_eq!(
            s.tick(&mut rock, &mut craft),
            Some(MiningReport::Progress {
                mined: 1,
                remaining: 2
            })
        );
        assert_eq!(craft.collected(), 1);
        assert!(s.is_active());
    }

    #[test]
    fn session_ends_depleted_on_last_unit() {
        let mut craft = Craft::default();
        let mut rock = Asteroid::new("Asteroid3", 2, 0);
        let mut s = MiningSession::start(target(), 1);

        s.tick(&mut rock, &mut craft);
        assert_eq!(
            s.tick(&mut rock, &mut craft),
            Some(MiningReport::Depleted { mined: 1 })
        );
        assert_eq!(s.state(), SessionState::Depleted);
        assert_eq!(craft.collected(), 2);

        // Terminal: further ticks do nothing.
        assert_eq!(s.tick(&mut rock, &mut craft), None);
        assert_eq!(craft.collected(), 2);
    }

    #[test]
    fn stopped_session_no_longer_drains() {
        let mut craft = Craft::default();
        let mut rock = Asteroid::new("A", 10, 0);
        let mut s = MiningSession::start(target(), 1);
        s.tick(&mut rock, &mut craft);
        s.stop();

        assert_eq!(s.state(), SessionState::Stopped);
        assert_eq!(s.tick(&mut rock, &mut craft), None);
        assert_eq!(rock.remaining(), 9);
    }

    #[test]
    fn stop_does_not_rewrite_a_depleted_session() {
        let mut craft = Craft::default();
        let mut rock = Asteroid::new("A", 1, 0);
        let mut s = MiningSession::start(target(), 1);
        s.tick(&mut rock, &mut craft);
        s.stop();
        assert_eq!(s.state(), SessionState::Depleted);
    }

    #[test]
    fn already_empty_target_ends_session_without_credit() {
        let mut craft = Craft::default();
        let mut rock = Asteroid::new("A", 0, 0);
        let mut s = MiningSession::start(target(), 1);
        assert_eq!(
            s.tick(&mut rock, &mut craft),
            Some(MiningReport::Depleted { mined: 0 })
        );
        assert_eq!(craft.collected(), 0);
    }

    #[test]
    fn zero_drain_is_raised_to_one() {
        let mut craft = Craft::default();
        let mut rock = Asteroid::new("A", 5, 0);
        let mut s = MiningSession::start(target(), 0);
        s.tick(&mut rock, &mut craft);
        assert_eq!(rock.remaining(), 4);
    }

    #[test]
    fn status_lines_render_exactly() {
        assert_eq!(TargetStatus::NoTarget.to_string(), "No target selected.");
        assert_eq!(
            TargetStatus::Remaining {
                name: "Asteroid5".into(),
                remaining: 37
            }
            .to_string(),
            "Asteroid5 has 37 resources left."
        );
        assert_eq!(
            TargetStatus::Depleted {
                name: "Asteroid5".into()
            }
            .to_string(),
            "Asteroid5 has been depleted and removed."
        );
    }
}
