//! Target selection: from a picked scene entity to a mining session.
//!
//! The presentation layer ray-picks the nearest entity under the pointer and
//! writes a [`TargetPicked`] message.  [`selection_system`] walks that entity's
//! ancestry up to the first [`Asteroid`] and, if one is found, replaces the
//! craft's mining session with a fresh one aimed at it.  A miss leaves the
//! current session untouched.

use crate::asteroid::Asteroid;
use crate::config::FlightConfig;
use crate::craft::Craft;
use crate::error::{SimError, SimResult};
use crate::mining::{MiningSession, TargetStatus};
use bevy::prelude::*;

/// One discrete selection click: the nearest entity under the pointer, if any.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetPicked {
    pub entity: Option<Entity>,
}

/// Walk from `start` through its ancestors and return the first entity for
/// which `is_node` holds.
pub fn find_resource_node(
    start: Entity,
    parent_of: impl Fn(Entity) -> Option<Entity>,
    is_node: impl Fn(Entity) -> bool,
) -> Option<Entity> {
    let mut current = Some(start);
    while let Some(entity) = current {
        if is_node(entity) {
            return Some(entity);
        }
        current = parent_of(entity);
    }
    None
}

/// Resolve a pick to a minable asteroid entity.
fn resolve_target(
    picked: Option<Entity>,
    parents: &Query<&ChildOf>,
    asteroids: &Query<&Asteroid>,
) -> SimResult<Entity> {
    let found = picked.and_then(|start| {
        find_resource_node(
            start,
            |e| parents.get(e).ok().map(ChildOf::parent),
            |e| asteroids.contains(e),
        )
    });
    let Some(entity) = found else {
        return Err(SimError::InvalidTarget { picked });
    };
    match asteroids.get(entity) {
        Ok(asteroid) if asteroid.is_depleted() => Err(SimError::AlreadyDepleted {
            name: asteroid.name().to_string(),
        }),
        Ok(_) => Ok(entity),
        Err(_) => Err(SimError::InvalidTarget { picked }),
    }
}

/// Consume selection clicks and start or supersede the craft's session.
pub fn selection_system(
    mut commands: Commands,
    mut picks: MessageReader<TargetPicked>,
    parents: Query<&ChildOf>,
    asteroids: Query<&Asteroid>,
    mut q_craft: Query<(Entity, Option<&mut MiningSession>), With<Craft>>,
    mut status: ResMut<TargetStatus>,
    config: Res<FlightConfig>,
) {
    for pick in picks.read() {
        let target = match resolve_target(pick.entity, &parents, &asteroids) {
            Ok(target) => target,
            Err(e) => {
                info!("Selection ignored: {e}");
                *status = TargetStatus::NoTarget;
                continue;
            }
        };
        let Ok(asteroid) = asteroids.get(target) else {
            continue;
        };

        let Ok((craft, session)) = q_craft.single_mut() else {
            warn!("Selected {} but no craft is present", asteroid.name());
            continue;
        };

        let fresh = MiningSession::start(target, config.drain_per_tick);
        match session {
            Some(mut current) => {
                if current.is_active() && current.target() != target {
                    debug!("Stopping session on {:?}", current.target());
                }
                current.stop();
                *current = fresh;
            }
            None => {
                commands.entity(craft).insert(fresh);
            }
        }

        info!(
            "{} selected with {} resources left",
            asteroid.name(),
            asteroid.remaining()
        );
        *status = TargetStatus::Remaining {
            name: asteroid.name().to_string(),
            remaining: asteroid.remaining(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ids(n: u32) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn node_itself_is_found() {
        let e = ids(1);
        let found = find_resource_node(e[0], |_| None, |x| x == e[0]);
        assert_eq!(found, Some(e[0]));
    }

    #[test]
    fn walks_up_to_nearest_node_ancestor() {
        // e0 (root) <- e1 (asteroid) <- e2 <- e3 (picked mesh)
        let e = ids(4);
        let parents: HashMap<Entity, Entity> = [(e[1], e[0]), (e[2], e[1]), (e[3], e[2])].into();
        let found = find_resource_node(e[3], |x| parents.get(&x).copied(), |x| x == e[1]);
        assert_eq!(found, Some(e[1]));
    }

    #[test]
    fn nearest_ancestor_wins_over_farther_ones() {
        let e = ids(3);
        let parents: HashMap<Entity, Entity> = [(e[1], e[0]), (e[2], e[1])].into();
        let found = find_resource_node(
            e[2],
            |x| parents.get(&x).copied(),
            |x| x == e[0] || x == e[1],
        );
        assert_eq!(found, Some(e[1]));
    }

    #[test]
    fn reaching_the_root_without_a_node_is_none() {
        let e = ids(3);
        let parents: HashMap<Entity, Entity> = [(e[1], e[0]), (e[2], e[1])].into();
        let found = find_resource_node(e[2], |x| parents.get(&x).copied(), |_| false);
        assert_eq!(found, None);
    }
}
