//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, before the schedule runs.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Record `delta` milliseconds on the `WorldTime` resource.
///
/// Negative deltas (a clock that went backwards) are treated as zero.
pub fn update_world_time(world: &mut World, delta: i64) {
    let mut wt = world.resource_mut::<WorldTime>();
    let delta = delta.max(0);
    wt.elapsed += delta;
    wt.delta = delta;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_world_time_accumulates() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, 16);
        update_world_time(&mut world, 17);
        let wt = *world.resource::<WorldTime>();
        assert_eq!(wt.elapsed, 33);
        assert_eq!(wt.delta, 17);
        assert_eq!(wt.frame_count, 2);
    }

    #[test]
    fn test_negative_delta_clamped() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, -5);
        assert_eq!(world.resource::<WorldTime>().delta, 0);
        assert_eq!(world.resource::<WorldTime>().elapsed, 0);
    }
}
