use bevy_ecs::prelude::Resource;

/// Simulation clock of a gameplay scene, in milliseconds.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldTime {
    /// Sum of all deltas since the scene was built.
    pub elapsed: i64,
    /// Delta of the frame being simulated.
    pub delta: i64,
    pub frame_count: u64,
}
