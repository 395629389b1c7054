use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Core simulation timing, shared settings, and the per-frame system ordering.
#[derive(Resource, Default, Debug)]
pub struct SimState {
    pub frame: u64,
    pub elapsed_seconds: f32,
}

/// Externally settable knobs (speed slider, wireframe toggle, debug flags).
/// Not persisted; overrides flow straight into the locomotion and rig systems.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Settings {
    pub speed_multiplier: f32,
    pub auto_run: bool,
    pub camera_relative: bool,
    pub wireframe: bool,
}
impl Default for Settings {
    fn default() -> Self {
        Self { speed_multiplier: 1.0, auto_run: false, camera_relative: false, wireframe: false }
    }
}

/// Seedable randomness source for the opponent AI. Inserted from entropy at
/// startup; tests insert a fixed seed instead.
#[derive(Resource)]
pub struct AiRng(pub StdRng);
impl Default for AiRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Frame pipeline stages. The sim is single-threaded by construction: each
/// set runs to completion before the next, so character transforms, ball
/// state, and scores see a strict write order within a frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Locomotion,
    Ai,
    Kick,
    Physics,
    Scoring,
    Present,
}

pub struct CoreSimPlugin;
impl Plugin for CoreSimPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimState::default())
            .init_resource::<Settings>() // respect pre-inserted Settings (e.g. from tests)
            .init_resource::<AiRng>()
            .configure_sets(
                Update,
                (
                    SimSet::Input,
                    SimSet::Locomotion,
                    SimSet::Ai,
                    SimSet::Kick,
                    SimSet::Physics,
                    SimSet::Scoring,
                    SimSet::Present,
                )
                    .chain(),
            )
            .add_systems(Update, advance_sim.in_set(SimSet::Input));
    }
}

fn advance_sim(time: Res<Time>, mut sim: ResMut<SimState>) {
    sim.frame += 1;
    sim.elapsed_seconds += time.delta_seconds();
}

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(mut a: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while a > PI {
        a -= TAU;
    }
    while a <= -PI {
        a += TAU;
    }
    a
}

/// Exponentially smooth `current` toward `target` along the shortest arc.
/// `blend` is the per-frame factor, already scaled by dt and clamped to 1.
pub fn turn_toward(current: f32, target: f32, blend: f32) -> f32 {
    let diff = wrap_angle(target - current);
    wrap_angle(current + diff * blend.min(1.0))
}

/// Ground-plane forward vector for a yaw angle. Yaw 0 faces +Z, matching
/// `atan2(x, z)` movement headings.
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}
