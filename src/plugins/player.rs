// Player input mapping and locomotion: key snapshot -> movement intent,
// position integration, smoothed facing, and the run-cycle phase clock.
use bevy::prelude::*;

use crate::plugins::camera::OrbitCamera;
use crate::plugins::core_sim::{turn_toward, Settings, SimSet};
use crate::plugins::pitch::MatchDef;
use crate::plugins::runner::Runner;

#[derive(Component)]
pub struct Player;

/// Raw key snapshot to a `(x, z)` intent vector. Arrow keys and WASD both
/// count; opposing keys cancel; the result is unit length or zero.
pub fn movement_intent(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut x = 0.0;
    let mut z = 0.0;
    if keys.pressed(KeyCode::ArrowLeft) || keys.pressed(KeyCode::KeyA) {
        x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) || keys.pressed(KeyCode::KeyD) {
        x += 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) || keys.pressed(KeyCode::KeyW) {
        z -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) || keys.pressed(KeyCode::KeyS) {
        z += 1.0;
    }
    Vec2::new(x, z).normalize_or_zero()
}

/// Remap an intent vector into camera space: camera forward/right projected
/// onto the ground plane, renormalized. Falls back to the raw intent when the
/// camera looks straight down and the projection degenerates.
pub fn camera_relative_intent(intent: Vec2, cam: &Transform) -> Vec2 {
    let f3 = cam.forward();
    let r3 = cam.right();
    let forward = Vec2::new(f3.x, f3.z).normalize_or_zero();
    let right = Vec2::new(r3.x, r3.z).normalize_or_zero();
    let mapped = (right * intent.x - forward * intent.y).normalize_or_zero();
    if mapped == Vec2::ZERO && intent != Vec2::ZERO {
        intent
    } else {
        mapped
    }
}

/// One locomotion step's outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionStep {
    pub pos: Vec3,
    pub yaw: f32,
    pub phase: f32,
    pub moving: bool,
}

/// Integrate a character's position, facing, and run-cycle phase for one
/// frame. Pure; the system below just feeds it ECS state.
pub fn step_locomotion(
    pos: Vec3,
    yaw: f32,
    phase: f32,
    intent: Vec2,
    auto_run: bool,
    multiplier: f32,
    def: &MatchDef,
    dt: f32,
) -> LocomotionStep {
    let r = def.runner;
    let mut out = LocomotionStep {
        pos,
        yaw,
        // the phase clock never pauses; idle just lowers the pose amplitude
        phase: phase + dt * multiplier * r.run_cycles,
        moving: intent != Vec2::ZERO || auto_run,
    };

    if intent != Vec2::ZERO {
        out.pos.x += intent.x * r.move_speed * multiplier * dt;
        out.pos.z += intent.y * r.move_speed * multiplier * dt;
        let target = intent.x.atan2(intent.y);
        out.yaw = turn_toward(yaw, target, dt * r.turn_rate);
    } else if auto_run {
        out.pos.x += dt * r.move_speed * multiplier;
    }

    // Soft clamp to the pitch interior; the boundary is not a wall.
    out.pos.x = out.pos.x.clamp(-def.field.half_width, def.field.half_width);
    out.pos.z = out.pos.z.clamp(-def.field.half_length, def.field.half_length);
    out
}

pub struct PlayerPlugin;
impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, player_locomotion.in_set(SimSet::Locomotion));
    }
}

fn player_locomotion(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    def: Option<Res<MatchDef>>,
    q_cam: Query<&Transform, (With<OrbitCamera>, Without<Player>)>,
    mut q_player: Query<(&mut Transform, &mut Runner), With<Player>>,
) {
    let Some(def) = def else { return };
    let Ok((mut transform, mut runner)) = q_player.get_single_mut() else { return };

    let mut intent = movement_intent(&keys);
    if settings.camera_relative && intent != Vec2::ZERO {
        if let Ok(cam) = q_cam.get_single() {
            intent = camera_relative_intent(intent, cam);
        }
    }

    let step = step_locomotion(
        transform.translation,
        runner.yaw,
        runner.phase,
        intent,
        settings.auto_run,
        settings.speed_multiplier,
        &def,
        time.delta_seconds(),
    );
    transform.translation.x = step.pos.x;
    transform.translation.z = step.pos.z;
    runner.yaw = step.yaw;
    runner.phase = step.phase;
    runner.moving = step.moving;
}
