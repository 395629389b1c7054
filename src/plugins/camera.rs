use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::plugins::core_sim::SimSet;
use crate::plugins::player::Player;

/// Marker component for the single orbit camera.
#[derive(Component)]
pub struct OrbitCamera;

/// Runtime mutable orbit state (user-controlled angles & zoom).
#[derive(Resource)]
pub struct OrbitCameraState {
    pub yaw: f32,    // radians
    pub pitch: f32,  // radians
    pub radius: f32, // world units
}
impl Default for OrbitCameraState {
    fn default() -> Self {
        Self { yaw: 0.0, pitch: 18f32.to_radians(), radius: 5.5 }
    }
}

/// Configuration constants for orbit behavior & constraints.
#[derive(Resource)]
pub struct OrbitCameraConfig {
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub zoom_speed: f32,
    pub sens_yaw: f32,
    pub sens_pitch: f32,
    pub target_height_offset: f32,
    pub follow_rate: f32,
}
impl Default for OrbitCameraConfig {
    fn default() -> Self {
        Self {
            pitch_min: (-5f32).to_radians(),
            pitch_max: 70f32.to_radians(),
            radius_min: 2.0,
            radius_max: 18.0,
            zoom_speed: 0.6,
            sens_yaw: 0.005,
            sens_pitch: 0.005,
            target_height_offset: 0.9,
            follow_rate: 8.0,
        }
    }
}

/// Smoothed follow target (the player's chest height, lerped).
#[derive(Resource, Default)]
pub struct CameraFollow {
    pub smoothed_target: Vec3,
}

pub struct CameraPlugin;
impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OrbitCameraState::default())
            .insert_resource(OrbitCameraConfig::default())
            .insert_resource(CameraFollow::default())
            .add_systems(Update, (orbit_camera_input, orbit_camera_apply).chain().in_set(SimSet::Present));
    }
}

/// Mouse input updates orbit state: wheel zoom, right-drag yaw/pitch.
fn orbit_camera_input(
    mut state: ResMut<OrbitCameraState>,
    cfg: Res<OrbitCameraConfig>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut ev_motion: EventReader<MouseMotion>,
    mut ev_wheel: EventReader<MouseWheel>,
) {
    for w in ev_wheel.read() {
        let delta = w.y * cfg.zoom_speed;
        state.radius = (state.radius - delta).clamp(cfg.radius_min, cfg.radius_max);
    }

    if buttons.pressed(MouseButton::Right) {
        for m in ev_motion.read() {
            state.yaw -= m.delta.x * cfg.sens_yaw;
            state.pitch -= m.delta.y * cfg.sens_pitch;
        }
        state.pitch = state.pitch.clamp(cfg.pitch_min, cfg.pitch_max);
    } else {
        ev_motion.clear();
    }
}

/// Place the camera on its orbit around the smoothed player target.
fn orbit_camera_apply(
    time: Res<Time>,
    state: Res<OrbitCameraState>,
    cfg: Res<OrbitCameraConfig>,
    mut follow: ResMut<CameraFollow>,
    q_player: Query<&Transform, (With<Player>, Without<OrbitCamera>)>,
    mut q_cam: Query<&mut Transform, With<OrbitCamera>>,
) {
    let Ok(player_t) = q_player.get_single() else { return };
    let Ok(mut cam_t) = q_cam.get_single_mut() else { return };

    let raw_target = player_t.translation + Vec3::Y * cfg.target_height_offset;
    let blend = (time.delta_seconds() * cfg.follow_rate).min(1.0);
    follow.smoothed_target = follow.smoothed_target.lerp(raw_target, blend);

    let rot = Quat::from_rotation_y(state.yaw) * Quat::from_rotation_x(state.pitch);
    let offset = rot * (Vec3::Z * state.radius);
    cam_t.translation = follow.smoothed_target + offset;
    cam_t.look_at(follow.smoothed_target, Vec3::Y);
}
