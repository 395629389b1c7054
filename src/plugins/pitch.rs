// Match definition loading (RON) and pitch setup: ground plane, goal mouths,
// posts, lights, camera, and the ball entity.
use bevy::prelude::*;
use bevy::math::primitives::{Cuboid, Sphere};
use bevy::render::camera::ClearColorConfig;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;

use crate::plugins::ball::{Ball, BallMotion};
use crate::plugins::camera::OrbitCamera;

// ----------------------- Match Definition (RON) -----------------------

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct FieldDef {
    pub half_width: f32,
    pub half_length: f32,
    pub corner_inset: f32,
}
impl Default for FieldDef {
    fn default() -> Self {
        Self { half_width: 9.5, half_length: 9.5, corner_inset: 0.5 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct GoalDef {
    pub line_z: f32,
    pub half_width: f32,
    pub post_radius: f32,
}
impl Default for GoalDef {
    fn default() -> Self {
        Self { line_z: 9.5, half_width: 2.0, post_radius: 0.08 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct BallDef {
    pub radius: f32,
    pub spawn_hover: f32,
    pub gravity: f32,
    pub friction: f32,
    pub restitution: f32,
    pub bounce_threshold: f32,
    pub bounce_damp: f32,
    pub post_restitution: f32,
}
impl Default for BallDef {
    fn default() -> Self {
        Self {
            radius: 0.15,
            spawn_hover: 0.02,
            gravity: -9.8,
            friction: 0.96,
            restitution: 0.25,
            bounce_threshold: 0.1,
            bounce_damp: 0.92,
            post_restitution: 0.6,
        }
    }
}
impl BallDef {
    /// Height the ball settles at on the ground.
    pub fn rest_height(&self) -> f32 {
        self.radius
    }
    /// Kickoff position at the center spot.
    pub fn spawn_pos(&self) -> Vec3 {
        Vec3::new(0.0, self.radius + self.spawn_hover, 0.0)
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct KickDef {
    pub contact_radius: f32,
    pub base_power: f32,
    pub charge_scale: f32,
    pub max_charge: f32,
    pub forward_bias: f32,
}
impl Default for KickDef {
    fn default() -> Self {
        Self { contact_radius: 0.9, base_power: 4.0, charge_scale: 6.0, max_charge: 2.0, forward_bias: 0.25 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct AiDef {
    pub speed: f32,
    pub seek_epsilon: f32,
    pub kick_range: f32,
    pub power_base: f32,
    pub power_jitter: f32,
    pub lift_base: f32,
    pub lift_jitter: f32,
    pub cooldown_base: f32,
    pub cooldown_jitter: f32,
    pub turn_rate: f32,
}
impl Default for AiDef {
    fn default() -> Self {
        Self {
            speed: 1.0,
            seek_epsilon: 0.1,
            kick_range: 0.9,
            power_base: 3.5,
            power_jitter: 2.0,
            lift_base: 1.2,
            lift_jitter: 0.8,
            cooldown_base: 1.2,
            cooldown_jitter: 1.2,
            turn_rate: 6.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RunnerDef {
    pub move_speed: f32,
    pub run_cycles: f32,
    pub turn_rate: f32,
    pub leg_amp: f32,
    pub idle_leg_amp: f32,
    pub arm_amp: f32,
    pub idle_arm_amp: f32,
    pub bob_amp: f32,
    pub idle_bob_amp: f32,
    pub foot_tilt: f32,
    pub contact_reach: f32,
    pub push_base: f32,
    pub push_move_bonus: f32,
}
impl Default for RunnerDef {
    fn default() -> Self {
        Self {
            move_speed: 1.2,
            run_cycles: 6.0,
            turn_rate: 8.0,
            leg_amp: 1.0,
            idle_leg_amp: 0.18,
            arm_amp: 0.9,
            idle_arm_amp: 0.15,
            bob_amp: 0.06,
            idle_bob_amp: 0.01,
            foot_tilt: 0.2,
            contact_reach: 0.45,
            push_base: 0.4,
            push_move_bonus: 0.6,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelsDef {
    pub player: String,
    pub opponent: String,
    pub scale: f32,
}
impl Default for ModelsDef {
    fn default() -> Self {
        Self { player: "models/runner.glb".into(), opponent: "models/runner.glb".into(), scale: 0.3 }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, Default)]
pub struct MatchDef {
    pub field: FieldDef,
    pub goal: GoalDef,
    pub ball: BallDef,
    pub kick: KickDef,
    pub ai: AiDef,
    pub runner: RunnerDef,
    pub models: ModelsDef,
}

/// A goal post footprint on the ground plane.
#[derive(Debug, Clone, Copy)]
pub struct Post {
    pub x: f32,
    pub z: f32,
    pub radius: f32,
}

impl MatchDef {
    /// The four static posts, one pair per goal mouth.
    pub fn posts(&self) -> [Post; 4] {
        let g = self.goal;
        [
            Post { x: -g.half_width, z: g.line_z, radius: g.post_radius },
            Post { x: g.half_width, z: g.line_z, radius: g.post_radius },
            Post { x: -g.half_width, z: -g.line_z, radius: g.post_radius },
            Post { x: g.half_width, z: -g.line_z, radius: g.post_radius },
        ]
    }

    /// Corner the ball is returned to after leaving the field, inset from the
    /// true corner and picked on the side the ball exited.
    pub fn nearest_corner(&self, pos: Vec3) -> Vec3 {
        let f = self.field;
        let cx = if pos.x >= 0.0 { f.half_width - f.corner_inset } else { -(f.half_width - f.corner_inset) };
        let cz = if pos.z >= 0.0 { f.half_length - f.corner_inset } else { -(f.half_length - f.corner_inset) };
        Vec3::new(cx, self.ball.rest_height(), cz)
    }
}

// ----------------------- Plugin -----------------------

pub struct PitchPlugin;
impl Plugin for PitchPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (load_match_def, spawn_pitch.after(load_match_def)));
    }
}

// ----------------------- Systems -----------------------

pub fn load_match_def(mut commands: Commands) {
    #[cfg(target_arch = "wasm32")]
    {
        // Embed the match definition at compile time for web (no filesystem
        // access in browser).
        let data = include_str!("../../assets/config/match.ron");
        match ron::from_str::<MatchDef>(data) {
            Ok(def) => commands.insert_resource(def),
            Err(e) => {
                error!("Failed to parse embedded match config: {e}");
                commands.insert_resource(MatchDef::default());
            }
        }
        return;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = "assets/config/match.ron";
        match fs::read_to_string(path) {
            Ok(data) => match ron::from_str::<MatchDef>(&data) {
                Ok(def) => commands.insert_resource(def),
                Err(e) => {
                    error!("Failed to parse {path}: {e}; using built-in tuning");
                    commands.insert_resource(MatchDef::default());
                }
            },
            Err(e) => {
                error!("Failed to read {path}: {e}; using built-in tuning");
                commands.insert_resource(MatchDef::default());
            }
        }
    }
}

fn spawn_pitch(
    mut commands: Commands,
    def: Res<MatchDef>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
) {
    // Camera
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 1.6, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
            camera: Camera {
                clear_color: ClearColorConfig::Custom(Color::srgb(0.03, 0.06, 0.14)),
                ..default()
            },
            projection: PerspectiveProjection { fov: 45f32.to_radians(), near: 0.1, far: 100.0, ..default() }.into(),
            ..default()
        },
        OrbitCamera,
    ));

    // Key light
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight { illuminance: 12_000.0, shadows_enabled: true, ..default() },
        transform: Transform::from_xyz(3.0, 4.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    // Ground plane
    let plane_mat = mats.add(StandardMaterial {
        base_color: Color::srgb(0.024, 0.031, 0.039),
        metallic: 0.0,
        perceptual_roughness: 1.0,
        ..default()
    });
    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(def.field.half_width * 2.0 + 1.0, def.field.half_length * 2.0 + 1.0)),
        material: plane_mat,
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..default()
    });

    // Goal frames: two posts and a crossbar per mouth.
    let post_mat = mats.add(StandardMaterial {
        base_color: Color::WHITE,
        metallic: 0.3,
        perceptual_roughness: 0.6,
        ..default()
    });
    let post_mesh = meshes.add(Mesh::from(Cuboid::new(0.12, 1.2, 0.12)));
    for p in def.posts() {
        commands.spawn(PbrBundle {
            mesh: post_mesh.clone(),
            material: post_mat.clone(),
            transform: Transform::from_xyz(p.x, 0.6, p.z),
            ..default()
        });
    }
    let bar_mesh = meshes.add(Mesh::from(Cuboid::new(def.goal.half_width * 2.0, 0.12, 0.12)));
    for line_z in [def.goal.line_z, -def.goal.line_z] {
        commands.spawn(PbrBundle {
            mesh: bar_mesh.clone(),
            material: post_mat.clone(),
            transform: Transform::from_xyz(0.0, 1.2, line_z),
            ..default()
        });
    }

    // Ball
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Mesh::from(Sphere { radius: def.ball.radius })),
            material: mats.add(StandardMaterial {
                base_color: Color::WHITE,
                metallic: 0.2,
                perceptual_roughness: 0.6,
                ..default()
            }),
            transform: Transform::from_translation(def.ball.spawn_pos()),
            ..default()
        },
        Ball,
        BallMotion { vel: Vec3::ZERO },
    ));
}
