// Procedural runner rig: a tree of named pivots (torso, head, shoulder and
// hip pivots, feet) under a character root, posed every frame from a single
// phase scalar. Used as the placeholder visual until a GLTF model is ready,
// and as the authoritative source of foot positions for kicks either way.
use bevy::math::primitives::{Cuboid, Sphere};
use bevy::prelude::*;

use crate::plugins::core_sim::SimSet;
use crate::plugins::opponent::{KickCooldown, Opponent};
use crate::plugins::pitch::{MatchDef, RunnerDef};
use crate::plugins::player::Player;

/// Per-character simulation state. Mutated once per frame by exactly one
/// controller: locomotion for the player, the AI for the opponent.
#[derive(Component, Debug)]
pub struct Runner {
    pub yaw: f32,
    pub phase: f32,
    pub moving: bool,
}
impl Runner {
    pub fn with_yaw(yaw: f32) -> Self {
        Self { yaw, phase: 0.0, moving: false }
    }
}

/// Which limb pivot a rig child entity is.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigPivot {
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    LeftFoot,
    RightFoot,
}

/// Foot entities cached on the root so the kick resolver can read their
/// world positions without walking the hierarchy.
#[derive(Component, Debug, Clone, Copy)]
pub struct RigFeet {
    pub left: Entity,
    pub right: Entity,
}

/// Marker for rig mesh children (wireframe toggle targets).
#[derive(Component)]
pub struct RigMesh;

/// Material handles for the two kits; the player entry doubles as the target
/// of the wireframe toggle and the kit color randomizer.
#[derive(Resource, Debug)]
pub struct KitMaterials {
    pub player: Handle<StandardMaterial>,
    pub opponent: Handle<StandardMaterial>,
}

/// Joint angles for one frame of the run cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbPose {
    pub left_leg: f32,
    pub right_leg: f32,
    pub left_arm: f32,
    pub right_arm: f32,
    pub left_foot: f32,
    pub right_foot: f32,
    pub bob: f32,
}

/// Sine-driven limb pose. The phase clock never stops; idling only shrinks
/// the amplitudes, which keeps a small micro-motion on a standing character.
pub fn limb_pose(phase: f32, moving: bool, def: &RunnerDef) -> LimbPose {
    use std::f32::consts::PI;
    let leg_amp = if moving { def.leg_amp } else { def.idle_leg_amp };
    let arm_amp = if moving { def.arm_amp } else { def.idle_arm_amp };
    let bob_amp = if moving { def.bob_amp } else { def.idle_bob_amp };
    LimbPose {
        left_leg: phase.sin() * leg_amp,
        right_leg: (phase + PI).sin() * leg_amp,
        left_arm: (phase + PI).sin() * arm_amp,
        right_arm: phase.sin() * arm_amp,
        left_foot: (-phase.sin()).max(0.0) * def.foot_tilt,
        right_foot: (-(phase + PI).sin()).max(0.0) * def.foot_tilt,
        bob: phase.sin().abs() * bob_amp,
    }
}

pub struct RunnerPlugin;
impl Plugin for RunnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_runners)
            .add_systems(Update, apply_rig_pose.in_set(SimSet::Present));
    }
}

pub fn spawn_runners(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
) {
    let player_mat = mats.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.72, 0.42),
        metallic: 0.1,
        perceptual_roughness: 0.7,
        ..default()
    });
    let opponent_mat = mats.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.36, 0.96),
        metallic: 0.05,
        perceptual_roughness: 0.6,
        ..default()
    });

    let player = spawn_rig(&mut commands, &mut meshes, player_mat.clone(), Vec3::new(0.0, 0.0, -2.5), 0.0);
    commands.entity(player).insert(Player);

    // Opponent starts across the center spot, facing the player.
    let opponent = spawn_rig(
        &mut commands,
        &mut meshes,
        opponent_mat.clone(),
        Vec3::new(0.0, 0.0, 2.5),
        std::f32::consts::PI,
    );
    commands.entity(opponent).insert((Opponent, KickCooldown::default()));

    commands.insert_resource(KitMaterials { player: player_mat, opponent: opponent_mat });
}

fn spawn_rig(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    mat: Handle<StandardMaterial>,
    pos: Vec3,
    yaw: f32,
) -> Entity {
    let torso = meshes.add(Mesh::from(Cuboid::new(0.35, 0.55, 0.2)));
    let head = meshes.add(Mesh::from(Sphere { radius: 0.12 }));
    let upper_arm = meshes.add(Mesh::from(Cuboid::new(0.12, 0.35, 0.12)));
    let upper_leg = meshes.add(Mesh::from(Cuboid::new(0.14, 0.45, 0.14)));
    let foot = meshes.add(Mesh::from(Cuboid::new(0.16, 0.06, 0.28)));

    let mut left_foot = Entity::PLACEHOLDER;
    let mut right_foot = Entity::PLACEHOLDER;

    let root = commands
        .spawn(SpatialBundle::from_transform(
            Transform::from_translation(pos).with_rotation(Quat::from_rotation_y(yaw)),
        ))
        .with_children(|parent| {
            parent.spawn((
                PbrBundle {
                    mesh: torso,
                    material: mat.clone(),
                    transform: Transform::from_xyz(0.0, 0.9, 0.0),
                    ..default()
                },
                RigMesh,
            ));
            parent.spawn((
                PbrBundle {
                    mesh: head,
                    material: mat.clone(),
                    transform: Transform::from_xyz(0.0, 1.25, 0.0),
                    ..default()
                },
                RigMesh,
            ));

            // Arm and leg pivots sit at the shoulder/hip so rotation swings the
            // limb rather than spinning it in place.
            let mut limb = |pivot: RigPivot, at: Vec3, mesh: Handle<Mesh>, mesh_offset: Vec3| {
                parent
                    .spawn((SpatialBundle::from_transform(Transform::from_translation(at)), pivot))
                    .with_children(|p| {
                        p.spawn((
                            PbrBundle {
                                mesh,
                                material: mat.clone(),
                                transform: Transform::from_translation(mesh_offset),
                                ..default()
                            },
                            RigMesh,
                        ));
                    })
                    .id()
            };
            limb(RigPivot::LeftArm, Vec3::new(0.25, 1.05, 0.0), upper_arm.clone(), Vec3::new(0.0, -0.175, 0.0));
            limb(RigPivot::RightArm, Vec3::new(-0.25, 1.05, 0.0), upper_arm.clone(), Vec3::new(0.0, -0.175, 0.0));
            limb(RigPivot::LeftLeg, Vec3::new(0.12, 0.6, 0.0), upper_leg.clone(), Vec3::new(0.0, -0.225, 0.0));
            limb(RigPivot::RightLeg, Vec3::new(-0.12, 0.6, 0.0), upper_leg.clone(), Vec3::new(0.0, -0.225, 0.0));

            left_foot = parent
                .spawn((
                    PbrBundle {
                        mesh: foot.clone(),
                        material: mat.clone(),
                        transform: Transform::from_xyz(0.12, 0.25, 0.05),
                        ..default()
                    },
                    RigPivot::LeftFoot,
                    RigMesh,
                ))
                .id();
            right_foot = parent
                .spawn((
                    PbrBundle {
                        mesh: foot,
                        material: mat,
                        transform: Transform::from_xyz(-0.12, 0.25, 0.05),
                        ..default()
                    },
                    RigPivot::RightFoot,
                    RigMesh,
                ))
                .id();
        })
        .id();

    commands
        .entity(root)
        .insert((Runner::with_yaw(yaw), RigFeet { left: left_foot, right: right_foot }));
    root
}

/// Copy each runner's yaw/phase into its rig: root orientation and bob, limb
/// pivot swings, and the small foot tilt at ground contact.
fn apply_rig_pose(
    def: Option<Res<MatchDef>>,
    mut q_roots: Query<(&Runner, &mut Transform, &Children)>,
    mut q_pivots: Query<(&RigPivot, &mut Transform), Without<Runner>>,
) {
    let Some(def) = def else { return };
    for (runner, mut transform, children) in &mut q_roots {
        let pose = limb_pose(runner.phase, runner.moving, &def.runner);
        transform.rotation = Quat::from_rotation_y(runner.yaw);
        transform.translation.y = pose.bob;
        for child in children {
            let Ok((pivot, mut t)) = q_pivots.get_mut(*child) else { continue };
            let angle = match pivot {
                RigPivot::LeftLeg => pose.left_leg,
                RigPivot::RightLeg => pose.right_leg,
                RigPivot::LeftArm => pose.left_arm,
                RigPivot::RightArm => pose.right_arm,
                RigPivot::LeftFoot => pose.left_foot,
                RigPivot::RightFoot => pose.right_foot,
            };
            t.rotation = Quat::from_rotation_x(angle);
        }
    }
}
