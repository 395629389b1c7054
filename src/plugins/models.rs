// Optional high-fidelity GLTF characters. Each runner rig queues a model
// load; when the asset settles the rig is hidden and the model follows it.
// Until then (or forever, on load failure) the procedural rig is the visual.
//
// Clip playback is a small explicit state machine per model - Idle,
// Locomotion, or a timed OneShot - advanced from elapsed time each frame.
// No completion callbacks.
use bevy::gltf::Gltf;
use bevy::prelude::*;
use std::time::Duration;

use crate::plugins::core_sim::{turn_toward, SimSet};
use crate::plugins::kicking::KickEvent;
use crate::plugins::pitch::MatchDef;
use crate::plugins::player::Player;
use crate::plugins::runner::Runner;

const LOCOMOTION_CLIPS: &[&str] = &["Run", "Walk"];
const IDLE_CLIPS: &[&str] = &["Idle", "Stand"];
const KICK_CLIPS: &[&str] = &["Kick", "Punch", "Jump", "Tackle"];

/// Resolve a clip by candidate names: exact (case-insensitive) first, then
/// substring. `None` means the caller should fall back to the first clip, or
/// skip playback entirely when the model has no clips.
pub fn pick_clip(names: &[String], candidates: &[&str]) -> Option<usize> {
    for cand in candidates {
        if let Some(i) = names.iter().position(|n| n.eq_ignore_ascii_case(cand)) {
            return Some(i);
        }
    }
    for cand in candidates {
        let cand = cand.to_ascii_lowercase();
        if let Some(i) = names.iter().position(|n| n.to_ascii_lowercase().contains(&cand)) {
            return Some(i);
        }
    }
    None
}

/// Per-model animation state, advanced deterministically each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimState {
    Idle,
    Locomotion,
    OneShot { elapsed: f32, duration: f32 },
}

/// Graph nodes resolved for a model's clips. A missing entry disables that
/// behavior rather than erroring.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimNodes {
    pub idle: Option<AnimationNodeIndex>,
    pub locomotion: Option<AnimationNodeIndex>,
    pub one_shot: Option<(AnimationNodeIndex, f32)>,
}

/// Pending model load attached to a rig root.
#[derive(Component)]
pub struct ModelSlot {
    pub gltf: Handle<Gltf>,
    pub failed: bool,
}

/// A spawned GLTF stand-in that shadows a rig.
#[derive(Component)]
pub struct CharacterModel {
    pub rig: Entity,
    pub nodes: AnimNodes,
    pub state: AnimState,
    pub anim_player: Option<Entity>,
    pub started: bool,
    pub yaw: f32,
}

/// Graph handle kept until the scene's AnimationPlayer shows up.
#[derive(Component)]
pub struct ModelGraph(pub Handle<AnimationGraph>);

pub struct ModelsPlugin;
impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            queue_models
                .after(crate::plugins::pitch::load_match_def)
                .after(crate::plugins::runner::spawn_runners),
        )
        .add_systems(
            Update,
            (instantiate_models, bind_animation_players, drive_model_animation, sync_models)
                .chain()
                .in_set(SimSet::Present),
        );
    }
}

fn queue_models(
    mut commands: Commands,
    def: Option<Res<MatchDef>>,
    assets: Res<AssetServer>,
    q_player: Query<Entity, With<Player>>,
    q_opponent: Query<Entity, (With<Runner>, Without<Player>)>,
) {
    let Some(def) = def else { return };
    if let Ok(e) = q_player.get_single() {
        commands.entity(e).insert(ModelSlot { gltf: assets.load(def.models.player.clone()), failed: false });
    }
    if let Ok(e) = q_opponent.get_single() {
        commands.entity(e).insert(ModelSlot { gltf: assets.load(def.models.opponent.clone()), failed: false });
    }
}

fn instantiate_models(
    mut commands: Commands,
    def: Option<Res<MatchDef>>,
    assets: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    clips: Res<Assets<AnimationClip>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut q_slots: Query<(Entity, &Transform, &Runner, &mut ModelSlot)>,
) {
    let Some(def) = def else { return };
    for (rig, rig_t, runner, mut slot) in &mut q_slots {
        if slot.failed {
            continue;
        }
        let Some(gltf) = gltf_assets.get(&slot.gltf) else {
            if let bevy::asset::LoadState::Failed(err) = assets.load_state(&slot.gltf) {
                // degraded but non-fatal: the procedural rig stays visible
                warn!("character model load failed, keeping placeholder rig: {err}");
                slot.failed = true;
                commands.entity(rig).remove::<ModelSlot>();
            }
            continue;
        };
        let Some(scene) = gltf.scenes.first().cloned() else {
            warn!("character model has no scene, keeping placeholder rig");
            commands.entity(rig).remove::<ModelSlot>();
            continue;
        };

        // Stable name order so clip resolution is deterministic.
        let mut named: Vec<(String, Handle<AnimationClip>)> =
            gltf.named_animations.iter().map(|(n, h)| (n.to_string(), h.clone())).collect();
        named.sort_by(|a, b| a.0.cmp(&b.0));
        let names: Vec<String> = named.iter().map(|(n, _)| n.clone()).collect();

        let first = if names.is_empty() { None } else { Some(0) };
        let idle_idx = pick_clip(&names, IDLE_CLIPS).or(first);
        let loco_idx = pick_clip(&names, LOCOMOTION_CLIPS).or(idle_idx);
        let kick_idx = pick_clip(&names, KICK_CLIPS);

        let mut graph = AnimationGraph::new();
        let root = graph.root;
        let nodes = AnimNodes {
            idle: idle_idx.map(|i| graph.add_clip(named[i].1.clone(), 1.0, root)),
            locomotion: loco_idx.map(|i| graph.add_clip(named[i].1.clone(), 1.0, root)),
            one_shot: kick_idx.and_then(|i| {
                clips.get(&named[i].1).map(|clip| (graph.add_clip(named[i].1.clone(), 1.0, root), clip.duration()))
            }),
        };

        commands.spawn((
            SceneBundle {
                scene,
                transform: Transform::from_translation(rig_t.translation)
                    .with_rotation(Quat::from_rotation_y(runner.yaw))
                    .with_scale(Vec3::splat(def.models.scale)),
                ..default()
            },
            CharacterModel {
                rig,
                nodes,
                state: AnimState::Idle,
                anim_player: None,
                started: false,
                yaw: runner.yaw,
            },
            ModelGraph(graphs.add(graph)),
        ));
        commands.entity(rig).remove::<ModelSlot>();
        commands.entity(rig).insert(Visibility::Hidden);
        info!("character model ready ({} clips)", names.len());
    }
}

/// The gltf scene spawns its AnimationPlayer a frame or two later; claim it
/// for the owning model and give it the prepared graph.
fn bind_animation_players(
    mut commands: Commands,
    q_added: Query<Entity, Added<AnimationPlayer>>,
    q_parents: Query<&Parent>,
    mut q_models: Query<(Entity, &mut CharacterModel, &ModelGraph)>,
) {
    for player_entity in &q_added {
        // walk up to the model root this player belongs to
        let mut current = player_entity;
        let owner = loop {
            if q_models.get(current).is_ok() {
                break Some(current);
            }
            match q_parents.get(current) {
                Ok(parent) => current = parent.get(),
                Err(_) => break None,
            }
        };
        let Some(owner) = owner else { continue };
        let Ok((_, mut model, graph)) = q_models.get_mut(owner) else { continue };
        model.anim_player = Some(player_entity);
        commands
            .entity(player_entity)
            .insert((graph.0.clone(), AnimationTransitions::new()));
    }
}

fn drive_model_animation(
    time: Res<Time>,
    mut ev_kick: EventReader<KickEvent>,
    mut q_models: Query<&mut CharacterModel>,
    q_runners: Query<&Runner>,
    mut q_anim: Query<(&mut AnimationPlayer, &mut AnimationTransitions)>,
) {
    let kicked: Vec<Entity> = ev_kick.read().map(|e| e.kicker).collect();
    let dt = time.delta_seconds();

    for mut model in &mut q_models {
        let Some(anim_entity) = model.anim_player else { continue };
        let Ok((mut player, mut transitions)) = q_anim.get_mut(anim_entity) else { continue };
        let moving = q_runners.get(model.rig).map(|r| r.moving).unwrap_or(false);

        if kicked.contains(&model.rig) {
            if let Some((node, duration)) = model.nodes.one_shot {
                model.state = AnimState::OneShot { elapsed: 0.0, duration };
                transitions.play(&mut player, node, Duration::from_millis(80));
                model.started = true;
                continue;
            }
        }

        let desired = match model.state {
            AnimState::OneShot { elapsed, duration } => {
                let elapsed = elapsed + dt;
                if elapsed < duration {
                    model.state = AnimState::OneShot { elapsed, duration };
                    continue;
                }
                // one-shot ran out; resume the locomotion cycle
                if moving { AnimState::Locomotion } else { AnimState::Idle }
            }
            _ => {
                if moving { AnimState::Locomotion } else { AnimState::Idle }
            }
        };

        if desired != model.state || !model.started {
            let node = match desired {
                AnimState::Locomotion => model.nodes.locomotion,
                _ => model.nodes.idle,
            };
            if let Some(node) = node {
                transitions.play(&mut player, node, Duration::from_millis(180)).repeat();
            }
            model.state = desired;
            model.started = true;
        }
    }
}

/// Models trail their rig smoothly rather than snapping to it.
fn sync_models(
    time: Res<Time>,
    q_rigs: Query<&Transform, (With<Runner>, Without<CharacterModel>)>,
    mut q_models: Query<(&mut Transform, &mut CharacterModel)>,
) {
    let dt = time.delta_seconds();
    for (mut t, mut model) in &mut q_models {
        let Ok(rig_t) = q_rigs.get(model.rig) else { continue };
        t.translation = t.translation.lerp(rig_t.translation, (dt * 10.0).min(1.0));
        let target_yaw = rig_t.rotation.to_euler(EulerRot::YXZ).0;
        model.yaw = turn_toward(model.yaw, target_yaw, dt * 8.0);
        t.rotation = Quat::from_rotation_y(model.yaw);
    }
}
