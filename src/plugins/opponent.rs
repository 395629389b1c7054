// Opponent steering AI: chase the ball, kick it toward the goal on the
// opponent's half when close and off cooldown. Greedy and memoryless.
use bevy::prelude::*;
use rand::Rng;

use crate::plugins::ball::{Ball, BallMotion};
use crate::plugins::core_sim::{turn_toward, AiRng, SimSet};
use crate::plugins::kicking::KickEvent;
use crate::plugins::pitch::MatchDef;
use crate::plugins::runner::Runner;

#[derive(Component)]
pub struct Opponent;

/// Seconds until the next allowed AI kick. May go negative; <= 0 means ready.
#[derive(Component, Debug, Default)]
pub struct KickCooldown {
    pub remaining: f32,
}

/// Impulse an AI kick applies to the ball. The vertical component is an
/// absolute lift, not additive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiKick {
    pub impulse: Vec3,
    pub lift: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpponentStep {
    pub pos: Vec3,
    pub yaw: f32,
    pub phase: f32,
    pub moving: bool,
    pub cooldown: f32,
    pub kick: Option<AiKick>,
}

/// One AI frame: seek the ball, tick the cooldown, decide a kick. Pure apart
/// from the injected RNG, so tests can seed it and assert exact impulses.
pub fn step_opponent(
    pos: Vec3,
    yaw: f32,
    phase: f32,
    cooldown: f32,
    ball_pos: Vec3,
    def: &MatchDef,
    dt: f32,
    rng: &mut impl Rng,
) -> OpponentStep {
    let ai = def.ai;
    let mut out = OpponentStep {
        pos,
        yaw,
        phase: phase + dt * ai.speed * def.runner.run_cycles,
        moving: false,
        cooldown: cooldown - dt,
        kick: None,
    };

    let to_ball = Vec2::new(ball_pos.x - pos.x, ball_pos.z - pos.z);
    let dist = to_ball.length();
    if dist > ai.seek_epsilon {
        let dir = to_ball / dist;
        out.pos.x += dir.x * ai.speed * def.runner.move_speed * dt;
        out.pos.z += dir.y * ai.speed * def.runner.move_speed * dt;
        out.yaw = turn_toward(yaw, dir.x.atan2(dir.y), dt * ai.turn_rate);
    }
    // animation/push threshold is looser than the seek epsilon
    out.moving = dist > 0.25;

    if dist < ai.kick_range && out.cooldown <= 0.0 {
        // aim at the goal on whichever half the opponent stands in
        let aim = if pos.z < 0.0 { Vec3::NEG_Z } else { Vec3::Z };
        out.kick = Some(AiKick {
            impulse: aim * (ai.power_base + rng.gen::<f32>() * ai.power_jitter),
            lift: ai.lift_base + rng.gen::<f32>() * ai.lift_jitter,
        });
        out.cooldown = ai.cooldown_base + rng.gen::<f32>() * ai.cooldown_jitter;
    }
    out
}

pub struct OpponentPlugin;
impl Plugin for OpponentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, opponent_ai.in_set(SimSet::Ai));
    }
}

fn opponent_ai(
    time: Res<Time>,
    def: Option<Res<MatchDef>>,
    mut rng: ResMut<AiRng>,
    mut q_opp: Query<(Entity, &mut Transform, &mut Runner, &mut KickCooldown), With<Opponent>>,
    mut q_ball: Query<(&Transform, &mut BallMotion), (With<Ball>, Without<Opponent>)>,
    mut ev_kick: EventWriter<KickEvent>,
) {
    let Some(def) = def else { return };
    let Ok((entity, mut transform, mut runner, mut cooldown)) = q_opp.get_single_mut() else { return };
    let Ok((ball_t, mut motion)) = q_ball.get_single_mut() else { return };

    let step = step_opponent(
        transform.translation,
        runner.yaw,
        runner.phase,
        cooldown.remaining,
        ball_t.translation,
        &def,
        time.delta_seconds(),
        &mut rng.0,
    );

    transform.translation.x = step.pos.x;
    transform.translation.z = step.pos.z;
    runner.yaw = step.yaw;
    runner.phase = step.phase;
    runner.moving = step.moving;
    cooldown.remaining = step.cooldown;

    if let Some(kick) = step.kick {
        motion.vel += kick.impulse;
        motion.vel.y = kick.lift;
        ev_kick.send(KickEvent { kicker: entity });
    }
}
