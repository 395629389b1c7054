// Ball components and the arcade flight/bounce/collision pipeline.
//
// The per-frame update is an explicit sequence of named stages over a
// `BallState`; the `step_ball` system is just the composition, so the
// ordering (posts before ground, goal before out-of-bounds) is enforced here
// and testable stage by stage.
use bevy::prelude::*;

use crate::plugins::core_sim::{yaw_forward, Settings, SimSet};
use crate::plugins::pitch::{BallDef, MatchDef};
use crate::plugins::player::Player;
use crate::plugins::runner::Runner;

#[derive(Component)]
pub struct Ball;

/// Ball velocity, mirrored into `BallState` for the pipeline each frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct BallMotion {
    pub vel: Vec3,
}

/// Position + velocity snapshot the physics stages operate on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallState {
    pub pos: Vec3,
    pub vel: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalSide {
    Home,
    Away,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct GoalEvent {
    pub side: GoalSide,
}

/// A character the ball can rub against while dribbling.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub pos: Vec3,
    pub forward: Vec3,
    pub moving: bool,
    pub push_scale: f32,
}

// ----------------------- Pipeline stages -----------------------

/// Pull the ball down while it is airborne or still rising.
pub fn gravity_stage(ball: &mut BallState, def: &BallDef, dt: f32) {
    if ball.pos.y > def.rest_height() + 0.001 || ball.vel.y > 0.001 {
        ball.vel.y += def.gravity * dt;
    }
}

/// Explicit Euler position step.
pub fn integrate_stage(ball: &mut BallState, dt: f32) {
    ball.pos += ball.vel * dt;
}

/// Frame-rate-normalized exponential decay of horizontal speed.
pub fn friction_stage(ball: &mut BallState, def: &BallDef, dt: f32) {
    let damp = def.friction.powf(dt * 60.0);
    ball.vel.x *= damp;
    ball.vel.z *= damp;
}

/// Soft continuous push while a character is in dribbling contact. Distinct
/// from the discrete kick impulse.
pub fn push_stage(ball: &mut BallState, contacts: &[Contact], def: &MatchDef) {
    let reach = def.runner.contact_reach + def.ball.radius;
    for c in contacts {
        let to_ball = ball.pos - c.pos;
        let dist2d = Vec2::new(to_ball.x, to_ball.z).length();
        if dist2d < reach {
            let power = def.runner.push_base * c.push_scale
                + if c.moving { def.runner.push_move_bonus } else { 0.0 };
            ball.vel.x += c.forward.x * power;
            ball.vel.z += c.forward.z * power;
        }
    }
}

/// Reflect off goal posts and push the ball clear of the penetration.
pub fn post_stage(ball: &mut BallState, def: &MatchDef) {
    for post in def.posts() {
        let to_post = Vec2::new(ball.pos.x - post.x, ball.pos.z - post.z);
        let d = to_post.length();
        let min_d = post.radius + def.ball.radius;
        if d < min_d {
            let n = if d > 1e-6 { to_post / d } else { Vec2::Y };
            let v = Vec2::new(ball.vel.x, ball.vel.z);
            let reflected = (v - 2.0 * v.dot(n) * n) * def.ball.post_restitution;
            ball.vel.x = reflected.x;
            ball.vel.z = reflected.y;
            ball.pos.x = post.x + n.x * (min_d + 0.01);
            ball.pos.z = post.z + n.y * (min_d + 0.01);
        }
    }
}

/// Clamp to resting height; bounce hard impacts, kill soft ones.
pub fn ground_stage(ball: &mut BallState, def: &BallDef) {
    if ball.pos.y <= def.rest_height() + 0.001 {
        ball.pos.y = def.rest_height();
        if ball.vel.y < -def.bounce_threshold {
            ball.vel.y = -ball.vel.y * def.restitution;
            // bounce scrubs some horizontal speed
            ball.vel.x *= def.bounce_damp;
            ball.vel.z *= def.bounce_damp;
        } else {
            ball.vel.y = 0.0;
        }
    }
}

/// Goal-line crossing inside the mouth scores and recenters the ball.
pub fn goal_stage(ball: &mut BallState, def: &MatchDef) -> Option<GoalSide> {
    let inside_mouth = ball.pos.x.abs() < def.goal.half_width;
    let side = if ball.pos.z > def.goal.line_z && inside_mouth {
        Some(GoalSide::Home)
    } else if ball.pos.z < -def.goal.line_z && inside_mouth {
        Some(GoalSide::Away)
    } else {
        None
    };
    if side.is_some() {
        reset_ball(ball, &def.ball);
    }
    side
}

/// Simplified throw-in: a ball leaving the field without scoring is placed at
/// the nearest inset corner, dead. Returns whether it relocated.
pub fn bounds_stage(ball: &mut BallState, def: &MatchDef) -> bool {
    if ball.pos.x.abs() > def.field.half_width || ball.pos.z.abs() > def.field.half_length {
        ball.pos = def.nearest_corner(ball.pos);
        ball.vel = Vec3::ZERO;
        true
    } else {
        false
    }
}

/// Dead ball at the center spot. Idempotent.
pub fn reset_ball(ball: &mut BallState, def: &BallDef) {
    ball.pos = def.spawn_pos();
    ball.vel = Vec3::ZERO;
}

// ----------------------- Plugin -----------------------

pub struct BallPlugin;
impl Plugin for BallPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GoalEvent>()
            .add_systems(Update, step_ball.in_set(SimSet::Physics));
    }
}

fn step_ball(
    time: Res<Time>,
    def: Option<Res<MatchDef>>,
    settings: Res<Settings>,
    mut q_ball: Query<(&mut Transform, &mut BallMotion), With<Ball>>,
    q_runners: Query<(&Transform, &Runner, Option<&Player>), Without<Ball>>,
    mut ev_goal: EventWriter<GoalEvent>,
) {
    let Some(def) = def else { return };
    let Ok((mut transform, mut motion)) = q_ball.get_single_mut() else { return };
    let dt = time.delta_seconds();

    let mut ball = BallState { pos: transform.translation, vel: motion.vel };

    let contacts: Vec<Contact> = q_runners
        .iter()
        .map(|(t, runner, player)| Contact {
            pos: t.translation,
            forward: yaw_forward(runner.yaw),
            moving: runner.moving,
            push_scale: if player.is_some() { settings.speed_multiplier } else { def.ai.speed },
        })
        .collect();

    gravity_stage(&mut ball, &def.ball, dt);
    integrate_stage(&mut ball, dt);
    friction_stage(&mut ball, &def.ball, dt);
    push_stage(&mut ball, &contacts, &def);
    post_stage(&mut ball, &def);
    ground_stage(&mut ball, &def.ball);
    if let Some(side) = goal_stage(&mut ball, &def) {
        info!("goal for {side:?}");
        ev_goal.send(GoalEvent { side });
    } else if bounds_stage(&mut ball, &def) {
        info!("ball out of play, corner restart");
    }

    transform.translation = ball.pos;
    motion.vel = ball.vel;
}
