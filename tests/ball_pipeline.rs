use bevy::math::{Vec2, Vec3};
use kickabout::plugins::ball::*;
use kickabout::plugins::core_sim::yaw_forward;
use kickabout::plugins::pitch::MatchDef;

const EPS: f32 = 1e-5;

fn def() -> MatchDef {
    MatchDef::default()
}

fn resting_ball(def: &MatchDef) -> BallState {
    BallState { pos: def.ball.spawn_pos(), vel: Vec3::ZERO }
}

#[test]
fn gravity_pulls_airborne_ball() {
    let def = def();
    let mut ball = BallState { pos: Vec3::new(0.0, 2.0, 0.0), vel: Vec3::ZERO };
    gravity_stage(&mut ball, &def.ball, 1.0 / 60.0);
    assert!(ball.vel.y < 0.0);
}

#[test]
fn gravity_leaves_resting_ball_alone() {
    let def = def();
    let mut ball = BallState { pos: Vec3::new(0.0, def.ball.rest_height(), 0.0), vel: Vec3::ZERO };
    gravity_stage(&mut ball, &def.ball, 1.0 / 60.0);
    assert_eq!(ball.vel.y, 0.0);
}

#[test]
fn friction_is_framerate_normalized() {
    let def = def();
    // one 30Hz frame should damp as much as two 60Hz frames
    let mut slow = BallState { pos: Vec3::Y, vel: Vec3::new(3.0, 0.0, 1.5) };
    let mut fast = slow;
    friction_stage(&mut slow, &def.ball, 1.0 / 30.0);
    friction_stage(&mut fast, &def.ball, 1.0 / 60.0);
    friction_stage(&mut fast, &def.ball, 1.0 / 60.0);
    assert!((slow.vel.x - fast.vel.x).abs() < 1e-4);
    assert!((slow.vel.z - fast.vel.z).abs() < 1e-4);
}

#[test]
fn ground_bounce_clamps_height_and_scales_velocity() {
    let def = def();
    let rest = def.ball.rest_height();
    let mut ball = BallState { pos: Vec3::new(1.0, rest - 0.05, 1.0), vel: Vec3::new(2.0, -2.0, 0.0) };
    ground_stage(&mut ball, &def.ball);
    assert_eq!(ball.pos.y, rest, "height must clamp to resting height exactly");
    assert!((ball.vel.y - 2.0 * def.ball.restitution).abs() < EPS, "vertical velocity flips, scaled by restitution");
    assert!((ball.vel.x - 2.0 * def.ball.bounce_damp).abs() < EPS, "bounce scrubs horizontal speed");
}

#[test]
fn ground_kills_soft_impacts() {
    let def = def();
    let mut ball = BallState {
        pos: Vec3::new(0.0, def.ball.rest_height() - 0.01, 0.0),
        vel: Vec3::new(1.0, -0.05, 0.0),
    };
    ground_stage(&mut ball, &def.ball);
    assert_eq!(ball.vel.y, 0.0);
    assert_eq!(ball.pos.y, def.ball.rest_height());
}

#[test]
fn reset_is_idempotent() {
    let def = def();
    let mut once = BallState { pos: Vec3::new(4.0, 1.0, -3.0), vel: Vec3::new(1.0, 2.0, 3.0) };
    reset_ball(&mut once, &def.ball);
    let mut twice = once;
    reset_ball(&mut twice, &def.ball);
    assert_eq!(once, twice);
    assert_eq!(once.pos, def.ball.spawn_pos());
    assert_eq!(once.vel, Vec3::ZERO);
}

#[test]
fn goal_inside_mouth_scores_home_and_recenters() {
    let def = def();
    let mut ball = BallState {
        pos: Vec3::new(0.0, def.ball.rest_height(), def.goal.line_z + 0.01),
        vel: Vec3::new(0.0, 0.0, 4.0),
    };
    let side = goal_stage(&mut ball, &def);
    assert_eq!(side, Some(GoalSide::Home));
    assert_eq!(ball.pos, def.ball.spawn_pos());
    assert_eq!(ball.vel, Vec3::ZERO);
}

#[test]
fn goal_on_far_line_scores_away() {
    let def = def();
    let mut ball = BallState {
        pos: Vec3::new(1.0, def.ball.rest_height(), -(def.goal.line_z + 0.01)),
        vel: Vec3::new(0.0, 0.0, -4.0),
    };
    assert_eq!(goal_stage(&mut ball, &def), Some(GoalSide::Away));
}

#[test]
fn wide_shot_does_not_score_and_takes_a_corner() {
    let def = def();
    let mut ball = BallState {
        pos: Vec3::new(3.0, def.ball.rest_height(), def.goal.line_z + 0.01),
        vel: Vec3::new(0.0, 0.0, 4.0),
    };
    assert_eq!(goal_stage(&mut ball, &def), None, "outside the goal mouth");
    assert!(bounds_stage(&mut ball, &def), "crossed the end line, so it relocates");
    let inset = def.field.half_length - def.field.corner_inset;
    assert_eq!(ball.pos, Vec3::new(inset, def.ball.rest_height(), inset));
    assert_eq!(ball.vel, Vec3::ZERO);
}

#[test]
fn out_of_bounds_picks_nearest_corner() {
    let def = def();
    let inset = def.field.half_width - def.field.corner_inset;
    let mut ball = BallState {
        pos: Vec3::new(def.field.half_width + 0.1, def.ball.rest_height(), 3.0),
        vel: Vec3::new(5.0, 0.0, 0.0),
    };
    assert!(bounds_stage(&mut ball, &def));
    assert_eq!(ball.pos, Vec3::new(inset, def.ball.rest_height(), inset), "exited at +x with z > 0: top-right corner");

    let mut ball = BallState {
        pos: Vec3::new(-(def.field.half_width + 0.1), def.ball.rest_height(), -3.0),
        vel: Vec3::ZERO,
    };
    assert!(bounds_stage(&mut ball, &def));
    assert_eq!(ball.pos, Vec3::new(-inset, def.ball.rest_height(), -inset));
}

#[test]
fn ball_inside_field_is_left_alone() {
    let def = def();
    let mut ball = BallState { pos: Vec3::new(2.0, 0.5, -4.0), vel: Vec3::new(1.0, 0.0, 1.0) };
    let before = ball;
    assert!(!bounds_stage(&mut ball, &def));
    assert_eq!(ball, before);
}

#[test]
fn dead_on_post_hit_reflects_and_separates() {
    let def = def();
    let post = def.posts()[1]; // (+half_width, +line_z)
    let min_d = post.radius + def.ball.radius;
    let mut ball = BallState {
        pos: Vec3::new(post.x, def.ball.rest_height(), post.z - 0.2),
        vel: Vec3::new(0.0, 0.0, 2.0),
    };
    post_stage(&mut ball, &def);
    assert!((ball.vel.z + 2.0 * def.ball.post_restitution).abs() < EPS, "head-on approach reverses, scaled by restitution");
    assert!(ball.vel.x.abs() < EPS);
    let d = Vec2::new(ball.pos.x - post.x, ball.pos.z - post.z).length();
    assert!(d > min_d, "ball ends outside the combined radius");
}

#[test]
fn post_runs_before_ground_so_a_deflected_ball_still_bounces() {
    let def = def();
    let post = def.posts()[0];
    // falling ball clipping the post: after the post stage it is still below
    // rest height, and the ground stage must then resolve the bounce
    let mut ball = BallState {
        pos: Vec3::new(post.x + 0.1, def.ball.rest_height() - 0.02, post.z - 0.15),
        vel: Vec3::new(0.0, -1.0, 1.5),
    };
    post_stage(&mut ball, &def);
    ground_stage(&mut ball, &def.ball);
    assert_eq!(ball.pos.y, def.ball.rest_height());
    assert!(ball.vel.y > 0.0, "downward impact beyond the threshold bounces");
}

#[test]
fn push_requires_planar_contact() {
    let def = def();
    let contact = Contact { pos: Vec3::ZERO, forward: yaw_forward(0.0), moving: true, push_scale: 1.0 };

    let mut far = resting_ball(&def);
    far.pos.z = 2.0;
    let before = far.vel;
    push_stage(&mut far, &[contact], &def);
    assert_eq!(far.vel, before, "out of reach: no push");

    let mut near = resting_ball(&def);
    near.pos.z = 0.3;
    push_stage(&mut near, &[contact], &def);
    let expected = def.runner.push_base + def.runner.push_move_bonus;
    assert!((near.vel.z - expected).abs() < EPS, "forward push scaled by speed and the moving bonus");
}

#[test]
fn push_while_standing_skips_moving_bonus() {
    let def = def();
    let contact = Contact { pos: Vec3::ZERO, forward: yaw_forward(0.0), moving: false, push_scale: 1.0 };
    let mut ball = resting_ball(&def);
    ball.pos.z = 0.3;
    push_stage(&mut ball, &[contact], &def);
    assert!((ball.vel.z - def.runner.push_base).abs() < EPS);
}
