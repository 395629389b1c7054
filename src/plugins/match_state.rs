// Match score bookkeeping and the manual ball reset.
use bevy::prelude::*;

use crate::plugins::ball::{reset_ball, Ball, BallMotion, BallState, GoalEvent, GoalSide};
use crate::plugins::core_sim::SimSet;
use crate::plugins::pitch::MatchDef;

/// Running match score. Monotonic; only goal events touch it. The manual
/// reset intentionally recenters the ball without clearing the score.
#[derive(Resource, Default, Debug)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

pub struct MatchStatePlugin;
impl Plugin for MatchStatePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Score::default())
            .add_systems(Update, (apply_goals, manual_reset).in_set(SimSet::Scoring));
    }
}

fn apply_goals(mut ev_goal: EventReader<GoalEvent>, mut score: ResMut<Score>) {
    for ev in ev_goal.read() {
        match ev.side {
            GoalSide::Home => score.home += 1,
            GoalSide::Away => score.away += 1,
        }
        info!("score {}:{}", score.home, score.away);
    }
}

fn manual_reset(
    keys: Res<ButtonInput<KeyCode>>,
    def: Option<Res<MatchDef>>,
    mut q_ball: Query<(&mut Transform, &mut BallMotion), With<Ball>>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    let Some(def) = def else { return };
    let Ok((mut transform, mut motion)) = q_ball.get_single_mut() else { return };
    let mut ball = BallState { pos: transform.translation, vel: motion.vel };
    reset_ball(&mut ball, &def.ball);
    transform.translation = ball.pos;
    motion.vel = ball.vel;
    info!("ball recentred (scores kept)");
}
