use bevy::math::Vec3;
use bevy::prelude::*;
use kickabout::prelude::*;

fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(ButtonInput::<KeyCode>::default())
        .add_plugins(CoreSimPlugin)
        .add_plugins(MatchStatePlugin)
        .add_event::<GoalEvent>();
    app
}

#[test]
fn each_goal_event_scores_exactly_once() {
    let mut app = build_app();
    app.update();

    app.world_mut().send_event(GoalEvent { side: GoalSide::Home });
    app.update();
    {
        let score = app.world().resource::<Score>();
        assert_eq!((score.home, score.away), (1, 0));
    }

    app.world_mut().send_event(GoalEvent { side: GoalSide::Away });
    app.world_mut().send_event(GoalEvent { side: GoalSide::Away });
    app.update();
    let score = app.world().resource::<Score>();
    assert_eq!((score.home, score.away), (1, 2));
}

#[test]
fn manual_reset_recenters_ball_but_keeps_scores() {
    let mut app = build_app();
    let def = MatchDef::default();
    let spawn = def.ball.spawn_pos();
    app.insert_resource(def);

    let ball = app
        .world_mut()
        .spawn((
            Transform::from_xyz(4.0, 1.3, -2.0),
            kickabout::plugins::ball::Ball,
            BallMotion { vel: Vec3::new(1.0, 2.0, 3.0) },
        ))
        .id();
    app.world_mut().send_event(GoalEvent { side: GoalSide::Home });
    app.update();

    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyR);
    app.update();

    let transform = app.world().get::<Transform>(ball).unwrap();
    let motion = app.world().get::<BallMotion>(ball).unwrap();
    assert_eq!(transform.translation, spawn);
    assert_eq!(motion.vel, Vec3::ZERO);

    let score = app.world().resource::<Score>();
    assert_eq!((score.home, score.away), (1, 0), "reset must not clear scores");
}
