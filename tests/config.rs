use kickabout::plugins::pitch::MatchDef;

// The bundled tuning file must stay parseable and in sync with the compiled
// defaults the loader falls back to.
#[test]
fn bundled_match_config_parses() {
    let def: MatchDef = ron::from_str(include_str!("../assets/config/match.ron"))
        .expect("assets/config/match.ron must parse");
    let fallback = MatchDef::default();

    assert_eq!(def.field.half_width, fallback.field.half_width);
    assert_eq!(def.goal.line_z, fallback.goal.line_z);
    assert_eq!(def.goal.half_width, fallback.goal.half_width);
    assert_eq!(def.ball.radius, fallback.ball.radius);
    assert_eq!(def.ball.friction, fallback.ball.friction);
    assert_eq!(def.kick.max_charge, fallback.kick.max_charge);
    assert_eq!(def.ai.kick_range, fallback.ai.kick_range);
    assert_eq!(def.runner.move_speed, fallback.runner.move_speed);
}

#[test]
fn posts_flank_both_goal_mouths() {
    let def = MatchDef::default();
    let posts = def.posts();
    assert_eq!(posts.len(), 4);
    assert!(posts.iter().filter(|p| p.z > 0.0).count() == 2);
    assert!(posts.iter().filter(|p| p.x < 0.0).count() == 2);
    for p in posts {
        assert_eq!(p.x.abs(), def.goal.half_width);
        assert_eq!(p.z.abs(), def.goal.line_z);
        assert_eq!(p.radius, def.goal.post_radius);
    }
}
