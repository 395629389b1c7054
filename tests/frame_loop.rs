use bevy::prelude::*;
use kickabout::prelude::*;

// Minimal app (no window/assets) exercising the core sim plugin alone.
fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(CoreSimPlugin);
    app
}

#[test]
fn frames_advance() {
    let mut app = build_app();
    for _ in 0..5 {
        app.update();
    }
    let sim = app.world().get_resource::<SimState>().unwrap();
    assert_eq!(sim.frame, 5, "expected one sim frame per app update");
}

#[test]
fn settings_defaults() {
    let app = build_app();
    let settings = app.world().get_resource::<Settings>().unwrap();
    assert_eq!(settings.speed_multiplier, 1.0);
    assert!(!settings.auto_run);
    assert!(!settings.camera_relative);
}

#[test]
fn ai_rng_present() {
    let app = build_app();
    assert!(app.world().get_resource::<AiRng>().is_some());
}

#[test]
fn preinserted_settings_respected() {
    let mut app = App::new();
    app.insert_resource(Settings { speed_multiplier: 1.8, ..Default::default() });
    app.add_plugins(MinimalPlugins).add_plugins(CoreSimPlugin);
    app.update();
    let settings = app.world().get_resource::<Settings>().unwrap();
    assert_eq!(settings.speed_multiplier, 1.8);
}
