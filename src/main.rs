use bevy::prelude::*;

use kickabout::prelude::*;

fn main() {
    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(0.03, 0.06, 0.14)))
        .insert_resource(AmbientLight {
            color: Color::srgb(0.55, 0.55, 0.60),
            brightness: 300.0,
        });

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        // serve everything from the binary; browsers get no filesystem
        app.add_plugins(bevy_embedded_assets::EmbeddedAssetPlugin {
            mode: bevy_embedded_assets::PluginMode::ReplaceDefault,
        });
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Kickabout".into(),
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }));

    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(bevy::pbr::wireframe::WireframePlugin);

    app.add_plugins(CoreSimPlugin) // timing, settings, sim ordering
        .add_plugins(PitchPlugin) // match config + field, goals, ball
        .add_plugins(RunnerPlugin) // procedural character rigs
        .add_plugins(PlayerPlugin) // input -> locomotion
        .add_plugins(OpponentPlugin) // chase-and-kick AI
        .add_plugins(KickingPlugin) // charge mechanic
        .add_plugins(BallPlugin) // flight/bounce/collision pipeline
        .add_plugins(MatchStatePlugin) // scores + manual reset
        .add_plugins(ModelsPlugin) // optional GLTF characters
        .add_plugins(HudPlugin) // scoreboard + charge bar
        .add_plugins(CameraPlugin) // orbit follow camera
        .run();
}
