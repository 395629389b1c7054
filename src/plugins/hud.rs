// HUD: scoreboard text, kick charge bar, and the settings hotkeys (speed
// multiplier, wireframe toggle, kit color).
use bevy::prelude::*;

use crate::plugins::core_sim::{Settings, SimSet};
use crate::plugins::kicking::KickCharge;
use crate::plugins::match_state::Score;
use crate::plugins::pitch::MatchDef;
use crate::plugins::runner::KitMaterials;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct ChargeBar;
#[derive(Component)]
pub struct ChargeBarFill;

pub struct HudPlugin;
impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, settings_input.in_set(SimSet::Input))
            .add_systems(Update, (update_scoreboard, update_charge_bar).in_set(SimSet::Present));
        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(Update, apply_wireframe.in_set(SimSet::Present));
    }
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        TextBundle::from_section(
            "0 : 0",
            TextStyle { font_size: 28.0, color: Color::WHITE, ..default() },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(8.0),
            ..default()
        }),
        ScoreText,
    ));

    commands.spawn(
        TextBundle::from_section(
            "WASD/arrows move | hold Space to charge a kick | R reset ball",
            TextStyle { font_size: 14.0, color: Color::srgb(0.7, 0.7, 0.75), ..default() },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            bottom: Val::Px(40.0),
            ..default()
        }),
    );

    // Charge bar container + fill
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    left: Val::Px(12.0),
                    bottom: Val::Px(12.0),
                    width: Val::Px(180.0),
                    height: Val::Px(18.0),
                    padding: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                background_color: Color::srgb(0.08, 0.08, 0.10).into(),
                ..default()
            },
            ChargeBar,
        ))
        .with_children(|parent| {
            parent.spawn((
                NodeBundle {
                    style: Style { width: Val::Percent(0.0), height: Val::Percent(100.0), ..default() },
                    background_color: Color::srgb(0.90, 0.75, 0.15).into(),
                    ..default()
                },
                ChargeBarFill,
            ));
        });
}

fn update_scoreboard(score: Res<Score>, mut q_text: Query<&mut Text, With<ScoreText>>) {
    if !score.is_changed() {
        return;
    }
    if let Ok(mut text) = q_text.get_single_mut() {
        text.sections[0].value = format!("{} : {}", score.home, score.away);
    }
}

fn update_charge_bar(
    charge: Res<KickCharge>,
    def: Option<Res<MatchDef>>,
    mut q_fill: Query<&mut Style, With<ChargeBarFill>>,
) {
    if !charge.is_changed() {
        return;
    }
    let Some(def) = def else { return };
    if let Ok(mut style) = q_fill.get_single_mut() {
        let fraction = if charge.charging { charge.charge / def.kick.max_charge } else { 0.0 };
        style.width = Val::Percent(fraction * 100.0);
    }
}

/// Hotkey equivalents of the settings surface: -/= step the speed
/// multiplier, C toggles camera-relative input, V toggles wireframe, H
/// randomizes the player's kit color.
fn settings_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<Settings>,
    kits: Option<Res<KitMaterials>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
) {
    if keys.just_pressed(KeyCode::Minus) {
        settings.speed_multiplier = (settings.speed_multiplier - 0.1).max(0.2);
        info!("speed multiplier {:.1}", settings.speed_multiplier);
    }
    if keys.just_pressed(KeyCode::Equal) {
        settings.speed_multiplier = (settings.speed_multiplier + 0.1).min(3.0);
        info!("speed multiplier {:.1}", settings.speed_multiplier);
    }
    if keys.just_pressed(KeyCode::KeyC) {
        settings.camera_relative = !settings.camera_relative;
        info!("camera-relative input {}", settings.camera_relative);
    }
    if keys.just_pressed(KeyCode::KeyV) {
        settings.wireframe = !settings.wireframe;
    }
    if keys.just_pressed(KeyCode::KeyH) {
        if let Some(kits) = kits {
            if let Some(mat) = mats.get_mut(&kits.player) {
                mat.base_color = Color::srgb(rand::random(), rand::random(), rand::random());
            }
        }
    }
}

/// Wireframe rendering is unavailable under WebGL, so the toggle is native
/// only; the wasm build accepts the key but renders solid.
#[cfg(not(target_arch = "wasm32"))]
fn apply_wireframe(
    settings: Res<Settings>,
    kits: Option<Res<KitMaterials>>,
    q_rig: Query<(Entity, &Handle<StandardMaterial>), With<crate::plugins::runner::RigMesh>>,
    mut commands: Commands,
) {
    use bevy::pbr::wireframe::Wireframe;
    if !settings.is_changed() {
        return;
    }
    let Some(kits) = kits else { return };
    for (entity, mat) in &q_rig {
        if *mat != kits.player {
            continue;
        }
        if settings.wireframe {
            commands.entity(entity).insert(Wireframe);
        } else {
            commands.entity(entity).remove::<Wireframe>();
        }
    }
}
