// Charge-and-release kicking. Holding the kick key accumulates charge;
// release resolves a foot-contact impulse against the ball.
use bevy::prelude::*;

use crate::plugins::ball::{Ball, BallMotion};
use crate::plugins::core_sim::{yaw_forward, SimSet};
use crate::plugins::pitch::{KickDef, MatchDef};
use crate::plugins::player::Player;
use crate::plugins::runner::{RigFeet, Runner};

/// Charge accumulator. Reset on key-down, consumed on key-up.
#[derive(Resource, Debug, Default)]
pub struct KickCharge {
    pub charging: bool,
    pub charge: f32,
}

/// Fired whenever a character (player or AI) kicks, for one-shot animation.
#[derive(Event, Debug, Clone, Copy)]
pub struct KickEvent {
    pub kicker: Entity,
}

/// Velocity change a resolved kick applies: an additive delta plus a floor on
/// the vertical component (a kick never pulls the ball down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickImpulse {
    pub delta: Vec3,
    pub min_upward: f32,
}

/// Resolve a player kick. The strictly nearer foot within contact range
/// strikes; a tie or no foot in range degrades to a poke along the facing
/// direction. Deterministic for a fixed charge.
pub fn resolve_kick(
    left_foot: Vec3,
    right_foot: Vec3,
    facing: Vec3,
    ball_pos: Vec3,
    charge: f32,
    def: &KickDef,
) -> KickImpulse {
    let d_left = left_foot.distance(ball_pos);
    let d_right = right_foot.distance(ball_pos);
    let power = def.base_power + charge.min(def.max_charge) * def.charge_scale;

    let foot = if d_left < d_right && d_left < def.contact_radius {
        Some(left_foot)
    } else if d_right < d_left && d_right < def.contact_radius {
        Some(right_foot)
    } else {
        None
    };

    match foot {
        Some(foot) => {
            let mut dir = ball_pos - foot;
            dir.y = 0.0;
            if dir.length_squared() < 1e-4 {
                // foot and ball coincide; strike along the facing instead
                dir = facing;
            }
            let dir = (dir.normalize() + facing * def.forward_bias).normalize();
            KickImpulse { delta: dir * power, min_upward: 1.0 + charge * 2.0 }
        }
        None => KickImpulse {
            delta: facing * (power * 0.4).max(1.0),
            min_upward: 0.6 + charge,
        },
    }
}

pub struct KickingPlugin;
impl Plugin for KickingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(KickCharge::default())
            .add_event::<KickEvent>()
            .add_systems(Update, (update_kick_charge, release_kick).chain().in_set(SimSet::Kick));
    }
}

fn update_kick_charge(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    def: Option<Res<MatchDef>>,
    mut charge: ResMut<KickCharge>,
) {
    let Some(def) = def else { return };
    if keys.just_pressed(KeyCode::Space) && !charge.charging {
        charge.charging = true;
        charge.charge = 0.0;
    }
    if charge.charging {
        charge.charge = (charge.charge + time.delta_seconds()).min(def.kick.max_charge);
    }
}

fn release_kick(
    keys: Res<ButtonInput<KeyCode>>,
    def: Option<Res<MatchDef>>,
    mut charge: ResMut<KickCharge>,
    q_player: Query<(Entity, &Runner, &RigFeet), With<Player>>,
    q_feet: Query<&GlobalTransform>,
    mut q_ball: Query<(&Transform, &mut BallMotion), With<Ball>>,
    mut ev_kick: EventWriter<KickEvent>,
) {
    if !(keys.just_released(KeyCode::Space) && charge.charging) {
        return;
    }
    let released = charge.charge;
    charge.charging = false;
    charge.charge = 0.0;

    let Some(def) = def else { return };
    let Ok((entity, runner, feet)) = q_player.get_single() else { return };
    let Ok((ball_t, mut motion)) = q_ball.get_single_mut() else { return };
    let (Ok(left), Ok(right)) = (q_feet.get(feet.left), q_feet.get(feet.right)) else { return };

    let impulse = resolve_kick(
        left.translation(),
        right.translation(),
        yaw_forward(runner.yaw),
        ball_t.translation,
        released,
        &def.kick,
    );
    motion.vel += impulse.delta;
    motion.vel.y = motion.vel.y.max(impulse.min_upward);
    ev_kick.send(KickEvent { kicker: entity });
}
