//! Convenience re-exports for frequently used types & plugins.
pub use crate::plugins::ball::{Ball, BallMotion, BallPlugin, BallState, GoalEvent, GoalSide};
pub use crate::plugins::camera::{CameraPlugin, OrbitCamera};
pub use crate::plugins::core_sim::{AiRng, CoreSimPlugin, Settings, SimSet, SimState};
pub use crate::plugins::hud::HudPlugin;
pub use crate::plugins::kicking::{KickCharge, KickEvent, KickingPlugin};
pub use crate::plugins::match_state::{MatchStatePlugin, Score};
pub use crate::plugins::models::ModelsPlugin;
pub use crate::plugins::opponent::{KickCooldown, Opponent, OpponentPlugin};
pub use crate::plugins::pitch::{MatchDef, PitchPlugin};
pub use crate::plugins::player::{Player, PlayerPlugin};
pub use crate::plugins::runner::{Runner, RunnerPlugin};
