//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host time in, no wall clock reads
//! - Seeded RNG only
//! - Stable iteration order (by ball ID)
//! - No rendering, audio backend or platform dependencies

pub mod circle;
pub mod collision;
pub mod contact;
pub mod gap;
pub mod geometry;
pub mod motion;
pub mod scene;
pub mod segment;
pub mod state;

pub use circle::CircleScene;
pub use collision::{CollisionResult, ball_ball_collision, ball_segment_collision};
pub use contact::{ContactEvent, ContactKind, ContactQueue, ContactSender, ContactTracker};
pub use gap::GapController;
pub use geometry::{ArenaSize, BoundaryGeometry, BoundaryManager, Wall, WallKind, compute_geometry};
pub use scene::GameScene;
pub use segment::{Segment, reflect_velocity};
pub use state::{Ball, BallColor, MatchPhase, MatchSnapshot, MatchState};
