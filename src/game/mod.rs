// Game modules: characters, pursuit AI, projectiles and the arena driving them

pub mod arena;
pub mod characters;
pub mod projectile;
pub mod pursuit;

pub use arena::{Arena, ArenaConfig, ArenaError, Stage};
pub use projectile::{Projectile, ProjectileFactory, ProjectileId, ProjectileManager, ProjectileRequest};
pub use pursuit::{PursuitAi, PursuitConfig, PursuitDecision};
