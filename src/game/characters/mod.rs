// Character system
//
// This module contains everything related to arena characters:
// - Orientation and action state machine
// - Character entity wired to physics, animation and projectiles
// - Per-type profiles and the catalog they are loaded from
// - Generational registry handing out weak character ids
// - Animation clip library and per-character playback

pub mod animation;
pub mod catalog;
pub mod character;
pub mod orientation;
pub mod profile;
pub mod registry;
pub mod state;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationLibrary, AnimationPlayer, ClipKey};
pub use catalog::{CatalogError, CharacterCatalog, DEFAULT_CATALOG};
pub use character::Character;
pub use orientation::Orientation;
pub use profile::{CharacterProfile, ColliderConfig, Offset, ProjectileConfig};
pub use registry::{CharacterId, CharacterRegistry};
pub use state::{ActionState, CharacterStateMachine, CycleOutcome};
