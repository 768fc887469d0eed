//! Rusted Skirmish: heroes and monsters in a top-down arena
//!
//! Characters run a small action state machine (idle, moving, attacking,
//! dying) driven by motion and fire commands and by their own animation
//! cycles. Monsters can be handed a pursuit controller that stalks and
//! shoots at a target.

pub mod core;
pub mod engine;
pub mod game;
