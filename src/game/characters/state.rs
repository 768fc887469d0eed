// Character action state machine

use glam::Vec2;

use super::orientation::Orientation;
use crate::core::math::is_finite_vec;

/// The mutually-exclusive thing a character is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionState {
    /// Standing still
    Idle,
    /// Walking along the current motion vector
    Moving,
    /// Playing the attack clip; uninterruptible until it completes
    Attacking,
    /// Playing the death clip; terminal
    Dying,
}

impl Default for ActionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl ActionState {
    /// All action states, in clip-building order
    pub const ALL: [ActionState; 4] = [
        ActionState::Idle,
        ActionState::Moving,
        ActionState::Attacking,
        ActionState::Dying,
    ];

    /// Check if motion commands are honored in this state
    pub fn can_move(&self) -> bool {
        matches!(self, Self::Idle | Self::Moving)
    }

    /// Check if a fire command is honored in this state
    pub fn can_fire(&self) -> bool {
        matches!(self, Self::Idle | Self::Moving)
    }

    /// Check if there is no way out of this state except removal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dying)
    }

    /// Whether the animation service must report each completed cycle of
    /// this state's clip
    pub fn notifies_cycle_end(&self) -> bool {
        matches!(self, Self::Attacking | Self::Dying)
    }

    /// Clip family name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "stance",
            Self::Moving => "walk",
            Self::Attacking => "fight",
            Self::Dying => "death",
        }
    }
}

/// What the owner of the state machine has to do after a clip cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing changed
    Ignored,
    /// The attack finished; the character is idle again
    ReturnedToIdle,
    /// The death clip finished; remove the character from the world.
    /// Reported at most once per character.
    Destroy,
}

/// Guarded transition table for one character
///
/// Holds no collaborator handles: every operation reports whether it was
/// honored and the owner applies velocity and clip changes.
#[derive(Debug, Clone)]
pub struct CharacterStateMachine {
    current_state: ActionState,
    previous_state: ActionState,
    state_time: f32,
    orientation: Orientation,
    motion: Vec2,
    alive: bool,
    attack_in_progress: bool,
    destruction_signaled: bool,
}

impl Default for CharacterStateMachine {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

impl CharacterStateMachine {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            current_state: ActionState::Idle,
            previous_state: ActionState::Idle,
            state_time: 0.0,
            orientation,
            motion: Vec2::ZERO,
            alive: true,
            attack_in_progress: false,
            destruction_signaled: false,
        }
    }

    /// Get the current state
    pub fn state(&self) -> ActionState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> ActionState {
        self.previous_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Current facing
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Last accepted motion vector
    pub fn motion(&self) -> Vec2 {
        self.motion
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether an attack clip is still running
    pub fn is_attack_in_progress(&self) -> bool {
        self.attack_in_progress
    }

    /// Whether the death clip already asked for removal
    pub fn is_destruction_signaled(&self) -> bool {
        self.destruction_signaled
    }

    fn transition(&mut self, new_state: ActionState) {
        if self.current_state != new_state {
            log::trace!("{:?} -> {:?}", self.current_state, new_state);
            self.previous_state = self.current_state;
            self.current_state = new_state;
            self.state_time = 0.0;
        }
    }

    /// Advance the time spent in the current state
    pub fn update(&mut self, dt: f32) {
        self.state_time += dt;
    }

    /// Record a new motion vector
    ///
    /// Returns `false` (and changes nothing) while dead, mid-attack or for a
    /// non-finite vector. A nonzero vector moves and re-orients the
    /// character; a zero vector idles it and keeps the facing.
    pub fn set_motion(&mut self, vector: Vec2) -> bool {
        if !self.alive || self.attack_in_progress {
            return false;
        }
        if !is_finite_vec(vector) {
            log::warn!("Rejected non-finite motion vector {:?}", vector);
            return false;
        }

        self.motion = vector;
        match Orientation::from_vector(vector) {
            Some(orientation) => {
                self.orientation = orientation;
                self.transition(ActionState::Moving);
            }
            None => self.transition(ActionState::Idle),
        }
        true
    }

    /// Start an attack
    ///
    /// Returns `false` while dead or already attacking. Attacking is sticky:
    /// motion and fire are refused until the attack clip completes.
    pub fn fire(&mut self) -> bool {
        if !self.alive || self.attack_in_progress {
            return false;
        }

        self.attack_in_progress = true;
        self.motion = Vec2::ZERO;
        self.transition(ActionState::Attacking);
        true
    }

    /// Kill the character. Unconditional and safe to repeat.
    pub fn die(&mut self) {
        self.alive = false;
        self.attack_in_progress = false;
        self.motion = Vec2::ZERO;
        self.transition(ActionState::Dying);
    }

    /// Close out a transient state once its clip finished a cycle
    pub fn animation_cycle_complete(&mut self, clip: ActionState) -> CycleOutcome {
        match clip {
            ActionState::Attacking => {
                self.attack_in_progress = false;
                if !self.alive {
                    // Dying outranks the attack that was running
                    return CycleOutcome::Ignored;
                }
                self.motion = Vec2::ZERO;
                self.transition(ActionState::Idle);
                CycleOutcome::ReturnedToIdle
            }
            ActionState::Dying => {
                if self.current_state != ActionState::Dying || self.destruction_signaled {
                    return CycleOutcome::Ignored;
                }
                self.destruction_signaled = true;
                CycleOutcome::Destroy
            }
            ActionState::Idle | ActionState::Moving => CycleOutcome::Ignored,
        }
    }
}
