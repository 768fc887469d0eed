// Character animation service
//
// Clips are keyed by (character type, action, orientation). The library is
// built once when the arena starts; each character owns a player that loops
// the clip it was last asked for and reports completed cycles.

use std::collections::HashMap;
use std::fmt;

use super::orientation::Orientation;
use super::state::ActionState;

/// Frames per directional clip in the character sprite sheets
pub const STANDARD_FRAME_COUNT: usize = 6;
/// Playback rate of character clips
pub const STANDARD_FPS: f32 = 10.0;

/// Identifies one directional clip of one character type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipKey {
    pub character_type: String,
    pub action: ActionState,
    pub orientation: Orientation,
}

impl ClipKey {
    pub fn new(character_type: &str, action: ActionState, orientation: Orientation) -> Self {
        Self {
            character_type: character_type.to_string(),
            action,
            orientation,
        }
    }
}

impl fmt::Display for ClipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.character_type,
            self.action.animation_name(),
            self.orientation
        )
    }
}

/// A single looping animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(frame_count: usize, fps: f32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
        }
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Every clip the arena can play, registered once at startup
#[derive(Debug, Default)]
pub struct AnimationLibrary {
    clips: HashMap<ClipKey, AnimationClip>,
}

impl AnimationLibrary {
    /// Register the standard clip set (every action in every direction) for
    /// each character type
    pub fn build<'a>(character_types: impl IntoIterator<Item = &'a str>) -> Self {
        let mut library = Self::default();
        for character_type in character_types {
            for action in ActionState::ALL {
                for orientation in Orientation::ALL {
                    library.add(
                        ClipKey::new(character_type, action, orientation),
                        AnimationClip::new(STANDARD_FRAME_COUNT, STANDARD_FPS),
                    );
                }
            }
        }
        log::debug!("Registered {} animation clips", library.len());
        library
    }

    /// Add or replace a clip
    pub fn add(&mut self, key: ClipKey, clip: AnimationClip) {
        self.clips.insert(key, clip);
    }

    pub fn get(&self, key: &ClipKey) -> Option<&AnimationClip> {
        self.clips.get(key)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Manages animation playback for a character
#[derive(Debug)]
pub struct AnimationPlayer {
    current: Option<ClipKey>,
    current_frame: usize,
    frame_timer: f32,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            current: None,
            current_frame: 0,
            frame_timer: 0.0,
        }
    }

    /// Play a clip; re-requesting the current clip keeps its progress
    pub fn play(&mut self, key: ClipKey) {
        if self.current.as_ref() != Some(&key) {
            log::trace!("Playing clip {}", key);
            self.current = Some(key);
            self.current_frame = 0;
            self.frame_timer = 0.0;
        }
    }

    /// Advance playback, returns how many times the clip completed
    pub fn update(&mut self, dt: f32, library: &AnimationLibrary) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        let Some(clip) = self.current.as_ref().and_then(|key| library.get(key)) else {
            return 0;
        };

        self.frame_timer += dt;
        let mut completed = 0;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                completed += 1;
                self.current_frame = 0;
            }
        }

        completed
    }

    /// Clip currently requested
    pub fn current_clip(&self) -> Option<&ClipKey> {
        self.current.as_ref()
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn library() -> AnimationLibrary {
        AnimationLibrary::build(["knight_hero"])
    }

    fn key(action: ActionState) -> ClipKey {
        ClipKey::new("knight_hero", action, Orientation::SouthEast)
    }

    #[test]
    fn test_clip_key_display() {
        assert_eq!(key(ActionState::Moving).to_string(), "knight_hero-walk-SE");
        assert_eq!(
            ClipKey::new("fire_monster", ActionState::Dying, Orientation::North).to_string(),
            "fire_monster-death-N"
        );
    }

    #[test]
    fn test_library_covers_every_direction() {
        let library = AnimationLibrary::build(["knight_hero", "spider_monster"]);
        assert_eq!(library.len(), 2 * 4 * 8);
        assert!(library
            .get(&ClipKey::new("spider_monster", ActionState::Attacking, Orientation::West))
            .is_some());
    }

    #[test]
    fn test_animation_clip_duration() {
        let clip = AnimationClip::new(STANDARD_FRAME_COUNT, STANDARD_FPS);
        assert_relative_eq!(clip.total_duration(), 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_replay_same_clip_keeps_progress() {
        let library = library();
        let mut player = AnimationPlayer::new();
        player.play(key(ActionState::Moving));
        player.update(0.25, &library);
        assert_eq!(player.current_frame(), 2);

        player.play(key(ActionState::Moving));
        assert_eq!(player.current_frame(), 2);

        player.play(key(ActionState::Idle));
        assert_eq!(player.current_frame(), 0);
    }

    #[test]
    fn test_cycle_completion_count() {
        let library = library();
        let mut player = AnimationPlayer::new();
        player.play(key(ActionState::Attacking));

        assert_eq!(player.update(0.55, &library), 0);
        assert_eq!(player.update(0.1, &library), 1);
        assert_eq!(player.current_frame(), 0);

        // Two full cycles in one big step
        assert_eq!(player.update(1.2, &library), 2);
    }

    #[test]
    fn test_custom_clip_replaces_standard() {
        let mut library = library();
        library.add(key(ActionState::Dying), AnimationClip::new(3, 10.0));
        let mut player = AnimationPlayer::new();
        player.play(key(ActionState::Dying));

        assert_eq!(player.update(0.35, &library), 1);
        assert_eq!(player.current_frame(), 0);
    }

    #[test]
    fn test_unknown_clip_never_completes() {
        let library = library();
        let mut player = AnimationPlayer::new();
        player.play(ClipKey::new("ghost", ActionState::Idle, Orientation::South));
        assert_eq!(player.update(5.0, &library), 0);
    }

    #[test]
    fn test_bad_dt_keeps_clock_intact() {
        let library = library();
        let mut player = AnimationPlayer::new();
        player.play(key(ActionState::Attacking));
        player.update(0.25, &library);

        assert_eq!(player.update(f32::NAN, &library), 0);
        assert_eq!(player.update(-1.0, &library), 0);
        assert_eq!(player.update(f32::INFINITY, &library), 0);
        assert_eq!(player.current_frame(), 2);
        assert_eq!(player.update(0.4, &library), 1);
    }
}
