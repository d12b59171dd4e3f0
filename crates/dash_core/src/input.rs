//! Keyboard state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` is true every frame the key is
//!   physically down.
//!
//! - **Edge-triggered (just_pressed / just_released):** true only during the frame
//!   the transition happened. OS key repeat does not produce new edges because a
//!   key already held is ignored. `end_frame()` clears edges once the tick has
//!   consumed them.

use std::collections::HashSet;

use crate::world::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Up,
    R,
    Escape,
    F3,
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    /// Gameplay actions for this tick. Space and Up both jump.
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            jump: self.is_just_pressed(Key::Space) || self.is_just_pressed(Key::Up),
            reset: self.is_just_pressed(Key::R),
        }
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        assert!(input.is_held(Key::Space));
        assert!(input.is_just_pressed(Key::Space));
    }

    #[test]
    fn test_key_up_clears_held_sets_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::R);
        input.key_up(Key::R);
        assert!(!input.is_held(Key::R));
        assert!(input.is_just_released(Key::R));
    }

    #[test]
    fn test_key_repeat_does_not_retrigger_after_end_frame() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.end_frame();
        // OS auto-repeat delivers another press while the key is still held.
        input.key_down(Key::Space);
        assert!(input.is_held(Key::Space));
        assert!(!input.is_just_pressed(Key::Space));
        assert!(!input.frame_input().jump);
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::Up);
        assert!(!input.is_just_released(Key::Up));
        assert!(!input.is_held(Key::Up));
    }

    #[test]
    fn test_end_frame_clears_transient_state() {
        let mut input = InputState::new();
        input.key_down(Key::Up);
        input.key_down(Key::F3);
        input.end_frame();
        assert!(!input.is_just_pressed(Key::Up));
        assert!(!input.is_just_pressed(Key::F3));
        // Held state should persist across frames.
        assert!(input.is_held(Key::Up));
        assert!(input.is_held(Key::F3));
    }

    #[test]
    fn test_end_frame_clears_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::R);
        input.key_up(Key::R);
        input.end_frame();
        assert!(!input.is_just_released(Key::R));
    }

    #[test]
    fn test_jump_aliases() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        assert_eq!(
            input.frame_input(),
            FrameInput {
                jump: true,
                reset: false
            }
        );
        input.end_frame();

        input.key_down(Key::Up);
        assert!(input.frame_input().jump);
        input.end_frame();
        assert!(!input.frame_input().jump);
    }

    #[test]
    fn test_reset_edge() {
        let mut input = InputState::new();
        input.key_down(Key::R);
        assert!(input.frame_input().reset);
        assert!(!input.frame_input().jump);
        input.end_frame();
        assert!(!input.frame_input().reset);
    }

    #[test]
    fn test_default_state_is_empty() {
        let input = InputState::default();
        assert!(!input.is_held(Key::Space));
        assert!(!input.is_just_pressed(Key::Escape));
        assert!(!input.is_just_released(Key::R));
        assert_eq!(input.frame_input(), FrameInput::default());
    }
}
