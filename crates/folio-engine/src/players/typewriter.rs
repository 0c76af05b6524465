//! Typewriter: types a phrase, holds it, erases it, moves to the next one, forever.

use crate::api::config::TypewriterConfig;
use crate::api::types::PageEvent;
use crate::core::time::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterState {
    Typing,
    PausedAtFull,
    Erasing,
    PausedAtEmpty,
}

/// Cursor over a phrase list: `(phrase_index, char_index)` plus the phase.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    phrase_index: usize,
    char_index: usize,
    state: TypewriterState,
    cursor_active: bool,
    config: TypewriterConfig,
}

impl Typewriter {
    /// `None` when there is nothing to type.
    pub fn new(phrases: &[String], config: TypewriterConfig) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases: phrases.iter().map(|p| p.chars().collect()).collect(),
            phrase_index: 0,
            char_index: 0,
            state: TypewriterState::Typing,
            cursor_active: false,
            config,
        })
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn cursor_active(&self) -> bool {
        self.cursor_active
    }

    /// Text currently on screen.
    pub fn text(&self) -> String {
        self.phrase()[..self.char_index].iter().collect()
    }

    /// Delay before the very first step.
    pub fn start_delay(&self) -> f64 {
        self.config.start_delay_ms
    }

    fn phrase(&self) -> &[char] {
        &self.phrases[self.phrase_index]
    }

    fn type_char(&mut self) -> f64 {
        if self.char_index < self.phrase().len() {
            self.char_index += 1;
            self.cursor_active = true;
            self.config.type_ms
        } else {
            self.state = TypewriterState::PausedAtFull;
            self.cursor_active = false;
            self.config.pause_full_ms
        }
    }

    fn erase_char(&mut self) -> f64 {
        if self.char_index > 0 {
            self.char_index -= 1;
            self.cursor_active = true;
            self.config.erase_ms
        } else {
            self.state = TypewriterState::PausedAtEmpty;
            self.cursor_active = false;
            self.config.pause_empty_ms
        }
    }
}

impl Step for Typewriter {
    type Output = PageEvent;

    fn step(&mut self, out: &mut Vec<PageEvent>) -> Option<f64> {
        let next = match self.state {
            TypewriterState::Typing => self.type_char(),
            TypewriterState::PausedAtFull => {
                self.state = TypewriterState::Erasing;
                self.erase_char()
            }
            TypewriterState::Erasing => self.erase_char(),
            TypewriterState::PausedAtEmpty => {
                self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                self.state = TypewriterState::Typing;
                self.type_char()
            }
        };
        out.push(PageEvent::Typed {
            text: self.text(),
            cursor_active: self.cursor_active,
        });
        Some(next)
    }
}
