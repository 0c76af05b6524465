//! Headless presentation engine for a static portfolio page.
//!
//! Everything here is plain state and arithmetic: the web bridge feeds it DOM
//! events and frame deltas, and applies the [`PageEvent`]s it produces.

pub mod api;
pub mod assets;
pub mod core;
pub mod field;
pub mod input;
pub mod nav;
pub mod players;
pub mod theme;
pub mod viewport;

// Re-export key types at crate root for convenience
pub use api::config::{
    CounterConfig, EasterEggConfig, PageConfig, ParticleConfig, ScrollConfig, TerminalConfig,
    TransitionConfig, TypewriterConfig, ViewportConfig,
};
pub use api::page::Page;
pub use api::types::{PageEvent, TerminalEvent, WatchId};
pub use assets::manifest::{Scenario, ScriptManifest, TerminalCommand};
pub use crate::core::error::FolioError;
pub use crate::core::time::{Sequencer, Step, MAX_FRAME_MS};
pub use field::{FrameStats, Palette, ParticleField, Rgba, Surface};
pub use input::queue::EventQueue;
pub use input::transition::LinkInfo;
pub use nav::{anchor_target, link_matches, parallax_transform, NavPlacement, ScrollFrame, SectionBounds};
pub use theme::{KeyValueStore, MemoryStore, ThemeController, ThemeFlag, THEME_KEY};
pub use viewport::{Trigger, ViewportOptions, WatchMode};
