use serde::{Deserialize, Serialize};

use crate::core::error::FolioError;

/// Configuration for every page component. `Default` carries the stock timings;
/// a host page may override any subset through JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub typewriter: TypewriterConfig,
    pub counter: CounterConfig,
    pub terminal: TerminalConfig,
    pub particles: ParticleConfig,
    pub scroll: ScrollConfig,
    pub viewport: ViewportConfig,
    pub transition: TransitionConfig,
    pub easter_egg: EasterEggConfig,
}

impl PageConfig {
    /// Parse a (possibly partial) config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Typewriter timings, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Delay between typed characters.
    pub type_ms: f64,
    /// Delay between erased characters.
    pub erase_ms: f64,
    /// Hold time once a phrase is fully typed.
    pub pause_full_ms: f64,
    /// Hold time once a phrase is fully erased.
    pub pause_empty_ms: f64,
    /// Delay after page-ready before the first character.
    pub start_delay_ms: f64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            type_ms: 100.0,
            erase_ms: 50.0,
            pause_full_ms: 2000.0,
            pause_empty_ms: 1100.0,
            start_delay_ms: 2250.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: f64,
    pub tick_ms: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            tick_ms: 16.0,
        }
    }
}

impl CounterConfig {
    /// Number of ticks the growth is spread over (2000 / 16 = 125 by default).
    pub fn ticks(&self) -> f64 {
        if self.tick_ms <= 0.0 {
            1.0
        } else {
            (self.duration_ms / self.tick_ms).max(1.0)
        }
    }
}

/// Terminal replay timings in milliseconds, plus the visibility threshold that starts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub char_ms: f64,
    /// Pause between the last typed character and the output block.
    pub output_delay_ms: f64,
    /// Pause between an output block and the next prompt.
    pub next_command_ms: f64,
    /// Pause after the last command of a scenario before clearing.
    pub restart_ms: f64,
    pub start_threshold: f64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            char_ms: 30.0,
            output_delay_ms: 400.0,
            next_command_ms: 800.0,
            restart_ms: 3000.0,
            start_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub max_particles: usize,
    /// Surface area (px²) per particle before the cap applies.
    pub area_per_particle: f32,
    /// Velocity components are drawn from [-max_speed, max_speed].
    pub max_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Pairs closer than this are linked.
    pub link_distance: f32,
    /// Line alpha at distance zero.
    pub link_alpha: f32,
    pub line_width: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_particles: 60,
            area_per_particle: 15000.0,
            max_speed: 0.25,
            radius_min: 1.0,
            radius_max: 3.0,
            link_distance: 150.0,
            link_alpha: 0.15,
            line_width: 1.0,
        }
    }
}

/// Scroll-linked reactions, distances in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// A section becomes current this far before its top reaches the viewport.
    pub look_ahead_px: f64,
    pub parallax_factor: f64,
    pub indicator_hide_after_px: f64,
    /// Mobile nav hiding is active at or below this viewport width.
    pub mobile_breakpoint_px: f64,
    pub mobile_hide_after_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            look_ahead_px: 200.0,
            parallax_factor: 0.5,
            indicator_hide_after_px: 100.0,
            mobile_breakpoint_px: 768.0,
            mobile_hide_after_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub reveal_threshold: f64,
    /// Negative bottom margin applied to the reveal observer.
    pub reveal_bottom_margin_px: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub leave_delay_ms: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            leave_delay_ms: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasterEggConfig {
    /// Key names as reported by `KeyboardEvent.key`.
    pub sequence: Vec<String>,
    pub duration_ms: f64,
}

impl Default for EasterEggConfig {
    fn default() -> Self {
        let sequence = [
            "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown",
            "ArrowLeft", "ArrowRight", "ArrowLeft", "ArrowRight",
            "b", "a",
        ];
        Self {
            sequence: sequence.iter().map(|k| k.to_string()).collect(),
            duration_ms: 5000.0,
        }
    }
}
