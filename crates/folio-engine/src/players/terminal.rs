//! Scripted terminal session: types each command, prints its output, loops scenarios.

use crate::api::config::TerminalConfig;
use crate::api::types::{PageEvent, TerminalEvent};
use crate::assets::manifest::Scenario;
use crate::core::time::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Open a prompt line for `command_index`.
    Prompt,
    /// `typed` characters of the current command are on screen.
    Typing { typed: usize },
    /// Command fully typed, output pending.
    Output,
    /// Scenario finished, clear pending.
    Restart,
}

/// Replays scenarios one command at a time. Playback is a single step chain,
/// so two scenarios can never advance concurrently.
#[derive(Debug, Clone)]
pub struct TerminalPlayer {
    scenarios: Vec<Scenario>,
    scenario_index: usize,
    command_index: usize,
    phase: Phase,
    started: bool,
    first_prompt: bool,
    config: TerminalConfig,
}

impl TerminalPlayer {
    /// `None` when there are no scenarios to play.
    pub fn new(scenarios: Vec<Scenario>, config: TerminalConfig) -> Option<Self> {
        if scenarios.is_empty() {
            return None;
        }
        Some(Self {
            scenarios,
            scenario_index: 0,
            command_index: 0,
            phase: Phase::Prompt,
            started: false,
            first_prompt: true,
            config,
        })
    }

    /// Mark the player started. Returns `true` only on the first call.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        log::info!("terminal playback started");
        true
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// `(scenario_index, command_index)` of the command being played.
    pub fn cursor(&self) -> (usize, usize) {
        (self.scenario_index, self.command_index)
    }

    fn scenario(&self) -> &Scenario {
        &self.scenarios[self.scenario_index]
    }

    fn command_chars(&self) -> Option<Vec<char>> {
        self.scenario()
            .commands
            .get(self.command_index)
            .map(|c| c.cmd.chars().collect())
    }

    fn open_prompt(&mut self, out: &mut Vec<PageEvent>) -> f64 {
        if self.command_index >= self.scenario().commands.len() {
            // Empty scenario: nothing to show, go straight to the restart hold.
            self.phase = Phase::Restart;
            return self.config.restart_ms;
        }
        out.push(PageEvent::Terminal(TerminalEvent::Prompt {
            reuse_existing: self.first_prompt,
        }));
        self.first_prompt = false;
        self.phase = Phase::Typing { typed: 0 };
        self.config.char_ms
    }

    fn type_char(&mut self, typed: usize, out: &mut Vec<PageEvent>) -> f64 {
        let chars = self.command_chars().unwrap_or_default();
        if let Some(&c) = chars.get(typed) {
            out.push(PageEvent::Terminal(TerminalEvent::Char(c)));
        }
        let typed = typed + 1;
        if typed >= chars.len() {
            self.phase = Phase::Output;
            self.config.output_delay_ms
        } else {
            self.phase = Phase::Typing { typed };
            self.config.char_ms
        }
    }

    fn print_output(&mut self, out: &mut Vec<PageEvent>) -> f64 {
        let output = self.scenario().commands[self.command_index].output.clone();
        out.push(PageEvent::Terminal(TerminalEvent::Output(output)));
        self.command_index += 1;
        if self.command_index < self.scenario().commands.len() {
            self.phase = Phase::Prompt;
            self.config.next_command_ms
        } else {
            self.phase = Phase::Restart;
            self.config.restart_ms
        }
    }

    fn restart(&mut self, out: &mut Vec<PageEvent>) -> f64 {
        out.push(PageEvent::Terminal(TerminalEvent::Clear));
        self.scenario_index = (self.scenario_index + 1) % self.scenarios.len();
        self.command_index = 0;
        log::debug!("terminal scenario -> {}", self.scenario().name);
        self.open_prompt(out)
    }
}

impl Step for TerminalPlayer {
    type Output = PageEvent;

    fn step(&mut self, out: &mut Vec<PageEvent>) -> Option<f64> {
        if !self.started {
            return None;
        }
        let next = match self.phase {
            Phase::Prompt => self.open_prompt(out),
            Phase::Typing { typed } => self.type_char(typed, out),
            Phase::Output => self.print_output(out),
            Phase::Restart => self.restart(out),
        };
        Some(next)
    }
}
