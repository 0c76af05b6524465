use crate::theme::ThemeFlag;

/// Identity of an element tracked by the viewport watch registry.
/// The web layer stamps it onto the element so observer callbacks can map back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(pub u32);

/// One rendering operation for the terminal container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// Start a new prompt line. `reuse_existing` is set for the very first
    /// command after start, when the page ships a line already in the markup.
    Prompt { reuse_existing: bool },
    /// Append one character to the current command.
    Char(char),
    /// Append an output block; the markup is trusted static configuration.
    Output(String),
    /// Remove every rendered line.
    Clear,
}

/// A command from the engine to the host page.
/// The engine never touches the DOM; the web layer drains these each frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Replace the typewriter text and set the cursor's "typing" marker.
    Typed { text: String, cursor_active: bool },
    /// Replace a counter element's text.
    Counter { id: WatchId, text: String },
    /// Apply the reveal class to a watched element.
    Reveal(WatchId),
    Terminal(TerminalEvent),
    Theme(ThemeFlag),
    /// Start or stop the hue-rotation effect.
    EasterEgg { active: bool },
    /// Toggle the page-ready marker (transition in/out).
    Ready(bool),
    /// Leave the page for `href`.
    Navigate { href: String },
}
