//! Scroll-linked navigation state: active section, mobile nav, parallax, indicator.

mod mobile;
mod scroll;

pub use mobile::{MobileNav, NavPlacement};
pub use scroll::{
    active_section, anchor_target, indicator_opacity, link_matches, parallax_offset,
    parallax_transform, SectionBounds,
};

/// Everything a single scroll event changes, computed in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollFrame {
    /// Id of the section whose nav link is active, if any.
    pub active: Option<String>,
    /// Vertical translation for the background layer, in px.
    pub parallax: f64,
    pub indicator_opacity: f64,
    /// New mobile nav placement; `None` when the mobile nav is not in effect.
    pub nav: Option<NavPlacement>,
}
