/// A page section's id and its top offset in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

/// The current section: the last one, in document order, whose top minus
/// `look_ahead` is at or above `scroll_y`. `None` before the first threshold.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, look_ahead: f64) -> Option<&SectionBounds> {
    sections.iter().rev().find(|s| scroll_y >= s.top - look_ahead)
}

/// Whether a nav link `href` points at `section_id`.
pub fn link_matches(href: &str, section_id: &str) -> bool {
    href.strip_prefix('#') == Some(section_id)
}

/// In-page anchor selector for a nav link, or `None` for links that leave the page.
pub fn anchor_target(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

pub fn parallax_offset(scroll_y: f64, factor: f64) -> f64 {
    scroll_y * factor
}

pub fn parallax_transform(offset: f64) -> String {
    format!("translateY({offset}px)")
}

/// The scroll hint fades out once the page has moved past `hide_after`.
pub fn indicator_opacity(scroll_y: f64, hide_after: f64) -> f64 {
    if scroll_y > hide_after {
        0.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("home", 300.0),
            SectionBounds::new("about", 1000.0),
            SectionBounds::new("contact", 2000.0),
        ]
    }

    #[test]
    fn nothing_active_before_first_threshold() {
        assert_eq!(active_section(&sections(), 99.0, 200.0), None);
    }

    #[test]
    fn threshold_is_inclusive() {
        let s = sections();
        assert_eq!(active_section(&s, 100.0, 200.0).map(|s| s.id.as_str()), Some("home"));
        assert_eq!(active_section(&s, 800.0, 200.0).map(|s| s.id.as_str()), Some("about"));
    }

    #[test]
    fn last_matching_section_wins() {
        let s = sections();
        assert_eq!(active_section(&s, 5000.0, 200.0).map(|s| s.id.as_str()), Some("contact"));
    }

    #[test]
    fn link_matching() {
        assert!(link_matches("#about", "about"));
        assert!(!link_matches("about", "about"));
        assert!(!link_matches("#about-me", "about"));
    }

    #[test]
    fn anchors() {
        assert_eq!(anchor_target("#work"), Some("#work"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/blog"), None);
    }

    #[test]
    fn parallax_is_half_speed() {
        assert_eq!(parallax_offset(400.0, 0.5), 200.0);
        assert_eq!(parallax_transform(200.0), "translateY(200px)");
    }

    #[test]
    fn indicator_hides_past_threshold() {
        assert_eq!(indicator_opacity(100.0, 100.0), 1.0);
        assert_eq!(indicator_opacity(101.0, 100.0), 0.0);
    }
}
