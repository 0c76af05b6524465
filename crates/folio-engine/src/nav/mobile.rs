/// Where the floating nav sits on narrow viewports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPlacement {
    Shown,
    Hidden,
}

impl NavPlacement {
    /// CSS transform; the nav is horizontally centered with `translateX(-50%)`.
    pub fn transform(self) -> &'static str {
        match self {
            NavPlacement::Shown => "translateX(-50%) translateY(0)",
            NavPlacement::Hidden => "translateX(-50%) translateY(-100px)",
        }
    }
}

/// Hide-on-scroll-down behavior for the nav on narrow viewports.
///
/// Installed once; every scroll is gated on the current width, so crossing the
/// breakpoint back and forth never stacks handlers.
#[derive(Debug, Clone)]
pub struct MobileNav {
    breakpoint: f64,
    hide_after: f64,
    last_scroll: f64,
    mobile: bool,
}

impl MobileNav {
    pub fn new(breakpoint: f64, hide_after: f64, viewport_width: f64) -> Self {
        Self {
            breakpoint,
            hide_after,
            last_scroll: 0.0,
            mobile: viewport_width <= breakpoint,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    /// Track a viewport resize. Leaving the mobile range restores the nav;
    /// entering it starts direction tracking afresh.
    pub fn on_resize(&mut self, viewport_width: f64) -> Option<NavPlacement> {
        let mobile = viewport_width <= self.breakpoint;
        if mobile == self.mobile {
            return None;
        }
        self.mobile = mobile;
        self.last_scroll = 0.0;
        log::debug!("mobile nav {}", if mobile { "enabled" } else { "disabled" });
        (!mobile).then_some(NavPlacement::Shown)
    }

    /// Scrolling down past `hide_after` hides the nav; anything else shows it.
    /// `None` on wide viewports.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<NavPlacement> {
        if !self.mobile {
            return None;
        }
        let placement = if scroll_y > self.last_scroll && scroll_y > self.hide_after {
            NavPlacement::Hidden
        } else {
            NavPlacement::Shown
        };
        self.last_scroll = scroll_y;
        Some(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_is_a_no_op() {
        let mut nav = MobileNav::new(768.0, 100.0, 1280.0);
        assert_eq!(nav.on_scroll(500.0), None);
    }

    #[test]
    fn breakpoint_is_inclusive() {
        assert!(MobileNav::new(768.0, 100.0, 768.0).is_mobile());
    }

    #[test]
    fn hides_scrolling_down_shows_scrolling_up() {
        let mut nav = MobileNav::new(768.0, 100.0, 375.0);
        assert_eq!(nav.on_scroll(50.0), Some(NavPlacement::Shown));
        assert_eq!(nav.on_scroll(150.0), Some(NavPlacement::Hidden));
        assert_eq!(nav.on_scroll(400.0), Some(NavPlacement::Hidden));
        assert_eq!(nav.on_scroll(350.0), Some(NavPlacement::Shown));
    }

    #[test]
    fn resize_across_breakpoint_toggles_tracking() {
        let mut nav = MobileNav::new(768.0, 100.0, 375.0);
        nav.on_scroll(300.0);
        assert_eq!(nav.on_resize(1024.0), Some(NavPlacement::Shown));
        assert_eq!(nav.on_scroll(600.0), None);
        assert_eq!(nav.on_resize(1100.0), None);
        assert_eq!(nav.on_resize(400.0), None);
        // Tracking restarts from the top after re-entering the mobile range.
        assert_eq!(nav.on_scroll(200.0), Some(NavPlacement::Hidden));
    }

    #[test]
    fn transforms() {
        assert!(NavPlacement::Hidden.transform().contains("-100px"));
        assert!(NavPlacement::Shown.transform().ends_with("translateY(0)"));
    }
}
