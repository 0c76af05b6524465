//! Fade-out-then-navigate for same-site links.

use crate::api::config::TransitionConfig;
use crate::api::types::PageEvent;
use crate::core::time::{Sequencer, Step};

/// The attributes of a clicked link that decide whether it is intercepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkInfo<'a> {
    /// Raw `href` attribute.
    pub href: Option<&'a str>,
    /// Resolved absolute URL the browser would navigate to.
    pub url: &'a str,
    /// Hostname of the resolved URL.
    pub host: &'a str,
    /// Hostname of the current page.
    pub page_host: &'a str,
    pub target: Option<&'a str>,
    pub download: bool,
}

impl LinkInfo<'_> {
    /// Same-site navigation in the current tab that is not an in-page anchor or a download.
    pub fn should_intercept(&self) -> bool {
        let Some(href) = self.href else {
            return false;
        };
        !href.is_empty()
            && !href.starts_with('#')
            && !self.download
            && self.host == self.page_host
            && self.target.map_or(true, str::is_empty)
    }
}

#[derive(Debug, Clone, Default)]
struct Leave {
    href: Option<String>,
}

impl Step for Leave {
    type Output = PageEvent;

    fn step(&mut self, out: &mut Vec<PageEvent>) -> Option<f64> {
        if let Some(href) = self.href.take() {
            out.push(PageEvent::Navigate { href });
        }
        None
    }
}

/// Page ready marker plus the delayed departure.
#[derive(Debug, Clone)]
pub struct PageTransition {
    leave: Leave,
    timer: Sequencer,
    delay_ms: f64,
}

impl PageTransition {
    pub fn new(config: &TransitionConfig) -> Self {
        Self {
            leave: Leave::default(),
            timer: Sequencer::idle(),
            delay_ms: config.leave_delay_ms,
        }
    }

    pub fn on_load(&mut self, out: &mut Vec<PageEvent>) {
        out.push(PageEvent::Ready(true));
    }

    /// Returns `true` when the click was taken over and default navigation must
    /// be prevented. While a departure is pending further clicks are swallowed.
    pub fn on_link_click(&mut self, link: &LinkInfo<'_>, out: &mut Vec<PageEvent>) -> bool {
        if !link.should_intercept() {
            return false;
        }
        if self.leave.href.is_none() {
            log::debug!("leaving for {}", link.url);
            self.leave.href = Some(link.url.to_string());
            out.push(PageEvent::Ready(false));
            self.timer.arm(self.delay_ms);
        }
        true
    }

    pub fn is_leaving(&self) -> bool {
        self.leave.href.is_some()
    }

    pub fn tick(&mut self, dt: f64, out: &mut Vec<PageEvent>) {
        self.timer.advance(dt, &mut self.leave, out);
    }
}
