use glam::Vec2;

use crate::api::config::PageConfig;
use crate::api::types::{PageEvent, WatchId};
use crate::assets::manifest::ScriptManifest;
use crate::core::time::{Sequencer, MAX_FRAME_MS};
use crate::field::{FrameStats, ParticleField, Surface};
use crate::input::keys::EasterEgg;
use crate::input::queue::EventQueue;
use crate::input::transition::{LinkInfo, PageTransition};
use crate::nav::{
    active_section, indicator_opacity, parallax_offset, MobileNav, NavPlacement, ScrollFrame,
    SectionBounds,
};
use crate::players::counter::CounterSet;
use crate::players::terminal::TerminalPlayer;
use crate::players::typewriter::Typewriter;
use crate::theme::{KeyValueStore, ThemeController, ThemeFlag};
use crate::viewport::{Trigger, ViewportOptions, WatchMode, WatchRegistry};

/// Every page component, owned by one value and driven from the host's event loop.
///
/// The host calls the `on_*` methods from DOM event callbacks, `tick` once per
/// animation frame, and then drains [`PageEvent`]s and applies them to the DOM.
/// Components are enabled individually; a page without a given element simply
/// never enables the matching component.
pub struct Page<S: KeyValueStore> {
    config: PageConfig,
    manifest: ScriptManifest,
    theme: ThemeController<S>,
    watches: WatchRegistry,
    counters: CounterSet,
    typewriter: Option<(Sequencer, Typewriter)>,
    terminal: Option<(Sequencer, TerminalPlayer)>,
    terminal_watch: Option<WatchId>,
    field: Option<ParticleField>,
    mobile_nav: MobileNav,
    easter_egg: EasterEgg,
    transition: PageTransition,
    events: EventQueue,
    seed: u64,
}

impl<S: KeyValueStore> Page<S> {
    pub fn new(config: PageConfig, manifest: ScriptManifest, store: S, viewport_width: f64, seed: u64) -> Self {
        let mobile_nav = MobileNav::new(
            config.scroll.mobile_breakpoint_px,
            config.scroll.mobile_hide_after_px,
            viewport_width,
        );
        Self {
            counters: CounterSet::new(config.counter.clone()),
            easter_egg: EasterEgg::new(&config.easter_egg),
            transition: PageTransition::new(&config.transition),
            theme: ThemeController::new(store),
            watches: WatchRegistry::new(),
            typewriter: None,
            terminal: None,
            terminal_watch: None,
            field: None,
            mobile_nav,
            events: EventQueue::new(),
            manifest,
            config,
            seed,
        }
    }

    // -- Theme --

    pub fn theme(&self) -> ThemeFlag {
        self.theme.theme()
    }

    pub fn toggle_theme(&mut self) -> ThemeFlag {
        let theme = self.theme.toggle_theme();
        self.events.push(PageEvent::Theme(theme));
        theme
    }

    pub fn theme_store(&self) -> &S {
        self.theme.store()
    }

    // -- Component activation --

    /// Start the typewriter's countdown. Returns `false` if there are no
    /// phrases or it is already running.
    pub fn enable_typewriter(&mut self) -> bool {
        if self.typewriter.is_some() {
            return false;
        }
        match Typewriter::new(&self.manifest.phrases, self.config.typewriter.clone()) {
            Some(tw) => {
                self.typewriter = Some((Sequencer::new(tw.start_delay()), tw));
                true
            }
            None => false,
        }
    }

    /// Register the terminal container. Playback starts on its first visibility.
    pub fn enable_terminal(&mut self) -> Option<WatchId> {
        if let Some(id) = self.terminal_watch {
            return Some(id);
        }
        let player = TerminalPlayer::new(self.manifest.scenarios.clone(), self.config.terminal.clone())?;
        let id = self.watches.register(WatchMode::Once);
        self.terminal = Some((Sequencer::idle(), player));
        self.terminal_watch = Some(id);
        Some(id)
    }

    pub fn enable_particles(&mut self, size: Vec2) {
        self.field = Some(ParticleField::new(size, self.config.particles.clone(), self.seed));
    }

    /// Register an element with the viewport trigger.
    pub fn watch(&mut self, mode: WatchMode) -> WatchId {
        self.watches.register(mode)
    }

    pub fn reveal_options(&self) -> ViewportOptions {
        ViewportOptions::new(self.config.viewport.reveal_threshold)
            .with_bottom_margin(self.config.viewport.reveal_bottom_margin_px)
    }

    pub fn terminal_options(&self) -> ViewportOptions {
        ViewportOptions::new(self.config.terminal.start_threshold)
    }

    // -- Host events --

    /// Feed an intersection report. Fires the reveal class for repeatable
    /// watches and starts the terminal on its container's first appearance.
    pub fn on_visible(&mut self, id: WatchId, intersecting: bool) -> Trigger {
        let trigger = self.watches.on_intersection(id, intersecting);
        match trigger {
            Trigger::Ignore => {}
            Trigger::Fire { .. } => self.events.push(PageEvent::Reveal(id)),
            Trigger::FireAndUnobserve if Some(id) == self.terminal_watch => self.start_terminal(),
            Trigger::FireAndUnobserve => self.events.push(PageEvent::Reveal(id)),
        }
        trigger
    }

    /// Start the counter for `id` unless it has already been counted.
    /// Returns whether this call claimed it.
    pub fn start_counter(&mut self, id: WatchId, raw_target: Option<&str>) -> bool {
        if !self.watches.claim(id) {
            return false;
        }
        self.counters.start(id, raw_target, self.events.buffer());
        true
    }

    /// Drop a running counter whose element left the document.
    pub fn cancel_counter(&mut self, id: WatchId) {
        if self.counters.cancel(id) {
            log::debug!("counter {:?} cancelled", id);
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[SectionBounds]) -> ScrollFrame {
        let scroll = &self.config.scroll;
        ScrollFrame {
            active: active_section(sections, scroll_y, scroll.look_ahead_px).map(|s| s.id.clone()),
            parallax: parallax_offset(scroll_y, scroll.parallax_factor),
            indicator_opacity: indicator_opacity(scroll_y, scroll.indicator_hide_after_px),
            nav: self.mobile_nav.on_scroll(scroll_y),
        }
    }

    /// Viewport or particle container resized. The particle set is rebuilt from scratch.
    pub fn on_resize(&mut self, viewport_width: f64, field_size: Option<Vec2>) -> Option<NavPlacement> {
        if let (Some(field), Some(size)) = (self.field.as_mut(), field_size) {
            field.resize(size);
        }
        self.mobile_nav.on_resize(viewport_width)
    }

    pub fn on_key(&mut self, key: &str) {
        self.easter_egg.on_key(key, self.events.buffer());
    }

    pub fn on_load(&mut self) {
        self.transition.on_load(self.events.buffer());
    }

    /// Returns `true` when the host must prevent the default navigation.
    pub fn on_link_click(&mut self, link: &LinkInfo<'_>) -> bool {
        self.transition.on_link_click(link, self.events.buffer())
    }

    // -- Frame --

    /// Advance every timed component by `dt` milliseconds.
    pub fn tick(&mut self, dt: f64) {
        let dt = dt.clamp(0.0, MAX_FRAME_MS);
        let out = self.events.buffer();
        if let Some((seq, tw)) = self.typewriter.as_mut() {
            seq.advance(dt, tw, out);
        }
        if let Some((seq, player)) = self.terminal.as_mut() {
            seq.advance(dt, player, out);
        }
        self.counters.tick(dt, out);
        self.easter_egg.tick(dt, out);
        self.transition.tick(dt, out);
    }

    /// Draw one particle frame with the current theme's palette.
    pub fn render<R: Surface + ?Sized>(&mut self, surface: &mut R) -> Option<FrameStats> {
        let theme = self.theme.theme();
        self.field.as_mut().map(|field| field.frame(theme, surface))
    }

    pub fn drain_events(&mut self) -> Vec<PageEvent> {
        self.events.drain()
    }

    fn start_terminal(&mut self) {
        if let Some((seq, player)) = self.terminal.as_mut() {
            if player.start() {
                seq.arm(0.0);
            }
        }
    }
}
