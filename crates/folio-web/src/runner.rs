use std::collections::HashMap;

use folio_engine::{
    anchor_target, link_matches, LinkInfo, NavPlacement, Page, PageConfig, PageEvent,
    ScriptManifest, SectionBounds, TerminalEvent, ThemeFlag, Trigger, WatchId, WatchMode,
};
use js_sys::Array;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlAnchorElement, HtmlCanvasElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::canvas::CanvasSurface;
use crate::dom;
use crate::storage::LocalStore;

/// Elements looked up once at startup.
struct Elements {
    root: Option<Element>,
    body: Option<HtmlElement>,
    theme_icon: Option<Element>,
    nav_links: Vec<Element>,
    nav_menu: Option<Element>,
    sections: Vec<HtmlElement>,
    typed_text: Option<Element>,
    cursor: Option<Element>,
    scroll_indicator: Option<Element>,
    hero_background: Option<Element>,
    terminal_body: Option<Element>,
}

impl Elements {
    fn lookup() -> Self {
        let document = dom::document();
        Self {
            root: document.as_ref().and_then(|d| d.document_element()),
            body: document.as_ref().and_then(|d| d.body()),
            theme_icon: dom::by_id(dom::THEME_TOGGLE_ID)
                .and_then(|t| t.query_selector(dom::THEME_ICON).ok().flatten()),
            nav_links: dom::query_all(dom::NAV_LINK),
            nav_menu: dom::query(dom::NAV_MENU),
            sections: dom::query_all(dom::SECTIONS)
                .into_iter()
                .filter_map(|s| s.dyn_into::<HtmlElement>().ok())
                .collect(),
            typed_text: dom::query(dom::TYPED_TEXT),
            cursor: dom::query(dom::CURSOR),
            scroll_indicator: dom::query(dom::SCROLL_INDICATOR),
            hero_background: dom::query(dom::HERO_BACKGROUND),
            terminal_body: dom::by_id(dom::TERMINAL_BODY_ID),
        }
    }
}

/// What the observers need once the runner has registered its watches.
pub struct Watches {
    pub reveal: Vec<Element>,
    pub reveal_options: folio_engine::ViewportOptions,
    pub terminal: Option<Element>,
    pub terminal_options: folio_engine::ViewportOptions,
}

/// Owns the [`Page`] and applies its events to the live document.
///
/// Lives in a `thread_local!` in `lib.rs`; every DOM callback and the
/// animation frame reach it through `with_runner`.
pub struct PageRunner {
    page: Page<LocalStore>,
    els: Elements,
    surface: Option<CanvasSurface>,
    watched: HashMap<WatchId, Element>,
    terminal_watch: Option<WatchId>,
    terminal_command: Option<Element>,
    last_frame: Option<f64>,
}

impl PageRunner {
    pub fn new(seed: u64) -> Self {
        let config = load_config();
        let manifest = load_manifest();
        let page = Page::new(config, manifest, LocalStore::open(), dom::viewport_width(), seed);
        let surface = dom::by_id(dom::PARTICLE_CANVAS_ID)
            .and_then(|c| c.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(CanvasSurface::new);
        Self {
            page,
            els: Elements::lookup(),
            surface,
            watched: HashMap::new(),
            terminal_watch: None,
            terminal_command: None,
            last_frame: None,
        }
    }

    /// Enable every component whose element is present and register the
    /// elements the viewport observers must watch.
    pub fn init(&mut self) -> Watches {
        self.apply_theme(self.page.theme());
        dom::inject_style(dom::EASTER_EGG_KEYFRAMES);

        if self.els.typed_text.is_some() && !self.page.enable_typewriter() {
            log::warn!("typewriter: no phrases to type");
        }

        if let Some(surface) = self.surface.as_ref() {
            let size = surface.fit_to_container();
            self.page.enable_particles(size);
        }

        let mut reveal = Vec::new();
        for el in dom::query_all(dom::REVEAL) {
            let id = self.page.watch(WatchMode::Repeat);
            dom::stamp(&el, dom::REVEAL_WATCH_ATTR, id);
            self.watched.insert(id, el.clone());
            reveal.push(el);
        }
        for el in dom::query_all(dom::METRIC) {
            let id = self.page.watch(WatchMode::Once);
            dom::stamp(&el, dom::COUNTER_WATCH_ATTR, id);
            self.watched.insert(id, el);
        }

        let terminal = match self.els.terminal_body.as_ref() {
            Some(body) => {
                self.terminal_watch = self.page.enable_terminal();
                if self.terminal_watch.is_none() {
                    log::warn!("terminal: no scenarios to play");
                }
                let container = body.closest(dom::TERMINAL).ok().flatten();
                self.terminal_watch
                    .map(|_| container.unwrap_or_else(|| body.clone()))
            }
            None => None,
        };

        log::info!(
            "folio: {} reveal targets, {} counters, terminal {}",
            reveal.len(),
            self.watched.len() - reveal.len(),
            if terminal.is_some() { "on" } else { "off" },
        );

        Watches {
            reveal,
            reveal_options: self.page.reveal_options(),
            terminal,
            terminal_options: self.page.terminal_options(),
        }
    }

    pub fn theme(&self) -> ThemeFlag {
        self.page.theme()
    }

    /// One animation frame: advance timers, draw particles, apply the results.
    pub fn frame(&mut self, now: f64) {
        let dt = self.last_frame.map_or(0.0, |last| now - last);
        self.last_frame = Some(now);
        self.page.tick(dt);
        if let Some(surface) = self.surface.as_mut() {
            self.page.render(surface);
        }
        self.flush();
    }

    // -- DOM callbacks --

    pub fn on_theme_click(&mut self) -> ThemeFlag {
        let theme = self.page.toggle_theme();
        self.flush();
        theme
    }

    pub fn on_scroll(&mut self) {
        let bounds: Vec<SectionBounds> = self
            .els
            .sections
            .iter()
            .map(|s| SectionBounds::new(s.id(), s.offset_top() as f64))
            .collect();
        let frame = self.page.on_scroll(dom::scroll_y(), &bounds);

        for link in &self.els.nav_links {
            let href = link.get_attribute("href").unwrap_or_default();
            let on = frame.active.as_deref().is_some_and(|id| link_matches(&href, id));
            dom::set_class(link, dom::ACTIVE_CLASS, on);
        }
        if let Some(hero) = &self.els.hero_background {
            dom::set_style(hero, "transform", &folio_engine::parallax_transform(frame.parallax));
        }
        if let Some(indicator) = &self.els.scroll_indicator {
            dom::set_style(indicator, "opacity", &frame.indicator_opacity.to_string());
        }
        if let Some(placement) = frame.nav {
            self.place_nav(placement);
        }
    }

    pub fn on_resize(&mut self) {
        let size = self.surface.as_ref().map(CanvasSurface::fit_to_container);
        if let Some(placement) = self.page.on_resize(dom::viewport_width(), size) {
            self.place_nav(placement);
        }
    }

    pub fn on_key(&mut self, event: &Event) {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            self.page.on_key(&event.key());
            self.flush();
        }
    }

    pub fn on_load(&mut self) {
        self.page.on_load();
        self.flush();
    }

    /// Document-level click: fade out before same-site navigation.
    pub fn on_click(&mut self, event: &Event) {
        let Some(anchor) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("a").ok().flatten())
            .and_then(|a| a.dyn_into::<HtmlAnchorElement>().ok())
        else {
            return;
        };
        let href_attr = anchor.get_attribute("href");
        let target_attr = anchor.get_attribute("target");
        let url = anchor.href();
        let host = anchor.hostname();
        let page_host = dom::window()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_default();
        let link = LinkInfo {
            href: href_attr.as_deref(),
            url: &url,
            host: &host,
            page_host: &page_host,
            target: target_attr.as_deref(),
            download: anchor.has_attribute("download"),
        };
        if self.page.on_link_click(&link) {
            event.prevent_default();
        }
        self.flush();
    }

    pub fn on_reveal_entries(&mut self, entries: &Array) {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let Some(id) = dom::watch_id(&target, dom::REVEAL_WATCH_ATTR) else {
                continue;
            };
            if let Trigger::Fire { .. } = self.page.on_visible(id, entry.is_intersecting()) {
                self.start_counters_in(&target);
            }
        }
        self.flush();
    }

    pub fn on_terminal_entries(&mut self, entries: &Array, observer: &IntersectionObserver) {
        let Some(id) = self.terminal_watch else {
            return;
        };
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if self.page.on_visible(id, entry.is_intersecting()) == Trigger::FireAndUnobserve {
                observer.unobserve(&entry.target());
            }
        }
        self.flush();
    }

    /// Start the counters inside a revealed element, including the element itself.
    fn start_counters_in(&mut self, root: &Element) {
        let mut metrics = dom::query_all_in(root, dom::METRIC);
        if root.matches(dom::METRIC).unwrap_or(false) {
            metrics.push(root.clone());
        }
        for metric in metrics {
            if let Some(id) = dom::watch_id(&metric, dom::COUNTER_WATCH_ATTR) {
                let raw = metric.get_attribute(dom::TARGET_ATTR);
                self.page.start_counter(id, raw.as_deref());
            }
        }
    }

    // -- Applying page events --

    fn flush(&mut self) {
        for event in self.page.drain_events() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: PageEvent) {
        match event {
            PageEvent::Typed { text, cursor_active } => {
                if let Some(el) = &self.els.typed_text {
                    el.set_text_content(Some(&text));
                }
                if let Some(cursor) = &self.els.cursor {
                    dom::set_class(cursor, dom::TYPING_CLASS, cursor_active);
                }
            }
            PageEvent::Counter { id, text } => match self.watched.get(&id) {
                Some(el) if el.is_connected() => el.set_text_content(Some(&text)),
                _ => self.page.cancel_counter(id),
            },
            PageEvent::Reveal(id) => {
                if let Some(el) = self.watched.get(&id) {
                    dom::set_class(el, dom::REVEAL_CLASS, true);
                }
            }
            PageEvent::Terminal(event) => self.apply_terminal(event),
            PageEvent::Theme(theme) => self.apply_theme(theme),
            PageEvent::EasterEgg { active } => {
                if let Some(body) = &self.els.body {
                    let animation = if active { dom::EASTER_EGG_ANIMATION } else { "" };
                    dom::set_style(body, "animation", animation);
                }
            }
            PageEvent::Ready(ready) => {
                if let Some(body) = &self.els.body {
                    dom::set_class(body, dom::LOADED_CLASS, ready);
                }
            }
            PageEvent::Navigate { href } => {
                if let Some(window) = dom::window() {
                    if let Err(err) = window.location().set_href(&href) {
                        log::warn!("navigate to {href}: {err:?}");
                    }
                }
            }
        }
    }

    fn apply_theme(&self, theme: ThemeFlag) {
        if let Some(root) = &self.els.root {
            if let Err(err) = root.set_attribute(dom::THEME_ATTR, theme.as_str()) {
                log::warn!("set theme: {err:?}");
            }
        }
        if let Some(icon) = &self.els.theme_icon {
            icon.set_class_name(theme.icon_class());
        }
    }

    fn apply_terminal(&mut self, event: TerminalEvent) {
        let Some(body) = self.els.terminal_body.as_ref() else {
            return;
        };
        match event {
            TerminalEvent::Prompt { reuse_existing } => {
                let existing = if reuse_existing {
                    body.query_selector(dom::TERMINAL_LINE)
                        .ok()
                        .flatten()
                        .and_then(|line| line.query_selector(dom::TERMINAL_COMMAND).ok().flatten())
                } else {
                    None
                };
                let command = existing.or_else(|| append_prompt_line(body));
                if let Some(command) = &command {
                    command.set_text_content(Some(""));
                }
                self.terminal_command = command;
            }
            TerminalEvent::Char(c) => {
                if let Some(command) = &self.terminal_command {
                    let mut text = command.text_content().unwrap_or_default();
                    text.push(c);
                    command.set_text_content(Some(&text));
                }
            }
            TerminalEvent::Output(markup) => append_output(body, &markup),
            TerminalEvent::Clear => {
                body.set_inner_html("");
                self.terminal_command = None;
            }
        }
    }

    fn place_nav(&self, placement: NavPlacement) {
        if let Some(menu) = &self.els.nav_menu {
            dom::set_style(menu, "transform", placement.transform());
        }
    }
}

/// Smooth-scroll to the section a nav link points at. Returns whether the
/// click was an in-page anchor.
pub fn scroll_to_anchor(link: &Element) -> bool {
    let href = link.get_attribute("href").unwrap_or_default();
    let Some(selector) = anchor_target(&href) else {
        return false;
    };
    if let Some(target) = dom::query(selector) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
    true
}

fn append_prompt_line(body: &Element) -> Option<Element> {
    let document = dom::document()?;
    let line = document.create_element("div").ok()?;
    line.set_class_name("terminal-line");
    line.set_inner_html(dom::PROMPT_LINE_HTML);
    body.append_child(&line).ok()?;
    line.query_selector(dom::TERMINAL_COMMAND).ok().flatten()
}

fn append_output(body: &Element, markup: &str) {
    let Some(document) = dom::document() else {
        return;
    };
    match document.create_element("div") {
        Ok(output) => {
            output.set_class_name(dom::TERMINAL_OUTPUT_CLASS);
            output.set_inner_html(markup);
            if let Err(err) = body.append_child(&output) {
                log::warn!("terminal output: {err:?}");
            }
        }
        Err(err) => log::warn!("terminal output: {err:?}"),
    }
}

fn load_config() -> PageConfig {
    match dom::embedded_json(dom::CONFIG_ID) {
        Some(json) => PageConfig::from_json(&json).unwrap_or_else(|err| {
            log::warn!("#{}: {err}; using defaults", dom::CONFIG_ID);
            PageConfig::default()
        }),
        None => PageConfig::default(),
    }
}

fn load_manifest() -> ScriptManifest {
    match dom::embedded_json(dom::SCRIPT_MANIFEST_ID) {
        Some(json) => ScriptManifest::from_json(&json).unwrap_or_else(|err| {
            log::warn!("#{}: {err}; using built-in scripts", dom::SCRIPT_MANIFEST_ID);
            ScriptManifest::default()
        }),
        None => ScriptManifest::default(),
    }
}
