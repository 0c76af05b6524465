//! Selectors, markers and small DOM helpers. Every lookup is optional:
//! a missing element turns the matching feature off instead of failing.

use folio_engine::WatchId;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Window,
};

pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const THEME_ICON: &str = "i";
pub const THEME_ATTR: &str = "data-theme";

pub const NAV_LINK: &str = ".nav-link";
pub const NAV_MENU: &str = ".nav-menu";
pub const SECTIONS: &str = "section[id]";
pub const ACTIVE_CLASS: &str = "active";

pub const TYPED_TEXT: &str = ".typed-text";
pub const CURSOR: &str = ".cursor";
pub const TYPING_CLASS: &str = "typing";

pub const REVEAL: &str = "[data-aos]";
pub const REVEAL_CLASS: &str = "aos-animate";
pub const METRIC: &str = ".metric-number";
pub const TARGET_ATTR: &str = "data-target";
/// Stamped on watched elements so observer entries map back to a `WatchId`.
/// An element can be both a reveal target and a counter, so each has its own.
pub const REVEAL_WATCH_ATTR: &str = "data-folio-reveal";
pub const COUNTER_WATCH_ATTR: &str = "data-folio-counter";

pub const SCROLL_INDICATOR: &str = ".scroll-indicator";
pub const HERO_BACKGROUND: &str = ".hero-background";

pub const PARTICLE_CANVAS_ID: &str = "particleCanvas";

pub const TERMINAL_BODY_ID: &str = "terminalBody";
pub const TERMINAL: &str = ".terminal";
pub const TERMINAL_LINE: &str = ".terminal-line";
pub const TERMINAL_COMMAND: &str = ".terminal-command";
pub const TERMINAL_OUTPUT_CLASS: &str = "terminal-output";
pub const PROMPT_LINE_HTML: &str =
    r#"<span class="terminal-prompt">$</span><span class="terminal-command"></span>"#;

pub const LOADED_CLASS: &str = "loaded";
pub const EASTER_EGG_ANIMATION: &str = "rainbow 2s linear infinite";
pub const EASTER_EGG_KEYFRAMES: &str = "
    @keyframes rainbow {
        0% { filter: hue-rotate(0deg); }
        100% { filter: hue-rotate(360deg); }
    }
";

/// JSON overrides the host page may embed in `<script type="application/json">`.
pub const SCRIPT_MANIFEST_ID: &str = "folio-script";
pub const CONFIG_ID: &str = "folio-config";

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match document().map(|d| d.query_selector_all(selector)) {
        Some(Ok(list)) => collect(&list),
        _ => Vec::new(),
    }
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| collect(&list))
        .unwrap_or_default()
}

fn collect(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let result = if on { list.add_1(class) } else { list.remove_1(class) };
    if let Err(err) = result {
        log::warn!("class {class}: {err:?}");
    }
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let style = el.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(err) = result {
            log::warn!("style {property}: {err:?}");
        }
    }
}

pub fn stamp(el: &Element, attr: &str, id: WatchId) {
    if let Err(err) = el.set_attribute(attr, &id.0.to_string()) {
        log::warn!("stamp {id:?}: {err:?}");
    }
}

pub fn watch_id(el: &Element, attr: &str) -> Option<WatchId> {
    el.get_attribute(attr)?.parse().ok().map(WatchId)
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn request_animation_frame(cb: &Closure<dyn FnMut(f64)>) {
    if let Some(w) = window() {
        if let Err(err) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::warn!("requestAnimationFrame: {err:?}");
        }
    }
}

/// Attach `f` for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, passive: bool, f: impl FnMut(Event) + 'static) {
    let cb = Closure::<dyn FnMut(Event)>::new(f);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        cb.as_ref().unchecked_ref(),
        &options,
    ) {
        log::warn!("listen {event}: {err:?}");
    }
    cb.forget();
}

/// Text of an embedded JSON block, if the page ships one.
pub fn embedded_json(id: &str) -> Option<String> {
    by_id(id)?.text_content()
}

pub fn inject_style(css: &str) {
    let Some(doc) = document() else { return };
    let Some(head) = doc.head() else { return };
    match doc.create_element("style") {
        Ok(style) => {
            style.set_text_content(Some(css));
            if let Err(err) = head.append_child(&style) {
                log::warn!("inject style: {err:?}");
            }
        }
        Err(err) => log::warn!("create style: {err:?}"),
    }
}
