//! Browser bridge for `folio-engine`.
//!
//! Looks up the page's elements, installs the DOM listeners and viewport
//! observers, and drives the engine from a single `requestAnimationFrame`
//! loop. Starts itself once the document is parsed; `folio_init` is also
//! exported for hosts that load the module by hand.

pub mod canvas;
pub mod dom;
pub mod runner;
pub mod storage;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverInit};

use folio_engine::ViewportOptions;
pub use runner::PageRunner;

thread_local! {
    static RUNNER: RefCell<Option<PageRunner>> = const { RefCell::new(None) };
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` against the page runner. Returns `None` before init, or when a
/// callback fires while another one still holds the runner.
fn with_runner<R>(f: impl FnOnce(&mut PageRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut borrow) => borrow.as_mut().map(f),
        Err(_) => {
            log::warn!("page runner busy; dropping nested callback");
            None
        }
    })
}

#[wasm_bindgen(start)]
pub fn start() {
    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        dom::listen(&document, "DOMContentLoaded", false, |_| folio_init());
    } else {
        folio_init();
    }
}

/// Build the runner and wire every listener. Later calls are no-ops.
#[wasm_bindgen]
pub fn folio_init() {
    if STARTED.with(|s| s.replace(true)) {
        return;
    }
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let runner = PageRunner::new(seed);
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    let Some(watches) = with_runner(|r| r.init()) else {
        return;
    };
    observe(watches.reveal, watches.reveal_options, |entries, _| {
        with_runner(|r| r.on_reveal_entries(&entries));
    });
    if let Some(terminal) = watches.terminal {
        observe(vec![terminal], watches.terminal_options, |entries, observer| {
            with_runner(|r| r.on_terminal_entries(&entries, &observer));
        });
    }
    install_listeners();
    start_frame_loop();

    // Apply scroll-dependent state for the initial position.
    with_runner(|r| r.on_scroll());
    log::info!("folio: initialized");
}

#[wasm_bindgen]
pub fn folio_toggle_theme() -> Option<String> {
    with_runner(|r| r.on_theme_click().as_str().to_string())
}

#[wasm_bindgen]
pub fn folio_theme() -> Option<String> {
    with_runner(|r| r.theme().as_str().to_string())
}

fn install_listeners() {
    let (Some(window), Some(document)) = (dom::window(), dom::document()) else {
        return;
    };

    if let Some(toggle) = dom::by_id(dom::THEME_TOGGLE_ID) {
        dom::listen(&toggle, "click", false, |_| {
            with_runner(|r| r.on_theme_click());
        });
    }

    for link in dom::query_all(dom::NAV_LINK) {
        let target = link.clone();
        dom::listen(&link, "click", false, move |event| {
            if runner::scroll_to_anchor(&target) {
                event.prevent_default();
            }
        });
    }

    dom::listen(&window, "scroll", true, |_| {
        with_runner(|r| r.on_scroll());
    });
    dom::listen(&window, "resize", true, |_| {
        with_runner(|r| r.on_resize());
    });
    dom::listen(&document, "keydown", false, |event| {
        with_runner(|r| r.on_key(&event));
    });
    dom::listen(&document, "click", false, |event| {
        with_runner(|r| r.on_click(&event));
    });

    if document.ready_state() == "complete" {
        with_runner(|r| r.on_load());
    } else {
        dom::listen(&window, "load", false, |_| {
            with_runner(|r| r.on_load());
        });
    }
}

fn observe(
    targets: Vec<web_sys::Element>,
    options: ViewportOptions,
    f: impl FnMut(Array, IntersectionObserver) + 'static,
) {
    if targets.is_empty() {
        return;
    }
    let cb = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(f);
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin());
    match IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            for target in &targets {
                observer.observe(target);
            }
        }
        Err(err) => log::warn!("IntersectionObserver unavailable: {err:?}"),
    }
    cb.forget();
}

fn start_frame_loop() {
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::new(move |now: f64| {
        with_runner(|r| r.frame(now));
        if let Some(cb) = f.borrow().as_ref() {
            dom::request_animation_frame(cb);
        }
    }));
    if let Some(cb) = g.borrow().as_ref() {
        dom::request_animation_frame(cb);
    };
}
