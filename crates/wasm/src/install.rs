//! Wiring a `ScrollSpy` into the page.
//!
//! Installation resolves the TOC and sections, attaches a visibility watcher
//! and schedules the initial marker. Everything registered here lives for the
//! rest of the page: closures are handed to the browser and forgotten.

use crate::document::BrowserDocument;
use crate::error::{ErrorCode, WasmError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tocspy_core::{IntersectionEntry, ScrollSpy, SpyConfig, SpyState};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

type SharedSpy = Rc<RefCell<ScrollSpy<BrowserDocument>>>;

thread_local! {
    static PAGE_SPY_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// How section visibility is being watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    IntersectionObserver,
    /// Fallback when the page has no `IntersectionObserver`.
    ScrollEvents,
}

/// Result of an installation attempt.
#[derive(Debug, Clone)]
pub struct Installation {
    state: SpyState,
    mode: Option<WatchMode>,
    spy: Option<SharedSpy>,
}

impl Installation {
    pub fn state(&self) -> SpyState {
        self.state
    }

    /// `None` when the spy disabled itself.
    pub fn watch_mode(&self) -> Option<WatchMode> {
        self.mode
    }

    pub fn active_section(&self) -> Option<String> {
        self.spy
            .as_ref()
            .and_then(|spy| spy.borrow().active_section().map(str::to_string))
    }

    /// Watched section ids that exist on the page.
    pub fn sections(&self) -> Vec<String> {
        self.spy
            .as_ref()
            .map(|spy| {
                spy.borrow()
                    .sections()
                    .ids()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Run one geometry-based update, as the scroll fallback does.
    pub fn evaluate(&self) -> Result<bool, WasmError> {
        match &self.spy {
            Some(spy) => Ok(spy.borrow_mut().evaluate()?),
            None => Err(tocspy_core::SpyError::NotActive.into()),
        }
    }
}

/// Install the page's spy once the document structure is ready.
///
/// Runs immediately when `DOMContentLoaded` has already fired, which is the
/// usual case for an asynchronously loaded module. Only one page spy may be
/// installed; later calls fail with [`ErrorCode::AlreadyInstalled`].
pub fn install_when_ready(config: SpyConfig) -> Result<(), WasmError> {
    config.validate()?;
    if PAGE_SPY_INSTALLED.with(Cell::get) {
        return Err(WasmError::new(
            ErrorCode::AlreadyInstalled,
            "A scroll spy is already installed on this page",
        ));
    }
    let host = BrowserDocument::from_window()?;
    PAGE_SPY_INSTALLED.with(|installed| installed.set(true));

    if host.document().ready_state() != "loading" {
        install(host, config)?;
        return Ok(());
    }

    let document = host.document().clone();
    let on_ready = Closure::once_into_js(move || {
        if let Err(e) = install(host, config) {
            log::warn!("Scroll spy installation failed: {}", e);
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        .map_err(|e| WasmError::host("addEventListener", e))?;
    log::debug!("Scroll spy waiting for DOMContentLoaded");
    Ok(())
}

/// Initialize a spy on `host` and attach it to the page.
pub fn install(host: BrowserDocument, config: SpyConfig) -> Result<Installation, WasmError> {
    let mut spy = ScrollSpy::new(host, config)?;
    let state = spy.initialize();
    if state != SpyState::Active {
        return Ok(Installation {
            state,
            mode: None,
            spy: None,
        });
    }

    let spy = Rc::new(RefCell::new(spy));
    let mode = watch(&spy)?;
    schedule_initial_active(&spy)?;

    Ok(Installation {
        state,
        mode: Some(mode),
        spy: Some(spy),
    })
}

fn watch(spy: &SharedSpy) -> Result<WatchMode, WasmError> {
    let callback_spy = Rc::clone(spy);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let batch: Vec<IntersectionEntry> = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| IntersectionEntry {
                    section_id: entry.target().id(),
                    is_intersecting: entry.is_intersecting(),
                    viewport_top: entry.bounding_client_rect().top(),
                })
                .collect();
            if let Err(e) = callback_spy.borrow_mut().handle_intersections(&batch) {
                log::warn!("Intersection update failed: {}", e);
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(&spy.borrow().band().root_margin());
    options.set_threshold(&JsValue::from_f64(0.0));

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            for section in spy.borrow().sections() {
                observer.observe(&section.element);
            }
            callback.forget();
            log::debug!(
                "Observing sections with root margin {}",
                spy.borrow().band().root_margin()
            );
            Ok(WatchMode::IntersectionObserver)
        }
        Err(e) => {
            log::info!(
                "IntersectionObserver unavailable ({}), falling back to scroll events",
                crate::error::describe(&e)
            );
            listen_scroll(spy)
        }
    }
}

fn listen_scroll(spy: &SharedSpy) -> Result<WatchMode, WasmError> {
    let callback_spy = Rc::clone(spy);
    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = callback_spy.borrow_mut().evaluate() {
            log::warn!("Scroll update failed: {}", e);
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(true);

    let window = spy.borrow().document().window().clone();
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| WasmError::host("addEventListener", e))?;
    on_scroll.forget();
    Ok(WatchMode::ScrollEvents)
}

/// Mark the initial section after the configured delay, covering pages that
/// load already scrolled (deep links) before any observer delivery.
fn schedule_initial_active(spy: &SharedSpy) -> Result<(), WasmError> {
    let (window, delay_ms) = {
        let spy = spy.borrow();
        (spy.document().window().clone(), spy.config().initial_delay_ms)
    };

    let timer_spy = Rc::clone(spy);
    let callback = Closure::once_into_js(move || {
        if let Err(e) = timer_spy.borrow_mut().apply_initial_active() {
            log::warn!("Initial section update failed: {}", e);
        }
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        )
        .map_err(|e| WasmError::host("setTimeout", e))?;
    Ok(())
}
