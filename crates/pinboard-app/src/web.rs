//! WebAssembly entry point: discover page widgets and wire them to a desktop.

use crate::web_host::WebHost;
use kurbo::Point;
use pinboard_core::{ConfigError, Desktop, DesktopConfig, WidgetOptions, WidgetSpec};
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

const CONFIG_SCRIPT_ID: &str = "pinboard-config";
const WIDGET_SELECTOR: &str = "[data-widget]";

type SharedDesktop = Rc<RefCell<Desktop<WebHost>>>;

thread_local! {
    static DESKTOP: RefCell<Option<SharedDesktop>> = const { RefCell::new(None) };
}

#[derive(Debug, Error)]
enum StartError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("DOM call failed: {0}")]
    Dom(String),
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();

    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {err}").into());
    }

    log::info!("Starting Pinboard (WASM)");
    match start() {
        Ok(count) => log::info!("Pinboard ready with {} widget(s)", count),
        Err(err) => log::error!("Pinboard failed to start: {}", err),
    }
}

fn start() -> Result<usize, StartError> {
    let window = web_sys::window().ok_or(StartError::NoWindow)?;
    let document = window.document().ok_or(StartError::NoDocument)?;

    let config = match read_config(&document) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid desktop configuration, using defaults: {}", err);
            DesktopConfig::default()
        }
    };

    let desktop: SharedDesktop = Rc::new_cyclic(|weak| {
        RefCell::new(Desktop::new(
            WebHost::new(window.clone(), document.clone(), weak.clone()),
            config,
        ))
    });

    let nodes = document
        .query_selector_all(WIDGET_SELECTOR)
        .map_err(|err| StartError::Dom(format!("{:?}", err)))?;
    for index in 0..nodes.length() {
        let Some(container) = nodes.get(index).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let spec = widget_spec(&container);
        // The desktop already logged the error; the page keeps running.
        if let Err(err) = desktop.borrow_mut().add_widget(spec) {
            let name = container.get_attribute("data-widget").unwrap_or_default();
            log::debug!("Skipping widget {:?} (#{}): {}", name, container.id(), err);
        }
    }
    let count = desktop.borrow().len();

    let weak = Rc::downgrade(&desktop);
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let Some(desktop) = weak.upgrade() else {
            return;
        };
        match desktop.try_borrow_mut() {
            Ok(mut desktop) => {
                desktop.reflow();
            }
            Err(_) => log::warn!("Desktop busy, skipping reflow"),
        }
    });
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(|err| StartError::Dom(format!("{:?}", err)))?;
    // Lives for the page.
    on_resize.forget();

    DESKTOP.with(|slot| *slot.borrow_mut() = Some(desktop));
    Ok(count)
}

fn read_config(document: &Document) -> Result<DesktopConfig, ConfigError> {
    match document.get_element_by_id(CONFIG_SCRIPT_ID).and_then(|el| el.text_content()) {
        Some(json) if !json.trim().is_empty() => DesktopConfig::from_json(&json),
        _ => Ok(DesktopConfig::default()),
    }
}

fn widget_spec(container: &HtmlElement) -> WidgetSpec<HtmlElement> {
    let surface =
        descendant(container, "[data-widget-surface]").unwrap_or_else(|| container.clone());
    let defaults = WidgetOptions::default();
    let options = WidgetOptions {
        draggable: flag(container, "data-draggable", defaults.draggable),
        clickable: flag(container, "data-clickable", defaults.clickable),
        hover_effects: flag(container, "data-hover-effects", defaults.hover_effects),
        shadows: flag(container, "data-shadows", defaults.shadows),
    };
    let position = Point::new(
        attr(container, "data-x").unwrap_or(0.0),
        attr(container, "data-y").unwrap_or(0.0),
    );

    let mut spec = WidgetSpec::new(surface)
        .with_container(container.clone())
        .at(position)
        .with_rotation(attr(container, "data-rotation").unwrap_or(0.0))
        .with_scale(attr(container, "data-scale").unwrap_or(1.0))
        .with_z_index(attr(container, "data-z-index").unwrap_or(0))
        .with_options(options);
    if let Some(inner) = descendant(container, "[data-widget-inner]") {
        spec = spec.with_inner(inner);
    }
    spec
}

fn descendant(root: &Element, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector).ok().flatten()?.dyn_into::<HtmlElement>().ok()
}

fn attr<T: FromStr>(el: &Element, name: &str) -> Option<T> {
    el.get_attribute(name)?.trim().parse().ok()
}

/// Boolean data attribute: absent means `default`, `"false"` and `"0"` mean
/// off, anything else (including an empty value) means on.
fn flag(el: &Element, name: &str, default: bool) -> bool {
    match el.get_attribute(name).as_deref().map(str::trim) {
        None => default,
        Some("false") | Some("0") => false,
        Some(_) => true,
    }
}
