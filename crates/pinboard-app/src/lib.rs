//! Pinboard Application
//!
//! Shells around the interaction core: a scenario replayer for native use and
//! the browser entry point that wires page widgets to a desktop.

mod replay;

pub use replay::{
    ReplayError, ReplayReport, ReportedEvent, Scenario, Step, WidgetReport, WidgetSetup,
};

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
mod web_host;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
#[cfg(target_arch = "wasm32")]
pub use web_host::{WebHost, WebListener};
