//! Scenario replay: drive a desktop over the in-memory host from a JSON script.

use kurbo::{Point, Size};
use pinboard_core::{
    ConfigError, Desktop, DesktopConfig, DesktopEvent, MemoryElement, MemoryHost, PointerEvent,
    WidgetError, WidgetId, WidgetOptions, WidgetSpec,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Target name for document-level events.
pub const DOCUMENT_TARGET: &str = "document";

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid desktop configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Widget setup failed: {0}")]
    Widget(#[from] WidgetError),
    #[error("Unknown widget: {0}")]
    UnknownWidget(String),
    #[error("Duplicate or reserved widget name: {0}")]
    InvalidName(String),
}

/// A widget to place on the desktop before replaying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSetup {
    pub name: String,
    pub size: Size,
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub options: WidgetOptions,
}

fn default_scale() -> f64 {
    1.0
}

/// One scripted step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Deliver a pointer event to a widget by name, or to `"document"`.
    Pointer { target: String, event: PointerEvent },
    /// Destroy a widget.
    Remove { widget: String },
    /// Resize the viewport and reflow resting widgets.
    Resize { viewport: Size },
}

/// A complete replay script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub viewport: Size,
    #[serde(default)]
    pub config: DesktopConfig,
    pub widgets: Vec<WidgetSetup>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Something the desktop reported during replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportedEvent {
    Activated { widget: String },
    DragStarted { widget: String },
    DragMoved { widget: String, position: Point },
    DragEnded { widget: String, position: Point },
}

/// Final state of a widget after replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetReport {
    pub name: String,
    pub position: Point,
    pub interaction: String,
    pub transform: String,
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub events: Vec<ReportedEvent>,
    pub widgets: Vec<WidgetReport>,
}

impl Scenario {
    /// Parse a scenario from JSON.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file.
    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Run the script and report the outcome.
    pub fn run(&self) -> Result<ReplayReport, ReplayError> {
        let mut desktop = Desktop::new(MemoryHost::new(self.viewport), self.config.clone());
        let mut by_name: HashMap<String, (WidgetId, MemoryElement)> = HashMap::new();
        let mut names: Vec<String> = Vec::with_capacity(self.widgets.len());

        for setup in &self.widgets {
            if setup.name == DOCUMENT_TARGET || by_name.contains_key(&setup.name) {
                return Err(ReplayError::InvalidName(setup.name.clone()));
            }
            let element = desktop.host_mut().create_element(setup.size);
            let id = desktop.add_widget(
                WidgetSpec::new(element)
                    .at(setup.position)
                    .with_rotation(setup.rotation)
                    .with_scale(setup.scale)
                    .with_z_index(setup.z_index)
                    .with_options(setup.options),
            )?;
            by_name.insert(setup.name.clone(), (id, element));
            names.push(setup.name.clone());
        }

        let name_of = |id: WidgetId| -> String {
            by_name
                .iter()
                .find(|(_, (w, _))| *w == id)
                .map(|(name, _)| name.clone())
                .unwrap_or_else(|| id.to_string())
        };

        let mut events = Vec::new();
        for step in &self.steps {
            match step {
                Step::Pointer { target, event } => {
                    let element = if target == DOCUMENT_TARGET {
                        None
                    } else {
                        let (_, element) = by_name
                            .get(target)
                            .ok_or_else(|| ReplayError::UnknownWidget(target.clone()))?;
                        Some(*element)
                    };
                    for reported in desktop.fire(element, *event) {
                        events.push(report_event(reported, &name_of));
                    }
                }
                Step::Remove { widget } => {
                    let (id, _) = by_name
                        .get(widget)
                        .ok_or_else(|| ReplayError::UnknownWidget(widget.clone()))?;
                    desktop.remove_widget(*id);
                }
                Step::Resize { viewport } => {
                    desktop.host_mut().set_viewport(*viewport);
                    desktop.reflow();
                }
            }
        }

        let widgets = names
            .iter()
            .filter_map(|name| {
                let (id, element) = by_name.get(name)?;
                let widget = desktop.widget(*id)?;
                let transform = desktop.host().transform(*element)?;
                Some(WidgetReport {
                    name: name.clone(),
                    position: widget.position(),
                    interaction: format!("{:?}", widget.interaction()),
                    transform: transform.to_string(),
                })
            })
            .collect();

        Ok(ReplayReport { events, widgets })
    }
}

fn report_event(event: DesktopEvent, name_of: &impl Fn(WidgetId) -> String) -> ReportedEvent {
    match event {
        DesktopEvent::Activated(id) => ReportedEvent::Activated { widget: name_of(id) },
        DesktopEvent::DragStarted(id) => ReportedEvent::DragStarted { widget: name_of(id) },
        DesktopEvent::DragMoved { widget, position } => ReportedEvent::DragMoved {
            widget: name_of(widget),
            position,
        },
        DesktopEvent::DragEnded { widget, position } => ReportedEvent::DragEnded {
            widget: name_of(widget),
            position,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCENARIO: &str = r#"{
        "viewport": { "width": 1000, "height": 800 },
        "widgets": [
            { "name": "sticker", "size": { "width": 140, "height": 140 },
              "position": { "x": 100, "y": 100 }, "rotation": -1 },
            { "name": "clock", "size": { "width": 200, "height": 200 },
              "position": { "x": 600, "y": 300 }, "options": { "draggable": false } }
        ],
        "steps": [
            { "pointer": { "target": "sticker", "event": { "type": "enter" } } },
            { "pointer": { "target": "sticker",
                           "event": { "type": "down", "position": { "x": 150, "y": 150 } } } },
            { "pointer": { "target": "document",
                           "event": { "type": "move", "position": { "x": 300, "y": 300 } } } },
            { "pointer": { "target": "document",
                           "event": { "type": "up", "position": { "x": 300, "y": 300 } } } },
            { "pointer": { "target": "clock",
                           "event": { "type": "down", "position": { "x": 650, "y": 350 } } } },
            { "pointer": { "target": "clock",
                           "event": { "type": "up", "position": { "x": 650, "y": 350 } } } }
        ]
    }"#;

    #[test]
    fn test_replay_drag_and_click() {
        let report = Scenario::from_json(SCENARIO).unwrap().run().unwrap();

        assert_eq!(
            report.events,
            vec![
                ReportedEvent::DragStarted { widget: "sticker".into() },
                ReportedEvent::DragMoved {
                    widget: "sticker".into(),
                    position: Point::new(250.0, 250.0)
                },
                ReportedEvent::DragEnded {
                    widget: "sticker".into(),
                    position: Point::new(250.0, 250.0)
                },
                ReportedEvent::Activated { widget: "clock".into() },
            ]
        );

        let sticker = &report.widgets[0];
        assert_eq!(sticker.name, "sticker");
        assert_eq!(sticker.interaction, "Hovered");
        assert_eq!(sticker.transform, "translate(250px, 250px) rotate(2deg) scale(1.02)");
    }

    #[test]
    fn test_replay_removed_widget_not_reported() {
        let mut scenario = Scenario::from_json(SCENARIO).unwrap();
        scenario.steps.truncate(2);
        scenario.steps.push(Step::Remove {
            widget: "sticker".into(),
        });
        let report = scenario.run().unwrap();
        assert_eq!(report.widgets.len(), 1);
        assert_eq!(report.widgets[0].name, "clock");
    }

    #[test]
    fn test_replay_unknown_target() {
        let mut scenario = Scenario::from_json(SCENARIO).unwrap();
        scenario.steps = vec![Step::Pointer {
            target: "folder".into(),
            event: PointerEvent::Enter,
        }];
        let result = scenario.run();
        assert!(matches!(result, Err(ReplayError::UnknownWidget(name)) if name == "folder"));
    }

    #[test]
    fn test_replay_reserved_name() {
        let mut scenario = Scenario::from_json(SCENARIO).unwrap();
        scenario.widgets[1].name = DOCUMENT_TARGET.into();
        assert!(matches!(scenario.run(), Err(ReplayError::InvalidName(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCENARIO.as_bytes()).unwrap();
        let scenario = Scenario::from_path(file.path()).unwrap();
        assert_eq!(scenario.widgets.len(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let json = r#"{ "viewport": { "width": 10, "height": 10 }, "widgets": [],
                        "config": { "hover": { "scale": -1 } } }"#;
        assert!(matches!(Scenario::from_json(json), Err(ReplayError::Config(_))));
    }
}
