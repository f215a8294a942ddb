//! Side-table of listener handles keyed by widget.

use super::WidgetId;
use crate::input::Binding;
use std::collections::HashMap;

/// Owns every listener handle registered for each widget.
///
/// Handles live here rather than on the widget so that teardown of one key
/// is total and never touches a sibling's listeners.
#[derive(Debug)]
pub struct ListenerTable<L> {
    entries: HashMap<WidgetId, Vec<(Binding, L)>>,
}

impl<L> Default for ListenerTable<L> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<L> ListenerTable<L> {
    /// Whether any listeners are registered for a widget.
    pub fn is_registered(&self, id: WidgetId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Whether a specific binding is registered for a widget.
    pub fn is_bound(&self, id: WidgetId, binding: Binding) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|handles| handles.iter().any(|(b, _)| *b == binding))
    }

    /// Register the full set of handles for a widget.
    pub fn insert(&mut self, id: WidgetId, handles: Vec<(Binding, L)>) {
        self.entries.insert(id, handles);
    }

    /// Remove and return every handle registered for a widget.
    pub fn take(&mut self, id: WidgetId) -> Vec<(Binding, L)> {
        self.entries.remove(&id).unwrap_or_default()
    }

    /// Number of widgets with registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
