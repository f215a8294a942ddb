//! Widget registry: widgets plus their listener side-table.

use super::{ListenerTable, Widget, WidgetId};
use std::collections::HashMap;

/// Tracks every widget on a desktop and the listeners bound for it.
#[derive(Debug)]
pub struct WidgetRegistry<E, L> {
    widgets: HashMap<WidgetId, Widget<E>>,
    /// Creation order, for deterministic iteration.
    order: Vec<WidgetId>,
    pub(crate) listeners: ListenerTable<L>,
}

impl<E, L> Default for WidgetRegistry<E, L> {
    fn default() -> Self {
        Self {
            widgets: HashMap::new(),
            order: Vec::new(),
            listeners: ListenerTable::default(),
        }
    }
}

impl<E, L> WidgetRegistry<E, L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, widget: Widget<E>) {
        let id = widget.id();
        if self.widgets.insert(id, widget).is_none() {
            self.order.push(id);
        }
    }

    /// Drop a widget. Its listeners must already have been taken.
    pub fn remove(&mut self, id: WidgetId) -> Option<Widget<E>> {
        let widget = self.widgets.remove(&id)?;
        self.order.retain(|w| *w != id);
        Some(widget)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget<E>> {
        self.widgets.get(&id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget<E>> {
        self.widgets.get_mut(&id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widget ids in creation order.
    pub fn ids(&self) -> &[WidgetId] {
        &self.order
    }

    /// Widgets in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Widget<E>> {
        self.order.iter().filter_map(|id| self.widgets.get(id))
    }

    pub fn listeners(&self) -> &ListenerTable<L> {
        &self.listeners
    }
}
