//! Drag-and-drop reduced to its start and its drop.
//!
//! Hover feedback and auto-expansion stay with the view; the core only needs
//! to know what was picked up and where it landed.

use super::session::EditorPane;
use super::Action;
use crate::models::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A row of the tree view.
    Node(NodeId),
    /// A tab from the tab strip.
    Tab(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Folder(NodeId),
    Pane(EditorPane),
}

#[derive(Debug, Default)]
pub struct DragGesture {
    source: Option<DragSource>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting a new gesture replaces any unfinished one.
    pub fn start(&mut self, source: DragSource) {
        self.source = Some(source);
    }

    pub fn cancel(&mut self) {
        self.source = None;
    }

    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&DragSource> {
        self.source.as_ref()
    }

    /// Whether dropping on `target` would do anything.
    pub fn accepts(&self, target: &DropTarget) -> bool {
        matches!(
            (&self.source, target),
            (Some(DragSource::Node(_)), DropTarget::Folder(_))
                | (Some(DragSource::Tab(_)), DropTarget::Pane(_))
        )
    }

    /// Ends the gesture. Yields at most one action per started gesture; a
    /// drop the target does not accept just ends it.
    pub fn drop_on(&mut self, target: DropTarget) -> Option<Action> {
        match (self.source.take()?, target) {
            (DragSource::Node(id), DropTarget::Folder(target)) => Some(Action::Move { id, target }),
            (DragSource::Tab(id), DropTarget::Pane(pane)) => Some(Action::AssignToPane { pane, id }),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/drag.rs"]
mod tests;
