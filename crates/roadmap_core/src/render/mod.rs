//! Reconciliation and render cycle.
//!
//! # Responsibility
//! - Define the render target capability consumed from the presentation layer.
//! - Rebuild the full visual tree from the roadmap and custom task ledger.
//!
//! # Invariants
//! - `render_roadmap` never mutates the models.
//! - Rendering twice with unchanged inputs yields an equivalent tree; every
//!   freshly created checkable item starts unchecked.
//! - Months render in roadmap order, tasks in sequence order.

mod tree;

pub use crate::ledger::completion::TaskBinding;
pub use tree::{MonthView, RoadmapView, TaskView, TreeRenderTarget};

use crate::ledger::custom_tasks::CustomTaskLedger;
use crate::model::roadmap::{MonthIndex, Roadmap};
use crate::progress::Progress;
use log::debug;
use serde::{Deserialize, Serialize};

/// Label of the delete control rendered next to custom tasks.
pub const DELETE_BUTTON_LABEL: &str = "Delete";

/// User notification handed back by the presentation layer.
///
/// Controls are bound to these values instead of callbacks; the session
/// routes them through [`crate::RoadmapSession::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    /// A checkable item changed state.
    Toggle { binding: TaskBinding, checked: bool },
    /// The delete control of a custom task was clicked.
    DeleteTask { month: MonthIndex, text: String },
    /// The add control was used with the raw selector value and input text.
    AddTask { month_value: String, text: String },
}

/// Opaque presentation-layer capability.
pub trait RenderTarget {
    type Handle: Copy;

    /// Root container of the roadmap tree.
    fn root(&self) -> Self::Handle;
    /// Removes every child of `container`.
    fn clear(&mut self, container: Self::Handle);
    fn create_container(&mut self, label: &str) -> Self::Handle;
    /// Creates an unchecked item bound to `binding`; changes surface as
    /// [`UiEvent::Toggle`].
    fn create_checkable_item(&mut self, binding: TaskBinding, label: &str) -> Self::Handle;
    fn create_button(&mut self, label: &str, on_click: UiEvent) -> Self::Handle;
    fn append_child(&mut self, parent: Self::Handle, child: Self::Handle);
    /// Every checkable item currently attached under the root, in tree order.
    fn checkable_items(&self) -> Vec<(TaskBinding, bool)>;
    /// Sets the state of the attached item bound to `binding`, if any.
    fn set_checked(&mut self, binding: TaskBinding, checked: bool);
    /// Receives the latest aggregate progress.
    fn show_progress(&mut self, progress: &Progress);
}

/// Rebuilds the roadmap tree under the target root.
pub fn render_roadmap<T: RenderTarget>(
    target: &mut T,
    roadmap: &Roadmap,
    custom_tasks: &CustomTaskLedger,
) {
    let root = target.root();
    target.clear(root);

    for (month_index, month) in roadmap.months().iter().enumerate() {
        let month_node = target.create_container(&month.name);

        for (position, task) in month.tasks.iter().enumerate() {
            let row = target.create_container(task);
            let item =
                target.create_checkable_item(TaskBinding::new(month_index, position), task);
            target.append_child(row, item);

            if custom_tasks.contains(month_index, task) {
                let button = target.create_button(
                    DELETE_BUTTON_LABEL,
                    UiEvent::DeleteTask {
                        month: month_index,
                        text: task.clone(),
                    },
                );
                target.append_child(row, button);
            }
            target.append_child(month_node, row);
        }

        target.append_child(root, month_node);
    }

    debug!(
        "event=render module=render status=ok months={} tasks={}",
        roadmap.len(),
        roadmap.total_tasks()
    );
}
