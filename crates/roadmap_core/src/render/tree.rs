//! Retained in-memory render target.
//!
//! Keeps the rendered tree as an arena of nodes. Used by the FFI layer to hand
//! snapshots to the UI, by the CLI for text output and by tests.

use super::{RenderTarget, TaskBinding, UiEvent};
use crate::model::roadmap::MonthIndex;
use crate::progress::Progress;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

const ROOT: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Container { label: String },
    Checkable {
        binding: TaskBinding,
        label: String,
        checked: bool,
    },
    Button { label: String, on_click: UiEvent },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    kind: NodeKind,
    children: Vec<usize>,
}

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub month: MonthIndex,
    pub position: usize,
    pub text: String,
    pub checked: bool,
    /// Whether a delete control is rendered next to the task.
    pub deletable: bool,
}

/// One rendered month section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
    pub name: String,
    pub tasks: Vec<TaskView>,
}

/// Snapshot of the whole rendered tree plus the last displayed progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapView {
    pub months: Vec<MonthView>,
    pub progress: Progress,
}

/// Arena-backed tree implementing [`RenderTarget`].
#[derive(Debug, Clone)]
pub struct TreeRenderTarget {
    nodes: Vec<Node>,
    progress: Progress,
}

impl TreeRenderTarget {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Container {
                    label: "roadmap".to_string(),
                },
                children: Vec::new(),
            }],
            progress: Progress::default(),
        }
    }

    /// Last progress passed to `show_progress`.
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Attached button events in tree order, paired with their labels.
    pub fn buttons(&self) -> Vec<(String, UiEvent)> {
        self.attached()
            .into_iter()
            .filter_map(|id| match &self.nodes[id].kind {
                NodeKind::Button { label, on_click } => Some((label.clone(), on_click.clone())),
                _ => None,
            })
            .collect()
    }

    /// Walks month sections and task rows into a serializable view.
    pub fn snapshot(&self) -> RoadmapView {
        let months = self.nodes[ROOT]
            .children
            .iter()
            .filter_map(|&month_id| {
                let NodeKind::Container { label } = &self.nodes[month_id].kind else {
                    return None;
                };
                let tasks = self.nodes[month_id]
                    .children
                    .iter()
                    .filter_map(|&row_id| self.task_view(row_id))
                    .collect();
                Some(MonthView {
                    name: label.clone(),
                    tasks,
                })
            })
            .collect();

        RoadmapView {
            months,
            progress: self.progress,
        }
    }

    /// Plain-text rendering of the current tree.
    pub fn to_text(&self) -> String {
        let view = self.snapshot();
        let mut out = String::new();
        for month in &view.months {
            let _ = writeln!(out, "{}", month.name);
            for task in &month.tasks {
                let mark = if task.checked { 'x' } else { ' ' };
                let suffix = if task.deletable { " (custom)" } else { "" };
                let _ = writeln!(out, "  [{mark}] {}{suffix}", task.text);
            }
        }
        let _ = writeln!(
            out,
            "progress: {}% [{}] {}",
            view.progress.percent,
            view.progress.tier.as_str(),
            view.progress.message()
        );
        out
    }

    fn task_view(&self, row_id: usize) -> Option<TaskView> {
        let row = &self.nodes[row_id];
        let mut task = None;
        let mut deletable = false;
        for &child in &row.children {
            match &self.nodes[child].kind {
                NodeKind::Checkable {
                    binding,
                    label,
                    checked,
                } => {
                    task = Some(TaskView {
                        month: binding.month,
                        position: binding.position,
                        text: label.clone(),
                        checked: *checked,
                        deletable: false,
                    });
                }
                NodeKind::Button { .. } => deletable = true,
                NodeKind::Container { .. } => {}
            }
        }
        task.map(|task| TaskView { deletable, ..task })
    }

    /// Node ids reachable from the root, depth-first in child order.
    fn attached(&self) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev());
        }
        order
    }

    fn push(&mut self, kind: NodeKind) -> usize {
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }
}

impl Default for TreeRenderTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for TreeRenderTarget {
    type Handle = usize;

    fn root(&self) -> usize {
        ROOT
    }

    fn clear(&mut self, container: usize) {
        if container == ROOT {
            // Everything hangs off the root, so the arena can be reclaimed.
            self.nodes.truncate(1);
        }
        if let Some(node) = self.nodes.get_mut(container) {
            node.children.clear();
        }
    }

    fn create_container(&mut self, label: &str) -> usize {
        self.push(NodeKind::Container {
            label: label.to_string(),
        })
    }

    fn create_checkable_item(&mut self, binding: TaskBinding, label: &str) -> usize {
        self.push(NodeKind::Checkable {
            binding,
            label: label.to_string(),
            checked: false,
        })
    }

    fn create_button(&mut self, label: &str, on_click: UiEvent) -> usize {
        self.push(NodeKind::Button {
            label: label.to_string(),
            on_click,
        })
    }

    fn append_child(&mut self, parent: usize, child: usize) {
        if child < self.nodes.len() {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.push(child);
            }
        }
    }

    fn checkable_items(&self) -> Vec<(TaskBinding, bool)> {
        self.attached()
            .into_iter()
            .filter_map(|id| match &self.nodes[id].kind {
                NodeKind::Checkable {
                    binding, checked, ..
                } => Some((*binding, *checked)),
                _ => None,
            })
            .collect()
    }

    fn set_checked(&mut self, target: TaskBinding, value: bool) {
        for id in self.attached() {
            if let NodeKind::Checkable {
                binding, checked, ..
            } = &mut self.nodes[id].kind
            {
                if *binding == target {
                    *checked = value;
                }
            }
        }
    }

    fn show_progress(&mut self, progress: &Progress) {
        self.progress = *progress;
    }
}
