//! Roadmap session: reconciliation of roadmap, custom tasks and completion.
//!
//! # Responsibility
//! - Own the roadmap model, the custom task ledger, the store and the render
//!   target for one user session.
//! - Run the render/restore/progress cycle after every mutation.
//!
//! # Invariants
//! - Every custom task listed for month `m` appears in `roadmap[m].tasks`.
//! - Only custom tasks are deletable; built-in tasks are immutable.
//! - The completion ledger is rewritten wholesale from the rendered tree.
//! - No operation returns an error to the caller. Store failures are logged at
//!   `warn` and the in-memory ledger keeps its pre-write value.
//! - The custom task ledger is never written until it has been read back
//!   from the store at least once.

use crate::ledger::completion::CompletionLedger;
use crate::ledger::custom_tasks::CustomTaskLedger;
use crate::model::roadmap::{parse_month_selection, MonthIndex, Roadmap};
use crate::progress::{compute_progress, Progress};
use crate::render::{render_roadmap, RenderTarget, TaskBinding, UiEvent};
use crate::store::{KeyValueStore, StoreError, CUSTOM_TASKS_KEY, PROGRESS_KEY};
use log::{debug, info, warn};

/// Explicit session context replacing process-wide state.
pub struct RoadmapSession<S: KeyValueStore, T: RenderTarget> {
    store: S,
    target: T,
    roadmap: Roadmap,
    custom_tasks: CustomTaskLedger,
    custom_tasks_loaded: bool,
    progress: Progress,
}

impl<S: KeyValueStore, T: RenderTarget> RoadmapSession<S, T> {
    /// Creates a session without loading or rendering anything.
    ///
    /// Most callers want [`RoadmapSession::open`].
    pub fn new(store: S, target: T, roadmap: Roadmap) -> Self {
        Self {
            store,
            target,
            roadmap,
            custom_tasks: CustomTaskLedger::new(),
            custom_tasks_loaded: false,
            progress: Progress::default(),
        }
    }

    /// Loads persisted state, renders the tree and restores completion.
    pub fn open(store: S, target: T, roadmap: Roadmap) -> Self {
        let mut session = Self::new(store, target, roadmap);
        session.initialize();
        session.render();
        session.restore_completion();
        session.refresh_progress();
        info!(
            "event=session_open module=session status=ok months={} tasks={} percent={}",
            session.roadmap.len(),
            session.roadmap.total_tasks(),
            session.progress.percent
        );
        session
    }

    /// Loads the custom task ledger and merges it into the roadmap.
    ///
    /// A task is appended only when the month does not already hold it, so
    /// repeated initialization never accumulates duplicates. Unknown months
    /// are skipped and dropped from the in-memory ledger.
    ///
    /// When the store cannot be read the session keeps its current ledger
    /// and stays unloaded; the next add or delete retries the load.
    pub fn initialize(&mut self) {
        let raw = match self.store.get(CUSTOM_TASKS_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                log_read_failure(CUSTOM_TASKS_KEY, &err);
                return;
            }
        };
        let mut ledger = raw
            .map(|raw| CustomTaskLedger::decode(&raw))
            .unwrap_or_default();

        let month_count = self.roadmap.len();
        let mut skipped = 0usize;
        ledger.retain_months(|month| {
            let known = month < month_count;
            if !known {
                skipped += 1;
            }
            known
        });

        let mut merged = 0usize;
        for (month, tasks) in ledger.iter() {
            for task in tasks {
                if !self.roadmap.contains_task(month, task) {
                    self.roadmap.append_task(month, task.clone());
                    merged += 1;
                }
            }
        }

        if skipped > 0 {
            warn!(
                "event=custom_tasks_load module=session status=skip reason=unknown_month count={skipped}"
            );
        }
        debug!("event=custom_tasks_load module=session status=ok merged={merged}");
        self.custom_tasks = ledger;
        self.custom_tasks_loaded = true;
    }

    /// Adds a custom task to `month`.
    ///
    /// Returns `false` without side effects when the trimmed text is empty or
    /// the month does not exist. Adding the same text twice appends twice.
    pub fn add_task(&mut self, month: MonthIndex, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.roadmap.month(month).is_none() {
            debug!("event=task_add module=session status=ignored month={month}");
            return false;
        }

        self.ensure_custom_tasks_loaded();
        self.roadmap.append_task(month, text);
        // Why: memory adopts the new ledger only after the store accepts it,
        // so a failed write never leaves memory ahead of storage.
        let mut next = self.custom_tasks.clone();
        next.push(month, text);
        self.commit_custom_tasks(next);

        self.render();
        self.restore_completion();
        self.refresh_progress();
        info!("event=task_add module=session status=ok month={month}");
        true
    }

    /// Adds a task from raw selector and input values.
    ///
    /// Negative or overflowing selector values count as unknown months.
    pub fn add_task_from_input(&mut self, month_value: &str, text: &str) -> bool {
        match parse_month_selection(month_value) {
            Some(month) => self.add_task(month, text),
            None => {
                debug!("event=task_add module=session status=ignored reason=month_out_of_range");
                false
            }
        }
    }

    /// Deletes a custom task from `month`.
    ///
    /// Returns `false` without side effects unless `text` is listed as custom
    /// for the month and the month still holds it. Removes the first
    /// occurrence from the month and every occurrence from the ledger.
    ///
    /// Completion stays positional: a task that moves up one position picks
    /// up the stored state of the slot it moves into.
    ///
    /// A failed ledger write leaves both the roadmap and the ledger untouched.
    pub fn delete_task(&mut self, month: MonthIndex, text: &str) -> bool {
        self.ensure_custom_tasks_loaded();
        if !self.custom_tasks.contains(month, text) || !self.roadmap.contains_task(month, text) {
            debug!("event=task_delete module=session status=ignored month={month}");
            return false;
        }

        let mut next = self.custom_tasks.clone();
        next.remove_all(month, text);
        if !self.commit_custom_tasks(next) {
            return false;
        }
        self.roadmap.remove_first(month, text);

        // Why: render leaves every item unchecked; restoring before the
        // persist in refresh_progress keeps stored checkmarks from being wiped.
        self.render();
        self.restore_completion();
        self.refresh_progress();
        info!("event=task_delete module=session status=ok month={month}");
        true
    }

    /// Applies a checkbox change and recomputes progress.
    pub fn set_checked(&mut self, binding: TaskBinding, checked: bool) {
        self.target.set_checked(binding, checked);
        self.refresh_progress();
    }

    /// Routes one UI notification. Returns whether state changed.
    pub fn dispatch(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Toggle { binding, checked } => {
                self.set_checked(binding, checked);
                true
            }
            UiEvent::DeleteTask { month, text } => self.delete_task(month, &text),
            UiEvent::AddTask { month_value, text } => self.add_task_from_input(&month_value, &text),
        }
    }

    /// Rebuilds the visual tree; every item starts unchecked.
    pub fn render(&mut self) {
        render_roadmap(&mut self.target, &self.roadmap, &self.custom_tasks);
    }

    /// Overwrites the persisted completion ledger from the rendered items.
    pub fn persist_completion(&mut self) {
        let ledger = CompletionLedger::from_rendered(self.target.checkable_items());
        if let Err(err) = self.store.set(PROGRESS_KEY, &ledger.encode()) {
            log_write_failure(PROGRESS_KEY, &err);
        }
    }

    /// Re-applies persisted checked state onto the rendered items.
    ///
    /// Items without a persisted `true` entry keep their fresh unchecked state.
    pub fn restore_completion(&mut self) {
        let ledger = self
            .read(PROGRESS_KEY)
            .map(|raw| CompletionLedger::decode(&raw))
            .unwrap_or_default();

        for (binding, _) in self.target.checkable_items() {
            if ledger.is_checked(binding) {
                self.target.set_checked(binding, true);
            }
        }
    }

    /// Recomputes progress, shows it and persists completion.
    ///
    /// Runs after every restore, so stale coordinates left by a deletion are
    /// dropped from the stored ledger here.
    pub fn refresh_progress(&mut self) -> Progress {
        let total = self.roadmap.total_tasks();
        let checked = self
            .target
            .checkable_items()
            .into_iter()
            .filter(|(_, checked)| *checked)
            .count();
        self.progress = compute_progress(total, checked);
        self.target.show_progress(&self.progress);
        self.persist_completion();
        self.progress
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    pub fn custom_tasks(&self) -> &CustomTaskLedger {
        &self.custom_tasks
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Month selector entries as `(index, label)` pairs.
    pub fn month_options(&self) -> Vec<(MonthIndex, String)> {
        self.roadmap.month_options()
    }

    /// Ends the session, handing back the store and render target.
    pub fn into_parts(self) -> (S, T) {
        (self.store, self.target)
    }

    /// Retries the ledger load after an earlier read failure.
    ///
    /// A successful retry may merge stored tasks, so the tree is rebuilt.
    fn ensure_custom_tasks_loaded(&mut self) {
        if self.custom_tasks_loaded {
            return;
        }
        self.initialize();
        if self.custom_tasks_loaded {
            self.render();
            self.restore_completion();
            self.refresh_progress();
        }
    }

    /// Persists `next` and adopts it only when the write succeeds.
    ///
    /// Refuses to write while the stored ledger has never been read, since
    /// `next` would then replace custom tasks this session never saw.
    fn commit_custom_tasks(&mut self, next: CustomTaskLedger) -> bool {
        if !self.custom_tasks_loaded {
            warn!(
                "event=store_write module=session status=skip key={CUSTOM_TASKS_KEY} reason=ledger_not_loaded"
            );
            return false;
        }
        match self.store.set(CUSTOM_TASKS_KEY, &next.encode()) {
            Ok(()) => {
                self.custom_tasks = next;
                true
            }
            Err(err) => {
                log_write_failure(CUSTOM_TASKS_KEY, &err);
                false
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                log_read_failure(key, &err);
                None
            }
        }
    }
}

fn log_read_failure(key: &str, err: &StoreError) {
    warn!(
        "event=store_read module=session status=error key={key} error_code={} error={err}",
        err.code()
    );
}

fn log_write_failure(key: &str, err: &StoreError) {
    warn!(
        "event=store_write module=session status=error key={key} error_code={} error={err}",
        err.code()
    );
}
