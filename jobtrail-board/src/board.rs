//! The board session: the boundary between a view and the engine.
//!
//! A view reads [`Board::columns`] and reports drag gestures. The board
//! re-runs reconciliation whenever the job list or the loading flag changes,
//! applies drops immediately, and sends the resulting column update to the
//! job store on a detached task. Failed updates are not rolled back; they
//! become error notifications once [`Board::process_events`] drains them.

use crate::coordinator::{DragDropCoordinator, DragState, DropResult};
use crate::events::BoardEvent;
use crate::notifications::{Notification, NotificationLevel};
use crate::reconcile::reconcile;
use jobtrail_core::{map_pins, ColumnState, JobId, JobRecord, JobStore, MapPin, UpdateJobRequest};
use jobtrail_storage::OverrideStore;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Shown when the account has no saved jobs.
pub const EMPTY_BOARD_MESSAGE: &str = "You currently have no jobs saved to your account.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardStatus {
    /// No job list has been received yet.
    Unloaded,
    /// A fetch is in flight.
    Loading,
    /// The job list arrived and is empty.
    Empty,
    Ready,
}

pub struct Board<O> {
    store: Arc<dyn JobStore>,
    overrides: O,
    jobs: Option<Vec<JobRecord>>,
    loading: bool,
    columns: ColumnState,
    coordinator: DragDropCoordinator,
    notifications: Vec<Notification>,
    in_flight: usize,
    events_tx: mpsc::UnboundedSender<BoardEvent>,
    events_rx: mpsc::UnboundedReceiver<BoardEvent>,
}

impl<O: OverrideStore> Board<O> {
    pub fn new(store: Arc<dyn JobStore>, overrides: O) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            store,
            overrides,
            jobs: None,
            loading: false,
            columns: ColumnState::new(),
            coordinator: DragDropCoordinator::new(),
            notifications: Vec::new(),
            in_flight: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn columns(&self) -> &ColumnState {
        &self.columns
    }

    pub fn jobs(&self) -> Option<&[JobRecord]> {
        self.jobs.as_deref()
    }

    /// Geocoded jobs for the map.
    pub fn map_pins(&self) -> Vec<MapPin<'_>> {
        map_pins(self.jobs.as_deref().unwrap_or(&[]))
    }

    pub fn overrides(&self) -> &O {
        &self.overrides
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn drag_state(&self) -> DragState {
        self.coordinator.state()
    }

    /// Column updates dispatched whose result has not been processed yet.
    pub fn pending_updates(&self) -> usize {
        self.in_flight
    }

    pub fn status(&self) -> BoardStatus {
        if self.loading {
            return BoardStatus::Loading;
        }
        match &self.jobs {
            None => BoardStatus::Unloaded,
            Some(jobs) if jobs.is_empty() => BoardStatus::Empty,
            Some(_) => BoardStatus::Ready,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn dismiss_notification(&mut self, index: usize) -> Option<Notification> {
        (index < self.notifications.len()).then(|| self.notifications.remove(index))
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// Flip the loading flag, reconciling if it changed.
    pub fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.reconcile();
        }
    }

    /// Replace the job list with a freshly fetched one.
    pub fn apply_jobs(&mut self, jobs: Vec<JobRecord>) {
        tracing::debug!(count = jobs.len(), "Applying job list");
        self.jobs = Some(jobs);
        self.loading = false;
        self.reconcile();
    }

    /// Fetch the job list from the store and reconcile.
    ///
    /// On failure the previous layout stays and an error notice is queued.
    pub async fn refresh(&mut self) {
        self.set_loading(true);
        match self.store.fetch_jobs().await {
            Ok(jobs) => self.apply_jobs(jobs),
            Err(err) => {
                tracing::error!(error = %err, "Job fetch failed");
                self.set_loading(false);
                self.notify(NotificationLevel::Error, err.to_string());
            }
        }
    }

    pub fn on_drag_start(&mut self, job_id: JobId) {
        self.coordinator.on_drag_start(job_id, &self.overrides);
    }

    /// Apply a drop locally and dispatch the column update it implies.
    ///
    /// Returns the dispatched update, if any.
    pub fn on_drop(&mut self, result: Option<DropResult>) -> Option<UpdateJobRequest> {
        let current = std::mem::take(&mut self.columns);
        let outcome = self.coordinator.on_drop(result, current, &self.overrides);
        self.columns = outcome.columns;

        if let Some(request) = outcome.update {
            tracing::info!(job_id = %request.id, column = %request.column_id, "Job moved");
            self.dispatch(request);
        }
        outcome.update
    }

    /// Handle every update result that has already arrived.
    ///
    /// Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait for the next update result and handle it.
    ///
    /// Returns `false` at once when no update is in flight.
    pub async fn process_next_event(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, request: UpdateJobRequest) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!(job_id = %request.id, "No async runtime to dispatch job update");
            self.notify(
                NotificationLevel::Error,
                format!("Could not save the move of job {}", request.id),
            );
            return;
        };

        let store = Arc::clone(&self.store);
        let events = self.events_tx.clone();
        self.in_flight += 1;
        runtime.spawn(async move {
            let result = store.update_job(request).await;
            // The board may already be gone; nobody is left to tell.
            let _ = events.send(BoardEvent::UpdateFinished { request, result });
        });
    }

    fn handle_event(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::UpdateFinished { request, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match result {
                    Ok(job) => {
                        tracing::debug!(job_id = %request.id, column = %job.column_id, "Job update confirmed");
                        let column = self.columns.column(job.column_id).name.clone();
                        self.upsert_job(job);
                        self.reconcile();
                        self.notify(NotificationLevel::Success, format!("Job moved to {}", column));
                    }
                    Err(err) => {
                        tracing::error!(
                            job_id = %request.id,
                            column = %request.column_id,
                            error = %err,
                            "Job update failed"
                        );
                        let column = self.columns.column(request.column_id).name.clone();
                        self.notify(
                            NotificationLevel::Error,
                            format!("Could not move job to {}: {}", column, err),
                        );
                    }
                }
            }
        }
    }

    fn upsert_job(&mut self, job: JobRecord) {
        let Some(jobs) = self.jobs.as_mut() else {
            return;
        };
        if let Some(existing) = jobs.iter_mut().find(|j| j.id == job.id) {
            *existing = job;
        } else {
            jobs.push(job);
        }
    }

    fn reconcile(&mut self) {
        let jobs = self.jobs.as_deref().unwrap_or(&[]);
        self.columns = reconcile(jobs, &self.columns, &self.overrides);
    }
}
