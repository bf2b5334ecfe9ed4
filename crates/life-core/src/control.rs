//! Shared run control for the simulation loop.
//!
//! [`SimulationControl`] is the only state shared between the run loop and
//! the external collaborators that issue intents. The run flag, the
//! "step now" flag, and the shutdown flag are atomics so the loop reads the
//! live value on every iteration instead of a value captured when it was
//! scheduled. Grid edits are queued and applied by the loop between steps,
//! which keeps every grid mutation on a single task.
//!
//! # Architecture
//!
//! The control is wrapped in [`Arc`](std::sync::Arc) and handed to both the
//! loop and the observer handlers. Every intent that changes what the loop
//! publishes (start, stop, edits, shutdown) fires the wake-up [`Notify`].
//! A stop wakes the loop only to republish the run flag; it never steps.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use life_grid::GridError;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify};

use crate::engine::GridIntent;

/// Smallest tick interval accepted at runtime.
pub const MIN_TICK_INTERVAL_MS: u64 = 100;

/// Reason why the run loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationEndReason {
    /// Reached the configured `max_generations` limit.
    MaxGenerationsReached,
    /// An operator requested shutdown.
    OperatorShutdown,
}

/// Shared run control state.
#[derive(Debug)]
pub struct SimulationControl {
    /// Whether the loop keeps stepping.
    running: AtomicBool,

    /// Set on each Stopped -> Running transition so the loop steps at once.
    step_now: AtomicBool,

    /// Whether the loop should exit.
    shutdown_requested: AtomicBool,

    /// Wakes the loop when it has something to do.
    wake: Notify,

    /// Delay between steps in milliseconds (runtime-adjustable).
    tick_interval_ms: AtomicU64,

    /// Generation at which the loop ends (0 = unlimited).
    max_generations: u64,

    /// Grid rows, fixed for the lifetime of the simulation.
    rows: usize,

    /// Grid columns, fixed for the lifetime of the simulation.
    cols: usize,

    /// Edits waiting to be applied by the loop.
    pending: Mutex<Vec<GridIntent>>,

    /// Wall-clock time the control was created.
    started_at: DateTime<Utc>,

    /// Reason the loop ended, if it has.
    end_reason: Mutex<Option<SimulationEndReason>>,
}

impl SimulationControl {
    /// Create a stopped control for a `rows x cols` grid.
    pub fn new(tick_interval_ms: u64, max_generations: u64, rows: usize, cols: usize) -> Self {
        Self {
            running: AtomicBool::new(false),
            step_now: AtomicBool::new(false),
            shutdown_requested: AtomicBool::new(false),
            wake: Notify::new(),
            tick_interval_ms: AtomicU64::new(tick_interval_ms),
            max_generations,
            rows,
            cols,
            pending: Mutex::new(Vec::new()),
            started_at: Utc::now(),
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Start / Stop
    // -----------------------------------------------------------------------

    /// Whether the run flag is set.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Set the run flag.
    ///
    /// Returns `false` if the simulation was already running; in that case
    /// nothing changes and no second stepping chain is created.
    pub fn start(&self) -> bool {
        if self.running.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.step_now.store(true, Ordering::Release);
        self.wake.notify_one();
        true
    }

    /// Clear the run flag.
    ///
    /// Returns `false` if the simulation was already stopped. A step that is
    /// already computing still completes and publishes.
    pub fn stop(&self) -> bool {
        if !self.running.swap(false, Ordering::AcqRel) {
            return false;
        }
        self.wake.notify_one();
        true
    }

    /// Consume the pending "step immediately" request, if any.
    pub fn take_step_now(&self) -> bool {
        self.step_now.swap(false, Ordering::AcqRel)
    }

    // -----------------------------------------------------------------------
    // Shutdown
    // -----------------------------------------------------------------------

    /// Ask the run loop to exit.
    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::Release);
        self.wake.notify_one();
    }

    /// Whether a shutdown has been requested.
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Record the reason the loop ended.
    pub async fn set_end_reason(&self, reason: SimulationEndReason) {
        let mut guard = self.end_reason.lock().await;
        *guard = Some(reason);
    }

    /// Get the reason the loop ended, if it has.
    pub async fn end_reason(&self) -> Option<SimulationEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Tick Speed
    // -----------------------------------------------------------------------

    /// Get the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.load(Ordering::Acquire)
    }

    /// Set the tick interval in milliseconds. Must be at least
    /// [`MIN_TICK_INTERVAL_MS`].
    ///
    /// Returns the previous interval on success, or `None` if the value was
    /// rejected. The new interval applies from the next scheduled tick.
    pub fn set_tick_interval_ms(&self, ms: u64) -> Option<u64> {
        if ms < MIN_TICK_INTERVAL_MS {
            return None;
        }
        Some(self.tick_interval_ms.swap(ms, Ordering::AcqRel))
    }

    // -----------------------------------------------------------------------
    // Bounds
    // -----------------------------------------------------------------------

    /// Whether `generation` has reached the configured limit.
    pub const fn generation_limit_reached(&self, generation: u64) -> bool {
        self.max_generations > 0 && generation >= self.max_generations
    }

    /// Get the configured generation limit (0 = unlimited).
    pub const fn max_generations(&self) -> u64 {
        self.max_generations
    }

    /// Grid dimensions as `(rows, cols)`.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Return the wall-clock start time.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Return elapsed seconds since the control was created.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }

    // -----------------------------------------------------------------------
    // Grid Intents
    // -----------------------------------------------------------------------

    /// Queue a randomize.
    pub async fn randomize(&self) {
        self.enqueue(GridIntent::Randomize).await;
    }

    /// Queue a clear.
    pub async fn clear(&self) {
        self.enqueue(GridIntent::Clear).await;
    }

    /// Queue a toggle of `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] without queuing anything if the
    /// coordinate lies outside the grid.
    pub async fn toggle_cell(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.enqueue(GridIntent::Toggle { row, col }).await;
        Ok(())
    }

    async fn enqueue(&self, intent: GridIntent) {
        self.pending.lock().await.push(intent);
        self.wake.notify_one();
    }

    /// Drain all queued intents in submission order.
    pub async fn drain_intents(&self) -> Vec<GridIntent> {
        let mut queue = self.pending.lock().await;
        std::mem::take(&mut *queue)
    }

    /// Wait until an intent, start, stop, or shutdown wakes the loop.
    pub async fn notified(&self) {
        self.wake.notified().await;
    }
}

/// JSON-serializable status of the simulation for the control API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationStatus {
    /// Current generation.
    pub generation: u64,
    /// Whether the run flag is set.
    pub running: bool,
    /// Whether a shutdown has been requested.
    pub shutdown_requested: bool,
    /// Current tick interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Elapsed wall-clock seconds since start.
    pub elapsed_seconds: u64,
    /// Configured generation limit (0 = unlimited).
    pub max_generations: u64,
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Live cells in the last published grid.
    pub population: usize,
    /// The reason the loop ended, if applicable.
    pub end_reason: Option<SimulationEndReason>,
    /// ISO 8601 timestamp of when the simulation started.
    pub started_at: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_control() -> SimulationControl {
        SimulationControl::new(300, 0, 50, 50)
    }

    #[test]
    fn initial_state_is_stopped() {
        let control = make_control();
        assert!(!control.is_running());
        assert!(!control.is_shutdown_requested());
        assert!(!control.take_step_now());
    }

    #[test]
    fn start_and_stop() {
        let control = make_control();
        assert!(control.start());
        assert!(control.is_running());
        assert!(control.stop());
        assert!(!control.is_running());
    }

    #[test]
    fn duplicate_start_is_rejected() {
        let control = make_control();
        assert!(control.start());
        assert!(control.take_step_now());
        assert!(!control.start());
        // The rejected start does not request another immediate step.
        assert!(!control.take_step_now());
    }

    #[test]
    fn stop_when_stopped_is_rejected() {
        let control = make_control();
        assert!(!control.stop());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_wakes_the_loop() {
        let control = make_control();
        control.start();
        control.notified().await;

        assert!(control.stop());
        tokio::time::timeout(std::time::Duration::from_millis(1), control.notified())
            .await
            .unwrap();
    }

    #[test]
    fn set_tick_interval() {
        let control = make_control();
        assert_eq!(control.set_tick_interval_ms(500), Some(300));
        assert_eq!(control.tick_interval_ms(), 500);
    }

    #[test]
    fn reject_sub_minimum_interval() {
        let control = make_control();
        assert!(control.set_tick_interval_ms(50).is_none());
        assert_eq!(control.tick_interval_ms(), 300);
    }

    #[test]
    fn generation_limit_zero_means_unlimited() {
        let control = make_control();
        assert!(!control.generation_limit_reached(999_999));
    }

    #[test]
    fn generation_limit_reached() {
        let control = SimulationControl::new(300, 10, 5, 5);
        assert!(!control.generation_limit_reached(9));
        assert!(control.generation_limit_reached(10));
    }

    #[tokio::test]
    async fn intents_drain_in_order() {
        let control = make_control();
        control.randomize().await;
        control.toggle_cell(1, 2).await.ok();
        control.clear().await;

        let intents = control.drain_intents().await;
        assert_eq!(
            intents,
            vec![
                GridIntent::Randomize,
                GridIntent::Toggle { row: 1, col: 2 },
                GridIntent::Clear,
            ]
        );
        assert!(control.drain_intents().await.is_empty());
    }

    #[tokio::test]
    async fn out_of_bounds_toggle_is_not_queued() {
        let control = make_control();
        let result = control.toggle_cell(50, 0).await;
        assert!(matches!(result, Err(GridError::OutOfBounds { row: 50, .. })));
        assert!(control.drain_intents().await.is_empty());
    }

    #[tokio::test]
    async fn end_reason_is_recorded() {
        let control = make_control();
        assert!(control.end_reason().await.is_none());
        control
            .set_end_reason(SimulationEndReason::OperatorShutdown)
            .await;
        assert_eq!(
            control.end_reason().await,
            Some(SimulationEndReason::OperatorShutdown)
        );
    }
}
