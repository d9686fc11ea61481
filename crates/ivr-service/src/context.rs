//! Per-call dialog context.
//!
//! Callbacks from the provider are independent HTTP requests. The only thing
//! tying them together is the provider's `CallSid`, so anything a flow needs
//! to remember between steps (the department being served, how many times
//! the caller has been sent back to the start, half-collected seat query
//! parameters) lives here, keyed by that id. Entries expire after a fixed
//! TTL of inactivity and are never persisted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ivr_core::{CallSid, Department, TrainNumber};
use parking_lot::RwLock;
use tokio::sync::watch;

/// What the service remembers about one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// Department currently serving the call.
    pub department: Option<Department>,
    /// Restarts of the current department.
    pub failures: u32,
    /// Seat query: train number from the first step.
    pub seat_train: Option<TrainNumber>,
    /// Seat query: normalized spoken date from the second step.
    pub seat_date: Option<String>,
}

impl CallContext {
    fn for_department(department: Department) -> Self {
        Self {
            department: Some(department),
            failures: 0,
            seat_train: None,
            seat_date: None,
        }
    }
}

#[derive(Debug)]
struct Entry {
    context: CallContext,
    touched: Instant,
}

/// TTL-bounded map of call contexts.
#[derive(Debug)]
pub struct CallContexts {
    entries: RwLock<HashMap<CallSid, Entry>>,
    ttl: Duration,
}

impl CallContexts {
    /// Create an empty map whose entries live for `ttl` after last use.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Start a fresh context for `call` in `department`, discarding any
    /// previous state.
    pub fn begin(&self, call: &CallSid, department: Department) {
        self.entries.write().insert(
            call.clone(),
            Entry {
                context: CallContext::for_department(department),
                touched: Instant::now(),
            },
        );
    }

    /// Snapshot of a live context.
    #[must_use]
    pub fn get(&self, call: &CallSid) -> Option<CallContext> {
        let mut entries = self.entries.write();
        let entry = entries.get_mut(call)?;
        if entry.touched.elapsed() > self.ttl {
            entries.remove(call);
            tracing::debug!(call_sid = %call, "call context expired");
            return None;
        }
        entry.touched = Instant::now();
        Some(entry.context.clone())
    }

    /// Count a restart of `department` and return the new total.
    ///
    /// A call that moved to another department, or whose context expired,
    /// starts counting from zero again.
    pub fn record_failure(&self, call: &CallSid, department: Department) -> u32 {
        self.update(call, department, |context| {
            context.failures += 1;
            context.failures
        })
    }

    /// Remember the train number of a seat query.
    pub fn set_seat_train(&self, call: &CallSid, train: TrainNumber) {
        self.update(call, Department::SeatAvailability, |context| {
            context.seat_train = Some(train);
            context.seat_date = None;
        });
    }

    /// Remember the journey date of a seat query.
    pub fn set_seat_date(&self, call: &CallSid, date: String) {
        self.update(call, Department::SeatAvailability, |context| {
            context.seat_date = Some(date);
        });
    }

    /// Forget a call entirely.
    pub fn clear(&self, call: &CallSid) {
        self.entries.write().remove(call);
    }

    /// Number of stored contexts, expired ones included until swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no contexts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every expired context, returning how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let ttl = self.ttl;
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.touched.elapsed() <= ttl);
        before - entries.len()
    }

    /// Start a background task that sweeps expired contexts every `interval`.
    ///
    /// Send `true` on the returned channel to stop it.
    pub fn start_sweeper(self: &Arc<Self>, interval: Duration) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let contexts = Arc::clone(self);

        tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        let removed = contexts.sweep_expired();
                        if removed > 0 {
                            tracing::debug!(
                                removed,
                                remaining = contexts.len(),
                                "swept expired call contexts"
                            );
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("call context sweeper shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }

    /// Apply `f` to the live context of `call` for `department`, creating or
    /// resetting it when it is missing, expired, or serving another
    /// department.
    fn update<T>(
        &self,
        call: &CallSid,
        department: Department,
        f: impl FnOnce(&mut CallContext) -> T,
    ) -> T {
        let mut entries = self.entries.write();
        let now = Instant::now();
        let entry = entries.entry(call.clone()).or_insert_with(|| Entry {
            context: CallContext::for_department(department),
            touched: now,
        });

        if entry.touched.elapsed() > self.ttl || entry.context.department != Some(department) {
            entry.context = CallContext::for_department(department);
        }
        entry.touched = now;
        f(&mut entry.context)
    }
}
