use crate::domain::{ExecutionReport, SystemMode};
use crate::worker::EmergencyQueue;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};

/// Shared executor state.
///
/// The flags are atomics so the panic button can flip them without the
/// dispatch lock. `last_report` and `mode` are only written while
/// `dispatch_lock` is held.
pub(crate) struct SubsystemState {
    /// Gates dispatch
    pub initialized: AtomicBool,
    pub emergency_mode: AtomicBool,
    /// Severity of the active emergency, 0 when clear
    pub current_level: AtomicU8,
    /// Epoch millis of the last emergency trigger, 0 when clear
    pub emergency_since: AtomicU64,
    pub mode: RwLock<SystemMode>,
    pub last_report: RwLock<ExecutionReport>,
    /// Serializes dispatch, init and cleanup
    pub dispatch_lock: tokio::sync::Mutex<()>,
    /// Present while initialized
    pub emergency_queue: Mutex<Option<EmergencyQueue>>,
    /// Response id handed to the most recent panic-button lockdown
    last_emergency_id: AtomicU64,
}

impl SubsystemState {
    pub fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
            emergency_mode: AtomicBool::new(false),
            current_level: AtomicU8::new(0),
            emergency_since: AtomicU64::new(0),
            mode: RwLock::new(SystemMode::Normal),
            last_report: RwLock::new(ExecutionReport::default()),
            dispatch_lock: tokio::sync::Mutex::new(()),
            emergency_queue: Mutex::new(None),
            last_emergency_id: AtomicU64::new(0),
        }
    }

    /// Response id for a panic-button lockdown at `now`.
    ///
    /// Strictly increasing, so triggers within one millisecond stay distinct.
    pub fn next_emergency_id(&self, now: u64) -> u64 {
        let previous = self
            .last_emergency_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        now.max(previous.saturating_add(1))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn enter_emergency(&self, level: u8, now: u64) {
        self.emergency_mode.store(true, Ordering::SeqCst);
        self.current_level.store(level, Ordering::SeqCst);
        self.emergency_since.store(now, Ordering::SeqCst);
        let mut mode = self.mode.write();
        *mode = mode.at_least(SystemMode::Emergency);
    }

    pub fn clear_emergency(&self) {
        self.emergency_mode.store(false, Ordering::SeqCst);
        self.current_level.store(0, Ordering::SeqCst);
        self.emergency_since.store(0, Ordering::SeqCst);
    }

    /// Flags and mode for a freshly (de)initialized executor
    pub fn reset(&self, initialized: bool) {
        self.clear_emergency();
        *self.mode.write() = SystemMode::Normal;
        self.initialized.store(initialized, Ordering::Release);
    }

    pub fn publish(&self, report: ExecutionReport) {
        *self.last_report.write() = report;
    }
}
