//! Shared session handle
//!
//! Lets another owner (a UI thread, a control endpoint) reset or inspect the
//! session between frames. The pipeline holds the same lock for the whole of a
//! frame, so a reset is never observed half-applied.

use std::sync::Arc;

use bodyscale_stabilize::{MeasurementSession, SessionSnapshot};
use parking_lot::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<MeasurementSession>>,
}

impl SessionHandle {
    pub fn new(session: MeasurementSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Clear buffer, best estimate and high-water confidence as one unit
    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().snapshot()
    }

    /// Read session state under the lock
    pub fn with<R>(&self, f: impl FnOnce(&MeasurementSession) -> R) -> R {
        f(&self.inner.lock())
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, MeasurementSession> {
        self.inner.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodyscale_core::{MeasurementConfig, MeasurementRecord};
    use std::thread;

    #[test]
    fn test_reset_from_another_thread() {
        let handle = SessionHandle::default();
        let filter = MeasurementConfig::default().filter_config();
        {
            let mut session = handle.lock();
            for _ in 0..10 {
                session.push(
                    MeasurementRecord::new(55.0, 55.0, 80.0, 80.0, 70.0, 35.0),
                    &filter,
                    170.0,
                );
            }
        }
        assert_eq!(handle.snapshot().best_confidence, 100.0);

        let remote = handle.clone();
        thread::spawn(move || remote.reset()).join().unwrap();

        let snap = handle.snapshot();
        assert_eq!(snap.buffered, 0);
        assert_eq!(snap.best_record, None);
        assert_eq!(snap.best_confidence, 0.0);
        assert_eq!(snap.generation, 1);
        assert_eq!(handle.with(|s| s.buffer().len()), 0);
    }
}
