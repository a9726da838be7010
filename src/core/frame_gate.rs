use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Binary "frame in flight" gate
#[derive(Debug, Default)]
pub struct FrameGate {
    busy: Mutex<bool>,
    released: Condvar,
}

/// Held by the render task for the lifetime of one frame. Dropping it,
/// including during a panic unwind, frees the gate.
#[derive(Debug)]
pub struct FramePermit {
    gate: Arc<FrameGate>,
}

impl FrameGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.busy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until no frame is in flight, then claim the gate
    pub fn acquire(self: &Arc<Self>) -> FramePermit {
        let mut busy = self.lock();
        while *busy {
            busy = self.released.wait(busy).unwrap_or_else(PoisonError::into_inner);
        }
        *busy = true;
        FramePermit {
            gate: Arc::clone(self),
        }
    }

    /// Claim the gate only if it is free
    pub fn try_acquire(self: &Arc<Self>) -> Option<FramePermit> {
        let mut busy = self.lock();
        if *busy {
            return None;
        }
        *busy = true;
        Some(FramePermit {
            gate: Arc::clone(self),
        })
    }

    /// Block until the in-flight frame, if any, has finished
    pub fn wait_idle(&self) {
        let mut busy = self.lock();
        while *busy {
            busy = self.released.wait(busy).unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn is_busy(&self) -> bool {
        *self.lock()
    }

    fn release(&self) {
        *self.lock() = false;
        self.released.notify_all();
    }
}

impl Drop for FramePermit {
    fn drop(&mut self) {
        self.gate.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn permit_releases_on_drop() {
        let gate = FrameGate::new();
        let permit = gate.acquire();
        assert!(gate.is_busy());
        assert!(gate.try_acquire().is_none());

        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn acquire_blocks_until_release() {
        let gate = FrameGate::new();
        let released = Arc::new(AtomicBool::new(false));

        let permit = gate.acquire();
        let waiter = {
            let gate = Arc::clone(&gate);
            let released = Arc::clone(&released);
            thread::spawn(move || {
                let _second = gate.acquire();
                released.load(Ordering::SeqCst)
            })
        };

        thread::sleep(Duration::from_millis(20));
        released.store(true, Ordering::SeqCst);
        drop(permit);

        assert!(waiter.join().unwrap());
    }

    #[test]
    fn panicking_holder_still_releases() {
        let gate = FrameGate::new();
        let permit = gate.acquire();
        let result = thread::spawn(move || {
            let _permit = permit;
            panic!("frame failed");
        })
        .join();

        assert!(result.is_err());
        gate.wait_idle();
        assert!(!gate.is_busy());
    }
}
