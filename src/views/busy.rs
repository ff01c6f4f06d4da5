use std::sync::Arc;

use tokio::sync::watch;

/// In-flight flag for a view. The view owns the sender; anything holding a
/// receiver sees the flag flip while the request is still outstanding.
#[derive(Debug, Clone)]
pub struct Busy {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for Busy {
    fn default() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }
}

impl Busy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Raise the flag until the returned guard is dropped, including on an
    /// early return.
    pub fn begin(&self) -> BusyGuard {
        self.tx.send_replace(true);
        BusyGuard {
            tx: self.tx.clone(),
        }
    }
}

#[must_use = "the flag drops back to false as soon as the guard is dropped"]
pub struct BusyGuard {
    tx: Arc<watch::Sender<bool>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.tx.send_replace(false);
    }
}
