use std::sync::Arc;

use tokio::sync::watch;

/// Single re-entrancy guard serializing cooperative tasks.
///
/// At most one [`BusyGuard`] exists per flag at any instant. Acquisition never
/// waits: a caller that finds the flag raised is expected to drop its request.
/// The flag is lowered when the guard is dropped, so every exit path of the
/// owning task (completion, early return, cancellation) releases it.
#[derive(Debug, Clone)]
pub struct BusyFlag {
    state: Arc<watch::Sender<bool>>,
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyFlag {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            state: Arc::new(tx),
        }
    }

    pub fn is_busy(&self) -> bool {
        *self.state.borrow()
    }

    /// Raises the flag if it is currently lowered.
    ///
    /// Returns `None` when another guard is alive.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        let acquired = self.state.send_if_modified(|busy| {
            if *busy {
                return false;
            }
            *busy = true;
            true
        });
        acquired.then(|| BusyGuard {
            state: Arc::clone(&self.state),
        })
    }

    /// Resolves once the flag is lowered. Returns immediately when idle.
    pub async fn wait_idle(&self) {
        let mut rx = self.state.subscribe();
        // The sender is owned by `self`, so the channel cannot close here.
        let _ = rx.wait_for(|busy| !*busy).await;
    }
}

/// Proof of ownership of a raised [`BusyFlag`].
#[derive(Debug)]
pub struct BusyGuard {
    state: Arc<watch::Sender<bool>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.state.send_replace(false);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::BusyFlag;

    #[test]
    fn second_acquire_is_refused_until_release() {
        let flag = BusyFlag::new();
        assert!(!flag.is_busy());

        let guard = flag.try_acquire().expect("first acquire");
        assert!(flag.is_busy());
        assert!(flag.try_acquire().is_none());

        drop(guard);
        assert!(!flag.is_busy());
        assert!(flag.try_acquire().is_some());
    }

    #[test]
    fn clones_share_state() {
        let flag = BusyFlag::new();
        let other = flag.clone();
        let _guard = flag.try_acquire().expect("acquire");
        assert!(other.is_busy());
        assert!(other.try_acquire().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_idle_resolves_after_guard_drop() {
        let flag = BusyFlag::new();
        let guard = flag.try_acquire().expect("acquire");

        let task = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(250)).await;
            drop(guard);
        });

        let start = tokio::time::Instant::now();
        flag.wait_idle().await;
        assert!(start.elapsed() >= Duration::from_millis(250));
        assert!(!flag.is_busy());
        task.await.expect("join");
    }

    #[tokio::test]
    async fn wait_idle_is_immediate_when_idle() {
        BusyFlag::new().wait_idle().await;
    }
}
