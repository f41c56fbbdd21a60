//! Cancellation scope for the requests a view issues.
//!
//! A view owns one `ViewScope` and runs every request through it. When the
//! view is dropped (or the scope is cancelled from a [`ScopeHandle`]), any
//! request still in flight resolves to [`AcademyError::Cancelled`] and its
//! response is never applied.

use academy_core::{AcademyError, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

/// Cloneable remote control for a [`ViewScope`].
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    token: CancellationToken,
}

impl ScopeHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            token: self.token.clone(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drives `future` unless the scope is cancelled first.
    pub async fn run<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.token.is_cancelled() {
            return Err(AcademyError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::debug!("Dropped in-flight request of a cancelled view");
                Err(AcademyError::Cancelled)
            }
            result = future => result,
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_passes_result_through() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { Ok(7) }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_future() {
        let scope = ViewScope::new();
        let handle = scope.handle();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        let result: Result<()> = scope
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;
        assert_eq!(result, Err(AcademyError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancelled_scope_refuses_new_work() {
        let scope = ViewScope::new();
        scope.cancel();
        assert!(scope.run(async { Ok(1) }).await.unwrap_err().is_cancelled());
    }

    #[test]
    fn test_drop_cancels_handles() {
        let scope = ViewScope::new();
        let handle = scope.handle();
        drop(scope);
        assert!(handle.is_cancelled());
    }
}
