//! Initialize-once loader
//!
//! Concurrent callers share one in-flight load. A failed load leaves the
//! loader empty so the next caller retries.

use std::future::Future;

use tokio::sync::OnceCell;

#[derive(Debug)]
pub struct SharedLoader<T> {
    cell: OnceCell<T>,
}

impl<T> SharedLoader<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// Return the loaded value, running `load` only if nothing is loaded yet
    pub async fn ensure_loaded<F, Fut, E>(&self, load: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell.get_or_try_init(load).await
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

impl<T> Default for SharedLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_loads_once() {
        let loader = Arc::new(SharedLoader::<Vec<String>>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let loader = loader.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                let value = loader
                    .ensure_loaded(|| async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::task::yield_now().await;
                        Ok::<_, String>(vec!["Dessert".to_string()])
                    })
                    .await
                    .unwrap();
                value.len()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(loader.is_loaded());
    }

    #[tokio::test]
    async fn test_failure_is_retried() {
        let loader = SharedLoader::<u32>::new();

        let first = loader.ensure_loaded(|| async { Err::<u32, _>("offline") }).await;
        assert_eq!(first, Err("offline"));
        assert!(!loader.is_loaded());
        assert_eq!(loader.get(), None);

        let second = loader.ensure_loaded(|| async { Ok::<_, &str>(42) }).await;
        assert_eq!(second, Ok(&42));

        let third = loader.ensure_loaded(|| async { Ok::<_, &str>(7) }).await;
        assert_eq!(third, Ok(&42));
    }
}
