//! Background tasks that never take the process down

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::error;

/// Spawns `future` on the current tokio runtime, catching any panic.
///
/// A panic is logged with `tracing::error!` under `name` and the handle
/// resolves to `None`; otherwise it resolves to `Some(output)`.
pub fn spawn_guarded<F>(name: &'static str, future: F) -> JoinHandle<Option<F::Output>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(async move {
        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(output) => Some(output),
            Err(panic) => {
                error!(task = name, panic = %panic_message(panic.as_ref()), "task panicked");
                None
            }
        }
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panic_is_contained() {
        let handle = spawn_guarded("boom", async {
            panic!("exploded");
        });
        let result: Option<()> = handle.await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn output_is_returned() {
        let handle = spawn_guarded("answer", async { 42 });
        assert_eq!(handle.await.unwrap(), Some(42));
    }
}
