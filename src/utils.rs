use once_cell::sync::Lazy;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

/// Run `fut` on the Tokio runtime and hand its output to `on_done` on the
/// GTK main thread.
pub fn run_async_to_main<T, Fut, F>(fut: Fut, on_done: F)
where
    T: Send + 'static,
    Fut: std::future::Future<Output = T> + Send + 'static,
    F: FnOnce(T) + 'static,
{
    let handle = RUNTIME.spawn(fut);
    glib::spawn_future_local(async move {
        match handle.await {
            Ok(value) => on_done(value),
            Err(e) => log::error!("background task failed: {}", e),
        }
    });
}
