use glib::MainContext;
use once_cell::sync::Lazy;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("openai-chat-io")
        .build()
        .expect("Failed to build Tokio runtime")
});

pub fn spawn_async<F>(fut: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    RUNTIME.spawn(fut);
}

/// Runs `fut` on the Tokio runtime and delivers its result on the GTK main context.
/// The receiver must be attached by the caller.
pub fn run_async_to_main<T, E, Fut>(fut: Fut) -> glib::Receiver<Result<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
    Fut: std::future::Future<Output = Result<T, E>> + Send + 'static,
{
    let (tx, rx) = MainContext::channel::<Result<T, E>>(glib::Priority::default());
    spawn_async(async move {
        let res = fut.await;
        if tx.send(res).is_err() {
            log::debug!("main context receiver dropped before result was delivered");
        }
    });
    rx
}

pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_scheme_and_strips_slash() {
        assert_eq!(normalize_url(" api.openai.com/v1/ "), "https://api.openai.com/v1");
        assert_eq!(normalize_url("http://localhost:8080/v1"), "http://localhost:8080/v1");
        assert_eq!(normalize_url("   "), "");
    }
}
