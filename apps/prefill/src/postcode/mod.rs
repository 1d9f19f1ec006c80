#![allow(dead_code)]
//! Address-lookup widget loader.
//!
//! The Daum postcode widget is an external script that must be fetched at most once per
//! process. [`PostcodeLoader`] wraps that fetch in a `OnceCell`, so any number of concurrent
//! callers share one download and then observe the same ready/failed state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::LazyLock;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::http_client::{ApiError, HttpClient, RequestOptions, ResponseBody};

pub const POSTCODE_SCRIPT_URL: &str =
    "https://t1.daumcdn.net/mapjsapi/bundle/postcode/prod/postcode.v2.js";

static GLOBAL_LOADER: LazyLock<PostcodeLoader> =
    LazyLock::new(|| PostcodeLoader::new(POSTCODE_SCRIPT_URL));

/// The loader shared by the whole process.
pub fn global() -> &'static PostcodeLoader {
    &GLOBAL_LOADER
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

/// Something that can fetch the widget script body.
#[async_trait]
pub trait ScriptSource: Send + Sync {
    async fn fetch(&self, src: &str) -> Result<String, ApiError>;
}

#[async_trait]
impl ScriptSource for HttpClient {
    async fn fetch(&self, src: &str) -> Result<String, ApiError> {
        let response = self.get(src, RequestOptions::default()).await?;
        Ok(match response.body {
            ResponseBody::Text(text) => text,
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Empty => String::new(),
        })
    }
}

pub struct PostcodeLoader {
    src: String,
    started: AtomicBool,
    outcome: OnceCell<Result<(), String>>,
}

impl PostcodeLoader {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            started: AtomicBool::new(false),
            outcome: OnceCell::new(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn state(&self) -> LoadState {
        match self.outcome.get() {
            Some(Ok(())) => LoadState::Ready,
            Some(Err(message)) => LoadState::Failed(message.clone()),
            None if self.started.load(Ordering::Acquire) => LoadState::Loading,
            None => LoadState::Idle,
        }
    }

    /// Loads the script on first call; later and concurrent calls reuse that single outcome.
    /// A failed load stays failed for the lifetime of the loader.
    pub async fn ensure_loaded<S: ScriptSource + ?Sized>(&self, source: &S) -> LoadState {
        self.outcome
            .get_or_init(|| async {
                self.started.store(true, Ordering::Release);
                info!("Loading postcode widget from {}", self.src);
                match source.fetch(&self.src).await {
                    Ok(script) if !script.trim().is_empty() => {
                        info!("Postcode widget ready ({} bytes)", script.len());
                        Ok(())
                    }
                    Ok(_) => {
                        warn!("Postcode widget script was empty");
                        Err("Daum Postcode 스크립트 로드 실패: empty script".to_string())
                    }
                    Err(e) => {
                        warn!("Postcode widget failed to load: {e}");
                        Err(format!("Daum Postcode 스크립트 로드 실패: {e}"))
                    }
                }
            })
            .await;
        self.state()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::http_client::ApiErrorKind;

    struct CountingSource {
        calls: AtomicUsize,
        result: Result<String, ApiError>,
    }

    impl CountingSource {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Ok("window.daum = { Postcode: function() {} };".to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Err(ApiError::new(ApiErrorKind::Http, 404, "Not Found")),
            }
        }
    }

    #[async_trait]
    impl ScriptSource for CountingSource {
        async fn fetch(&self, _src: &str) -> Result<String, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn test_starts_idle_then_ready() {
        let loader = PostcodeLoader::new("https://cdn.test/postcode.js");
        assert_eq!(loader.state(), LoadState::Idle);

        let source = CountingSource::ok();
        assert_eq!(loader.ensure_loaded(&source).await, LoadState::Ready);
        assert!(loader.state().is_ready());
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let loader = Arc::new(PostcodeLoader::new("https://cdn.test/postcode.js"));
        let source = Arc::new(CountingSource::ok());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let loader = Arc::clone(&loader);
            let source = Arc::clone(&source);
            handles.push(tokio::spawn(async move {
                loader.ensure_loaded(source.as_ref()).await
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), LoadState::Ready);
        }

        loader.ensure_loaded(source.as_ref()).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_sticky_and_not_retried() {
        let loader = PostcodeLoader::new("https://cdn.test/postcode.js");
        let source = CountingSource::failing();

        let state = loader.ensure_loaded(&source).await;
        let LoadState::Failed(message) = state else {
            panic!("expected failure");
        };
        assert!(message.contains("Not Found"));

        loader.ensure_loaded(&CountingSource::ok()).await;
        assert!(matches!(loader.state(), LoadState::Failed(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_global_loader_uses_daum_script() {
        assert_eq!(global().src(), POSTCODE_SCRIPT_URL);
    }
}
