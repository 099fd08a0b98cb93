use std::time::Duration;

use reqwest::Client as HttpClient;
use url::Url;

use crate::api::models::{CompletionRequest, CompletionResponse, ErrorEnvelope};
use crate::app::AppConfig;
use crate::chat::store::{CompletionCallback, Completer};
use crate::error::ApiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct CompletionClient {
    http: HttpClient,
    base: Url,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base: Self::base_api(&config.base_url)?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Parses the configured base and forces a trailing slash so `join` appends
    /// instead of replacing the last path segment.
    fn base_api(base_url: &str) -> Result<Url, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/", trimmed))?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::MissingCredential);
        }
        Ok(req.bearer_auth(&self.api_key))
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        Err(ApiError::Status { status: status.as_u16(), message })
    }

    /// Requests a completion for `prompt` and returns the first candidate's raw
    /// text, or `None` when the response carries no candidates.
    pub async fn completion(&self, prompt: &str, max_tokens: u32) -> Result<Option<String>, ApiError> {
        let endpoint = self.endpoint("completions")?;
        let body = CompletionRequest { model: &self.model, prompt, max_tokens };
        log::debug!("POST {} ({} prompt chars, max_tokens={})", endpoint, prompt.len(), max_tokens);

        let req = self.with_auth(self.http.post(endpoint).json(&body))?;
        let resp = Self::check_status(req.send().await?).await?;
        let parsed: CompletionResponse = resp.json().await?;
        Ok(parsed.into_first_text())
    }

    /// Checks the key against the model listing endpoint. Returns the HTTP status on success.
    pub async fn verify(&self) -> Result<u16, ApiError> {
        let endpoint = self.endpoint("models")?;
        let req = self.with_auth(self.http.get(endpoint))?;
        let resp = Self::check_status(req.send().await?).await?;
        Ok(resp.status().as_u16())
    }
}

impl Completer for CompletionClient {
    fn complete(&self, prompt: String, max_tokens: u32, on_done: CompletionCallback) {
        let client = self.clone();
        let rx = crate::utils::run_async_to_main(async move { client.completion(&prompt, max_tokens).await });
        let mut on_done = Some(on_done);
        // Replies land on the caller's thread-default context; on the GTK thread that is the main loop.
        let context = glib::MainContext::ref_thread_default();
        rx.attach(Some(&context), move |res| {
            if let Some(cb) = on_done.take() {
                cb(res);
            }
            glib::ControlFlow::Break
        });
    }
}
