use std::collections::BTreeMap;
use std::error::Error as StdError;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use crate::constants::{GITHUB_ACCEPT_HEADER, user_agent};
use crate::error::GostError;
use crate::logging::{log_debug, log_info};

/// Everything needed to create one gist.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetRequest {
    pub display_name: String,
    pub description: String,
    pub is_public: bool,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnippetResult {
    pub url: String,
}

/// A remote service that can host a snippet and hand back its URL.
pub trait GistService {
    fn create_gist(
        &self,
        request: &SnippetRequest,
        token: Option<&str>,
    ) -> Result<SnippetResult, GostError>;
}

#[derive(Debug, Serialize)]
struct CreateGistBody<'a> {
    description: &'a str,
    public: bool,
    files: BTreeMap<&'a str, GistFileBody<'a>>,
}

#[derive(Debug, Serialize)]
struct GistFileBody<'a> {
    content: &'a str,
}

impl<'a> From<&'a SnippetRequest> for CreateGistBody<'a> {
    fn from(request: &'a SnippetRequest) -> Self {
        let mut files = BTreeMap::new();
        files.insert(
            request.display_name.as_str(),
            GistFileBody {
                content: &request.content,
            },
        );

        Self {
            description: &request.description,
            public: request.is_public,
            files,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateGistResponse {
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the GitHub Gists REST API.
#[derive(Debug)]
pub struct GithubClient {
    base_url: String,
    client: Client,
}

impl GithubClient {
    pub fn new(base_url: String) -> Result<Self, GostError> {
        log_debug(&format!("Initializing GitHub client for {base_url}"));

        let client = Client::builder()
            .user_agent(user_agent())
            .build()
            .map_err(|e| {
                GostError::RemoteSubmission(format!("Failed to create HTTP client: {}", describe(&e)))
            })?;

        Ok(Self { base_url, client })
    }

    fn gists_url(&self) -> String {
        format!("{}/gists", self.base_url)
    }
}

impl GistService for GithubClient {
    fn create_gist(
        &self,
        request: &SnippetRequest,
        token: Option<&str>,
    ) -> Result<SnippetResult, GostError> {
        let url = self.gists_url();
        let body = CreateGistBody::from(request);

        let mut builder = self
            .client
            .post(&url)
            .header(ACCEPT, GITHUB_ACCEPT_HEADER)
            .json(&body);

        match token {
            Some(token) => {
                log_debug("Sending authenticated gist request");
                builder = builder.bearer_auth(token);
            }
            None => log_info("No token available; creating gist anonymously"),
        }

        log_info(&format!(
            "POST {} ({} characters, public: {})",
            url,
            request.content.len(),
            request.is_public
        ));

        let response = builder
            .send()
            .map_err(|e| GostError::RemoteSubmission(describe(&e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| GostError::RemoteSubmission(describe(&e)))?;

        log_debug(&format!("Gist API responded with status {status}"));

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or(text);

            return Err(GostError::RemoteSubmission(format!(
                "Request failed with status code {}: {}",
                status.as_u16(),
                message.trim()
            )));
        }

        let parsed: CreateGistResponse = serde_json::from_str(&text).map_err(|e| {
            GostError::RemoteSubmission(format!("Invalid response from gist API: {e}"))
        })?;

        let url = parsed
            .html_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                GostError::RemoteSubmission("Gist API response did not include a URL".to_string())
            })?;

        Ok(SnippetResult { url })
    }
}

// Flatten the source chain into a single line
fn describe(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
