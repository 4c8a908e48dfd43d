/// Fallback gist file name when neither --name nor a file source is given
pub const DEFAULT_GIST_NAME: &str = "gistfile";

/// Environment variable holding the fallback API token
pub const TOKEN_ENV_VAR: &str = "GOST";

/// GitHub REST API
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const API_URL_ENV_VAR: &str = "GOST_API_URL";
pub const GITHUB_ACCEPT_HEADER: &str = "application/vnd.github+json";

/// Logging
pub const LOG_TO_FILE_ENV_VAR: &str = "GOST_LOG_TO_FILE";
pub const LOG_DIR_NAME: &str = ".gost";
pub const LOG_FILE_NAME: &str = "gost.log";

/// Get the API base URL from environment variable or default, without trailing slash
pub fn get_api_url() -> String {
    std::env::var(API_URL_ENV_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Get the fallback token from the environment, if set
pub fn get_env_token() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR).ok()
}

pub fn user_agent() -> String {
    format!("gost/{}", env!("CARGO_PKG_VERSION"))
}
