use anyhow::Result;
use std::io::{self, Read, Write};

use crate::cli::Config;
use crate::clipboard::{ClipboardAccess, ClipboardManager};
use crate::constants::{DEFAULT_GIST_NAME, get_api_url, get_env_token};
use crate::gist::{GistService, GithubClient, SnippetRequest, SnippetResult};
use crate::input::{ContentSource, ResolvedContent, resolve_content, stdin_is_piped};
use crate::logging::{log_debug, log_info, log_warn};
use crate::output::{announce_submission, report_result};

/// Run once against the real stdin, system clipboard and GitHub API.
pub fn run_app(config: &Config) -> Result<()> {
    let piped = stdin_is_piped()?;
    let mut stdin = io::stdin().lock();
    let stdin_reader: Option<&mut dyn Read> = if piped { Some(&mut stdin) } else { None };

    let mut clipboard = ClipboardManager::new();
    let service = GithubClient::new(get_api_url())?;
    let mut stdout = io::stdout().lock();

    run_with(
        config,
        stdin_reader,
        &mut clipboard,
        &service,
        get_env_token(),
        &mut stdout,
    )?;

    Ok(())
}

/// The whole pipeline: resolve content, build the request, submit it once
/// and report the URL. Nothing is retried.
pub fn run_with(
    config: &Config,
    stdin: Option<&mut dyn Read>,
    clipboard: &mut dyn ClipboardAccess,
    service: &dyn GistService,
    env_token: Option<String>,
    out: &mut dyn Write,
) -> Result<SnippetResult> {
    if config.paste {
        log_warn("--paste is reserved and has no effect");
    }

    let resolved = resolve_content(config, stdin, clipboard)?;
    log_info(&format!(
        "Resolved {} characters of content from {:?}",
        resolved.content.len(),
        resolved.source
    ));

    let token = resolve_token(config.token.as_deref(), env_token.as_deref());
    let request = build_request(config, resolved);
    log_debug(&format!(
        "Gist name: {}, public: {}",
        request.display_name, request.is_public
    ));

    announce_submission(out)?;
    let result = service.create_gist(&request, token.as_deref())?;
    log_info(&format!("Created gist: {}", result.url));

    report_result(out, &result, config.copy_url, clipboard)?;
    Ok(result)
}

pub fn build_request(config: &Config, resolved: ResolvedContent) -> SnippetRequest {
    SnippetRequest {
        display_name: resolve_display_name(config, &resolved.source),
        description: config.description.clone(),
        is_public: config.public,
        content: resolved.content,
    }
}

/// `--name`, else the base name of the source file, else `gistfile`.
pub fn resolve_display_name(config: &Config, source: &ContentSource) -> String {
    if let Some(name) = &config.name {
        return name.clone();
    }

    match source {
        ContentSource::File(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_GIST_NAME.to_string()),
        _ => DEFAULT_GIST_NAME.to_string(),
    }
}

/// `--token` wins over the environment; a blank result means anonymous.
pub fn resolve_token(flag: Option<&str>, env: Option<&str>) -> Option<String> {
    flag.or(env)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
