use chardetng::EncodingDetector;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::Config;
use crate::clipboard::ClipboardAccess;
use crate::error::GostError;
use crate::logging::{log_debug, log_info};

/// Where the gist content came from. Exactly one source is consulted per run.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSource {
    StandardInput,
    File(PathBuf),
    Clipboard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContent {
    pub source: ContentSource,
    pub content: String,
}

/// Whether stdin is connected to a pipe (`cmd | gost`).
pub fn stdin_is_piped() -> Result<bool, GostError> {
    if atty::is(atty::Stream::Stdin) {
        log_debug("Stdin is a terminal");
        return Ok(false);
    }

    stdin_is_fifo()
}

// A non-terminal stdin may also be /dev/null, a redirected file or a socket;
// none of those count as a pipe.
#[cfg(unix)]
fn stdin_is_fifo() -> Result<bool, GostError> {
    use std::os::unix::fs::FileTypeExt;

    let metadata = fs::metadata("/dev/stdin")
        .map_err(|e| GostError::InputUnavailable(e.to_string()))?;
    let file_type = metadata.file_type();

    let piped = file_type.is_fifo();
    log_debug(&format!("Stdin file type: {file_type:?}, piped: {piped}"));
    Ok(piped)
}

#[cfg(not(unix))]
fn stdin_is_fifo() -> Result<bool, GostError> {
    Ok(true)
}

/// Decode raw bytes as UTF-8, falling back to encoding detection.
pub fn decode_text(bytes: Vec<u8>, origin: &str) -> String {
    match String::from_utf8(bytes) {
        Ok(content) => {
            log_info(&format!(
                "Read {} characters from {} (UTF-8)",
                content.len(),
                origin
            ));
            content
        }
        Err(e) => {
            let bytes = e.into_bytes();
            let mut detector = EncodingDetector::new();
            detector.feed(&bytes, true);
            let encoding = detector.guess(None, true);

            let (content, _, had_errors) = encoding.decode(&bytes);
            if had_errors {
                log_debug(&format!("Encoding detection had errors for {origin}"));
            }

            log_info(&format!(
                "Read {} characters from {} ({})",
                content.len(),
                origin,
                encoding.name()
            ));
            content.into_owned()
        }
    }
}

pub fn read_stdin<R: Read + ?Sized>(reader: &mut R) -> Result<String, GostError> {
    log_debug("Reading from stdin");
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| GostError::InputUnavailable(e.to_string()))?;

    let text = decode_text(buffer, "stdin");
    if text.trim().is_empty() {
        return Err(GostError::StdinEmpty);
    }

    Ok(text)
}

pub fn read_text_file(path: &Path) -> Result<String, GostError> {
    log_debug(&format!("Reading text file: {}", path.display()));

    let bytes = fs::read(path).map_err(|e| GostError::FileRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(decode_text(bytes, &path.display().to_string()))
}

pub fn read_clipboard_text(clipboard: &mut dyn ClipboardAccess) -> Result<String, GostError> {
    let text = clipboard
        .get_text()
        .map_err(|e| GostError::ClipboardRead(format!("{e:#}")))?;

    if text.trim().is_empty() {
        return Err(GostError::ClipboardEmpty);
    }

    Ok(text)
}

/// Pick the content source by priority (piped stdin, then --file, then
/// --clip) and read it. `stdin` is `Some` only when stdin is piped.
pub fn resolve_content(
    config: &Config,
    stdin: Option<&mut dyn Read>,
    clipboard: &mut dyn ClipboardAccess,
) -> Result<ResolvedContent, GostError> {
    if let Some(reader) = stdin {
        log_info("Stdin data available - using it as gist content");
        let content = read_stdin(reader)?;
        return Ok(ResolvedContent {
            source: ContentSource::StandardInput,
            content,
        });
    }

    if let Some(path) = &config.file {
        let content = read_text_file(path)?;
        return Ok(ResolvedContent {
            source: ContentSource::File(path.clone()),
            content,
        });
    }

    if config.clip {
        let content = read_clipboard_text(clipboard)?;
        return Ok(ResolvedContent {
            source: ContentSource::Clipboard,
            content,
        });
    }

    Err(GostError::NoSourceSpecified)
}
