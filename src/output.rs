use std::io::Write;

use anyhow::Result;

use crate::clipboard::ClipboardAccess;
use crate::gist::SnippetResult;
use crate::logging::{log_info, log_warn};

// X11 and Wayland clipboards are owned by the writing process; without a
// clipboard manager the copied URL disappears once gost exits.
#[cfg(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))))]
const CLIPBOARD_PERSISTENCE_NOTE: Option<&str> =
    Some("Note: the copied URL persists only if a clipboard manager is running.");

#[cfg(not(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten")))))]
const CLIPBOARD_PERSISTENCE_NOTE: Option<&str> = None;

pub fn announce_submission(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Gosting Gist ... ")?;
    Ok(())
}

/// Print the created gist URL and, when asked, copy it to the clipboard.
/// A failed copy is reported but does not fail the run.
pub fn report_result(
    out: &mut dyn Write,
    result: &SnippetResult,
    copy_url: bool,
    clipboard: &mut dyn ClipboardAccess,
) -> Result<()> {
    writeln!(out, "Done!")?;
    writeln!(out, "Gist URL: {}", result.url)?;

    if copy_url {
        match clipboard.set_text(&result.url) {
            Ok(()) => {
                log_info("Copied gist URL to clipboard");
                writeln!(out, "Gist URL copied to clipboard.")?;
                if let Some(note) = CLIPBOARD_PERSISTENCE_NOTE {
                    writeln!(out, "{note}")?;
                }
            }
            Err(e) => {
                log_warn(&format!("Failed to copy gist URL to clipboard: {e:#}"));
                eprintln!("Warning: Failed to copy gist URL to clipboard: {e}");
            }
        }
    }

    out.flush()?;
    Ok(())
}
