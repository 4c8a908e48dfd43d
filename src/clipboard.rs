use crate::logging::{log_debug, log_info};
use anyhow::{Context, Result};
use arboard::Clipboard;

/// Text access to a clipboard. The runner only ever talks to this trait so
/// that tests can substitute an in-memory clipboard.
pub trait ClipboardAccess {
    fn get_text(&mut self) -> Result<String>;
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard. The underlying handle is opened on first use, so
/// runs that never touch the clipboard work on headless machines.
#[derive(Default)]
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut Clipboard> {
        if self.clipboard.is_none() {
            log_debug("Initializing clipboard manager");
            let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
            self.clipboard = Some(clipboard);
        }

        self.clipboard
            .as_mut()
            .context("Clipboard is not available")
    }
}

impl ClipboardAccess for ClipboardManager {
    fn get_text(&mut self) -> Result<String> {
        log_debug("Reading text from clipboard");

        let text = self
            .handle()?
            .get_text()
            .context("Failed to read text from clipboard")?;

        log_info(&format!("Read {} characters from clipboard", text.len()));
        Ok(text)
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        log_debug(&format!("Writing {} characters to clipboard", text.len()));

        self.handle()?
            .set_text(text)
            .context("Failed to write text to clipboard")?;

        log_info("Successfully wrote text to clipboard");
        Ok(())
    }
}
