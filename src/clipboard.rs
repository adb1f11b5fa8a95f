use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait ClipboardWriter {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Platform clipboard, opened on first copy so that a missing display server
/// only surfaces as a failed copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
    wait_for_owner: bool,
}

impl SystemClipboard {
    /// For processes that exit right after copying. On X11 and Wayland the
    /// text lives only as long as its owner, so `copy` keeps serving it until
    /// another program takes the clipboard over.
    pub fn blocking() -> Self {
        Self {
            inner: None,
            wait_for_owner: true,
        }
    }

    pub fn waits_for_owner(&self) -> bool {
        self.wait_for_owner
    }

    fn open(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                Clipboard::new().map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard handle missing".to_string()))
    }
}

impl ClipboardWriter for SystemClipboard {
    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        use arboard::SetExtLinux;

        let wait_for_owner = self.wait_for_owner;
        let clipboard = self.open()?;
        let result = if wait_for_owner {
            tracing::debug!("holding clipboard until another program takes it");
            clipboard.set().wait().text(text.to_owned())
        } else {
            clipboard.set_text(text.to_owned())
        };
        result.map_err(|err| ClipboardError::Write(err.to_string()))
    }

    // Other platforms keep clipboard contents after the writer exits.
    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.open()?
            .set_text(text.to_owned())
            .map_err(|err| ClipboardError::Write(err.to_string()))
    }
}
