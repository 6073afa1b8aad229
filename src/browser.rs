use std::cell::RefCell;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{NpError, Result};

/// Opens a URL in the user's browser; fire-and-forget
pub trait BrowserLauncher {
    fn open(&self, url: &str) -> Result<()>;
}

/// Launches the platform's default URL handler
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            // `cmd /C start` would split the query string on `&`
            let mut cmd = Command::new("rundll32");
            cmd.arg("url.dll,FileProtocolHandler").arg(url);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        let mut cmd = Self::command(url);
        debug!("launching {:?}", cmd.get_program());

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| NpError::Browser(format!("{:?}: {}", cmd.get_program(), e)))
    }
}

/// Remembers the URLs it was asked to open
#[derive(Debug, Default)]
pub struct RecordingBrowser {
    opened: RefCell<Vec<String>>,
    fail: bool,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// A launcher whose every `open` fails
    pub fn failing() -> Self {
        RecordingBrowser {
            opened: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl BrowserLauncher for RecordingBrowser {
    fn open(&self, url: &str) -> Result<()> {
        if self.fail {
            return Err(NpError::Browser("no browser available".to_string()));
        }
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}
