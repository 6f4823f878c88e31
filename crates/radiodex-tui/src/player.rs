//! Playback — mpv as an external media sink.
//!
//! One station at a time: starting a stream replaces whatever child is
//! running. The stream URL is the only contract; decoding and protocol
//! handling are entirely mpv's problem.

use std::process::Stdio;

use anyhow::Context;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

pub struct Player {
    child: Option<Child>,
    current_url: Option<String>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            child: None,
            current_url: None,
        }
    }

    /// URL of the stream currently handed to mpv, if any.
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn is_playing(&self, url: &str) -> bool {
        self.current_url.as_deref() == Some(url)
    }

    pub fn play(&mut self, url: &str) -> anyhow::Result<()> {
        self.stop();
        let child = Command::new("mpv")
            .arg("--no-video")
            .arg("--really-quiet")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .context("failed to spawn mpv — is it installed and on PATH?")?;
        info!(%url, pid = child.id(), "mpv started");
        self.child = Some(child);
        self.current_url = Some(url.to_string());
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!("stopping mpv");
            if let Err(e) = child.start_kill() {
                warn!("failed to kill mpv: {e}");
            }
        }
        self.current_url = None;
    }

    /// Notice an mpv exit (stream dropped, user closed it externally) so
    /// the ▶ marker doesn't outlive the process.
    pub fn reap(&mut self) {
        if let Some(child) = &mut self.child {
            match child.try_wait() {
                Ok(Some(status)) => {
                    info!(%status, "mpv exited");
                    self.child = None;
                    self.current_url = None;
                }
                Ok(None) => {}
                Err(e) => warn!("mpv wait failed: {e}"),
            }
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
