// SPDX-License-Identifier: PMPL-1.0-or-later

//! External helper that performs the portal login and prints the dossier.
//!
//! The helper receives the credentials through `ANEF_WEB_USERNAME`,
//! `ANEF_WEB_PASSWORD` and `ANEF_WEB_URL` (never on the command line, where
//! other users could read them) and must write the dossier JSON to stdout.

use super::{AutomationError, Dossier, StatusSource};
use crate::workflow::Credentials;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long the helper may run, matching the portal page wait.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct FetchCommand {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl FetchCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl StatusSource for FetchCommand {
    fn fetch_dossier(
        &mut self,
        credentials: &Credentials,
    ) -> Result<Option<Dossier>, AutomationError> {
        debug!(program = %self.program, timeout_s = self.timeout.as_secs(), "running status helper");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("ANEF_WEB_USERNAME", &credentials.username)
            .env("ANEF_WEB_PASSWORD", credentials.password.expose())
            .env("ANEF_WEB_URL", &credentials.base_url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| AutomationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Both pipes are drained while the helper runs; a chatty helper
        // would otherwise block once the pipe buffer fills up.
        let stdout_reader = drain(child.stdout.take());
        let stderr_reader = drain(child.stderr.take());

        let start = Instant::now();
        let status = loop {
            let polled = child.try_wait().map_err(|source| AutomationError::Spawn {
                program: self.program.clone(),
                source,
            })?;
            if let Some(status) = polled {
                break status;
            }
            if start.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                warn!(program = %self.program, "status helper timed out");
                return Err(AutomationError::Timeout(self.timeout));
            }
            thread::sleep(Duration::from_millis(20));
        };

        let stdout = collect(stdout_reader)?;
        let stderr = collect(stderr_reader)?;

        if !status.success() {
            let code = status
                .code()
                .map(|code| format!("status {}", code))
                .unwrap_or_else(|| "a signal".to_string());
            return Err(AutomationError::Helper {
                code,
                stderr: clamp_output(String::from_utf8_lossy(&stderr).trim().to_string()),
            });
        }

        let stdout = String::from_utf8(stdout).map_err(|err| {
            AutomationError::InvalidPayload(format!("helper output is not UTF-8: {}", err))
        })?;
        Dossier::parse(&stdout)
    }
}

fn drain<R>(pipe: Option<R>) -> Option<JoinHandle<io::Result<Vec<u8>>>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn collect(reader: Option<JoinHandle<io::Result<Vec<u8>>>>) -> Result<Vec<u8>, AutomationError> {
    let Some(handle) = reader else {
        return Ok(Vec::new());
    };
    handle
        .join()
        .map_err(|_| AutomationError::InvalidPayload("helper output reader panicked".to_string()))?
        .map_err(|err| AutomationError::InvalidPayload(format!("failed to read helper output: {}", err)))
}

fn clamp_output(mut value: String) -> String {
    const MAX_LEN: usize = 2048;
    if value.len() > MAX_LEN {
        let mut cut = MAX_LEN;
        while !value.is_char_boundary(cut) {
            cut -= 1;
        }
        value.truncate(cut);
        value.push_str("\n...<truncated>");
    }
    value
}
