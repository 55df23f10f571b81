use std::io::{self, Stderr, Stdout, Write};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::notice::{Notice, Severity};
use crate::domain::summary::VirtualDocument;
use crate::error::AppResult;
use crate::services::Presenter;

/// Shows documents and info notices on `out`, error notices on `err`.
pub struct TerminalPresenter<O = Stdout, E = Stderr> {
    out: Mutex<O>,
    err: Mutex<E>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, E> TerminalPresenter<O, E> {
    pub fn with_writers(out: O, err: E) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    #[cfg(test)]
    fn into_writers(self) -> (O, E) {
        (
            self.out.into_inner().unwrap(),
            self.err.into_inner().unwrap(),
        )
    }
}

fn lock<W>(writer: &Mutex<W>) -> io::Result<MutexGuard<'_, W>> {
    writer
        .lock()
        .map_err(|_| io::Error::other("terminal writer lock poisoned"))
}

#[async_trait]
impl<O, E> Presenter for TerminalPresenter<O, E>
where
    O: Write + Send,
    E: Write + Send,
{
    async fn open_document(&self, document: &VirtualDocument) -> AppResult<()> {
        debug!(language = document.language, "opening document");
        let mut out = lock(&self.out)?;
        writeln!(out, "{}", document.content)?;
        out.flush()?;
        Ok(())
    }

    async fn notify(&self, notice: &Notice) -> AppResult<()> {
        match notice.severity {
            Severity::Info => {
                let mut out = lock(&self.out)?;
                writeln!(out, "{}", notice.message)?;
                out.flush()?;
            }
            Severity::Error => {
                let mut err = lock(&self.err)?;
                writeln!(err, "Error: {}", notice.message)?;
                err.flush()?;
            }
        }
        Ok(())
    }
}
