//! Spinner shown while waiting on the API

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner slot shared by a command and its API client's callbacks.
///
/// Notices printed through [`Progress::notify`] suspend the running spinner
/// so indicatif does not draw over them.
#[derive(Clone, Default)]
pub struct Progress {
    active: Arc<Mutex<Option<ProgressBar>>>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fut` behind a stderr spinner.
    ///
    /// The spinner is hidden when stderr is not a terminal and always cleared
    /// before returning, whatever the outcome.
    pub async fn spin<T, F>(&self, message: &str, fut: F) -> T
    where
        F: Future<Output = T>,
    {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.set_active(Some(spinner.clone()));

        let result = fut.await;

        self.set_active(None);
        spinner.finish_and_clear();
        result
    }

    /// Print a line to stderr without clashing with the spinner
    pub fn notify(&self, line: &str) {
        match self.active_spinner() {
            Some(spinner) => spinner.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }

    fn active_spinner(&self) -> Option<ProgressBar> {
        self.active.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_active(&self, spinner: Option<ProgressBar>) {
        *self.active.lock().unwrap_or_else(|e| e.into_inner()) = spinner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spinner_passes_result_through() {
        let progress = Progress::new();
        let value = progress.spin("Working...", async { 42 }).await;
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_notify_suspends_running_spinner() {
        let progress = Progress::new();
        let handle = progress.clone();

        let seen = progress
            .spin("Working...", async {
                let running = handle.active_spinner().is_some();
                handle.notify("Signed out.");
                running
            })
            .await;

        assert!(seen);
        assert!(progress.active_spinner().is_none());
        progress.notify("after the spinner");
    }
}
