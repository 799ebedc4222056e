//! Command execution context
//!
//! Loads config, opens the session file and builds the API client so
//! command handlers start from a ready state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use log::{debug, warn};

use crate::auth::AuthClient;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::AdminClient;
use crate::config::Config;
use crate::error::Result;
use crate::output::progress::Progress;
use crate::session::Session;
use crate::storage::{DetachedStorage, FileStorage, Storage};

/// Context for command execution.
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists)
    pub config: Config,
    /// API client bound to the session
    pub client: Arc<AdminClient>,
    /// Sign-in facade and route guard
    pub auth: AuthClient,
    /// Resolved output format
    pub format: OutputFormat,
    /// Spinner for network waits
    pub progress: Progress,
}

impl CommandContext {
    /// Context for a privileged command.
    ///
    /// Fails with `NotSignedIn` before any request is made when there is no
    /// privileged session.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let ctx = Self::unguarded(opts)?;
        ctx.auth.require_session()?;
        Ok(ctx)
    }

    /// Context without the route guard, for sign-in itself.
    pub fn unguarded(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default_at(opts.config_ref())?;
        let api_url = config.api_url(opts.api_url_ref())?;
        let format = opts.resolve_format(&config);
        let session = open_session(opts);
        let progress = Progress::new();
        let notices = progress.clone();

        let client = AdminClient::new(
            api_url,
            session.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?
        .on_session_expired(move || {
            notices.notify(&format!(
                "{} Signed out. Run {} to start a new session.",
                "⚠".yellow(),
                "actctl login".cyan()
            ));
        });
        debug!("Using API at {}", client.base_url());

        Ok(Self {
            config,
            client: Arc::new(client),
            auth: AuthClient::new(session),
            format,
            progress,
        })
    }
}

/// Path of the session file for the active config
pub fn session_path(opts: &GlobalOptions) -> Option<PathBuf> {
    Config::resolve_path(opts.config_ref())
        .ok()
        .map(|path| Config::session_path(&path))
}

/// Open the persistent session, or a detached one when no home is available.
pub fn open_session(opts: &GlobalOptions) -> Session {
    let storage: Arc<dyn Storage> = match session_path(opts) {
        Some(path) => Arc::new(FileStorage::open(path)),
        None => {
            warn!("No home directory; the session will not be saved");
            Arc::new(DetachedStorage)
        }
    };
    Session::new(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ConfigError, Error};
    use crate::session::{ROLE_KEY, TOKEN_KEY};
    use tempfile::tempdir;

    fn opts_in(dir: &std::path::Path, api_url: Option<&str>) -> GlobalOptions {
        GlobalOptions {
            config: Some(dir.join("config.yaml").to_string_lossy().into_owned()),
            api_url: api_url.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_session_lives_beside_config() {
        let dir = tempdir().unwrap();
        let opts = opts_in(dir.path(), None);
        assert_eq!(session_path(&opts), Some(dir.path().join("session.json")));
    }

    #[test]
    fn test_missing_api_url() {
        let dir = tempdir().unwrap();
        let err = CommandContext::unguarded(&opts_in(dir.path(), None))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Config(ConfigError::MissingApiUrl)));
    }

    #[test]
    fn test_guard_rejects_without_session() {
        let dir = tempdir().unwrap();
        let err = CommandContext::new(&opts_in(dir.path(), Some("http://localhost:9")))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Api(ApiError::NotSignedIn)));
    }

    #[test]
    fn test_guard_accepts_stored_session() {
        let dir = tempdir().unwrap();
        let opts = opts_in(dir.path(), Some("http://localhost:9"));

        let storage = FileStorage::open(dir.path().join("session.json"));
        storage.set(ROLE_KEY, "superadmin").unwrap();
        storage.set(TOKEN_KEY, "tok").unwrap();

        let ctx = CommandContext::new(&opts).unwrap();
        assert_eq!(ctx.format, OutputFormat::Table);
        assert_eq!(ctx.client.base_url(), "http://localhost:9");
    }
}
