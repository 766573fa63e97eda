//! Registry of the launcher's named background operations.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::web_task::{Progress, WebTask};
use crate::domain::entities::{BuildTarget, ResourceFile, ServerInfo, SignedIn, UpdateInfo};
use crate::domain::errors::TaskError;
use crate::domain::ports::LauncherApiPort;

/// Every long-running operation the launcher can have in flight.
///
/// Owned by the launcher context rather than any screen, so a result that
/// arrives after its screen was replaced is still visible to the next one.
pub struct LauncherTasks {
    api: Arc<dyn LauncherApiPort>,
    /// Anti-forgery token needed before signing in.
    pub get_token: WebTask<String>,
    /// Account sign-in.
    pub sign_in: WebTask<SignedIn>,
    /// Public server list.
    pub fetch_servers: WebTask<Vec<ServerInfo>>,
    /// Latest build timestamps.
    pub check_update: WebTask<UpdateInfo>,
    /// Downloaded game build, written to disk.
    pub fetch_update: WebTask<PathBuf>,
    /// Resource download; yields the number of files written.
    pub fetch_resources: WebTask<usize>,
}

impl LauncherTasks {
    /// Creates idle tasks backed by the given API.
    #[must_use]
    pub fn new(api: Arc<dyn LauncherApiPort>) -> Self {
        Self {
            api,
            get_token: WebTask::new("get_token"),
            sign_in: WebTask::new("sign_in"),
            fetch_servers: WebTask::new("fetch_servers"),
            check_update: WebTask::new("check_update"),
            fetch_update: WebTask::new("fetch_update"),
            fetch_resources: WebTask::new("fetch_resources"),
        }
    }

    /// Fetches the sign-in token.
    pub fn run_get_token(&mut self) {
        let api = Arc::clone(&self.api);
        self.get_token
            .run(async move { api.fetch_token().await });
    }

    /// Signs in using the token from the last successful token fetch.
    pub fn run_sign_in(&mut self, username: &str, password: &str) {
        let api = Arc::clone(&self.api);
        let token = self.get_token.value().cloned().unwrap_or_default();
        let username = username.to_owned();
        let password = zeroize::Zeroizing::new(password.to_owned());

        info!(user = %username, "Signing in");
        self.sign_in
            .run(async move { api.sign_in(&username, &password, &token).await });
    }

    /// Fetches the server list.
    pub fn run_fetch_servers(&mut self) {
        let api = Arc::clone(&self.api);
        self.fetch_servers
            .run(async move { api.fetch_servers().await });
    }

    /// Checks for newer builds.
    pub fn run_check_update(&mut self) {
        let api = Arc::clone(&self.api);
        self.check_update
            .run(async move { api.check_update().await });
    }

    /// Downloads a build and writes it to `dest`.
    pub fn run_fetch_update(&mut self, target: BuildTarget, dest: PathBuf) {
        let api = Arc::clone(&self.api);
        info!(?target, path = %dest.display(), "Fetching update");
        self.fetch_update.run(async move {
            let data = api.fetch_update(target).await?;
            write_file(&dest, &data).await?;
            Ok(dest)
        });
    }

    /// Downloads resource files into `root`, reporting per-file progress.
    pub fn run_fetch_resources(&mut self, files: Vec<ResourceFile>, root: PathBuf) {
        let api = Arc::clone(&self.api);
        info!(count = files.len(), root = %root.display(), "Fetching resources");
        self.fetch_resources.run_with_progress(move |reporter| async move {
            let total = files.len();
            for (index, file) in files.iter().enumerate() {
                reporter.report(Progress {
                    item: file.name().to_string(),
                    index,
                    total,
                    percent: Some(percent_of(index, total)),
                });
                let data = api.download(&file.url).await?;
                write_file(&root.join(&file.path), &data).await?;
            }
            Ok(total)
        });
    }

    /// Returns the servers from the last successful fetch.
    #[must_use]
    pub fn servers(&self) -> &[ServerInfo] {
        self.fetch_servers.value().map_or(&[], Vec::as_slice)
    }

    /// Finds a fetched server by hash.
    #[must_use]
    pub fn server_by_hash(&self, hash: &str) -> Option<&ServerInfo> {
        self.servers().iter().find(|s| s.hash == hash)
    }
}

impl std::fmt::Debug for LauncherTasks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LauncherTasks")
            .field("get_token", &self.get_token)
            .field("sign_in", &self.sign_in)
            .field("fetch_servers", &self.fetch_servers)
            .field("check_update", &self.check_update)
            .field("fetch_update", &self.fetch_update)
            .field("fetch_resources", &self.fetch_resources)
            .finish_non_exhaustive()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn percent_of(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (index * 100 / total).min(100) as u8
}

async fn write_file(path: &std::path::Path, data: &[u8]) -> Result<(), TaskError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, data).await?;
    Ok(())
}
