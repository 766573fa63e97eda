//! HTTP client for classicube.net and the build server.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{BuildsResponse, LoginResponse, ServerListResponse, TokenResponse};
use crate::domain::entities::{BuildChannel, BuildFlavor, BuildTarget, ServerInfo, SignedIn, UpdateInfo};
use crate::domain::errors::TaskError;
use crate::domain::ports::LauncherApiPort;

const USER_AGENT: &str = concat!("cubelaunch/", env!("CARGO_PKG_VERSION"));

/// Account service and build download client.
///
/// Keeps a cookie store so the session cookie from signing in is sent with
/// the server list request.
pub struct ClassiCubeClient {
    client: Client,
    base_url: String,
    update_base_url: String,
}

impl ClassiCubeClient {
    /// Creates client for the given service URLs.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        base_url: impl Into<String>,
        update_base_url: impl Into<String>,
    ) -> Result<Self, TaskError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| TaskError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: trim_slash(base_url.into()),
            update_base_url: trim_slash(update_base_url.into()),
        })
    }

    async fn get(&self, url: &str) -> Result<Response, TaskError> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await.map_err(map_transport)?;
        check_status(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TaskError> {
        self.get(url).await?.json().await.map_err(|e| {
            warn!(url, error = %e, "Failed to parse response");
            TaskError::transport(format!("failed to parse response: {e}"))
        })
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TaskError> {
        let bytes = self.get(url).await?.bytes().await.map_err(map_transport)?;
        Ok(bytes.to_vec())
    }
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn map_transport(e: reqwest::Error) -> TaskError {
    warn!(error = %e, "Request failed");
    if e.is_timeout() {
        TaskError::transport("request timed out")
    } else if e.is_connect() {
        TaskError::transport("failed to connect")
    } else {
        TaskError::transport(e.to_string())
    }
}

fn check_status(response: Response) -> Result<Response, TaskError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(status = status.as_u16(), url = %response.url(), "Unexpected status");
        Err(TaskError::status(status.as_u16()))
    }
}

/// Path of a build relative to its channel directory.
#[must_use]
pub fn build_file(flavor: BuildFlavor) -> &'static str {
    match flavor {
        BuildFlavor::Direct3D9 => "win64/ClassiCube.exe",
        BuildFlavor::OpenGl if cfg!(windows) => "win64/ClassiCube.opengl.exe",
        BuildFlavor::OpenGl if cfg!(target_os = "macos") => "osx64/ClassiCube",
        BuildFlavor::OpenGl => "linux64/ClassiCube",
    }
}

#[async_trait]
impl LauncherApiPort for ClassiCubeClient {
    async fn fetch_token(&self) -> Result<String, TaskError> {
        let url = format!("{}/api/login/", self.base_url);
        let response: TokenResponse = self.get_json(&url).await?;
        Ok(response.token)
    }

    async fn sign_in(
        &self,
        username: &str,
        password: &str,
        token: &str,
    ) -> Result<SignedIn, TaskError> {
        let url = format!("{}/api/login/", self.base_url);
        debug!(user = username, "POST login");

        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password), ("token", token)])
            .send()
            .await
            .map_err(map_transport)?;
        let login: LoginResponse = check_status(response)?
            .json()
            .await
            .map_err(|e| TaskError::transport(format!("failed to parse response: {e}")))?;

        login.into_result()
    }

    async fn fetch_servers(&self) -> Result<Vec<ServerInfo>, TaskError> {
        let url = format!("{}/api/servers/", self.base_url);
        let response: ServerListResponse = self.get_json(&url).await?;
        Ok(response.servers.into_iter().map(ServerInfo::from).collect())
    }

    async fn check_update(&self) -> Result<UpdateInfo, TaskError> {
        let url = format!("{}/builds.json", self.update_base_url);
        let builds: BuildsResponse = self.get_json(&url).await?;
        Ok(builds.into())
    }

    async fn fetch_update(&self, target: BuildTarget) -> Result<Vec<u8>, TaskError> {
        let channel = match target.channel {
            BuildChannel::Release => "release",
            BuildChannel::Dev => "latest",
        };
        let url = format!(
            "{}/{channel}/{}",
            self.update_base_url,
            build_file(target.flavor)
        );
        self.get_bytes(&url).await
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, TaskError> {
        self.get_bytes(url).await
    }
}
