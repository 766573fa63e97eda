//! Launcher web API port definition.

use async_trait::async_trait;

use crate::domain::entities::{BuildTarget, ServerInfo, SignedIn, UpdateInfo};
use crate::domain::errors::TaskError;

/// Port for the account and server listing service.
#[async_trait]
pub trait LauncherApiPort: Send + Sync {
    /// Fetches the anti-forgery token required before signing in.
    async fn fetch_token(&self) -> Result<String, TaskError>;

    /// Signs in with credentials and the previously fetched token.
    async fn sign_in(
        &self,
        username: &str,
        password: &str,
        token: &str,
    ) -> Result<SignedIn, TaskError>;

    /// Fetches the public server list for the signed-in account.
    async fn fetch_servers(&self) -> Result<Vec<ServerInfo>, TaskError>;

    /// Checks for newer game builds.
    async fn check_update(&self) -> Result<UpdateInfo, TaskError>;

    /// Downloads a game build.
    async fn fetch_update(&self, target: BuildTarget) -> Result<Vec<u8>, TaskError>;

    /// Downloads an arbitrary resource file.
    async fn download(&self, url: &str) -> Result<Vec<u8>, TaskError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock launcher API answering every call immediately.
    pub struct MockLauncherApi {
        token: Mutex<Result<String, TaskError>>,
        sign_in: Mutex<Result<SignedIn, TaskError>>,
        servers: Mutex<Result<Vec<ServerInfo>, TaskError>>,
        update: Mutex<Result<UpdateInfo, TaskError>>,
        sign_in_calls: AtomicUsize,
        download_calls: AtomicUsize,
    }

    impl MockLauncherApi {
        /// Creates mock where every call succeeds.
        pub fn new() -> Self {
            Self {
                token: Mutex::new(Ok("token".to_string())),
                sign_in: Mutex::new(Ok(SignedIn {
                    username: "Alice".to_string(),
                })),
                servers: Mutex::new(Ok(vec![sample_server()])),
                update: Mutex::new(Ok(UpdateInfo::default())),
                sign_in_calls: AtomicUsize::new(0),
                download_calls: AtomicUsize::new(0),
            }
        }

        /// Makes sign-in answer with the given result.
        pub fn set_sign_in(&self, result: Result<SignedIn, TaskError>) {
            *self.sign_in.lock().unwrap() = result;
        }

        /// Makes the server fetch answer with the given result.
        pub fn set_servers(&self, result: Result<Vec<ServerInfo>, TaskError>) {
            *self.servers.lock().unwrap() = result;
        }

        /// Makes the update check answer with the given result.
        pub fn set_update(&self, result: Result<UpdateInfo, TaskError>) {
            *self.update.lock().unwrap() = result;
        }

        /// Returns how many sign-in calls were made.
        pub fn sign_in_calls(&self) -> usize {
            self.sign_in_calls.load(Ordering::SeqCst)
        }

        /// Returns how many downloads were made.
        pub fn download_calls(&self) -> usize {
            self.download_calls.load(Ordering::SeqCst)
        }
    }

    impl Default for MockLauncherApi {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Server used by mocks and screen tests.
    pub fn sample_server() -> ServerInfo {
        ServerInfo {
            hash: "0123abcd".to_string(),
            name: "Freebuild".to_string(),
            players: 3,
            max_players: 64,
            software: "MCGalaxy".to_string(),
            uptime: 3600,
            featured: true,
            ip: "10.0.0.1".to_string(),
            port: 25565,
            mppass: "pass".to_string(),
        }
    }

    #[async_trait]
    impl LauncherApiPort for MockLauncherApi {
        async fn fetch_token(&self) -> Result<String, TaskError> {
            self.token.lock().unwrap().clone()
        }

        async fn sign_in(
            &self,
            _username: &str,
            _password: &str,
            _token: &str,
        ) -> Result<SignedIn, TaskError> {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            self.sign_in.lock().unwrap().clone()
        }

        async fn fetch_servers(&self) -> Result<Vec<ServerInfo>, TaskError> {
            self.servers.lock().unwrap().clone()
        }

        async fn check_update(&self) -> Result<UpdateInfo, TaskError> {
            self.update.lock().unwrap().clone()
        }

        async fn fetch_update(&self, _target: BuildTarget) -> Result<Vec<u8>, TaskError> {
            Ok(b"build".to_vec())
        }

        async fn download(&self, _url: &str) -> Result<Vec<u8>, TaskError> {
            self.download_calls.fetch_add(1, Ordering::SeqCst);
            Ok(b"data".to_vec())
        }
    }
}
