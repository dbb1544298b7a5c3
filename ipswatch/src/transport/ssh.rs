//! SSH session to one sensor, built on russh.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use russh::client::{self, Handle};
use russh::keys::PublicKey;
use russh::keys::known_hosts::{
    check_known_hosts, check_known_hosts_path, learn_known_hosts, learn_known_hosts_path,
};
use secrecy::ExposeSecret;

use super::config::{HostKeyVerification, SshConfig};
use crate::channel::PtyChannel;
use crate::error::{ChannelError, Result, TransportError};

/// Authenticated SSH session.
pub struct SshTransport {
    session: Handle<HostKeyGuard>,
    config: SshConfig,
}

impl SshTransport {
    /// Connect to `config.host`, verify its key and log in with the password.
    pub async fn connect(config: SshConfig) -> Result<Self> {
        let rejected = Arc::new(Mutex::new(None));
        let guard = HostKeyGuard {
            host: config.host.clone(),
            port: config.port,
            mode: config.host_key_verification,
            known_hosts: config.known_hosts_path.clone(),
            rejected: rejected.clone(),
        };

        let client_config = Arc::new(client::Config {
            inactivity_timeout: Some(config.timeout),
            ..Default::default()
        });

        debug!("connecting to {}", config.socket_addr());

        let connecting = client::connect(client_config, (config.host.as_str(), config.port), guard);
        let session = match tokio::time::timeout(config.timeout, connecting).await {
            Err(_) => {
                return Err(TransportError::Timeout {
                    host: config.host.clone(),
                    timeout: config.timeout,
                }
                .into());
            }
            Ok(Err(e)) => return Err(connect_error(&config, e, &rejected).into()),
            Ok(Ok(session)) => session,
        };

        let mut transport = Self { session, config };
        transport.login().await?;
        Ok(transport)
    }

    async fn login(&mut self) -> Result<()> {
        let accepted = self
            .session
            .authenticate_password(&self.config.username, self.config.password.expose_secret())
            .await
            .map_err(TransportError::Ssh)?
            .success();

        if !accepted {
            return Err(TransportError::AuthenticationFailed {
                user: self.config.username.clone(),
                host: self.config.host.clone(),
            }
            .into());
        }

        debug!(
            "authenticated to {} as '{}'",
            self.config.host, self.config.username
        );
        Ok(())
    }

    /// Open a session channel with a vt100 PTY and an interactive shell.
    pub async fn open_shell(&self) -> Result<PtyChannel> {
        let channel = self
            .session
            .channel_open_session()
            .await
            .map_err(|_| ChannelError::PtyOpenFailed)?;

        channel
            .request_pty(
                true,
                "vt100",
                self.config.terminal_width,
                self.config.terminal_height,
                0,
                0,
                &[],
            )
            .await
            .map_err(ChannelError::Ssh)?;

        channel
            .request_shell(true)
            .await
            .map_err(|_| ChannelError::ShellRequestFailed)?;

        Ok(PtyChannel::new(channel))
    }

    /// The host this transport is connected to.
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Disconnect from the sensor.
    pub async fn close(self) -> Result<()> {
        self.session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }
}

/// Map a failed handshake to the most specific error available.
fn connect_error(
    config: &SshConfig,
    error: russh::Error,
    rejected: &Mutex<Option<TransportError>>,
) -> TransportError {
    // A rejected host key surfaces from russh as a bare UnknownKey
    if let Some(reason) = rejected.lock().ok().and_then(|mut slot| slot.take()) {
        return reason;
    }
    match error {
        russh::Error::IO(source) => TransportError::ConnectionFailed {
            host: config.host.clone(),
            port: config.port,
            source,
        },
        other => TransportError::Ssh(other),
    }
}

/// Client handler that applies the host key policy.
struct HostKeyGuard {
    host: String,
    port: u16,
    mode: HostKeyVerification,
    known_hosts: Option<PathBuf>,
    /// Why the last key was refused, for `connect` to report.
    rejected: Arc<Mutex<Option<TransportError>>>,
}

impl HostKeyGuard {
    /// Check `key` against known_hosts, learning it when the mode allows.
    fn verify(&self, key: &PublicKey) -> std::result::Result<(), TransportError> {
        let known = match &self.known_hosts {
            Some(path) => check_known_hosts_path(&self.host, self.port, key, path),
            None => check_known_hosts(&self.host, self.port, key),
        };

        match known {
            Ok(true) => Ok(()),
            Ok(false) if self.mode == HostKeyVerification::Strict => {
                Err(TransportError::HostKeyUnknown {
                    host: self.host.clone(),
                    port: self.port,
                })
            }
            Ok(false) => {
                self.learn(key);
                Ok(())
            }
            Err(russh::keys::Error::KeyChanged { line }) => Err(TransportError::HostKeyChanged {
                host: self.host.clone(),
                port: self.port,
                line,
            }),
            Err(e) => Err(TransportError::KnownHosts(e.to_string())),
        }
    }

    fn learn(&self, key: &PublicKey) {
        let saved = match &self.known_hosts {
            Some(path) => learn_known_hosts_path(&self.host, self.port, key, path),
            None => learn_known_hosts(&self.host, self.port, key),
        };
        match saved {
            Ok(()) => debug!("learned host key for {}", self.host),
            Err(e) => warn!("could not save host key for {}: {}", self.host, e),
        }
    }
}

impl client::Handler for HostKeyGuard {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        if self.mode == HostKeyVerification::Disabled {
            return Ok(true);
        }

        match self.verify(server_public_key) {
            Ok(()) => Ok(true),
            Err(reason) => {
                warn!("{}: host key rejected: {}", self.host, reason);
                if let Ok(mut slot) = self.rejected.lock() {
                    *slot = Some(reason);
                }
                Ok(false)
            }
        }
    }
}
