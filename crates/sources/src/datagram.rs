//! Temperature datagram listener.
//!
//! A bridge process on the same machine sends one small UDP datagram per
//! reading, formatted `"<code>:<celsius>"`. The code picks the channel.

use log::{debug, error, info, trace, warn};
use sensor_panel_core::{celsius_to_fahrenheit, ChannelId, Registry, RegistryError};
use sensor_panel_types::{DatagramConfig, RestartPolicy, Unit, MAX_FRAME_LEN};
use std::collections::BTreeMap;
use std::io;
use std::time::Duration;
use tokio::net::UdpSocket;

use crate::error::{ParseError, SourceError};
use crate::shutdown::ShutdownToken;

/// A decoded datagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub code: u8,
    pub celsius: f64,
}

pub fn parse_frame(raw: &[u8]) -> Result<Frame, ParseError> {
    let text = std::str::from_utf8(raw).map_err(|_| ParseError::NotUtf8)?;
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    let (code, value) = text
        .split_once(':')
        .ok_or_else(|| ParseError::BadFrame(text.to_string()))?;
    let code = code
        .trim()
        .parse::<u8>()
        .map_err(|_| ParseError::BadIndex(code.to_string()))?;
    let value = value.trim();
    let celsius = value
        .parse::<f64>()
        .map_err(|_| ParseError::BadNumber(value.to_string()))?;
    Ok(Frame { code, celsius })
}

const WSAEMSGSIZE: i32 = 10040;
const WSAECONNRESET: i32 = 10054;

/// Errors that concern a single datagram and leave the socket usable.
///
/// Windows reports an oversized datagram as `WSAEMSGSIZE` and an ICMP port
/// unreachable from an earlier send as `WSAECONNRESET`.
fn is_per_datagram_error(e: &io::Error) -> bool {
    matches!(e.raw_os_error(), Some(WSAEMSGSIZE | WSAECONNRESET))
        || e.kind() == io::ErrorKind::ConnectionReset
}

/// Exponential restart delay
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Option<Duration>,
}

impl Backoff {
    pub fn new(policy: &RestartPolicy) -> Self {
        let initial = Duration::from_millis(policy.initial_backoff_ms);
        Self {
            initial,
            max: Duration::from_millis(policy.max_backoff_ms).max(initial),
            current: None,
        }
    }

    /// Delay before the next restart; doubles each call up to the cap
    pub fn next_delay(&mut self) -> Duration {
        let next = match self.current {
            None => self.initial,
            Some(d) => (d * 2).min(self.max),
        };
        self.current = Some(next);
        next
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[derive(Debug, Clone, Copy)]
struct Target {
    channel: ChannelId,
    unit: Unit,
}

pub struct DatagramAdapter {
    config: DatagramConfig,
    targets: BTreeMap<u8, Target>,
}

impl DatagramAdapter {
    pub fn new(config: DatagramConfig, registry: &Registry) -> Result<Self, RegistryError> {
        let mut targets = BTreeMap::new();
        for (code, name) in &config.codes {
            let channel = registry.require(name)?;
            let unit = registry.spec(channel).unit;
            targets.insert(*code, Target { channel, unit });
        }
        Ok(Self { config, targets })
    }

    /// Decode one datagram and store it. Returns whether a channel was set.
    pub fn apply_frame(&self, raw: &[u8], registry: &Registry) -> bool {
        let frame = match parse_frame(raw) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Dropping datagram '{}': {}", String::from_utf8_lossy(raw), e);
                return false;
            }
        };

        let Some(target) = self.targets.get(&frame.code) else {
            warn!(
                "Unknown datagram code {} in '{}'",
                frame.code,
                String::from_utf8_lossy(raw)
            );
            return false;
        };

        let value = match target.unit {
            Unit::Fahrenheit => celsius_to_fahrenheit(frame.celsius),
            _ => frame.celsius,
        };
        trace!("Datagram code {} -> {}", frame.code, value);
        registry.set(target.channel, value);
        true
    }

    pub async fn bind(&self) -> Result<UdpSocket, SourceError> {
        let address = self.config.socket_address();
        let socket = UdpSocket::bind(&address)
            .await
            .map_err(|source| SourceError::Socket {
                address: address.clone(),
                source,
            })?;
        info!("Listening for temperature datagrams on {}", address);
        Ok(socket)
    }

    /// Receive until shutdown (`Ok`) or a socket error (`Err`)
    pub async fn receive_loop(
        &self,
        socket: &UdpSocket,
        registry: &Registry,
        shutdown: &mut ShutdownToken,
        backoff: &mut Backoff,
    ) -> Result<(), SourceError> {
        let mut buf = [0u8; MAX_FRAME_LEN];
        loop {
            tokio::select! {
                received = socket.recv_from(&mut buf) => {
                    let (len, peer) = match received {
                        Ok(received) => received,
                        Err(e) if is_per_datagram_error(&e) => {
                            warn!("Dropping datagram: {}", e);
                            continue;
                        }
                        Err(source) => {
                            return Err(SourceError::Socket {
                                address: self.config.socket_address(),
                                source,
                            })
                        }
                    };
                    trace!("{} bytes from {}", len, peer);
                    if self.apply_frame(&buf[..len], registry) {
                        backoff.reset();
                    }
                }
                _ = shutdown.cancelled() => return Ok(()),
            }
        }
    }

    /// Listen until shutdown, re-binding after failures when restarts are
    /// enabled.
    pub async fn run(self, registry: &Registry, mut shutdown: ShutdownToken) {
        let mut backoff = Backoff::new(&self.config.restart);

        loop {
            let result = match self.bind().await {
                Ok(socket) => {
                    self.receive_loop(&socket, registry, &mut shutdown, &mut backoff)
                        .await
                }
                Err(e) => Err(e),
            };

            let e = match result {
                Ok(()) => break,
                Err(e) => e,
            };

            if !self.config.restart.enabled {
                error!("Datagram listener stopped: {}", e);
                return;
            }

            let delay = backoff.next_delay();
            error!("Datagram listener failed: {}; restarting in {:?}", e, delay);
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.cancelled() => break,
            }
        }

        debug!("Datagram listener shut down");
    }
}
