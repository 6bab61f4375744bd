//! TCP transport: role-specific startup, a dedicated receive task and
//! fire-and-forget sends of the line protocol.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch, Mutex};

use crate::config::{NetConfig, HOST_BIND_ADDR};
use crate::core::{Role, ShotResult};
use crate::protocol::Message;
use crate::transport::NetEvent;

/// Longest line accepted. A longer line is skipped up to and including its
/// newline.
const MAX_LINE_LEN: u64 = 1024;

/// One session's connection to the peer.
///
/// Cheap to clone: clones share the socket, so `start` can run in a spawned
/// task while the owner keeps sending and closing.
#[derive(Clone)]
pub struct NetworkManager {
    inner: Arc<Inner>,
}

struct Inner {
    config: NetConfig,
    writer: Mutex<Option<OwnedWriteHalf>>,
    events: mpsc::UnboundedSender<NetEvent>,
    cancel: watch::Sender<bool>,
    started: AtomicBool,
    closing: AtomicBool,
    disconnected_raised: AtomicBool,
}

impl NetworkManager {
    /// Create an idle transport and the receiver of its events.
    pub fn new(config: NetConfig) -> (Self, mpsc::UnboundedReceiver<NetEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let (cancel, _) = watch::channel(false);
        let inner = Inner {
            config,
            writer: Mutex::new(None),
            events,
            cancel,
            started: AtomicBool::new(false),
            closing: AtomicBool::new(false),
            disconnected_raised: AtomicBool::new(false),
        };
        (
            Self {
                inner: Arc::new(inner),
            },
            rx,
        )
    }

    pub fn role(&self) -> Role {
        self.inner.config.role
    }

    pub fn config(&self) -> &NetConfig {
        &self.inner.config
    }

    /// Open the connection: accept one peer as host, or connect once as
    /// client. Blocks until the connection is open or has failed, so callers
    /// usually spawn it.
    ///
    /// Success posts `Connected` and starts the receive task. Failure posts
    /// `Disconnected` without `Connected`; there is no retry.
    pub async fn start(&self) {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            warn!("[NetworkManager] start called twice; ignoring");
            return;
        }

        let mut cancel = self.inner.cancel.subscribe();
        let opened = tokio::select! {
            res = self.open() => res,
            _ = cancelled(&mut cancel) => {
                info!("[NetworkManager] connection attempt cancelled");
                self.finish().await;
                return;
            }
        };
        let stream = match opened {
            Ok(stream) => stream,
            Err(e) => {
                warn!("[NetworkManager] connection failed: {}", e);
                self.finish().await;
                return;
            }
        };

        let (read, write) = stream.into_split();
        {
            let mut writer = self.inner.writer.lock().await;
            if self.is_closing() {
                drop(writer);
                self.finish().await;
                return;
            }
            *writer = Some(write);
        }

        self.emit(NetEvent::Connected);
        let this = self.clone();
        tokio::spawn(async move { this.receive_loop(read).await });
    }

    async fn open(&self) -> std::io::Result<TcpStream> {
        let config = &self.inner.config;
        match config.role {
            Role::Host => {
                let listener = TcpListener::bind((HOST_BIND_ADDR, config.port)).await?;
                let addr = listener.local_addr()?;
                info!("[NetworkManager] listening on {}", addr);
                self.emit(NetEvent::Listening(addr));
                // the listener is dropped after this single accept
                let (stream, peer) = listener.accept().await?;
                info!("[NetworkManager] peer connected from {}", peer);
                Ok(stream)
            }
            Role::Client => {
                let stream = TcpStream::connect((config.remote.as_str(), config.port)).await?;
                info!(
                    "[NetworkManager] connected to {}:{}",
                    config.remote, config.port
                );
                Ok(stream)
            }
        }
    }

    async fn receive_loop(self, read: OwnedReadHalf) {
        let mut cancel = self.inner.cancel.subscribe();
        let mut reader = BufReader::new(read);
        let mut buf: Vec<u8> = Vec::new();
        // set while the rest of an oversized line is being skipped
        let mut discarding = false;

        while !self.is_closing() {
            buf.clear();
            let mut limited = (&mut reader).take(MAX_LINE_LEN);
            let read = tokio::select! {
                _ = cancelled(&mut cancel) => break,
                read = limited.read_until(b'\n', &mut buf) => read,
            };
            match read {
                Ok(0) => {
                    info!("[NetworkManager] peer closed the connection");
                    break;
                }
                Ok(_) => {
                    let complete = buf.last() == Some(&b'\n');
                    if discarding {
                        discarding = !complete;
                        continue;
                    }
                    if !complete && buf.len() as u64 >= MAX_LINE_LEN {
                        debug!("[NetworkManager] discarding line longer than {} bytes", MAX_LINE_LEN);
                        discarding = true;
                        continue;
                    }
                    let line = String::from_utf8_lossy(&buf);
                    if !self.dispatch(&line) {
                        break;
                    }
                }
                Err(e) => {
                    debug!("[NetworkManager] read failed: {}", e);
                    break;
                }
            }
        }

        self.finish().await;
    }

    /// Post the event for one inbound line. Returns `false` when the peer
    /// asked to close.
    fn dispatch(&self, line: &str) -> bool {
        match line.parse::<Message>() {
            Ok(Message::Shot { x, y }) => self.emit(NetEvent::ShotReceived { x, y }),
            Ok(Message::Result(res)) => self.emit(NetEvent::ResultReceived(res)),
            Ok(Message::Destroyed { length }) => self.emit(NetEvent::ShipDestroyed { length }),
            Ok(Message::Reset) => self.emit(NetEvent::ResetReceived),
            Ok(Message::Close) => {
                info!("[NetworkManager] peer closed the session");
                return false;
            }
            Err(e) => debug!("[NetworkManager] discarding line {:?}: {}", line.trim_end(), e),
        }
        true
    }

    /// Fire at the peer's (x, y).
    pub async fn send_shot(&self, x: u8, y: u8) {
        self.send(Message::Shot { x, y }).await;
    }

    /// Report the outcome of the peer's last shot.
    pub async fn send_result(&self, result: ShotResult) {
        self.send(Message::Result(result)).await;
    }

    /// Tell the peer its last shot sank a ship of `length`.
    pub async fn send_ship_destroyed(&self, length: u8) {
        self.send(Message::Destroyed { length }).await;
    }

    /// Ask the peer for another round.
    pub async fn send_reset(&self) {
        self.send(Message::Reset).await;
    }

    /// Write one line. Failures are swallowed; the receive task notices a
    /// severed connection on its own.
    async fn send(&self, msg: Message) {
        let mut writer = self.inner.writer.lock().await;
        let Some(stream) = writer.as_mut() else {
            debug!("[NetworkManager] not connected; dropping {}", msg);
            return;
        };
        let line = format!("{}\n", msg);
        if let Err(e) = stream.write_all(line.as_bytes()).await {
            debug!("[NetworkManager] failed to send {}: {}", msg, e);
        }
    }

    /// End the session: tell the peer, stop the receive task and release the
    /// socket. Safe to call more than once and from any task.
    pub async fn close(&self) {
        if self.inner.closing.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("[NetworkManager] closing session");
        {
            let mut writer = self.inner.writer.lock().await;
            if let Some(stream) = writer.as_mut() {
                let line = format!("{}\n", Message::Close);
                let _ = stream.write_all(line.as_bytes()).await;
            }
        }
        self.inner.cancel.send_replace(true);
        self.finish().await;
    }

    fn is_closing(&self) -> bool {
        self.inner.closing.load(Ordering::SeqCst)
    }

    async fn finish(&self) {
        self.cleanup().await;
        self.raise_disconnected();
    }

    async fn cleanup(&self) {
        let writer = self.inner.writer.lock().await.take();
        if let Some(mut stream) = writer {
            if let Err(e) = stream.shutdown().await {
                debug!("[NetworkManager] shutdown failed: {}", e);
            }
        }
    }

    fn emit(&self, event: NetEvent) {
        if self.inner.disconnected_raised.load(Ordering::SeqCst) {
            return;
        }
        let _ = self.inner.events.send(event);
    }

    fn raise_disconnected(&self) {
        if self.inner.disconnected_raised.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("[NetworkManager] disconnected");
        let _ = self.inner.events.send(NetEvent::Disconnected);
    }
}

/// Resolves once cancellation has been requested.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
