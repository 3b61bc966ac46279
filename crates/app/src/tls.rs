//! TLS termination for the HTTP listener
//!
//! Serves HTTPS when the configured certificate and key load, plain HTTP
//! otherwise. Certificate problems never prevent startup.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{serve::Listener, Router};
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;
use tenantgate_common::TlsPaths;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_rustls::{server::TlsStream, TlsAcceptor};

/// Handshakes slower than this are dropped
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to parse certificates: {0}")]
    Certificate(String),

    #[error("failed to parse private key: {0}")]
    PrivateKey(String),

    #[error("server config error: {0}")]
    Config(#[from] rustls::Error),
}

fn read(path: &std::path::Path) -> Result<Vec<u8>, TlsError> {
    std::fs::read(path).map_err(|source| TlsError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Build a TLS acceptor from PEM certificate chain and key files
pub fn build_tls_acceptor(paths: &TlsPaths) -> Result<TlsAcceptor, TlsError> {
    let cert_pem = read(&paths.cert_path)?;
    let key_pem = read(&paths.key_path)?;

    let certs = CertificateDer::pem_slice_iter(&cert_pem)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TlsError::Certificate(e.to_string()))?;
    if certs.is_empty() {
        return Err(TlsError::Certificate("no certificates found".into()));
    }

    let key =
        PrivateKeyDer::from_pem_slice(&key_pem).map_err(|e| TlsError::PrivateKey(e.to_string()))?;

    let mut config =
        ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()?
            .with_no_client_auth()
            .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(TlsAcceptor::from(Arc::new(config)))
}

/// TLS acceptor if the certificate files exist and load; `None` means serve HTTP
pub fn load_tls_acceptor(paths: &TlsPaths) -> Option<TlsAcceptor> {
    if !paths.exist() {
        tracing::warn!(
            cert_path = %paths.cert_path.display(),
            key_path = %paths.key_path.display(),
            "TLS certificates not found, serving HTTP"
        );
        return None;
    }

    match build_tls_acceptor(paths) {
        Ok(acceptor) => Some(acceptor),
        Err(e) => {
            tracing::warn!(error = %e, "TLS setup failed, falling back to HTTP");
            None
        }
    }
}

/// Finished handshakes waiting for `accept`
const READY_BACKLOG: usize = 128;

/// TCP listener that yields connections whose TLS handshake has completed
///
/// Handshakes run in their own tasks, so a client that stalls mid-handshake
/// never holds up the clients behind it.
pub struct TlsListener {
    local_addr: SocketAddr,
    ready: mpsc::Receiver<(TlsStream<TcpStream>, SocketAddr)>,
    accept_task: JoinHandle<()>,
}

impl TlsListener {
    pub fn new(inner: TcpListener, acceptor: TlsAcceptor) -> io::Result<Self> {
        let local_addr = inner.local_addr()?;
        let (tx, ready) = mpsc::channel(READY_BACKLOG);
        let accept_task = tokio::spawn(accept_loop(inner, acceptor, tx));

        Ok(Self {
            local_addr,
            ready,
            accept_task,
        })
    }
}

async fn accept_loop(
    mut inner: TcpListener,
    acceptor: TlsAcceptor,
    tx: mpsc::Sender<(TlsStream<TcpStream>, SocketAddr)>,
) {
    while !tx.is_closed() {
        let (stream, addr) = Listener::accept(&mut inner).await;
        let acceptor = acceptor.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            match tokio::time::timeout(HANDSHAKE_TIMEOUT, acceptor.accept(stream)).await {
                Ok(Ok(tls_stream)) => {
                    // Receiver gone means the server is shutting down
                    let _ = tx.send((tls_stream, addr)).await;
                }
                Ok(Err(e)) => tracing::debug!(peer = %addr, error = %e, "TLS handshake failed"),
                Err(_) => tracing::debug!(peer = %addr, "TLS handshake timed out"),
            }
        });
    }
}

impl Drop for TlsListener {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

impl Listener for TlsListener {
    type Io = TlsStream<TcpStream>;
    type Addr = SocketAddr;

    async fn accept(&mut self) -> (Self::Io, Self::Addr) {
        match self.ready.recv().await {
            Some(connection) => connection,
            // The accept loop only ends once the listener is dropped
            None => std::future::pending().await,
        }
    }

    fn local_addr(&self) -> io::Result<Self::Addr> {
        Ok(self.local_addr)
    }
}

/// Bind `addr` and serve `app` until `shutdown` resolves
pub async fn serve<F>(app: Router, addr: SocketAddr, tls: &TlsPaths, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;

    match load_tls_acceptor(tls) {
        Some(acceptor) => {
            tracing::info!("Server listening on https://{}", addr);
            axum::serve(TlsListener::new(listener, acceptor)?, app)
                .with_graceful_shutdown(shutdown)
                .await
        }
        None => {
            tracing::info!("Server listening on http://{}", addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
        }
    }
}
