use std::io;
use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::error::UrlError;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::signal::{Identify, OpCode, Signal, SignalFrame};
use super::uri::{self, Transport};
use crate::error::HandshakeError;

/// Byte stream a session runs over, whatever the transport family.
pub trait Io: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> Io for T {}

pub type WsStream = WebSocketStream<MaybeTlsStream<Box<dyn Io>>>;
pub type WsReader = SplitStream<WsStream>;
/// Write half, shared by the heartbeat keeper and the close path.
pub type WsWriter = Arc<Mutex<SplitSink<WsStream, Message>>>;

/// The account a session is bound to, taken from the first READY login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub platform: String,
    pub self_id: String,
}

/// One live, handshaken connection.
pub struct Session {
    identity: Identity,
    reader: WsReader,
    writer: WsWriter,
}

impl Session {
    /// Dial `address`, send IDENTIFY and wait for READY.
    ///
    /// The connection is closed again if any step after the dial fails.
    pub async fn connect(address: &str, token: &str) -> Result<Self, HandshakeError> {
        let (transport, target) = uri::resolve(address);
        let mut ws = dial(&transport, &target).await?;

        match identify(&mut ws, token).await {
            Ok(identity) => {
                let (sink, reader) = ws.split();
                Ok(Self {
                    identity,
                    reader,
                    writer: Arc::new(Mutex::new(sink)),
                })
            }
            Err(e) => {
                let _ = ws.close(None).await;
                Err(e)
            }
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn writer(&self) -> WsWriter {
        Arc::clone(&self.writer)
    }

    /// Wait for the next transport message.
    pub async fn next_message(&mut self) -> Option<Result<Message, tungstenite::Error>> {
        self.reader.next().await
    }

    /// Best-effort close. Errors are ignored since the session is being
    /// discarded anyway.
    pub async fn close(self) {
        let mut sink = self.writer.lock().await;
        let _ = sink.close().await;
    }
}

/// Open a WebSocket to `target` over the given transport family.
pub async fn dial(transport: &Transport, target: &str) -> Result<WsStream, HandshakeError> {
    let request = target.into_client_request()?;

    let io: Box<dyn Io> = match transport {
        Transport::Tcp | Transport::Tcp4 | Transport::Tcp6 => {
            let uri = request.uri();
            let host = uri
                .host()
                .ok_or(tungstenite::Error::Url(UrlError::NoHostName))?
                .trim_start_matches('[')
                .trim_end_matches(']')
                .to_string();
            let port = uri.port_u16().unwrap_or(match uri.scheme_str() {
                Some("wss") => 443,
                _ => 80,
            });
            let stream = match transport {
                Transport::Tcp4 => connect_family(&host, port, true).await?,
                Transport::Tcp6 => connect_family(&host, port, false).await?,
                _ => TcpStream::connect((host.as_str(), port)).await?,
            };
            let _ = stream.set_nodelay(true);
            Box::new(stream)
        }
        #[cfg(unix)]
        Transport::Unix => {
            let path = uri::socket_path_from_target(target);
            Box::new(tokio::net::UnixStream::connect(path).await?)
        }
        #[cfg(not(unix))]
        Transport::Unix => return Err(unsupported(transport)),
        Transport::Other(_) => return Err(unsupported(transport)),
    };

    let (ws, _) = tokio_tungstenite::client_async_tls(request, io).await?;
    Ok(ws)
}

fn unsupported(transport: &Transport) -> HandshakeError {
    HandshakeError::Dial(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("unsupported transport: {transport}"),
    ))
}

/// Connect to the first resolved address of the wanted IP family.
async fn connect_family(host: &str, port: u16, ipv4: bool) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in tokio::net::lookup_host((host, port)).await? {
        if addr.is_ipv4() != ipv4 {
            continue;
        }
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("no {} address for {host}", if ipv4 { "ipv4" } else { "ipv6" }),
        )
    }))
}

/// Send IDENTIFY as the first frame and read the READY reply.
async fn identify(ws: &mut WsStream, token: &str) -> Result<Identity, HandshakeError> {
    let identify = Signal::Identify(Identify {
        token: token.to_string(),
    });
    let identify = identify.encode().map_err(HandshakeError::Encode)?;
    ws.send(Message::Text(identify.into())).await?;

    let text = loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => break text,
            // Control frames are answered by tungstenite itself.
            Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
            Some(Ok(Message::Close(_))) | None => return Err(HandshakeError::Closed),
            Some(Ok(Message::Binary(_))) => return Err(HandshakeError::UnexpectedFrame),
            Some(Err(e)) => return Err(e.into()),
        }
    };

    let frame = SignalFrame::parse(&text)?;
    let op = frame.op()?;
    if op != OpCode::Ready {
        return Err(HandshakeError::NotReady(op));
    }
    let Signal::Ready(ready) = frame.decode()? else {
        return Err(HandshakeError::NotReady(op));
    };
    let login = ready.logins.into_iter().next().ok_or(HandshakeError::NoLogins)?;

    Ok(Identity {
        platform: login.platform,
        self_id: login.self_id,
    })
}
