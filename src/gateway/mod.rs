pub mod heartbeat;
pub mod session;
pub mod signal;
pub mod uri;

use std::fmt;

use tokio_tungstenite::tungstenite::{self, protocol::CloseFrame, Message};

use crate::client::Client;
use crate::models::Event;
use heartbeat::HeartbeatKeeper;
use session::Session;
use signal::{OpCode, Signal, SignalFrame};

enum State {
    Connecting,
    Connected {
        session: Session,
        keeper: HeartbeatKeeper,
    },
}

/// Why a connected session was given up.
enum Disconnect {
    Error(tungstenite::Error),
    Closed(Option<CloseFrame>),
    EndOfStream,
}

impl fmt::Display for Disconnect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disconnect::Error(e) => write!(f, "{e}"),
            Disconnect::Closed(Some(frame)) => {
                write!(
                    f,
                    "closed by server ({} {})",
                    u16::from(frame.code),
                    frame.reason.as_str()
                )
            }
            Disconnect::Closed(None) => write!(f, "closed by server"),
            Disconnect::EndOfStream => write!(f, "stream ended"),
        }
    }
}

impl Client {
    /// Run the event stream forever, calling `handler` for every event in
    /// wire order.
    ///
    /// Disconnects are recovered internally: the session is torn down and
    /// the handshake repeated until it succeeds. The handler runs on the
    /// read path, so the next frame is not read until it returns. Drop the
    /// future to stop listening.
    pub async fn listen<F>(&self, mut handler: F)
    where
        F: FnMut(Event),
    {
        let mut state = State::Connecting;
        loop {
            state = match state {
                State::Connecting => {
                    let session = self.connect().await;
                    let keeper = HeartbeatKeeper::start(
                        session.writer(),
                        self.timings().heartbeat_interval,
                    );
                    State::Connected { session, keeper }
                }
                State::Connected {
                    mut session,
                    keeper,
                } => {
                    let reason = self.pump(&mut session, &mut handler).await;
                    tracing::warn!("lost connection to satori: {} {reason}", self.endpoint());
                    keeper.stop();
                    session.close().await;
                    tokio::time::sleep(self.timings().reconnect_delay).await;
                    State::Connecting
                }
            };
        }
    }

    /// Handshake until it succeeds, then publish the bound identity.
    async fn connect(&self) -> Session {
        tracing::info!("start connecting to satori: {}", self.endpoint());
        let address = self.events_url();
        loop {
            match Session::connect(&address, self.token()).await {
                Ok(session) => {
                    let identity = session.identity().clone();
                    tracing::info!(
                        "connected to satori: {}, platform: {}, self_id: {}",
                        self.endpoint(),
                        identity.platform,
                        identity.self_id
                    );
                    self.bind_identity(identity);
                    return session;
                }
                Err(e) => {
                    tracing::warn!("failed to connect to satori: {} {e}", self.endpoint());
                    tokio::time::sleep(self.timings().retry_delay).await;
                }
            }
        }
    }

    /// Read frames until the session fails.
    async fn pump<F>(&self, session: &mut Session, handler: &mut F) -> Disconnect
    where
        F: FnMut(Event),
    {
        loop {
            match session.next_message().await {
                Some(Ok(Message::Text(text))) => dispatch(&text, handler),
                Some(Ok(Message::Close(frame))) => return Disconnect::Closed(frame),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Disconnect::Error(e),
                None => return Disconnect::EndOfStream,
            }
        }
    }
}

/// Route one text frame. Only EVENT signals reach the handler; everything
/// else, including undecodable frames, is dropped.
fn dispatch<F>(text: &str, handler: &mut F)
where
    F: FnMut(Event),
{
    let frame = match SignalFrame::parse(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!("dropping frame: {e}");
            return;
        }
    };

    match frame.op() {
        Ok(OpCode::Event) => match frame.decode() {
            Ok(Signal::Event(event)) => handler(event),
            Ok(_) => {}
            Err(e) => tracing::debug!("dropping event: {e}"),
        },
        Ok(op) => tracing::trace!("ignoring {op:?} signal"),
        Err(e) => tracing::trace!("ignoring frame: {e}"),
    }
}
