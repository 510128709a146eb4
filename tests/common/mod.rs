#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use satori_client::Timings;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};
use tokio::time::Instant;

/// How the mock answers an IDENTIFY.
#[derive(Clone)]
pub enum ReadyReply {
    /// A READY signal with these logins.
    Logins(Vec<Value>),
    /// Send this text verbatim instead of READY.
    Raw(String),
    /// Close without answering.
    Close,
}

enum Push {
    Text(String),
    Binary(Vec<u8>),
    Close,
    Drop,
}

/// A REST command as received by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub headers: HeaderMap,
    pub body: Value,
}

struct MockState {
    replies: Mutex<VecDeque<ReadyReply>>,
    identifies: Mutex<Vec<String>>,
    sessions: AtomicUsize,
    connections: mpsc::UnboundedSender<MockConnection>,
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<HashMap<String, (StatusCode, Value)>>,
}

/// Server side of one handshaken event connection.
///
/// Dropping it drops the connection.
pub struct MockConnection {
    pub index: usize,
    pub token: String,
    pub opened_at: Instant,
    push: mpsc::UnboundedSender<Push>,
    inbound: mpsc::UnboundedReceiver<(Instant, String)>,
}

impl MockConnection {
    pub fn push_text(&self, text: impl Into<String>) {
        let _ = self.push.send(Push::Text(text.into()));
    }

    pub fn push_event(&self, body: Value) {
        self.push_text(json!({ "op": 0, "body": body }).to_string());
    }

    pub fn push_binary(&self, bytes: Vec<u8>) {
        let _ = self.push.send(Push::Binary(bytes));
    }

    /// Send a close frame, then keep reading until the client hangs up.
    pub fn close(&self) {
        let _ = self.push.send(Push::Close);
    }

    /// Drop the socket without a closing handshake.
    pub fn drop_connection(&self) {
        let _ = self.push.send(Push::Drop);
    }

    pub async fn next_inbound(&mut self, timeout: Duration) -> Option<(Instant, String)> {
        tokio::time::timeout(timeout, self.inbound.recv())
            .await
            .ok()
            .flatten()
    }

    /// Everything the client sent until the connection ended.
    pub async fn drain_inbound(&mut self) -> Vec<(Instant, String)> {
        let mut frames = Vec::new();
        while let Ok(Some(frame)) =
            tokio::time::timeout(Duration::from_secs(5), self.inbound.recv()).await
        {
            frames.push(frame);
        }
        frames
    }
}

/// A mock Satori server: `/v1/events` WebSocket plus `/v1/{method}` REST.
pub struct MockServer {
    pub base_url: String,
    state: Arc<MockState>,
    connections: mpsc::UnboundedReceiver<MockConnection>,
}

impl MockServer {
    pub async fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = Arc::new(MockState {
            replies: Mutex::new(VecDeque::new()),
            identifies: Mutex::new(Vec::new()),
            sessions: AtomicUsize::new(0),
            connections: tx,
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(HashMap::new()),
        });

        let app = Router::new()
            .route("/v1/events", get(events))
            .route("/v1/{method}", post(command))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", addr.port()),
            state,
            connections: rx,
        }
    }

    pub fn events_url(&self) -> String {
        format!("{}/v1/events", self.base_url)
    }

    /// Answer the next IDENTIFY with `reply` instead of the default READY.
    pub async fn queue_reply(&self, reply: ReadyReply) {
        self.state.replies.lock().await.push_back(reply);
    }

    pub async fn next_connection(&mut self) -> MockConnection {
        tokio::time::timeout(Duration::from_secs(5), self.connections.recv())
            .await
            .expect("timed out waiting for a session")
            .expect("server stopped")
    }

    /// Tokens of every IDENTIFY received, in order.
    pub async fn identifies(&self) -> Vec<String> {
        self.state.identifies.lock().await.clone()
    }

    pub fn session_count(&self) -> usize {
        self.state.sessions.load(Ordering::SeqCst)
    }

    pub async fn respond(&self, method: &str, status: StatusCode, body: Value) {
        self.state
            .responses
            .lock()
            .await
            .insert(method.to_string(), (status, body));
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }
}

async fn events(ws: WebSocketUpgrade, State(state): State<Arc<MockState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<MockState>) {
    let token = match socket.recv().await {
        Some(Ok(Message::Text(text))) => {
            let identify: Value = serde_json::from_str(text.as_str()).unwrap_or_default();
            if identify["op"] != 3 {
                return;
            }
            identify["body"]["token"]
                .as_str()
                .unwrap_or_default()
                .to_string()
        }
        _ => return,
    };
    state.identifies.lock().await.push(token.clone());

    let reply = state
        .replies
        .lock()
        .await
        .pop_front()
        .unwrap_or_else(|| ReadyReply::Logins(vec![login("p", "1")]));
    let (ready, accepted) = match reply {
        ReadyReply::Logins(logins) => {
            let accepted = !logins.is_empty();
            let ready = json!({ "op": 4, "body": { "logins": logins } }).to_string();
            (ready, accepted)
        }
        ReadyReply::Raw(text) => (text, false),
        ReadyReply::Close => {
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };
    if socket.send(Message::Text(ready.into())).await.is_err() {
        return;
    }
    if !accepted {
        // The client gives up on this socket; wait for it to hang up.
        while let Some(Ok(_)) = socket.recv().await {}
        return;
    }

    let (push_tx, mut push_rx) = mpsc::unbounded_channel();
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let index = state.sessions.fetch_add(1, Ordering::SeqCst);
    let _ = state.connections.send(MockConnection {
        index,
        token,
        opened_at: Instant::now(),
        push: push_tx,
        inbound: inbound_rx,
    });

    loop {
        tokio::select! {
            push = push_rx.recv() => match push {
                Some(Push::Text(text)) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Some(Push::Binary(bytes)) => {
                    if socket.send(Message::Binary(bytes.into())).await.is_err() {
                        break;
                    }
                }
                Some(Push::Close) => {
                    let _ = socket.send(Message::Close(None)).await;
                    while let Some(Ok(msg)) = socket.recv().await {
                        if let Message::Text(text) = msg {
                            let _ = inbound_tx.send((Instant::now(), text.as_str().to_owned()));
                        }
                    }
                    break;
                }
                Some(Push::Drop) | None => break,
            },
            msg = socket.recv() => match msg {
                Some(Ok(Message::Text(text))) => {
                    let _ = inbound_tx.send((Instant::now(), text.as_str().to_owned()));
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            }
        }
    }
}

async fn command(
    State(state): State<Arc<MockState>>,
    Path(method): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.requests.lock().await.push(RecordedRequest {
        method: method.clone(),
        headers,
        body,
    });
    let (status, body) = state
        .responses
        .lock()
        .await
        .get(&method)
        .cloned()
        .unwrap_or((StatusCode::OK, json!({})));
    (status, Json(body)).into_response()
}

pub fn login(platform: &str, self_id: &str) -> Value {
    json!({ "platform": platform, "self_id": self_id, "status": 1 })
}

pub fn message_event(id: i64, content: &str) -> Value {
    json!({
        "id": id,
        "type": "message-created",
        "platform": "p",
        "self_id": "1",
        "timestamp": 1_700_000_000_000i64 + id,
        "channel": { "id": "c1", "type": 0, "name": "general" },
        "message": { "id": format!("m{id}"), "content": content },
        "user": { "id": "u1", "name": "alice" }
    })
}

/// Short intervals so reconnect tests finish quickly.
pub fn fast_timings() -> Timings {
    Timings {
        heartbeat_interval: Duration::from_millis(50),
        retry_delay: Duration::from_millis(50),
        reconnect_delay: Duration::from_millis(10),
    }
}

/// Accept TCP connections and hang up on each one without a word, so TLS
/// handshakes against it fail. Each accept is reported on the channel.
pub async fn spawn_hangup_server() -> (u16, mpsc::UnboundedReceiver<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
            let _ = tx.send(());
        }
    });
    (port, rx)
}

pub fn temp_socket_path() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let mut path = std::env::temp_dir();
    path.push(format!(
        "satori-test-{}-{}.sock",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    path
}
