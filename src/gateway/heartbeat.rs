use std::time::Duration;

use futures_util::SinkExt;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

use super::session::WsWriter;
use super::signal::Signal;

pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// Periodic PING sender bound to a single session.
///
/// Stopping consumes the keeper, so it can be stopped once. Dropping it has
/// the same effect: the task is signalled and aborted, even mid-send.
pub struct HeartbeatKeeper {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl HeartbeatKeeper {
    pub fn start(writer: WsWriter, interval: Duration) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let ping = match Signal::Ping.encode() {
                Ok(ping) => ping,
                Err(e) => {
                    tracing::error!("failed to encode heartbeat: {e}");
                    return;
                }
            };
            loop {
                tokio::select! {
                    _ = &mut stop_rx => return,
                    _ = tokio::time::sleep(interval) => {
                        let mut sink = writer.lock().await;
                        if let Err(e) = sink.send(Message::Text(ping.clone().into())).await {
                            tracing::warn!("failed to send heartbeat to satori: {e}");
                        }
                    }
                }
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            handle,
        }
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        self.handle.abort();
    }
}

impl Drop for HeartbeatKeeper {
    fn drop(&mut self) {
        self.shutdown();
    }
}
