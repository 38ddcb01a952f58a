use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use futures::{SinkExt, StreamExt};
use shared::protocol::{ClientCommand, ServerEvent};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};
use url::Url;

const SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct QuizConnection {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

pub fn parse_server_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("invalid server url '{raw}'"))?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => bail!("server url must use ws:// or wss://, got '{other}://'"),
    }
}

impl QuizConnection {
    pub async fn connect(url: &Url) -> Result<Self> {
        let (socket, _) = connect_async(url.as_str())
            .await
            .with_context(|| format!("failed to connect to {url}"))?;
        info!(%url, "connected");
        Ok(Self { socket })
    }

    /// Next server event, skipping control frames. `None` once the server
    /// closes the socket.
    pub async fn next_event(&mut self) -> Result<Option<ServerEvent>> {
        while let Some(frame) = self.socket.next().await {
            match frame.context("websocket read failed")? {
                Message::Text(text) => {
                    let event = serde_json::from_str(&text)
                        .with_context(|| format!("unexpected server frame: {text}"))?;
                    return Ok(Some(event));
                }
                Message::Close(_) => return Ok(None),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Reads the connect-time snapshot: status, catalog, and the current
    /// question when the competition is running.
    pub async fn read_snapshot(&mut self) -> Result<Vec<ServerEvent>> {
        let status = self.snapshot_event().await?;
        let ServerEvent::CompetitionStatus(started) = status else {
            bail!("expected competitionStatus first, got {}", status.name());
        };
        let catalog = self.snapshot_event().await?;
        if !matches!(catalog, ServerEvent::QuestionsUpdate(_)) {
            bail!("expected questionsUpdate second, got {}", catalog.name());
        }

        let mut events = vec![status, catalog];
        if started {
            let current = self.snapshot_event().await?;
            if !matches!(current, ServerEvent::QuestionUpdate(_)) {
                bail!("expected questionUpdate third, got {}", current.name());
            }
            events.push(current);
        }
        Ok(events)
    }

    async fn snapshot_event(&mut self) -> Result<ServerEvent> {
        tokio::time::timeout(SNAPSHOT_TIMEOUT, self.next_event())
            .await
            .context("timed out waiting for snapshot")??
            .ok_or_else(|| anyhow!("server closed before sending snapshot"))
    }

    pub async fn send(&mut self, command: ClientCommand) -> Result<()> {
        let text = serde_json::to_string(&command)?;
        debug!(command = command.name(), "sending");
        self.socket
            .send(Message::Text(text))
            .await
            .context("failed to send command")
    }

    pub async fn close(mut self) -> Result<()> {
        self.socket.close(None).await.context("failed to close socket")
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
