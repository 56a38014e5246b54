//! Interactive operator shell — one command per input line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;

use motehub_app::ports::ActuatorGateway;
use motehub_app::services::operator_service::{OperatorService, Reply};
use motehub_domain::command::Command;

/// The telemetry receive loop, stoppable from the shell.
#[derive(Debug, Default)]
pub struct Listener {
    handle: Option<JoinHandle<()>>,
}

impl Listener {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Abort the receive loop. Returns `false` if it was already stopped.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

/// Read commands from `input` until `exit` or end of input, writing each
/// reply to `output`.
///
/// # Errors
///
/// Returns any IO error raised while reading input or writing replies.
pub async fn run<R, W, G>(
    input: R,
    output: &mut W,
    operator: &OperatorService<G>,
    listener: &mut Listener,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    G: ActuatorGateway,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let text = match operator.execute(Command::parse(&line)).await {
            Reply::Text(text) => text,
            Reply::Stop => {
                if listener.stop() {
                    tracing::info!("receive loop stopped by operator");
                    "stopped listening to motes".to_string()
                } else {
                    "already stopped".to_string()
                }
            }
            Reply::Exit => return Ok(()),
        };
        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
    Ok(())
}
