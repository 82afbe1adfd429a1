//! Input handling
//!
//! Stdin is read on a dedicated thread and forwarded over a channel, so a
//! blocked read never holds up the runtime. Exiting the process ends the
//! thread.

use std::io::BufRead;
use std::thread;

use tokio::sync::mpsc;

#[derive(Debug)]
pub enum InputEvent {
    Line(String),
    /// End of input
    Closed,
    Error(std::io::Error),
}

pub struct InputReader {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl InputReader {
    /// Start reading lines from stdin
    pub fn stdin() -> Self {
        Self::spawn(|| Box::new(std::io::stdin().lock()))
    }

    /// Start reading lines from any buffered source
    pub fn spawn<F>(open: F) -> Self
    where
        F: FnOnce() -> Box<dyn BufRead> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();

        thread::spawn(move || {
            let reader = open();
            for line in reader.lines() {
                let event = match line {
                    Ok(line) => InputEvent::Line(line),
                    Err(e) => InputEvent::Error(e),
                };
                if tx.send(event).is_err() {
                    // Receiver dropped, session over
                    return;
                }
            }
            let _ = tx.send(InputEvent::Closed);
        });

        Self { rx }
    }

    /// Next input event. Cancel-safe.
    pub async fn next(&mut self) -> InputEvent {
        self.rx.recv().await.unwrap_or(InputEvent::Closed)
    }
}
