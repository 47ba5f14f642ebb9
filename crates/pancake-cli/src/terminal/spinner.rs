//! "Thinking..." indicator shown while a generation request is in flight.
//!
//! The animation runs on its own tokio task and shares nothing with the
//! caller except a [`CancellationToken`]. The caller cancels the token when
//! the request returns and awaits the task before printing anything else.

use std::io::IsTerminal;
use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use pancake_core::{ContentGenerator, GenerateError, Transcript};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const MAX_DOTS: usize = 15;
const TICK: Duration = Duration::from_millis(400);

/// A running indicator. Call [`ThinkingIndicator::stop`] to end it.
pub struct ThinkingIndicator {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl ThinkingIndicator {
    /// Start animating on stderr, or silently when `visible` is false.
    pub fn start(visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let token = CancellationToken::new();
        let task = tokio::spawn(animate(bar, token.clone()));
        Self { token, task }
    }

    /// Signal the animation to stop and wait for it to clear its line.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            debug!("Thinking indicator task ended abnormally: {e}");
        }
    }
}

/// `Thinking` followed by 1..=15 dots, cycling.
pub fn thinking_message(tick: usize) -> String {
    format!("Thinking{}", ".".repeat(tick % MAX_DOTS + 1))
}

async fn animate(bar: ProgressBar, token: CancellationToken) {
    let mut ticker = tokio::time::interval(TICK);
    let mut tick = 0;
    loop {
        tokio::select! {
            () = token.cancelled() => break,
            _ = ticker.tick() => {
                bar.set_message(thinking_message(tick));
                bar.tick();
                tick += 1;
            }
        }
    }
    bar.finish_and_clear();
}

/// Decorates a generator with the thinking indicator.
pub struct WithThinking<G> {
    inner: G,
    visible: bool,
}

impl<G> WithThinking<G> {
    /// Show the indicator only when stderr is a terminal.
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            visible: std::io::stderr().is_terminal(),
        }
    }

    /// Never draw anything; the task still runs.
    pub const fn hidden(inner: G) -> Self {
        Self {
            inner,
            visible: false,
        }
    }
}

#[async_trait]
impl<G: ContentGenerator> ContentGenerator for WithThinking<G> {
    async fn generate(&self, transcript: &Transcript) -> Result<String, GenerateError> {
        let indicator = ThinkingIndicator::start(self.visible);
        let result = self.inner.generate(transcript).await;
        indicator.stop().await;
        result
    }
}
