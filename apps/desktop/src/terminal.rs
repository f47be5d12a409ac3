//! Terminal display surface: stdin lines in, rendered views out.

use client_core::{Phase, RenderableContent, Resolution, UiIntent, ViewSnapshot};
use shared::domain::SubmissionId;
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, warn};

pub const WELCOME: &str = "Paste or type any text and press Enter to get a summary.\n\
End a line with \\ to continue on the next line. Press Ctrl-D to quit.";

/// Joins lines ending in a backslash into one multi-line input.
#[derive(Debug, Default)]
pub struct InputAssembler {
    lines: Vec<String>,
}

impl InputAssembler {
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(continued) = line.strip_suffix('\\') {
            self.lines.push(continued.to_string());
            return None;
        }
        self.lines.push(line.to_string());
        Some(std::mem::take(&mut self.lines).join("\n"))
    }
}

pub async fn forward_stdin(intents: mpsc::Sender<UiIntent>) {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut assembler = InputAssembler::default();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "failed to read stdin");
                break;
            }
        };
        let Some(text) = assembler.push_line(&line) else {
            continue;
        };
        if intents.send(UiIntent::InputChanged(text)).await.is_err()
            || intents.send(UiIntent::Submit).await.is_err()
        {
            break;
        }
    }
    debug!("stdin closed");
}

/// Turns the stream of views into terminal output, printing each submission
/// once when it starts and once when it settles.
#[derive(Debug)]
pub struct ViewPrinter {
    html: bool,
    started: Option<SubmissionId>,
    settled: Option<SubmissionId>,
}

impl ViewPrinter {
    pub fn new(html: bool) -> Self {
        Self {
            html,
            started: None,
            settled: None,
        }
    }

    pub fn render(&mut self, view: &ViewSnapshot) -> Option<String> {
        let submission = view.submission?;
        match view.phase {
            Phase::Pending if self.started != Some(submission) => {
                self.started = Some(submission);
                let echo = view
                    .echo
                    .as_ref()
                    .map(|echo| self.format(echo))
                    .unwrap_or_default();
                Some(format!("\nYou:\n{echo}\n\nThinking..."))
            }
            Phase::Settled(resolution) if self.settled != Some(submission) => {
                self.settled = Some(submission);
                let heading = match resolution {
                    Resolution::Success => "Summary:\n",
                    Resolution::Failure => "",
                };
                let elapsed = view
                    .elapsed_ms
                    .map(|ms| format!("\n({ms} ms)"))
                    .unwrap_or_default();
                Some(format!("\n{heading}{}{elapsed}", self.format(&view.content)))
            }
            _ => None,
        }
    }

    fn format(&self, content: &RenderableContent) -> String {
        if self.html {
            content.to_html().trim_end().to_string()
        } else {
            content.to_plain_text()
        }
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
