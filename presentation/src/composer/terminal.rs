//! Terminal composer panel
//!
//! The surface half of the composer protocol. Each line typed at the
//! prompt is posted as a `send` message; input stays disabled ("thinking")
//! until the controller answers with `response` or `error`.

use colored::Colorize;
use openflux_application::ports::host::HostError;
use openflux_application::ports::panel::{PanelBinding, PanelEvent, PanelHost, PanelSurface};
use openflux_domain::{PanelInbound, PanelKind, PanelOutbound, Transcript};
use serde_json::Value;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::{Notify, mpsc};
use tracing::debug;

/// Commands that close the composer.
const QUIT_COMMANDS: [&str; 3] = ["/quit", "/exit", ":q"];

pub struct TerminalSurface {
    thinking: AtomicBool,
    ready: Notify,
    turns: Mutex<Transcript>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            thinking: AtomicBool::new(false),
            ready: Notify::new(),
            turns: Mutex::new(Transcript::new()),
        }
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.load(Ordering::SeqCst)
    }

    /// Record the user's goal and enter the thinking state.
    ///
    /// Returns `false` while a previous goal is still unanswered.
    pub fn begin_send(&self, goal: &str) -> bool {
        if self.thinking.swap(true, Ordering::SeqCst) {
            return false;
        }
        if let Ok(mut turns) = self.turns.lock() {
            turns.push_user(goal);
        }
        println!("{}", "Thinking...".dimmed());
        true
    }

    /// Wait for the reply to the goal accepted by the last `begin_send`.
    ///
    /// Every reply stores one wakeup, so a reply that arrived before this
    /// call is not missed.
    pub async fn wait_ready(&self) {
        self.ready.notified().await;
    }

    /// Leave the thinking state without a reply.
    fn abandon_send(&self) {
        if self.thinking.swap(false, Ordering::SeqCst) {
            println!("{}", "Composer closed before a reply arrived.".dimmed());
        }
    }

    pub fn transcript(&self) -> Transcript {
        self.turns
            .lock()
            .map(|turns| turns.clone())
            .unwrap_or_default()
    }

    pub fn format_reply(message: &PanelOutbound) -> String {
        match message {
            PanelOutbound::Response(result) => {
                let status = if result.is_success() {
                    result.status.green().bold()
                } else {
                    result.status.yellow().bold()
                };
                let mut lines = vec![format!("{} {}", status, result.message)];
                if let Some(iterations) = result.iterations {
                    lines.push(format!("{} {}", "Iterations:".cyan(), iterations));
                }
                if let Some(plan) = &result.plan {
                    if let Some(steps) = &plan.steps {
                        lines.push("Plan:".cyan().to_string());
                        for (i, step) in steps.iter().enumerate() {
                            lines.push(format!("  {}. {}", i + 1, render_step(step)));
                        }
                    }
                    if let Some(command) = &plan.test_command {
                        lines.push(format!("{} {}", "Test command:".cyan(), command));
                    }
                }
                lines.join("\n")
            }
            PanelOutbound::Error { message } => {
                format!("{} {}", "Error:".red().bold(), message.red())
            }
        }
    }
}

fn render_step(step: &Value) -> String {
    match step {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelSurface for TerminalSurface {
    fn post(&self, message: &PanelOutbound) {
        if let Ok(mut turns) = self.turns.lock() {
            turns.push_assistant(message.summary());
        }
        println!("{}", Self::format_reply(message));
        self.thinking.store(false, Ordering::SeqCst);
        self.ready.notify_one();
    }

    fn reveal(&self) {
        println!("{}", "Composer is already open.".dimmed());
    }
}

/// Read goals line by line and post them to the controller.
///
/// Ends with a `Disposed` event on a quit command or end of input. Stops
/// early, without a reply, when the controller stops listening.
pub async fn run_input<R>(
    reader: R,
    surface: Arc<TerminalSurface>,
    events: mpsc::UnboundedSender<PanelEvent>,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        print!("{} ", ">".bold());
        let _ = io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                debug!("Composer input closed: {}", e);
                break;
            }
        };
        let goal = line.trim();
        if goal.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&goal) {
            break;
        }
        if !surface.begin_send(goal) {
            continue;
        }

        let message = PanelInbound::Send {
            goal: goal.to_string(),
        }
        .to_value();
        if events.send(PanelEvent::Message(message)).is_err() {
            break;
        }
        tokio::select! {
            _ = surface.wait_ready() => {}
            _ = events.closed() => {
                debug!("Composer listener gone while a goal was pending");
                surface.abandon_send();
                break;
            }
        }
    }
    let _ = events.send(PanelEvent::Disposed);
}

/// Creates composer panels bound to the terminal's stdin.
pub struct TerminalPanelHost;

impl PanelHost for TerminalPanelHost {
    fn create_panel(&self, kind: PanelKind) -> Result<PanelBinding, HostError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| HostError::Unavailable("terminal input needs a runtime".to_string()))?;

        println!(
            "{} {}",
            kind.title().cyan().bold(),
            "(one goal per line, /quit to leave)".dimmed()
        );

        let surface = Arc::new(TerminalSurface::new());
        let (tx, rx) = mpsc::unbounded_channel();
        runtime.spawn(run_input(
            BufReader::new(tokio::io::stdin()),
            Arc::clone(&surface),
            tx,
        ));

        Ok(PanelBinding {
            surface,
            events: rx,
        })
    }
}
