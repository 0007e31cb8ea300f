//! Terminal front end: a host for the responder's side effects and the
//! interactive read-reply loop.

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use queueless_chat::{Capabilities, CapabilityError, ChatError, Responder};
use queueless_core::{transcript_json, ChatMessage, ConversationState};
use tokio::sync::mpsc;

/// Shown when a requested side effect could not be carried out.
const FAILURE_REPLY: &str = "Desculpe, não consegui concluir essa ação.";

const HINTS: &str = "Dicas: use /limpar · /exportar · “Abrir login” · “Levar para suporte”";

/// Capabilities backed by the terminal and the local filesystem.
///
/// There is no page to navigate, so navigation and scrolling are reported
/// as notices printed ahead of the bot's reply.
#[derive(Debug)]
pub struct TerminalHost {
    export_path: PathBuf,
    notices: Vec<String>,
}

impl TerminalHost {
    pub fn new(export_path: PathBuf) -> Self {
        Self {
            export_path,
            notices: Vec::new(),
        }
    }

    /// Take the notices produced since the last call.
    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}

impl Capabilities for TerminalHost {
    fn navigate_login(&mut self) -> Result<(), CapabilityError> {
        tracing::info!(target_path = "/login", "Navigation requested");
        self.notices.push("[navegação] /login".to_string());
        Ok(())
    }

    fn scroll_to(&mut self, section: &str) -> Result<(), CapabilityError> {
        tracing::info!(section, "Scroll requested");
        self.notices.push(format!("[rolagem] {}", section));
        Ok(())
    }

    fn export_transcript(&mut self, messages: &[ChatMessage]) -> Result<(), CapabilityError> {
        let json =
            transcript_json(messages).map_err(|e| CapabilityError::Export(e.to_string()))?;
        if let Some(parent) = self.export_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CapabilityError::Export(e.to_string()))?;
            }
        }
        std::fs::write(&self.export_path, json)
            .map_err(|e| CapabilityError::Export(e.to_string()))?;

        tracing::info!(
            path = %self.export_path.display(),
            messages = messages.len(),
            "Transcript exported"
        );
        self.notices
            .push(format!("[exportado] {}", self.export_path.display()));
        Ok(())
    }
}

/// Answer one line of input, returning the lines to print.
///
/// Blank input prints nothing. Errors are turned into a bot-style line so
/// the session keeps going.
pub fn handle_line(
    responder: &Responder,
    state: &mut ConversationState,
    host: &mut TerminalHost,
    line: &str,
) -> Vec<String> {
    let result = responder.respond(line, state, host);
    let mut output = host.drain_notices();
    match result {
        Ok(Some(reply)) => output.push(reply.text),
        Ok(None) => {}
        Err(ChatError::MessageTooLong(max)) => {
            tracing::warn!(max, "Rejected oversized message");
            output.push(format!(
                "Sua mensagem é muito longa. Use no máximo {} caracteres.",
                max
            ));
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to answer message");
            output.push(FAILURE_REPLY.to_string());
        }
    }
    output
}

/// Knowledge scores for `text`, best first, one line per entry.
pub fn explain(responder: &Responder, text: &str) -> Vec<String> {
    let mut ranked = responder.rank(text);
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    let threshold = responder.config().confidence_threshold;
    ranked
        .iter()
        .map(|c| {
            let marker = if c.score >= threshold { "*" } else { " " };
            format!("{} {:.3}  {} ({})", marker, c.score, c.entry.id, c.entry.intent)
        })
        .collect()
}

/// Read lines on a dedicated thread and forward them over a channel.
///
/// Blocking reads stay off the runtime, so ending a session never waits
/// on a pending read.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Answer lines from `lines` until the input ends or `shutdown` completes.
pub async fn converse<W: Write>(
    responder: &Responder,
    state: &mut ConversationState,
    host: &mut TerminalHost,
    lines: &mut mpsc::Receiver<io::Result<String>>,
    shutdown: impl Future<Output = ()>,
    out: &mut W,
) -> io::Result<()> {
    tokio::pin!(shutdown);
    loop {
        write!(out, "> ")?;
        out.flush()?;

        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    break;
                };
                for reply in handle_line(responder, state, host, &line?) {
                    writeln!(out, "{}", reply)?;
                }
            }
            _ = &mut shutdown => {
                writeln!(out)?;
                tracing::info!("Interrupted");
                break;
            }
        }
    }
    Ok(())
}

/// Run an interactive session on stdin/stdout until EOF or Ctrl+C.
pub async fn run_interactive(responder: &Responder, host: &mut TerminalHost) -> io::Result<()> {
    let mut state = responder.start_session();
    if let Some(opening) = state.messages.first() {
        println!("{}", opening.text);
    }
    let quick_replies = &responder.knowledge().quick_replies;
    if !quick_replies.is_empty() {
        println!("Sugestões: {}", quick_replies.join(" · "));
    }
    println!("{}", HINTS);

    let mut lines = spawn_line_reader(io::BufReader::new(io::stdin()));
    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };
    converse(
        responder,
        &mut state,
        host,
        &mut lines,
        interrupted,
        &mut io::stdout(),
    )
    .await?;

    tracing::info!(
        session = %state.id,
        messages = state.messages.len(),
        "Session ended"
    );
    Ok(())
}
