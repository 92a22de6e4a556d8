//! Line-oriented chat session
//!
//! Reads one message per line, maps it onto an [`InboundEvent`] for the
//! current user and writes the rendered reply. Session-only commands
//! (`/user`, `/quit`) never reach the workflow.

use std::io::{BufRead, Write};

use crate::display::render_reply;
use crate::error::{SplitterError, SplitterResult};
use crate::models::UserId;
use crate::services::{EntryWorkflow, InboundEvent};

/// Prompt printed before each line is read
pub const PROMPT: &str = "> ";

/// What a single input line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    /// Forward to the workflow
    Event(InboundEvent),
    /// Continue the session as another user
    SwitchUser(UserId),
    /// `/user` with something that is not an id
    BadUser(String),
    /// End the session
    Quit,
    /// Blank line
    Empty,
}

/// Map one input line onto a chat input
pub fn parse_line(line: &str) -> ChatInput {
    let line = line.trim();
    if line.is_empty() {
        return ChatInput::Empty;
    }

    let command = line.strip_prefix('/').unwrap_or(line);
    let (head, rest) = command
        .split_once(char::is_whitespace)
        .map(|(head, rest)| (head, rest.trim()))
        .unwrap_or((command, ""));

    match (head.to_ascii_lowercase().as_str(), rest.is_empty()) {
        ("confirm", true) => ChatInput::Event(InboundEvent::ConfirmSignal),
        ("cancel", true) => ChatInput::Event(InboundEvent::CancelSignal),
        ("report", true) if line.starts_with('/') => ChatInput::Event(InboundEvent::ReportRequest),
        ("start" | "help", true) if line.starts_with('/') => {
            ChatInput::Event(InboundEvent::StartRequest)
        }
        ("quit" | "exit", true) if line.starts_with('/') => ChatInput::Quit,
        ("user", false) if line.starts_with('/') => match rest.parse() {
            Ok(user) => ChatInput::SwitchUser(user),
            Err(_) => ChatInput::BadUser(rest.to_string()),
        },
        _ => ChatInput::Event(InboundEvent::TextMessage(line.to_string())),
    }
}

/// A chat session driving one workflow
pub struct ChatSession<'w, 's> {
    workflow: &'w mut EntryWorkflow<'s>,
    user: UserId,
    show_prompt: bool,
}

impl<'w, 's> ChatSession<'w, 's> {
    /// Start a session as `user`
    pub fn new(workflow: &'w mut EntryWorkflow<'s>, user: UserId) -> Self {
        Self {
            workflow,
            user,
            show_prompt: true,
        }
    }

    /// Do not print a prompt before each line (for piped input)
    pub fn without_prompt(mut self) -> Self {
        self.show_prompt = false;
        self
    }

    /// Run until end of input or `/quit`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> SplitterResult<()> {
        tracing::info!(user = %self.user, "chat session started");

        self.prompt(&mut output)?;
        for line in input.lines() {
            let line = line
                .map_err(|e| SplitterError::Io(format!("Failed to read input: {}", e)))?;

            match parse_line(&line) {
                ChatInput::Empty => {}
                ChatInput::Quit => break,
                ChatInput::SwitchUser(user) => {
                    self.user = user;
                    writeln!(output, "Now chatting as {}.", user)?;
                }
                ChatInput::BadUser(raw) => {
                    writeln!(output, "'{}' is not a valid user id.", raw)?;
                }
                ChatInput::Event(event) => {
                    let reply = self.workflow.handle(self.user, event);
                    writeln!(output, "{}", render_reply(&reply))?;
                }
            }

            self.prompt(&mut output)?;
        }

        output.flush()?;
        tracing::info!("chat session ended");
        Ok(())
    }

    fn prompt<W: Write>(&self, output: &mut W) -> SplitterResult<()> {
        if self.show_prompt {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }
        Ok(())
    }
}
