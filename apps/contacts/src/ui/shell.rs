//! Interactive loop: stdin commands, store snapshots and the error signal feed one event queue.

use std::{io::Write, sync::Arc};

use anyhow::{Context, Result};
use client_core::ContactController;
use futures::StreamExt;
use shared::domain::{Contact, ContactId};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::{
    controller::{
        events::{parse_command, CommandParseError, ShellCommand, UiEvent, HELP},
        orchestration::Orchestrator,
        reducer::PresentationState,
    },
    ui::view::render,
};

struct Shell<W> {
    orchestrator: Orchestrator,
    state: PresentationState,
    snapshot: Vec<Contact>,
    output: W,
}

enum Flow {
    Continue,
    Stop,
}

pub async fn run<R, W>(controller: Arc<ContactController>, input: R, output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut contacts = controller.observe_contacts().fuse();
    let mut errors = controller.subscribe_errors();
    let mut lines = input.lines();
    let mut shell = Shell {
        orchestrator: Orchestrator::new(controller),
        state: PresentationState::default(),
        snapshot: Vec::new(),
        output,
    };

    loop {
        let event = tokio::select! {
            biased;
            Ok(()) = errors.changed() => match errors.borrow_and_update().clone() {
                Some(message) => UiEvent::ErrorRaised(message),
                None => continue,
            },
            Some(snapshot) = contacts.next() => UiEvent::ContactsUpdated(snapshot),
            line = lines.next_line() => match line.context("failed to read command input")? {
                Some(line) => match parse_command(&line) {
                    Ok(command) => UiEvent::Command(command),
                    Err(CommandParseError::Empty) => continue,
                    Err(err) => {
                        shell.note(&err.to_string())?;
                        continue;
                    }
                },
                None => UiEvent::InputClosed,
            },
        };

        if let Flow::Stop = shell.apply(event)? {
            break;
        }
    }

    let pending = shell.orchestrator.in_flight();
    if pending > 0 {
        info!(pending, "waiting for queued contact changes");
    }
    shell.orchestrator.drain().await;
    while let Some(message) = shell.orchestrator.controller().error() {
        shell.apply(UiEvent::ErrorRaised(message))?;
    }
    Ok(())
}

impl<W: Write> Shell<W> {
    fn apply(&mut self, event: UiEvent) -> Result<Flow> {
        match event {
            UiEvent::ContactsUpdated(snapshot) => {
                self.snapshot = snapshot;
                self.redraw(None)?;
            }
            UiEvent::ErrorRaised(message) => {
                self.redraw(Some(&message))?;
                // Shown once; a newer message raised meanwhile stays pending.
                self.orchestrator.controller().acknowledge_error(&message);
            }
            UiEvent::Command(command) => return self.apply_command(command),
            UiEvent::InputClosed => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    fn apply_command(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::ToggleAdd => self.state.toggle_add(),
            ShellCommand::Edit(id) => match self.find(id) {
                Some(contact) => self.state.begin_edit(&contact),
                None => return self.missing(id),
            },
            ShellCommand::SetField(field, value) => {
                if !self.state.set_field(field, value) {
                    self.note("no form is open; use `add` or `edit <id>` first")?;
                    return Ok(Flow::Continue);
                }
            }
            ShellCommand::Submit => match self.state.submit() {
                Some(intent) => self.orchestrator.dispatch_submit(intent),
                None => {
                    self.note("nothing to submit")?;
                    return Ok(Flow::Continue);
                }
            },
            ShellCommand::Cancel => self.state.cancel(),
            ShellCommand::Delete(id) => match self.find(id) {
                Some(contact) => self.orchestrator.dispatch_delete(contact),
                None => return self.missing(id),
            },
            ShellCommand::List => {}
            ShellCommand::Export => {
                let json = serde_json::to_string_pretty(&self.snapshot)
                    .context("failed to encode contacts")?;
                writeln!(self.output, "{json}")?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Help => {
                writeln!(self.output, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Quit => return Ok(Flow::Stop),
        }
        self.redraw(None)?;
        Ok(Flow::Continue)
    }

    fn find(&self, id: ContactId) -> Option<Contact> {
        self.snapshot.iter().find(|c| c.id == id).cloned()
    }

    fn missing(&mut self, id: ContactId) -> Result<Flow> {
        self.note(&format!("no contact with id {id}"))?;
        Ok(Flow::Continue)
    }

    fn note(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "note: {text}")?;
        Ok(())
    }

    fn redraw(&mut self, error: Option<&str>) -> Result<()> {
        let view = render(&self.snapshot, &self.state, error);
        write!(self.output, "{view}")?;
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
