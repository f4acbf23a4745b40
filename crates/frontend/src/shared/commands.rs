//! Row actions for collection tables.
//!
//! Each table registers a handler per [`RowCommand`] it offers; the dropdown
//! only knows the command, never the handler.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowCommand {
    Edit,
    Delete,
    Clone,
    ToggleDisable,
    Run,
    Load,
    View,
}

impl RowCommand {
    pub fn label(&self) -> &'static str {
        match self {
            RowCommand::Edit => "Edit",
            RowCommand::Delete => "Delete",
            RowCommand::Clone => "Clone",
            RowCommand::ToggleDisable => "Disable",
            RowCommand::Run => "Run",
            RowCommand::Load => "Load",
            RowCommand::View => "View",
        }
    }
}

impl fmt::Display for RowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no handler registered for {0:?}")]
pub struct UnhandledCommand(pub RowCommand);

type Handler<Id> = Rc<dyn Fn(Id)>;

pub struct CommandDispatcher<Id> {
    handlers: HashMap<RowCommand, Handler<Id>>,
}

impl<Id> Clone for CommandDispatcher<Id> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<Id> Default for CommandDispatcher<Id> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<Id> CommandDispatcher<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, command: RowCommand, handler: impl Fn(Id) + 'static) -> Self {
        self.handlers.insert(command, Rc::new(handler));
        self
    }

    pub fn supports(&self, command: RowCommand) -> bool {
        self.handlers.contains_key(&command)
    }

    pub fn dispatch(&self, command: RowCommand, id: Id) -> Result<(), UnhandledCommand> {
        let handler = self
            .handlers
            .get(&command)
            .ok_or(UnhandledCommand(command))?;
        log::debug!("dispatch {:?}", command);
        handler(id);
        Ok(())
    }
}
