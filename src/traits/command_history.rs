use super::command::Command;

/// The navigation contract shared by [`History`](crate::history::History) and
/// [`DeferredHistory`](crate::deferred_history::DeferredHistory).
///
/// The log is linear: appending while some commands are undone discards them, so there is never
/// more than one future to redo into. Undo and redo at either end of the log are silent no-ops.
pub trait CommandHistory<C: ?Sized + Command> {
    /// Drops every command past the current revision, then records `command` at the end.
    fn append(&mut self, command: Box<C>);
    /// Steps back over the most recent applied command.
    fn undo(&mut self);
    /// Steps forward over the next undone command.
    fn redo(&mut self);

    /// How many commands from the start of the log make up the present state.
    fn revision(&self) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn can_undo(&self) -> bool {
        self.revision() > 0
    }

    fn can_redo(&self) -> bool {
        self.revision() < self.len()
    }

    fn append_all<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = Box<C>>,
    {
        for command in commands {
            self.append(command);
        }
    }
}
