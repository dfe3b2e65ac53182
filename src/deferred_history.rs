use std::fmt;

use log::{debug, trace};

use crate::traits::{command::Command, command_history::CommandHistory};

/// A linear undo/redo log that queues appended commands until [`execute`](Self::execute) is
/// called.
///
/// Two positions are tracked: the revision, which is where the caller wants to be, and the cursor,
/// which is how far the domain object has actually been brought. The cursor never runs ahead of
/// the revision, and the commands between them are pending. This allows several appends to be
/// flushed to the domain object in one step.
///
/// # Example
///
/// ```
/// use revision_history::graph::{AddNode, Graph, Node};
/// use revision_history::prelude::{CommandHistory, DeferredHistory, Shared};
///
/// let graph = Shared::new(Graph::new());
/// let mut history: DeferredHistory = DeferredHistory::new();
///
/// history.append(Box::new(AddNode::new(graph.clone(), Node(0, 0))));
/// history.append(Box::new(AddNode::new(graph.clone(), Node(1, 1))));
/// assert_eq!(history.cursor(), 0);
/// assert!(graph.lock().nodes().is_empty());
///
/// history.execute();
/// assert_eq!(history.cursor(), 2);
/// assert_eq!(graph.lock().nodes().len(), 2);
/// ```
pub struct DeferredHistory<C: ?Sized + Command = dyn Command> {
    log: Vec<Box<C>>,
    /// Commands in `log[..cursor]` are applied to the domain object.
    cursor: usize,
    /// Commands in `log[cursor..revision]` are pending. Always `>= cursor`.
    revision: usize,
}

impl<C: ?Sized + Command> DeferredHistory<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            log: Vec::with_capacity(capacity),
            cursor: 0,
            revision: 0,
        }
    }

    /// Executes every pending command, oldest first, and moves the cursor up to the revision.
    pub fn execute(&mut self) {
        if self.cursor == self.revision {
            return;
        }

        for command in &self.log[self.cursor..self.revision] {
            trace!("execute {}", command.description());
            command.execute();
        }
        trace!(
            "flushed {} commands, cursor now at {}",
            self.revision - self.cursor,
            self.revision
        );
        self.cursor = self.revision;
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the domain object reflects every command up to the revision.
    #[must_use]
    pub fn is_flushed(&self) -> bool {
        self.cursor == self.revision
    }

    #[must_use]
    pub fn applied(&self) -> &[Box<C>] {
        &self.log[..self.cursor]
    }

    /// Appended but not yet executed.
    #[must_use]
    pub fn pending(&self) -> &[Box<C>] {
        &self.log[self.cursor..self.revision]
    }

    #[must_use]
    pub fn undone(&self) -> &[Box<C>] {
        &self.log[self.revision..]
    }

    /// Commands up to the revision, most recent first.
    #[must_use]
    pub fn undo_history(&self) -> Option<Vec<&C>> {
        if self.revision == 0 {
            None
        } else {
            Some(self.log[..self.revision].iter().rev().map(Box::as_ref).collect())
        }
    }

    #[must_use]
    pub fn redo_history(&self) -> Option<Vec<&C>> {
        if self.revision == self.log.len() {
            None
        } else {
            Some(self.undone().iter().map(Box::as_ref).collect())
        }
    }

    pub fn commands(&self) -> impl Iterator<Item = &C> + '_ {
        self.log.iter().map(Box::as_ref)
    }
}

impl<C: ?Sized + Command> CommandHistory<C> for DeferredHistory<C> {
    fn append(&mut self, command: Box<C>) {
        let dropped = self.log.len() - self.revision;
        if dropped > 0 {
            debug!("discarding {dropped} redoable commands past revision {}", self.revision);
            self.log.truncate(self.revision);
        }

        trace!("queue {} at revision {}", command.description(), self.revision + 1);
        self.log.push(command);
        self.revision += 1;
    }

    fn undo(&mut self) {
        if self.revision == 0 {
            trace!("nothing to undo");
            return;
        }

        self.revision -= 1;
        let command = &self.log[self.revision];
        if self.revision < self.cursor {
            trace!("undo {}, now at revision {}", command.description(), self.revision);
            command.rollback();
            self.cursor = self.revision;
        } else {
            trace!("unqueue {}, now at revision {}", command.description(), self.revision);
        }
    }

    fn redo(&mut self) {
        if self.revision == self.log.len() {
            trace!("nothing to redo");
            return;
        }

        self.execute();

        let command = &self.log[self.revision];
        command.execute();
        self.revision += 1;
        self.cursor = self.revision;
        trace!("redo {}, now at revision {}", command.description(), self.revision);
    }

    fn revision(&self) -> usize {
        self.revision
    }

    fn len(&self) -> usize {
        self.log.len()
    }
}

impl<C: ?Sized + Command> Default for DeferredHistory<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized + Command> fmt::Debug for DeferredHistory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredHistory")
            .field("cursor", &self.cursor)
            .field("revision", &self.revision)
            .field("len", &self.log.len())
            .field(
                "commands",
                &self.log.iter().map(|c| c.description()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
