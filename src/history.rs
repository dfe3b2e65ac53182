use std::fmt;

use log::{debug, trace};

use crate::traits::{command::Command, command_history::CommandHistory};

/// A linear undo/redo log that executes every command as soon as it is appended.
///
/// The first [`revision`](CommandHistory::revision) commands of the log are applied to the domain
/// object; the rest have been undone and can be redone until something new is appended.
///
/// # Example
///
/// ```
/// use revision_history::graph::{AddEdge, AddNode, Graph, Node};
/// use revision_history::prelude::{CommandHistory, History, Shared};
///
/// let graph = Shared::new(Graph::new());
/// let mut history: History = History::new();
///
/// history.append(Box::new(AddNode::new(graph.clone(), Node(0, 0))));
/// history.append(Box::new(AddNode::new(graph.clone(), Node(1, 1))));
/// history.append(Box::new(AddEdge::new(graph.clone(), Node(0, 0), Node(1, 1))));
/// assert_eq!(history.revision(), 3);
///
/// history.undo();
/// assert!(graph.lock().edges().is_empty());
///
/// history.redo();
/// assert!(graph.lock().contains_edge(Node(0, 0), Node(1, 1)));
/// ```
pub struct History<C: ?Sized + Command = dyn Command> {
    log: Vec<Box<C>>,
    revision: usize,
}

impl<C: ?Sized + Command> History<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            revision: 0,
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            log: Vec::with_capacity(capacity),
            revision: 0,
        }
    }

    /// The commands currently applied, oldest first.
    #[must_use]
    pub fn applied(&self) -> &[Box<C>] {
        &self.log[..self.revision]
    }

    /// The commands that have been undone and can be redone, in redo order.
    #[must_use]
    pub fn undone(&self) -> &[Box<C>] {
        &self.log[self.revision..]
    }

    /// Applied commands, most recent first.
    #[must_use]
    pub fn undo_history(&self) -> Option<Vec<&C>> {
        if self.revision == 0 {
            None
        } else {
            Some(self.applied().iter().rev().map(Box::as_ref).collect())
        }
    }

    /// Undone commands, next to be redone first.
    #[must_use]
    pub fn redo_history(&self) -> Option<Vec<&C>> {
        if self.revision == self.log.len() {
            None
        } else {
            Some(self.undone().iter().map(Box::as_ref).collect())
        }
    }

    /// Every recorded command in chronological order.
    pub fn commands(&self) -> impl Iterator<Item = &C> + '_ {
        self.log.iter().map(Box::as_ref)
    }

    fn truncate_redo(&mut self) {
        let dropped = self.log.len() - self.revision;
        if dropped > 0 {
            debug!("discarding {dropped} redoable commands past revision {}", self.revision);
            self.log.truncate(self.revision);
        }
    }
}

impl<C: ?Sized + Command> CommandHistory<C> for History<C> {
    fn append(&mut self, command: Box<C>) {
        self.truncate_redo();

        trace!("append {} at revision {}", command.description(), self.revision + 1);
        self.log.push(command);
        self.revision += 1;

        self.log[self.revision - 1].execute();
    }

    fn undo(&mut self) {
        if self.revision == 0 {
            trace!("nothing to undo");
            return;
        }

        self.revision -= 1;
        let command = &self.log[self.revision];
        trace!("undo {}, now at revision {}", command.description(), self.revision);
        command.rollback();
    }

    fn redo(&mut self) {
        if self.revision == self.log.len() {
            trace!("nothing to redo");
            return;
        }

        let command = &self.log[self.revision];
        command.execute();
        self.revision += 1;
        trace!("redo {}, now at revision {}", command.description(), self.revision);
    }

    fn revision(&self) -> usize {
        self.revision
    }

    fn len(&self) -> usize {
        self.log.len()
    }
}

impl<C: ?Sized + Command> Default for History<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized + Command> fmt::Debug for History<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("revision", &self.revision)
            .field("len", &self.log.len())
            .field(
                "commands",
                &self.log.iter().map(|c| c.description()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
