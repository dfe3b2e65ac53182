use std::borrow::Cow;

/// A reversible unit of change bound to the domain object it mutates.
///
/// A command carries everything it needs for both directions from the moment it is built: a
/// shared handle to its target (see [`Shared`](crate::shared::Shared)) and its immutable
/// parameters. It does not track whether it has been applied; the history that owns it guarantees
/// that `rollback` only ever follows a matching `execute`.
///
/// # Required Methods
///
/// * `execute(&self)`: Applies the forward mutation.
/// * `rollback(&self)`: Applies the exact inverse of `execute`.
///
/// # Provided Methods
///
/// * `description(&self) -> Cow<str>`: Returns a label for logging and inspection. The default
///   implementation returns "Unknown command".
///
/// # Example
///
/// ```
/// use revision_history::prelude::{Command, Shared};
/// use std::borrow::Cow;
///
/// struct Push {
///     target: Shared<Vec<char>>,
///     value: char,
/// }
///
/// impl Command for Push {
///     fn execute(&self) {
///         self.target.lock().push(self.value);
///     }
///
///     fn rollback(&self) {
///         self.target.lock().pop();
///     }
///
///     fn description(&self) -> Cow<'_, str> {
///         Cow::Owned(format!("push {:?}", self.value))
///     }
/// }
///
/// let target = Shared::new(Vec::new());
/// let cmd = Push { target: target.clone(), value: 'a' };
/// cmd.execute();
/// assert_eq!(*target.lock(), ['a']);
/// cmd.rollback();
/// assert!(target.lock().is_empty());
/// ```
pub trait Command {
    /// Applies the forward mutation to the bound domain object.
    fn execute(&self);

    /// Applies the inverse mutation. Only valid immediately after a matching `execute`.
    fn rollback(&self);

    /// Returns a description of the command. The default implementation returns "Unknown command".
    fn description(&self) -> Cow<'_, str> {
        Cow::Borrowed("Unknown command")
    }
}

impl<C: Command + ?Sized> Command for Box<C> {
    fn execute(&self) {
        (**self).execute();
    }

    fn rollback(&self) {
        (**self).rollback();
    }

    fn description(&self) -> Cow<'_, str> {
        (**self).description()
    }
}
