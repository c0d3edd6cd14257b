//! Diagnostics printed by the console.
//!
//! Every variant renders as exactly one line of output. None of them stop
//! the console; the dispatcher prints the line and waits for the next
//! command.

use thiserror::Error;

/// A failed command.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("** class name missing **")]
    ClassNameMissing,

    #[error("** class doesn't exist **")]
    ClassDoesNotExist,

    #[error("** instance id missing **")]
    InstanceIdMissing,

    #[error("** no instance found **")]
    InstanceNotFound,

    #[error("** attribute name missing **")]
    AttributeNameMissing,

    #[error("** value missing **")]
    ValueMissing,

    #[error("** attribute can't be updated **")]
    ReadOnlyAttribute,

    #[error("** incorrect function (all, count, show, destroy, update) **")]
    IncorrectFunction,

    #[error("*** Unknown syntax: {0}")]
    UnknownSyntax(String),

    #[error("** storage error: {0} **")]
    Storage(#[from] hbnb_store::StoreError),

    /// Writing to the output stream failed. The console cannot report this
    /// one to the user and stops.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_render_exactly() {
        assert_eq!(ShellError::ClassNameMissing.to_string(), "** class name missing **");
        assert_eq!(ShellError::ClassDoesNotExist.to_string(), "** class doesn't exist **");
        assert_eq!(ShellError::InstanceIdMissing.to_string(), "** instance id missing **");
        assert_eq!(ShellError::InstanceNotFound.to_string(), "** no instance found **");
        assert_eq!(
            ShellError::AttributeNameMissing.to_string(),
            "** attribute name missing **"
        );
        assert_eq!(ShellError::ValueMissing.to_string(), "** value missing **");
        assert_eq!(
            ShellError::UnknownSyntax("frobnicate".into()).to_string(),
            "*** Unknown syntax: frobnicate"
        );
    }
}
