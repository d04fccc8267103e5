//! Rejection of shell metacharacters, redirection and path traversal.
//!
//! Runs before anything else touches the arguments.

use crate::error::Error::ForbiddenSequence;
use crate::error::Result;

/// Sequences no argument may contain, in the order they are reported.
pub const FORBIDDEN_SEQUENCES: [&str; 9] = [";", "|", "&", "`", "$", ">", "<", "../", "..\\"];

/// Returns the first forbidden sequence found in `value`, if any.
#[must_use]
pub fn find_forbidden(value: &str) -> Option<&'static str> {
    FORBIDDEN_SEQUENCES
        .iter()
        .find(|fragment| value.contains(*fragment))
        .copied()
}

/// Checks every argument, stopping at the first offending one.
///
/// # Errors
///
/// Returns [`ForbiddenSequence`] naming the argument and the sequence found.
pub fn check_arguments<S: AsRef<str>>(args: &[S]) -> Result<()> {
    for argument in args {
        let argument = argument.as_ref();
        if let Some(fragment) = find_forbidden(argument) {
            return Err(ForbiddenSequence {
                argument: argument.to_string(),
                fragment: fragment.to_string(),
            });
        }
    }

    Ok(())
}
