//! Confirmation guard for destructive commands

use std::io;

/// Fail unless the user passed `--yes`
pub fn require(yes: bool, what: &str) -> io::Result<()> {
    if yes {
        return Ok(());
    }
    Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("Refusing to {} without --yes (this cannot be undone)", what),
    ))
}
