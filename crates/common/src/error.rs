//! Errors for GritVM instruction lookup.

use thiserror::Error;

/// A mnemonic that does not name any executable opcode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mnemonic '{0}'")]
pub struct MnemonicError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_mnemonic() {
        assert_eq!(
            MnemonicError("FOOBAR".to_string()).to_string(),
            "unknown mnemonic 'FOOBAR'"
        );
    }
}
