//! Parser for GritVM program tokens → instructions.
//!
//! Every line has the shape `MNEMONIC [argument]`. A missing argument
//! means 0.

use crate::error::AsmError;
use crate::lexer::Token;
use gritvm_common::{Instruction, OpCode};

/// Parse the tokens of a single line into an instruction.
///
/// Returns `Ok(None)` for blank lines (empty token list).
pub(crate) fn parse_line(
    tokens: &[Token],
    line_num: usize,
) -> Result<Option<Instruction>, AsmError> {
    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    let operation = match first {
        Token::Ident(s) => s.parse::<OpCode>().map_err(|_| AsmError::UnknownOpcode {
            line: line_num,
            token: s.clone(),
        })?,
        Token::Number(n) => {
            return Err(AsmError::UnexpectedToken {
                line: line_num,
                token: n.to_string(),
            })
        }
    };

    let argument = match tokens.get(1) {
        Some(Token::Number(n)) => *n,
        Some(Token::Ident(s)) => {
            return Err(AsmError::UnexpectedToken {
                line: line_num,
                token: s.clone(),
            })
        }
        None => 0,
    };

    expect_end(tokens.get(2..).unwrap_or(&[]), line_num)?;
    Ok(Some(Instruction::new(operation, argument)))
}

/// Check that there are no extra tokens.
fn expect_end(remaining: &[Token], line: usize) -> Result<(), AsmError> {
    if let Some(tok) = remaining.first() {
        let token = match tok {
            Token::Ident(s) => s.clone(),
            Token::Number(n) => n.to_string(),
        };
        return Err(AsmError::UnexpectedToken { line, token });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> Token {
        Token::Ident(s.to_string())
    }

    fn num(n: i64) -> Token {
        Token::Number(n)
    }

    #[test]
    fn parse_empty_tokens() {
        assert!(parse_line(&[], 1).unwrap().is_none());
    }

    #[test]
    fn parse_with_argument() {
        let i = parse_line(&[ident("ADDCONST"), num(5)], 1).unwrap().unwrap();
        assert_eq!(i, Instruction::new(OpCode::AddConst, 5));
    }

    #[test]
    fn parse_missing_argument_defaults_to_zero() {
        let i = parse_line(&[ident("HALT")], 1).unwrap().unwrap();
        assert_eq!(i, Instruction::new(OpCode::Halt, 0));
    }

    #[test]
    fn parse_lowercase_mnemonic() {
        let i = parse_line(&[ident("jumprel"), num(-2)], 1).unwrap().unwrap();
        assert_eq!(i, Instruction::new(OpCode::JumpRel, -2));
    }

    #[test]
    fn parse_unknown_opcode() {
        let err = parse_line(&[ident("FOOBAR"), num(3)], 4).unwrap_err();
        assert_eq!(
            err,
            AsmError::UnknownOpcode {
                line: 4,
                token: "FOOBAR".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_reserved_marker_mnemonic() {
        let err = parse_line(&[ident("UNKNOWN_INSTRUCTION")], 1).unwrap_err();
        assert!(matches!(err, AsmError::UnknownOpcode { .. }));
    }

    #[test]
    fn parse_rejects_leading_number() {
        let err = parse_line(&[num(5), ident("HALT")], 2).unwrap_err();
        assert!(matches!(err, AsmError::UnexpectedToken { line: 2, .. }));
    }

    #[test]
    fn parse_rejects_identifier_argument() {
        let err = parse_line(&[ident("AT"), ident("X")], 1).unwrap_err();
        assert_eq!(
            err,
            AsmError::UnexpectedToken {
                line: 1,
                token: "X".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_extra_args() {
        let err = parse_line(&[ident("AT"), num(1), num(2)], 1).unwrap_err();
        assert_eq!(
            err,
            AsmError::UnexpectedToken {
                line: 1,
                token: "2".to_string()
            }
        );
    }
}
