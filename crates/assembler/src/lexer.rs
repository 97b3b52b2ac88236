//! Tokenizer for GritVM program text.

use crate::error::AsmError;

/// A single token from a program line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// An identifier (opcode mnemonic). Kept as written.
    Ident(String),
    /// A signed integer literal (decimal or `0x` hex).
    Number(i64),
}

/// Returns true for words that should be read as numbers: an optional sign
/// followed by a digit.
fn looks_numeric(word: &str) -> bool {
    let digits = word.strip_prefix(['-', '+']).unwrap_or(word);
    digits.as_bytes().first().is_some_and(|b| b.is_ascii_digit())
}

fn parse_number(word: &str) -> Option<i64> {
    let (negative, rest) = match word.as_bytes().first() {
        Some(b'-') => (true, &word[1..]),
        Some(b'+') => (false, &word[1..]),
        _ => (false, word),
    };

    if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        if hex.starts_with(['+', '-']) {
            return None;
        }
        let magnitude = i128::from_str_radix(hex, 16).ok()?;
        let value = if negative { -magnitude } else { magnitude };
        i64::try_from(value).ok()
    } else {
        // `i64::from_str` accepts its own sign, so hand it the original word.
        word.parse().ok()
    }
}

/// Tokenize a single line of program text.
///
/// Returns an empty Vec for blank lines.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<Token>, AsmError> {
    let mut tokens = Vec::new();
    for word in line.split_whitespace() {
        let token = if looks_numeric(word) {
            let value = parse_number(word).ok_or_else(|| AsmError::InvalidNumber {
                line: line_num,
                token: word.to_string(),
            })?;
            Token::Number(value)
        } else {
            Token::Ident(word.to_string())
        };
        tokens.push(token);
    }

    Ok(tokens)
}
