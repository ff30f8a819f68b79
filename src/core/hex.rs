use crate::domain::model::{ByteSequence, Token};
use crate::utils::error::{ConvertError, Result};

/// Built-in test program: ten little-endian RV32I/RV64I instruction words.
pub const DEFAULT_PROGRAM: &str = "
13 05 50 00
13 06 c0 00
3b 84 c5 40
23 2e 81 fe
83 24 c1 ff
13 05 10 00
63 14 94 00
6f 00 40 00
13 05 00 00
67 00 00 00
";

pub const DEFAULT_OUTPUT_PATH: &str = "comprehensive_test.bin";

/// Splits on any whitespace; empty pieces never appear.
pub fn tokenize(input: &str) -> Vec<Token> {
    input
        .split_whitespace()
        .enumerate()
        .map(|(position, text)| Token {
            position,
            text: text.to_string(),
        })
        .collect()
}

/// Parses one token as a base-16 byte.
///
/// Accepts an optional sign, an optional `0x`/`0X` prefix (which may be
/// followed by one `_`), and single underscores between digits, so `+f`,
/// `0x13` and `1_3` all parse. Leading zeros are fine (`000f` is 0x0f).
/// Anything above 0xff, or any negative value other than zero, is out of
/// range.
pub fn parse_token(token: &Token) -> Result<u8> {
    let invalid = || ConvertError::InvalidTokenError {
        token: token.text.clone(),
        position: token.position,
    };
    let out_of_range = || ConvertError::OutOfRangeError {
        token: token.text.clone(),
        position: token.position,
    };

    let text = token.text.as_str();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'+') => (false, &text[1..]),
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    };

    let body = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(rest) => rest.strip_prefix('_').unwrap_or(rest),
        None => unsigned,
    };

    let well_formed = !body.is_empty()
        && !body.starts_with('_')
        && !body.ends_with('_')
        && !body.contains("__")
        && body.bytes().all(|b| b.is_ascii_hexdigit() || b == b'_');
    if !well_formed {
        return Err(invalid());
    }

    let digits: String = body.chars().filter(|c| *c != '_').collect();
    let significant = digits.trim_start_matches('0');

    // 全為 0 時 significant 為空字串，-0 亦為 0
    if significant.is_empty() {
        return Ok(0);
    }
    if negative || significant.len() > 2 {
        return Err(out_of_range());
    }

    u8::from_str_radix(significant, 16).map_err(|_| invalid())
}

/// Parses every token in order, stopping at the first bad one.
pub fn parse_tokens(tokens: &[Token]) -> Result<ByteSequence> {
    tokens.iter().map(parse_token).collect()
}

/// Renders bytes back to the space-separated two-digit form.
pub fn encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(position: usize, text: &str) -> Token {
        Token {
            position,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_tokenize_mixed_whitespace() {
        let tokens = tokenize("  13 05\n\t50   00\r\n");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["13", "05", "50", "00"]);
        assert_eq!(tokens[3].position, 3);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }

    #[test]
    fn test_parse_token_valid() {
        assert_eq!(parse_token(&tok(0, "00")).unwrap(), 0x00);
        assert_eq!(parse_token(&tok(0, "ff")).unwrap(), 0xff);
        assert_eq!(parse_token(&tok(0, "C5")).unwrap(), 0xc5);
        assert_eq!(parse_token(&tok(0, "f")).unwrap(), 0x0f);
        assert_eq!(parse_token(&tok(0, "00fe")).unwrap(), 0xfe);
    }

    #[test]
    fn test_parse_token_prefixes_signs_and_underscores() {
        let cases = [
            ("0x13", 0x13u8),
            ("0X13", 0x13),
            ("+f", 0x0f),
            ("1_3", 0x13),
            ("0x_fe", 0xfe),
            ("+0xff", 0xff),
            ("-0", 0x00),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_token(&tok(0, text)).unwrap(), expected, "token {text}");
        }
    }

    #[test]
    fn test_parse_token_invalid_hex() {
        for bad in ["zz", "6g", "0x", "_13", "13_", "1__3", "++1", "0x__1", "+", ""] {
            match parse_token(&tok(7, bad)) {
                Err(ConvertError::InvalidTokenError { token, position }) => {
                    assert_eq!(token, bad);
                    assert_eq!(position, 7);
                }
                other => panic!("expected InvalidTokenError for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_token_out_of_range() {
        for wide in ["100", "fff", "123456789abcdef0123", "0x1_00", "-1", "-0x13"] {
            assert!(matches!(
                parse_token(&tok(0, wide)),
                Err(ConvertError::OutOfRangeError { .. })
            ));
        }
    }

    #[test]
    fn test_parse_tokens_reports_first_bad_token() {
        let tokens = tokenize("13 05 zz 00 qq");
        match parse_tokens(&tokens) {
            Err(ConvertError::InvalidTokenError { token, position }) => {
                assert_eq!(token, "zz");
                assert_eq!(position, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_default_program_decodes_to_forty_bytes() {
        let bytes = parse_tokens(&tokenize(DEFAULT_PROGRAM)).unwrap();
        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes.as_bytes()[..4], &[0x13, 0x05, 0x50, 0x00]);
        assert_eq!(&bytes.as_bytes()[36..], &[0x67, 0x00, 0x00, 0x00]);

        // 第一個指令字為 addi a0, zero, 5
        let word = u32::from_le_bytes([0x13, 0x05, 0x50, 0x00]);
        assert_eq!(word, 0x0050_0513);
    }

    #[test]
    fn test_encode_matches_default_program() {
        let bytes = parse_tokens(&tokenize(DEFAULT_PROGRAM)).unwrap();
        let expected = tokenize(DEFAULT_PROGRAM)
            .into_iter()
            .map(|t| t.text)
            .collect::<Vec<String>>()
            .join(" ");
        assert_eq!(encode(bytes.as_bytes()), expected);
    }
}
