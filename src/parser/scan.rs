/*!
 * Payload Scanner
 * Tokenizer for the write grammar: `num=` directives and `0b` value literals
 */

use super::types::{PendingValues, TokenError, WriteCommand};
use crate::core::limits::{
    DIRECTIVE_PREFIX, TOKEN_SEPARATOR, VALUE_BIT_WIDTH, VALUE_LITERAL_PREFIX, VALUE_TOKEN_LEN,
};
use log::warn;

/// Parse one write payload into a command.
///
/// The payload is scanned as raw bytes. A payload starting with `num=` is
/// always a control directive and is never value-scanned. Anything else is
/// split on `;` into sub-tokens, each matched against the fixed-width literal
/// rule. Malformed sub-tokens are logged, counted, and skipped; they never
/// abort the rest of the batch.
#[must_use]
pub fn parse_payload(payload: &[u8]) -> WriteCommand {
    if payload.starts_with(DIRECTIVE_PREFIX) {
        return parse_directive(&payload[DIRECTIVE_PREFIX.len()..]);
    }

    let mut values = PendingValues::new();
    let mut rejected = 0usize;

    for token in payload.split(|&b| b == TOKEN_SEPARATOR) {
        match parse_value_token(token) {
            Ok(value) => {
                if let Err(err) = values.push(value) {
                    warn!(
                        "Rejected token {:?}: {}",
                        String::from_utf8_lossy(token),
                        err
                    );
                    rejected += 1;
                }
            }
            Err(err) => {
                warn!(
                    "Rejected token {:?}: {}",
                    String::from_utf8_lossy(token),
                    err
                );
                rejected += 1;
            }
        }
    }

    WriteCommand::Enqueue { values, rejected }
}

/// Match one sub-token against the literal rule.
///
/// Only the token's final `VALUE_TOKEN_LEN` bytes participate: the candidate
/// bit field is the last `VALUE_BIT_WIDTH` bytes and the two bytes just before
/// it must be the `0b` prefix. Bytes before that window are ignored, so
/// `xx0b00000001` still decodes to 1.
fn parse_value_token(token: &[u8]) -> Result<u8, TokenError> {
    if token.len() < VALUE_TOKEN_LEN {
        return Err(TokenError::TooShort { len: token.len() });
    }

    let window = &token[token.len() - VALUE_TOKEN_LEN..];
    let (prefix, bits) = window.split_at(VALUE_LITERAL_PREFIX.len());
    if prefix != VALUE_LITERAL_PREFIX {
        return Err(TokenError::MissingPrefix {
            found: String::from_utf8_lossy(prefix).into_owned(),
        });
    }

    decode_bits(bits)
}

/// Fold a most-significant-bit-first bit field into a byte
fn decode_bits(bits: &[u8]) -> Result<u8, TokenError> {
    debug_assert_eq!(bits.len(), VALUE_BIT_WIDTH);

    let mut value = 0u8;
    for (index, &byte) in bits.iter().enumerate() {
        value <<= 1;
        match byte {
            b'0' => {}
            b'1' => value |= 1,
            other => {
                return Err(TokenError::InvalidBit {
                    index,
                    byte: other as char,
                })
            }
        }
    }
    Ok(value)
}

/// Parse the tail of a `num=<n>` directive.
///
/// An optional leading `-` is accepted and the integer is passed through
/// without range checks; bytes after the last digit are ignored. A malformed
/// tail rejects the whole payload and no values are produced.
fn parse_directive(tail: &[u8]) -> WriteCommand {
    match scan_integer(tail) {
        Some(count) => WriteCommand::SetReadCount(count),
        None => {
            warn!(
                "Rejected directive: {}",
                TokenError::BadDirective {
                    digits: String::from_utf8_lossy(tail).into_owned(),
                }
            );
            WriteCommand::Enqueue {
                values: PendingValues::new(),
                rejected: 1,
            }
        }
    }
}

/// Leading decimal integer: optional sign, then at least one digit
fn scan_integer(input: &[u8]) -> Option<i64> {
    let (negative, body) = match input.first() {
        Some(b'-') => (true, &input[1..]),
        _ => (false, input),
    };

    let digits = body.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let mut value = 0i64;
    for &byte in &body[..digits] {
        value = value
            .checked_mul(10)?
            .checked_add(i64::from(byte - b'0'))?;
    }
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn enqueue(payload: &[u8]) -> (Vec<u8>, usize) {
        match parse_payload(payload) {
            WriteCommand::Enqueue { values, rejected } => (values.as_slice().to_vec(), rejected),
            other => panic!("expected an enqueue command, got {:?}", other),
        }
    }

    #[test]
    fn test_single_literal() {
        assert_eq!(enqueue(b"0b00000000"), (vec![0], 0));
        assert_eq!(enqueue(b"0b11111111"), (vec![255], 0));
        assert_eq!(enqueue(b"0b00001010"), (vec![10], 0));
    }

    #[test]
    fn test_batch_in_order() {
        let (values, rejected) = enqueue(b"0b00000001;0b00000010;0b00000011");
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(rejected, 0);
    }

    #[test]
    fn test_malformed_token_skipped_mid_batch() {
        let (values, rejected) = enqueue(b"0b00000001;garbage;0b00000010");
        assert_eq!(values, vec![1, 2]);
        assert_eq!(rejected, 1);
    }

    #[test]
    fn test_leading_junk_before_prefix_ignored() {
        assert_eq!(enqueue(b"xx0b00000001"), (vec![1], 0));
    }

    #[test]
    fn test_short_bit_field_rejected() {
        // 7 bits: the window never lines up with the prefix
        assert_eq!(enqueue(b"0b0000001"), (vec![], 1));
    }

    #[test]
    fn test_long_bit_field_rejected() {
        // 9 bits: the trailing window starts at 'b', so the prefix check fails
        assert_eq!(enqueue(b"0b000000001"), (vec![], 1));
    }

    #[test]
    fn test_non_binary_digit_rejected() {
        let (values, rejected) = enqueue(b"0b00000a01");
        assert!(values.is_empty());
        assert_eq!(rejected, 1);
    }

    #[test]
    fn test_empty_payload_produces_nothing() {
        assert_eq!(enqueue(b""), (vec![], 1));
    }

    #[test]
    fn test_trailing_separator_counts_one_rejection() {
        assert_eq!(enqueue(b"0b00000001;"), (vec![1], 1));
    }

    #[test]
    fn test_directive_parses_signed_integers() {
        assert_eq!(parse_payload(b"num=3"), WriteCommand::SetReadCount(3));
        assert_eq!(parse_payload(b"num=12"), WriteCommand::SetReadCount(12));
        assert_eq!(parse_payload(b"num=0"), WriteCommand::SetReadCount(0));
        assert_eq!(parse_payload(b"num=-2"), WriteCommand::SetReadCount(-2));
    }

    #[test]
    fn test_directive_ignores_trailing_bytes() {
        assert_eq!(
            parse_payload(b"num=5;0b00000001"),
            WriteCommand::SetReadCount(5)
        );
        assert_eq!(parse_payload(b"num=7abc"), WriteCommand::SetReadCount(7));
    }

    #[test]
    fn test_directive_shadows_value_scan() {
        // A payload starting with num= never reaches the literal scanner
        assert_eq!(
            parse_payload(b"num=1;0b11111111;0b00000001"),
            WriteCommand::SetReadCount(1)
        );
    }

    #[test]
    fn test_malformed_directive_rejected() {
        assert_eq!(enqueue(b"num=x"), (vec![], 1));
        assert_eq!(enqueue(b"num="), (vec![], 1));
        assert_eq!(enqueue(b"num=-"), (vec![], 1));
    }

    #[test]
    fn test_directive_overflow_rejected() {
        assert_eq!(enqueue(b"num=99999999999999999999999999"), (vec![], 1));
    }

    proptest! {
        #[test]
        fn prop_every_byte_round_trips(value in any::<u8>()) {
            let payload = format!("0b{:08b}", value);
            let (values, rejected) = enqueue(payload.as_bytes());
            prop_assert_eq!(values, vec![value]);
            prop_assert_eq!(rejected, 0);
        }

        #[test]
        fn prop_arbitrary_bytes_never_panic(payload in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = parse_payload(&payload);
        }
    }
}
