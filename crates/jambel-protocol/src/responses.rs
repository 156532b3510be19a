//! Response parsing for the Jambel protocol.
//!
//! Most responses are opaque. Only three are interpreted:
//! - `status`: `status=N,N,N[,N...]`, one code per position
//! - `test`: `OK` on success
//! - `version`: passed through

use crate::error::{ProtocolError, ProtocolResult};
use crate::types::StatusCode;

/// Prefix of a status response.
pub const STATUS_PREFIX: &str = "status=";

/// Self-test success marker.
pub const TEST_OK: &str = "OK";

/// Parse a status response into position-ordered codes.
///
/// The response must start with `status=` followed by comma-separated
/// decimal integers. Only the first three are used; the firmware may send
/// more. Anything after the digit list (line terminator, junk) is ignored.
pub fn parse_status(response: &str) -> ProtocolResult<[StatusCode; 3]> {
    let parse_error = || ProtocolError::StatusParse {
        raw: response.to_string(),
    };

    let body = response.strip_prefix(STATUS_PREFIX).ok_or_else(parse_error)?;
    let fields = digit_list(body);
    if fields.len() < 3 {
        return Err(parse_error());
    }

    let mut codes = [StatusCode::Off; 3];
    for (slot, field) in codes.iter_mut().zip(&fields) {
        let code: u32 = field.parse().map_err(|_| parse_error())?;
        *slot = u8::try_from(code)
            .ok()
            .and_then(StatusCode::from_code)
            .ok_or_else(|| ProtocolError::UnknownStatusCode {
                code,
                raw: response.to_string(),
            })?;
    }
    Ok(codes)
}

/// Split the leading `\d+(,\d+)*` run of `text` into its integer fields.
fn digit_list(text: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut rest = text;
    loop {
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if len == 0 {
            break;
        }
        fields.push(&rest[..len]);
        rest = &rest[len..];
        match rest.strip_prefix(',') {
            Some(next) if next.starts_with(|c: char| c.is_ascii_digit()) => rest = next,
            _ => break,
        }
    }
    fields
}

/// Interpret a self-test response.
pub fn parse_test(response: &str) -> bool {
    response.trim() == TEST_OK
}

/// Strip the line terminator from a pass-through response.
pub fn strip_line_end(response: &str) -> &str {
    response.trim_end_matches(['\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatusCode::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("status=0,0,0\r\n").unwrap(), [Off, Off, Off]);
    }

    #[test]
    fn test_parse_status_ignores_extra_fields() {
        assert_eq!(
            parse_status("status=2,3,4,1\r\n").unwrap(),
            [Blink, Flash, BlinkInverse]
        );
    }

    #[test]
    fn test_parse_status_incomplete_response() {
        // Seen in production from a flaky device link.
        let err = parse_status(",0,0\r\n").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::StatusParse {
                raw: ",0,0\r\n".to_string()
            }
        );
        assert_eq!(err.raw_response(), Some(",0,0\r\n"));
    }

    #[test]
    fn test_parse_status_too_few_fields() {
        assert!(parse_status("status=1,2\r\n").is_err());
        assert!(parse_status("status=1,2,\r\n").is_err());
        assert!(parse_status("status=\r\n").is_err());
    }

    #[test]
    fn test_parse_status_must_be_anchored() {
        assert!(parse_status(" status=1,1,1").is_err());
    }

    #[test]
    fn test_parse_status_unknown_code() {
        let err = parse_status("status=1,9,1\r\n").unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownStatusCode { code: 9, .. }));
        assert_eq!(err.raw_response(), Some("status=1,9,1\r\n"));
    }

    #[test]
    fn test_parse_status_overflowing_code() {
        assert!(parse_status("status=99999999999,0,0").is_err());
    }

    #[test]
    fn test_parse_test() {
        assert!(parse_test("OK\r\n"));
        assert!(parse_test("  OK "));
        assert!(!parse_test("OK!\r\n"));
        assert!(!parse_test("FAIL\r\n"));
        assert!(!parse_test(""));
    }

    #[test]
    fn test_strip_line_end() {
        assert_eq!(strip_line_end("Jambel 1.2\r\n"), "Jambel 1.2");
        assert_eq!(strip_line_end(" v1 "), " v1 ");
    }
}
