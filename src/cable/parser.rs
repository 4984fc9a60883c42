//! Parser for `/interface ethernet cable-test <port> once` output.
//!
//! The format is positional. Assumed layout (RouterOS 6/7):
//!
//! ```text
//!         name: ether3
//!       status: no-link
//!  cable-pairs: open:4,open:4,normal:0,short:12
//! ```
//!
//! Line 2 carries the link state; line 3 carries the pairs, and is only
//! present when no link is established.

use tracing::{debug, info};

use super::{CableTestReport, WirePair};
use crate::parse::ParseError;

const MIN_LINES: usize = 3;
const LINK_STATE_LINE: usize = 1;
const PAIRS_LINE: usize = 2;
const PAIR_COUNT: usize = 4;
const NO_LINK: &str = "no-link";

/// Parse a raw cable-test capture.
pub fn parse(raw: &str) -> Result<CableTestReport, ParseError> {
    let lines: Vec<&str> = raw.split('\n').collect();
    if lines.len() < MIN_LINES {
        return Err(ParseError::UnexpectedLineCount {
            expected: MIN_LINES,
            found: lines.len(),
            input: raw.to_string(),
        });
    }

    let link_established = parse_link_state(lines[LINK_STATE_LINE])?;
    if link_established {
        info!(link_established, "parsed cable test");
        return Ok(CableTestReport::with_link());
    }

    let pairs = parse_pairs(lines[PAIRS_LINE])?;
    info!(
        link_established,
        normal = pairs.iter().all(WirePair::is_normal),
        "parsed cable test"
    );
    Ok(CableTestReport::without_link(pairs))
}

/// Value after the first `": "` of a `label: value` line.
fn labelled_value(line: &str) -> Result<&str, ParseError> {
    line.split_once(": ")
        .map(|(_, value)| value)
        .ok_or_else(|| ParseError::malformed("missing ': ' separator", line))
}

fn parse_link_state(line: &str) -> Result<bool, ParseError> {
    let state = labelled_value(line)?.trim();
    debug!(state, "cable test link state");
    Ok(state != NO_LINK)
}

fn parse_pairs(line: &str) -> Result<[WirePair; 4], ParseError> {
    let value = labelled_value(line)?;
    let segments: Vec<&str> = value.split(',').collect();
    if segments.len() != PAIR_COUNT {
        return Err(ParseError::malformed("expected four pair segments", line));
    }

    let mut pairs = Vec::with_capacity(PAIR_COUNT);
    for segment in segments {
        pairs.push(parse_pair(segment)?);
    }
    pairs
        .try_into()
        .map_err(|_| ParseError::malformed("expected four pair segments", line))
}

fn parse_pair(segment: &str) -> Result<WirePair, ParseError> {
    let Some((conductor_type, length)) = segment.split_once(':') else {
        return Err(ParseError::malformed("pair segment without ':'", segment));
    };
    let length_meters = length
        .trim()
        .parse::<u32>()
        .map_err(|_| ParseError::numeric("pair length", segment))?;
    Ok(WirePair::new(conductor_type.trim(), length_meters))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(status: &str, pairs: &str) -> String {
        format!("        name: ether3\n      status: {status}\n  cable-pairs: {pairs}\n")
    }

    #[test]
    fn test_no_link_reads_pairs_in_order() {
        let report = parse(&capture("no-link", "normal:0,open:3,normal:1,short:12")).unwrap();
        assert!(!report.link_established);
        assert_eq!(
            report.pairs,
            Some([
                WirePair::new("normal", 0),
                WirePair::new("open", 3),
                WirePair::new("normal", 1),
                WirePair::new("short", 12),
            ])
        );
    }

    #[test]
    fn test_link_up_skips_pairs() {
        // Line 3 would be invalid as pair data; it must not be read.
        let raw = "        name: ether3\n      status: link-ok\n        speed: 1Gbps\n";
        let report = parse(raw).unwrap();
        assert!(report.link_established);
        assert!(report.pairs.is_none());
    }

    #[test]
    fn test_status_is_trimmed() {
        let raw = "name: ether3\r\nstatus: no-link \r\ncable-pairs: normal:1,normal:1,normal:1,normal:1\r\n";
        let report = parse(raw).unwrap();
        assert!(!report.link_established);
        assert!(report.is_normal());
    }

    #[test]
    fn test_too_few_lines() {
        let err = parse("name: ether3\nstatus: no-link").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedLineCount { found: 2, .. }));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_link_line_without_separator() {
        let err = parse("name: ether3\nstatus no-link\ncable-pairs: a:1,b:1,c:1,d:1").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { .. }));
    }

    #[test]
    fn test_pairs_line_without_separator() {
        let raw = "name: ether3\nstatus: no-link\ncable-pairs normal:0,normal:0,normal:0,normal:0";
        let err = parse(raw).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_wrong_pair_count() {
        let err = parse(&capture("no-link", "normal:0,normal:0,normal:0")).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_pair_without_colon() {
        let err = parse(&capture("no-link", "normal,normal:0,normal:0,normal:0")).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_pair_with_non_numeric_length() {
        let err = parse(&capture("no-link", "normal:abc,normal:0,normal:0,normal:0")).unwrap_err();
        assert_eq!(
            err,
            ParseError::Numeric {
                field: "pair length",
                text: "normal:abc".to_string()
            }
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = capture("no-link", "open:4,open:4,normal:0,short:12");
        assert_eq!(parse(&raw).unwrap(), parse(&raw).unwrap());
    }
}
