//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing per RFC 7233. Multi-range and non-byte
//! units are ignored and answered with the full content.

/// Outcome of parsing a Range header against a known file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// No Range header, or one we ignore; serve the whole file
    Full,
    /// Inclusive byte slice to serve with 206
    Slice { start: usize, end: usize },
    /// Range cannot be satisfied; answer 416
    Unsatisfiable,
}

/// Parse an HTTP Range header
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
///
/// # Examples
/// ```
/// use spaserve::http::range::{parse_range_header, ByteRange};
///
/// assert_eq!(parse_range_header(Some("bytes=0-99"), 1000), ByteRange::Slice { start: 0, end: 99 });
/// assert_eq!(parse_range_header(None, 1000), ByteRange::Full);
/// assert_eq!(parse_range_header(Some("bytes=2000-"), 1000), ByteRange::Unsatisfiable);
/// ```
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> ByteRange {
    let Some(header) = range_header else {
        return ByteRange::Full;
    };
    let Some(spec) = header.strip_prefix("bytes=") else {
        return ByteRange::Full;
    };
    // single range only
    if spec.contains(',') || file_size == 0 {
        return ByteRange::Full;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return ByteRange::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    // "-500": last 500 bytes
    if start_str.is_empty() {
        let Ok(suffix) = end_str.parse::<usize>() else {
            return ByteRange::Full;
        };
        if suffix == 0 {
            return ByteRange::Unsatisfiable;
        }
        return ByteRange::Slice {
            start: file_size.saturating_sub(suffix),
            end: file_size - 1,
        };
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return ByteRange::Full;
    };
    if start >= file_size {
        return ByteRange::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(e) = end_str.parse::<usize>() else {
            return ByteRange::Full;
        };
        e.min(file_size - 1)
    };

    if start > end {
        return ByteRange::Unsatisfiable;
    }
    ByteRange::Slice { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_serves_full() {
        assert_eq!(parse_range_header(None, 100), ByteRange::Full);
    }

    #[test]
    fn bounded_range() {
        assert_eq!(
            parse_range_header(Some("bytes=0-9"), 100),
            ByteRange::Slice { start: 0, end: 9 }
        );
    }

    #[test]
    fn open_ended_range() {
        assert_eq!(
            parse_range_header(Some("bytes=50-"), 100),
            ByteRange::Slice { start: 50, end: 99 }
        );
    }

    #[test]
    fn suffix_range() {
        assert_eq!(
            parse_range_header(Some("bytes=-20"), 100),
            ByteRange::Slice { start: 80, end: 99 }
        );
        // suffix longer than the file clamps to the whole file
        assert_eq!(
            parse_range_header(Some("bytes=-500"), 100),
            ByteRange::Slice { start: 0, end: 99 }
        );
    }

    #[test]
    fn end_clamped_to_file_size() {
        assert_eq!(
            parse_range_header(Some("bytes=90-500"), 100),
            ByteRange::Slice { start: 90, end: 99 }
        );
    }

    #[test]
    fn unsatisfiable_ranges() {
        assert_eq!(
            parse_range_header(Some("bytes=200-"), 100),
            ByteRange::Unsatisfiable
        );
        assert_eq!(
            parse_range_header(Some("bytes=-0"), 100),
            ByteRange::Unsatisfiable
        );
    }

    #[test]
    fn ignored_forms_serve_full() {
        assert_eq!(parse_range_header(Some("bytes=a-b"), 100), ByteRange::Full);
        assert_eq!(
            parse_range_header(Some("bytes=0-9,20-29"), 100),
            ByteRange::Full
        );
        assert_eq!(parse_range_header(Some("items=0-9"), 100), ByteRange::Full);
    }
}
