// src/extract/origin.rs
// =============================================================================
// Derives the origin (scheme + host + optional port) of a URL.
//
// The origin is the shortest prefix of the URL that ends in a character
// other than '/' or ':' and is followed by '/', '?' or the end of the
// string. For a well-formed URL that is everything before the path:
//
//   https://example.com/reports?x=1   -> https://example.com
//   http://127.0.0.1:8080/docs        -> http://127.0.0.1:8080
//
// The origin is used as a literal prefix (to absolutize relative hrefs and to
// keep page links on the same site), so it is sliced verbatim from the URL
// text rather than normalized.
// =============================================================================

/// Returns the origin prefix of `url`, or None when no prefix qualifies
/// (empty strings, bare "http://" and the like).
pub fn origin(url: &str) -> Option<&str> {
    let bytes = url.as_bytes();

    // At least two characters: ".+?" followed by one non-separator
    for end in 2..=bytes.len() {
        let last = bytes[end - 1];
        if last == b'/' || last == b':' {
            continue;
        }
        let at_boundary = match bytes.get(end) {
            None => true,
            Some(b'/') | Some(b'?') => true,
            Some(_) => false,
        };
        // Only cut on a char boundary (hosts may contain non-ASCII text)
        if at_boundary && url.is_char_boundary(end) {
            return Some(&url[..end]);
        }
    }

    None
}

/// Turns an href into an absolute URL: anything starting with "http" is
/// taken as-is, everything else is glued onto the page origin (with a '/'
/// in between when the href does not bring its own).
pub fn absolutize(origin: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else {
        format!("{}/{}", origin, href)
    }
}
