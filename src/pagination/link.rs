//! Link header parsing (RFC 5988)
//!
//! GitLab announces neighbouring pages in a `Link` header:
//! `<https://gitlab.example.com/api/v3/projects?page=2>; rel="next", ...`
//! This is informational only; the paginator stops on an empty page.

/// URL tagged `rel="next"`, if any
pub fn next_link(header: &str) -> Option<String> {
    parse_link_header(header, "next")
}

/// Parse a Link header and extract the URL for the given rel
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            // rel may hold several space-separated relation types
            if r.split_whitespace().any(|r| r == target_rel) {
                return Some(u.to_string());
            }
        }
    }

    None
}
