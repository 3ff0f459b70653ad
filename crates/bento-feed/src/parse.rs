//! Feed XML scanning.
//!
//! The feed is an Atom document whose `<entry>` elements each carry a
//! `<yt:videoId>` and a `<title>`. Only those two elements are needed, so
//! instead of building a document tree this module scans for them by
//! exact qualified name (`<title>` does not match `<media:title>`).
//! Malformed input never panics; it just yields fewer entries.

use bento_types::block::VideoSummary;

use crate::youtube::thumbnail_url;

/// Parse up to `limit` entries from feed XML.
///
/// Entries are taken in document order; an entry without a video id is
/// dropped after the limit is applied.
pub fn parse_feed(xml: &str, limit: usize) -> Vec<VideoSummary> {
    let mut videos = Vec::with_capacity(limit.min(16));
    let mut rest = xml;
    let mut seen = 0;

    while seen < limit {
        let Some((entry, end)) = next_element(rest, "entry") else {
            break;
        };
        rest = &rest[end..];
        seen += 1;

        let id = first_text(entry, "yt:videoId").unwrap_or_default();
        if id.is_empty() {
            log::debug!("feed entry {seen} has no video id, skipping");
            continue;
        }
        let title = first_text(entry, "title").unwrap_or_default();
        videos.push(VideoSummary {
            thumbnail: thumbnail_url(&id),
            id,
            title,
        });
    }
    videos
}

/// Decoded text of the first `name` element in `xml`.
fn first_text(xml: &str, name: &str) -> Option<String> {
    next_element(xml, name).map(|(inner, _)| element_text(inner))
}

/// Find the first `name` element. Returns its inner markup and the byte
/// offset just past its end.
fn next_element<'a>(xml: &'a str, name: &str) -> Option<(&'a str, usize)> {
    let mut from = 0;
    while let Some(rel) = xml[from..].find('<') {
        let start = from + rel;
        from = start + 1;
        let Some(tail) = xml[start + 1..].strip_prefix(name) else {
            continue;
        };
        match tail.chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => {},
            _ => continue,
        }
        let close = tail.find('>')?;
        let content_start = start + 1 + name.len() + close + 1;
        if tail[..close].ends_with('/') {
            return Some(("", content_start));
        }
        let end_tag = format!("</{name}>");
        let inner_len = xml[content_start..].find(&end_tag)?;
        let inner = &xml[content_start..content_start + inner_len];
        return Some((inner, content_start + inner_len + end_tag.len()));
    }
    None
}

/// Text content of an element: CDATA verbatim, otherwise entity-decoded.
fn element_text(inner: &str) -> String {
    const CDATA_OPEN: &str = "<![CDATA[";
    if let Some(start) = inner.find(CDATA_OPEN) {
        let body = &inner[start + CDATA_OPEN.len()..];
        let end = body.find("]]>").unwrap_or(body.len());
        return body[..end].trim().to_string();
    }
    decode_entities(inner.trim())
}

/// Replace XML character references. Unknown references are kept as-is.
fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= 12)
            .and_then(|end| decode_reference(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            },
            None => {
                out.push('&');
                rest = &tail[1..];
            },
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        },
    }
}
