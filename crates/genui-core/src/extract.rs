//! Stream extractor: isolates one JSON object from generation text.
//!
//! Models wrap their JSON in markdown fences, lead with prose, or get cut off
//! mid-object. The extractor picks the best candidate and never fails; a
//! candidate that is not JSON is caught by the parser afterwards.

const FENCE: &str = "```";

/// Returns the best-effort JSON object text within `text`.
///
/// Priority: the inner content of the first complete fenced code block, then
/// the first balanced `{...}` span, then `text` unchanged.
///
/// Safe to call on a partial stream buffer; an unterminated fence or object
/// simply yields no candidate.
pub fn extract_json(text: &str) -> &str {
    find_json(text).unwrap_or(text)
}

/// Like [`extract_json`] but `None` when neither a fence nor a balanced
/// object is present.
pub fn find_json(text: &str) -> Option<&str> {
    fenced_block(text).or_else(|| balanced_object(text))
}

/// Inner content of the first fenced block that has a closing fence, with
/// the info string (```` ```json ````) removed.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let rest = &text[open + FENCE.len()..];
    let close = rest.find(FENCE)?;
    let inner = &rest[..close];

    let tag_len = inner
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
        .count();
    let after_tag = &inner[tag_len..];
    let body = if tag_len > 0 && after_tag.starts_with(|c: char| c.is_whitespace() || c == '{') {
        after_tag
    } else {
        inner
    };

    Some(body.trim())
}

/// First `{...}` span whose braces balance, ignoring braces inside string
/// literals.
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut index = start;

    while index < bytes.len() {
        let byte = bytes[index];
        if in_string {
            match byte {
                // Skip whatever is escaped, including \" and \\.
                b'\\' => index += 1,
                b'"' => in_string = false,
                _ => {}
            }
        } else {
            match byte {
                b'"' => in_string = true,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[start..=index]);
                    }
                }
                _ => {}
            }
        }
        index += 1;
    }

    None
}
