//! Answer normalization: one paragraph, bounded length.

/// Longest answer returned, in characters, before the ellipsis marker.
pub const MAX_ANSWER_CHARS: usize = 900;

/// Appended when an answer was cut.
pub const ELLIPSIS: char = '…';

/// Collapse every whitespace run (line breaks included) to a single space,
/// trim, and cut to [`MAX_ANSWER_CHARS`] characters plus [`ELLIPSIS`].
pub fn normalize_answer(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(MAX_ANSWER_CHARS) {
        Some((cut, _)) => {
            let mut truncated = collapsed[..cut].to_string();
            truncated.push(ELLIPSIS);
            truncated
        }
        None => collapsed,
    }
}
