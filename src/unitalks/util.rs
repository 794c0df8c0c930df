//! Small helpers shared by export and the manifest projection.

/// Longest filename base produced by [`sanitize_title`].
const MAX_FILENAME_LEN: usize = 80;

const FALLBACK_FILENAME: &str = "script";

/// Reduce a script title to a safe filename base: word characters
/// (alphanumeric in any script, including Cyrillic, plus `_`), hyphens and
/// whitespace survive; everything else is dropped; whitespace runs collapse
/// to single hyphens; the result is trimmed and capped at 80 characters.
/// An empty result falls back to `"script"`.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let joined = kept.split_whitespace().collect::<Vec<_>>().join("-");
    let truncated: String = joined.chars().take(MAX_FILENAME_LEN).collect();

    if truncated.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        truncated
    }
}

/// The export filename for a script title: sanitized base plus `.json`.
pub fn script_filename(title: &str) -> String {
    format!("{}.json", sanitize_title(title))
}
