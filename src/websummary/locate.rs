use crate::error::ExtractError;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

// Cell Ranger writes `<script type="text/javascript">const data = {...}</script>`.
static DATA_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<script\b[^>]*>\s*const\s+data\s*=").expect("valid data script pattern")
});

const SCRIPT_END: &str = "</script>";

/// Returns the raw JSON text of the embedded `const data = ...` assignment.
pub fn find_payload_text(html: &str) -> Option<&str> {
    let start = DATA_SCRIPT.find(html)?.end();
    let rest = &html[start..];
    let end = rest.find(SCRIPT_END).unwrap_or(rest.len());
    let text = rest[..end].trim();
    let text = text.strip_suffix(';').unwrap_or(text).trim_end();
    if text.is_empty() { None } else { Some(text) }
}

/// Finds and decodes the embedded web summary payload.
pub fn locate(html: &str) -> Result<Value, ExtractError> {
    let text = find_payload_text(html).ok_or(ExtractError::NotFound)?;
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_semicolon() {
        let html = "<script>const data = {\"a\": 1};\n</script>";
        assert_eq!(find_payload_text(html), Some("{\"a\": 1}"));
    }

    #[test]
    fn ignores_other_scripts() {
        let html = "<script src=\"x.js\"></script><script>var x = 1;</script>\
                    <script type=\"text/javascript\">\n  const data = [1, 2]\n</script>";
        assert_eq!(find_payload_text(html), Some("[1, 2]"));
    }

    #[test]
    fn unterminated_script_runs_to_end() {
        let html = "<script>const data = {\"a\": 1}";
        assert_eq!(find_payload_text(html), Some("{\"a\": 1}"));
    }

    #[test]
    fn empty_assignment_is_not_found() {
        let html = "<script>const data = </script>";
        assert!(matches!(locate(html), Err(ExtractError::NotFound)));
    }
}
