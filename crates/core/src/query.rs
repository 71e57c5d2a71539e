use regex::Regex;
use std::sync::OnceLock;

/// Phrase that marks a query as an analysis request; the subject follows it.
pub const TRIGGER_PHRASE: &str = "分析一下";

fn trigger_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `.` stops at a newline, so the subject is the rest of the trigger's line.
    RE.get_or_init(|| Regex::new(r"分析一下(.*)").expect("trigger pattern is valid"))
}

/// Returns the subject named after the first trigger phrase, trimmed.
///
/// `None` only when the phrase is absent; a bare phrase yields `Some("")`.
pub fn extract_subject(query: &str) -> Option<&str> {
    let caps = trigger_regex().captures(query)?;
    Some(caps.get(1)?.as_str().trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_subject_after_phrase() {
        assert_eq!(extract_subject("分析一下贵州茅台"), Some("贵州茅台"));
        assert_eq!(extract_subject("请帮我分析一下  宁德时代 \t"), Some("宁德时代"));
    }

    #[test]
    fn keeps_trailing_punctuation() {
        assert_eq!(extract_subject("分析一下腾讯。"), Some("腾讯。"));
    }

    #[test]
    fn first_match_captures_the_rest_of_the_line() {
        assert_eq!(
            extract_subject("分析一下茅台和分析一下五粮液"),
            Some("茅台和分析一下五粮液")
        );
        assert_eq!(extract_subject("分析一下茅台\n其他内容"), Some("茅台"));
    }

    #[test]
    fn missing_phrase_is_none() {
        assert_eq!(extract_subject("hello"), None);
        assert_eq!(extract_subject(""), None);
        assert_eq!(extract_subject("分析 一下茅台"), None);
    }

    #[test]
    fn bare_phrase_matches_with_empty_subject() {
        assert_eq!(extract_subject("分析一下   "), Some(""));
        assert_eq!(extract_subject("分析一下"), Some(""));
    }
}
