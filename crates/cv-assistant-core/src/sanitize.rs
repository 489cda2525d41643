/// Cleanup applied to answers before they are shown
use regex::Regex;
use std::sync::OnceLock;

static BLANK_RUN_REGEX: OnceLock<Regex> = OnceLock::new();
static LINE_INDENT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Three or more consecutive newlines
fn blank_run_regex() -> &'static Regex {
    BLANK_RUN_REGEX.get_or_init(|| Regex::new(r"\n{3,}").expect("Failed to compile blank run regex"))
}

/// Whitespace other than newlines at the start of a line
fn line_indent_regex() -> &'static Regex {
    LINE_INDENT_REGEX
        .get_or_init(|| Regex::new(r"(?m)^[\s&&[^\n]]+").expect("Failed to compile indent regex"))
}

/// Normalize an answer from the remote service.
///
/// Runs of three or more newlines become a single paragraph break, every
/// line loses its leading whitespace, and the whole text is trimmed.
/// Whitespace-only lines turn into empty lines once stripped, so runs are
/// collapsed again afterwards; this keeps the function idempotent.
pub fn sanitize(text: &str) -> String {
    let collapsed = blank_run_regex().replace_all(text, "\n\n");
    let stripped = line_indent_regex().replace_all(&collapsed, "");
    let collapsed = blank_run_regex().replace_all(&stripped, "\n\n");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_blank_runs() {
        assert_eq!(sanitize("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(sanitize("a\n\n\nb\n\n\n\n\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn test_keeps_single_paragraph_break() {
        assert_eq!(sanitize("a\n\nb"), "a\n\nb");
        assert_eq!(sanitize("a\nb"), "a\nb");
    }

    #[test]
    fn test_strips_leading_whitespace_per_line() {
        assert_eq!(sanitize("  leading\n   spaces"), "leading\nspaces");
        assert_eq!(sanitize("\t- one\n\t- two"), "- one\n- two");
    }

    #[test]
    fn test_keeps_trailing_whitespace_inside() {
        assert_eq!(sanitize("line  \nnext"), "line  \nnext");
    }

    #[test]
    fn test_trims_whole_string() {
        assert_eq!(sanitize("\n\n  hello  \n\n"), "hello");
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_markdown_answer() {
        assert_eq!(sanitize("**Skills**\n\n\n\nC#, .NET"), "**Skills**\n\nC#, .NET");
    }

    #[test]
    fn test_whitespace_only_lines_do_not_reopen_runs() {
        assert_eq!(sanitize("a\n\n \n\nb"), "a\n\nb");
        assert_eq!(sanitize("a\n \n \n b"), "a\n\nb");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain",
            "a\n\n\n\nb",
            "  leading\n   spaces",
            "a\n\n \n\nb",
            "\t x\r\n\r\n\r\n y  ",
            "**Skills**\n\n\n\n   - C#\n   - .NET\n\n\n\n\n",
            " \u{a0}nbsp\n\u{2003}em space",
            "\n \n \n \n",
            "x\n\n\n \n\n\n\ty",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Answers built from the characters the cleanup cares about
        fn answer_text() -> impl Strategy<Value = String> {
            proptest::collection::vec(
                prop_oneof![
                    Just("\n".to_string()),
                    Just("\r\n".to_string()),
                    Just(" ".to_string()),
                    Just("\t".to_string()),
                    Just("\u{a0}".to_string()),
                    "[a-zçğıöşü*#-]{1,6}",
                ],
                0..40,
            )
            .prop_map(|parts| parts.concat())
        }

        proptest! {
            #[test]
            fn test_sanitize_is_idempotent(text in answer_text()) {
                let once = sanitize(&text);
                prop_assert_eq!(sanitize(&once), once);
            }

            #[test]
            fn test_sanitize_is_idempotent_on_any_string(text in any::<String>()) {
                let once = sanitize(&text);
                prop_assert_eq!(sanitize(&once), once);
            }

            #[test]
            fn test_sanitized_output_shape(text in answer_text()) {
                let out = sanitize(&text);
                prop_assert!(!out.contains("\n\n\n"));
                prop_assert_eq!(out.trim(), out.as_str());
                let leading_ws = [' ', '\t', '\u{a0}'];
                for line in out.split('\n') {
                    prop_assert!(!line.starts_with(leading_ws));
                }
            }
        }
    }
}
