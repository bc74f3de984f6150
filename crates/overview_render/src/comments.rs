//! Turns sentinel-marked code scalars back into real YAML comments.

use std::sync::LazyLock;

use overview_core::COMMENT_SENTINEL;
use regex::Regex;
use tracing::warn;

/// `<indent>- <int> EOTCOMMENT <text>`, with the payload plain or quoted.
static COMMENTED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<indent>\s*(?:- )+)(?:'(?P<single>\d+ EOTCOMMENT .*)'|"(?P<double>\d+ EOTCOMMENT .*)"|(?P<plain>\d+ EOTCOMMENT .*))$"#,
    )
    .expect("Invalid commented entry regex")
});

const LINE_ENDING: &str = "\r\n";

/// Rewrites every `- <int> EOTCOMMENT <text>` line as `- <int> # <text>`.
///
/// All other lines are copied as-is. Every output line ends in CRLF.
pub fn restore_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    for (number, line) in text.lines().enumerate() {
        match restore_line(line) {
            Some(restored) => out.push_str(&restored),
            None => {
                if line.contains(COMMENT_SENTINEL) {
                    warn!(line = number + 1, text = line, "left sentinel-marked line untouched");
                }
                out.push_str(line);
            }
        }
        out.push_str(LINE_ENDING);
    }
    out
}

fn restore_line(line: &str) -> Option<String> {
    let caps = COMMENTED_ENTRY.captures(line)?;
    let indent = caps.name("indent")?.as_str();
    let payload = if let Some(single) = caps.name("single") {
        single.as_str().replace("''", "'")
    } else if let Some(double) = caps.name("double") {
        unescape_double(double.as_str())
    } else {
        caps.name("plain")?.as_str().to_string()
    };
    let marker = format!(" {COMMENT_SENTINEL} ");
    let (code, comment) = payload.split_once(&marker)?;
    let comment = comment.trim();
    if comment.is_empty() {
        return Some(format!("{indent}{code}"));
    }
    Some(format!("{indent}{code} # {comment}"))
}

fn unescape_double(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('"' | '\\')) => out.push(escaped),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quoted_entry() {
        assert_eq!(
            restore_comments("        - '1000 EOTCOMMENT Widgets'\n"),
            "        - 1000 # Widgets\r\n"
        );
    }

    #[test]
    fn plain_and_nested_entries() {
        let text = "presets:\n- - all\n  - - - groups\n      - - 25 EOTCOMMENT Ship (6) -- Frigate\n        - 26 EOTCOMMENT Unknown InvGroup\n";
        assert_eq!(
            restore_comments(text),
            "presets:\r\n- - all\r\n  - - - groups\r\n      - - 25 # Ship (6) -- Frigate\r\n        - 26 # Unknown InvGroup\r\n"
        );
    }

    #[test]
    fn quote_escapes_are_undone() {
        assert_eq!(
            restore_comments("- '9 EOTCOMMENT Pilot''s corp'"),
            "- 9 # Pilot's corp\r\n"
        );
        assert_eq!(
            restore_comments(r#"- "9 EOTCOMMENT a \"b\" c\\d""#),
            "- 9 # a \"b\" c\\d\r\n"
        );
    }

    #[test]
    fn comment_text_is_trimmed() {
        assert_eq!(restore_comments("- '11 EOTCOMMENT '"), "- 11\r\n");
        assert_eq!(
            restore_comments("- '12 EOTCOMMENT  padded name  '"),
            "- 12 # padded name\r\n"
        );
    }

    #[test]
    fn escaped_tab_becomes_a_tab() {
        assert_eq!(
            restore_comments(r#"- "10 EOTCOMMENT tab\there""#),
            "- 10 # tab\there\r\n"
        );
    }

    #[test]
    fn sentinel_lines_that_do_not_match_pass_through() {
        let lines = [
            "name: 12 EOTCOMMENT not in a sequence",
            "- x 12 EOTCOMMENT not leading with a code",
            "- 12 EOTCOMMENT",
        ];
        for line in lines {
            assert_eq!(restore_comments(line), format!("{line}\r\n"));
        }
    }

    #[test]
    fn every_line_ends_in_crlf() {
        assert_eq!(restore_comments("a\nb\r\nc"), "a\r\nb\r\nc\r\n");
        assert_eq!(restore_comments(""), "");
    }

    #[test]
    fn only_the_first_marker_becomes_a_comment() {
        assert_eq!(
            restore_comments("- 5 EOTCOMMENT EOTCOMMENT twice"),
            "- 5 # EOTCOMMENT twice\r\n"
        );
    }
}
