//! Inline markup used in cells, subtitles, descriptions and detail bullets.
//!
//! Three constructs are understood: `**bold**`, `*italic*` and line breaks.
//! Text is otherwise passed through as-is; nothing is escaped.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());

/// Render markup as an HTML fragment.
///
/// Applying it to its own output changes nothing.
///
/// ```
/// use battlecards_engine::markup::to_html;
///
/// let html = to_html("**Per user** pricing\nsee *notes*");
/// assert_eq!(html, "<strong>Per user</strong> pricing<br>see <em>notes</em>");
/// assert_eq!(to_html(&html), html);
/// ```
pub fn to_html(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\n', "<br>");
    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    ITALIC.replace_all(&text, "<em>$1</em>").into_owned()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSpan {
    pub text: String,
    pub emphasis: Emphasis,
}

pub type StyledLine = Vec<StyledSpan>;

/// Split markup into lines of styled spans for terminal output.
///
/// Emphasis does not carry across a line break.
pub fn parse(text: &str) -> Vec<StyledLine> {
    text.lines()
        .map(|line| {
            let mut spans = Vec::new();
            let mut last = 0;
            for caps in BOLD.captures_iter(line) {
                let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                push_italic(&mut spans, &line[last..whole.start()], false);
                push_italic(&mut spans, inner.as_str(), true);
                last = whole.end();
            }
            push_italic(&mut spans, &line[last..], false);
            spans
        })
        .collect()
}

fn push_italic(spans: &mut StyledLine, text: &str, bold: bool) {
    let mut last = 0;
    for caps in ITALIC.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push(spans, &text[last..whole.start()], Emphasis { bold, italic: false });
        push(spans, inner.as_str(), Emphasis { bold, italic: true });
        last = whole.end();
    }
    push(spans, &text[last..], Emphasis { bold, italic: false });
}

fn push(spans: &mut StyledLine, text: &str, emphasis: Emphasis) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(prev) if prev.emphasis == emphasis => prev.text.push_str(text),
        _ => spans.push(StyledSpan {
            text: text.to_string(),
            emphasis,
        }),
    }
}

/// Markup with the emphasis markers removed.
pub fn plain(text: &str) -> String {
    parse(text)
        .iter()
        .map(|line| line.iter().map(|s| s.text.as_str()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, bold: bool, italic: bool) -> StyledSpan {
        StyledSpan {
            text: text.to_string(),
            emphasis: Emphasis { bold, italic },
        }
    }

    #[test]
    fn test_to_html_is_idempotent() {
        for input in [
            "plain",
            "**a** and *b*",
            "***both***",
            "odd * star",
            "multi\nline **bold\nacross**",
            "",
        ] {
            let once = to_html(input);
            assert_eq!(to_html(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_to_html_leaves_markup_free_text_alone() {
        assert_eq!(to_html("Per user, per month"), "Per user, per month");
        assert_eq!(to_html("<b>raw</b>"), "<b>raw</b>");
    }

    #[test]
    fn test_parse_mixed_emphasis() {
        let lines = parse("Acme charges for **every** user, *even* viewers");
        assert_eq!(
            lines,
            vec![vec![
                span("Acme charges for ", false, false),
                span("every", true, false),
                span(" user, ", false, false),
                span("even", false, true),
                span(" viewers", false, false),
            ]]
        );
    }

    #[test]
    fn test_parse_italic_inside_bold() {
        let lines = parse("**big *and* bold**");
        assert_eq!(
            lines,
            vec![vec![
                span("big ", true, false),
                span("and", true, true),
                span(" bold", true, false),
            ]]
        );
    }

    #[test]
    fn test_parse_splits_lines() {
        let lines = parse("one\ntwo");
        assert_eq!(lines.len(), 2);
        assert_eq!(plain("**one**\n*two*"), "one\ntwo");
    }
}
