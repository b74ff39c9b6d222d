// src/text/normalize.rs

//! Problem description normalization.
//!
//! Converts a hypertext problem body into clean plain text with the
//! "Examples" section removed. Removal runs twice, on purpose: once over the
//! raw markup where headings are still recognizable as tags, and once over
//! the detagged lines as a safety net, because the upstream markup is not
//! consistent about how it labels examples. Each pass is a standalone
//! function so it can be tested in isolation.

use std::sync::OnceLock;

use regex::Regex;

/// Run the full normalization pipeline over a hypertext description.
pub fn normalize_description(html: &str) -> String {
    let stripped = strip_examples_html(html);
    let text = translate_markup(&stripped);
    let text = strip_examples_lines(&text);
    normalize_whitespace(&text)
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid removal pattern"))
        .collect()
}

fn example_heading_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile(&[
            r"(?i)<p[^>]*>\s*<strong[^>]*>\s*Example\s*\d*\s*:?\s*</strong>\s*</p>",
            r"(?i)<p[^>]*>\s*Example\s*\d*\s*:?\s*</p>",
            r"(?i)<p[^>]*>\s*Examples?\s*:?\s*</p>",
            r"(?i)<strong[^>]*>\s*Example\s*\d*\s*:?\s*</strong>",
        ])
    })
}

fn section_end_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile(&[
            r"(?i)<p[^>]*>\s*<strong[^>]*>\s*Constraints?\s*:?\s*</strong>\s*</p>",
            r"(?i)<p[^>]*>\s*Constraints?\s*:?\s*</p>",
            r"(?i)<p[^>]*>\s*<strong[^>]*>\s*Follow-?up\s*:?\s*</strong>\s*</p>",
            r"(?i)<p[^>]*>\s*Follow-?up\s*:?\s*</p>",
            r"(?i)<p[^>]*>\s*<strong[^>]*>\s*Note\s*:?\s*</strong>\s*</p>",
            r"(?i)<p[^>]*>\s*Note\s*:?\s*</p>",
        ])
    })
}

/// Structural pass: remove the Examples section from the raw markup.
///
/// On the first heading match, the byte range up to the earliest subsequent
/// Constraints/Follow-up/Note heading is deleted (to end of input if none).
/// When no heading pattern matches, falls back to a lazy paragraph-level
/// removal.
pub fn strip_examples_html(html: &str) -> String {
    for pattern in example_heading_patterns() {
        if let Some(m) = pattern.find(html) {
            let start = m.start();
            let rest = &html[start..];
            let end = section_end_patterns()
                .iter()
                .filter_map(|p| p.find(rest).map(|e| e.start()))
                .min()
                .unwrap_or(rest.len());

            let mut result = String::with_capacity(html.len());
            result.push_str(&html[..start]);
            result.push_str(&rest[end..]);
            return result;
        }
    }
    strip_examples_lazy(html)
}

/// Best-effort fallback: delete from the first paragraph-level "Example"
/// mention up to (not including) the earliest later paragraph-level
/// Constraints/Follow-up/Note mention. Nothing is removed when either
/// boundary is missing.
fn strip_examples_lazy(html: &str) -> String {
    static START: OnceLock<Regex> = OnceLock::new();
    static END: OnceLock<Regex> = OnceLock::new();
    let start_re = START.get_or_init(|| {
        Regex::new(r"(?i)<p[^>]*>(?:\s*<strong[^>]*>)?[^<]*Example").expect("valid start pattern")
    });
    let end_re = END.get_or_init(|| {
        Regex::new(r"(?i)<p[^>]*>(?:\s*<strong[^>]*>)?\s*(?:Constraints?|Follow-?up|Note)")
            .expect("valid end pattern")
    });

    let Some(m) = start_re.find(html) else {
        return html.to_string();
    };
    let rest = &html[m.end()..];
    match end_re.find(rest) {
        Some(e) => {
            let mut result = String::with_capacity(html.len());
            result.push_str(&html[..m.start()]);
            result.push_str(&rest[e.start()..]);
            result
        }
        None => html.to_string(),
    }
}

/// Tag translation pass: markup to plain-text conventions.
///
/// Code blocks become tab-indented blocks, inline code becomes quoted
/// fragments, sup/sub become `^`/`_` prefixes, paragraphs and breaks become
/// newlines, emphasis tags are unwrapped, list items become bullets, leftover
/// tags are stripped, and entities are decoded.
pub fn translate_markup(html: &str) -> String {
    static PRE: OnceLock<Regex> = OnceLock::new();
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    static DECIMAL_REF: OnceLock<Regex> = OnceLock::new();
    static HEX_REF: OnceLock<Regex> = OnceLock::new();

    let pre = PRE.get_or_init(|| Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").expect("valid pattern"));
    let rules = RULES.get_or_init(|| {
        [
            (r"(?i)<code[^>]*>", "\""),
            (r"(?i)</code>", "\""),
            (r"(?i)<sup[^>]*>", "^"),
            (r"(?i)</sup>", ""),
            (r"(?i)<sub[^>]*>", "_"),
            (r"(?i)</sub>", ""),
            (r"(?i)<p(?:\s[^>]*)?>", "\n"),
            (r"(?i)</p\s*>", "\n"),
            (r"(?i)<br\s*/?>", "\n"),
            (r"(?i)</?(?:strong|b|em|i)(?:\s[^>]*)?>", ""),
            (r"(?i)<li[^>]*>", "- "),
            (r"(?i)</li>", "\n"),
            (r"(?i)</?[uo]l(?:\s[^>]*)?>", "\n"),
            // Only real tag shapes, so decoded "<=" survives a re-run.
            (r"</?[A-Za-z][^>]*>", ""),
        ]
        .iter()
        .map(|(p, r)| (Regex::new(p).expect("valid pattern"), *r))
        .collect()
    });

    // Code blocks first, while their boundaries are still visible.
    let mut text = pre
        .replace_all(html, |caps: &regex::Captures| {
            let block = caps[1].trim_matches('\n');
            let indented = block
                .lines()
                .map(|line| format!("\t{line}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("\n{indented}\n")
        })
        .into_owned();

    for (pattern, replacement) in rules {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }

    // Entity decoding; `&amp;` last so "&amp;lt;" decodes exactly once.
    text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let decimal_ref =
        DECIMAL_REF.get_or_init(|| Regex::new(r"&#(\d+);").expect("valid pattern"));
    text = decimal_ref
        .replace_all(&text, |caps: &regex::Captures| {
            caps[1]
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    let hex_ref =
        HEX_REF.get_or_init(|| Regex::new(r"&#[xX]([0-9A-Fa-f]+);").expect("valid pattern"));
    text = hex_ref
        .replace_all(&text, |caps: &regex::Captures| {
            u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    text.replace("&amp;", "&")
}

fn line_start_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile(&[
            r"(?i)^Example\s*\d*\s*:",
            r"(?i)^Examples?\s*:",
            r"(?i)Example\s+\d+\s*:",
        ])
    })
}

fn line_end_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        compile(&[
            r"(?i)^Constraints?\s*:",
            r"(?i)^Follow-?up\s*:",
            r"(?i)^Follow-?up\s+Question\s*:",
            r"(?i)^Hints?\s*:",
            r"(?i)^Note\s*:",
            r"(?i)^Note\s+that\s*:",
        ])
    })
}

/// Line-oriented pass: drop any Examples region the structural pass missed.
///
/// The heading line is dropped; region lines are dropped until a section
/// boundary (kept) or the 50-line safety cap (triggering line kept).
pub fn strip_examples_lines(text: &str) -> String {
    // Safety limit so a missing boundary cannot swallow the whole text.
    const MAX_EXAMPLE_LINES: usize = 50;
    const EXAMPLE_CONTENT_WINDOW: usize = 20;

    static CONTENT: OnceLock<Regex> = OnceLock::new();
    let content_re = CONTENT.get_or_init(|| {
        Regex::new(r"(?i)^(?:Input|Output|Explanation)\s*:").expect("valid pattern")
    });

    let mut result: Vec<&str> = Vec::new();
    let mut in_examples = false;
    let mut example_lines = 0usize;

    for line in text.lines() {
        let trimmed = line.trim();

        if !in_examples {
            if line_start_patterns().iter().any(|p| p.is_match(trimmed)) {
                in_examples = true;
                example_lines = 0;
                continue;
            }
            result.push(line);
            continue;
        }

        example_lines += 1;

        if example_lines > MAX_EXAMPLE_LINES {
            in_examples = false;
            result.push(line);
            continue;
        }

        if line_end_patterns().iter().any(|p| p.is_match(trimmed)) {
            in_examples = false;
            result.push(line);
            continue;
        }

        if content_re.is_match(trimmed) && example_lines < EXAMPLE_CONTENT_WINDOW {
            // Input/Output/Explanation payload inside the window.
            continue;
        }

        // Any other line inside the region is example body.
    }

    result.join("\n")
}

/// Whitespace normalization pass.
///
/// Runs of two or more horizontal whitespace characters collapse to one
/// space; leading spaces after a newline are stripped (the tab indent
/// produced for code blocks survives both rules); three or more newlines
/// collapse to exactly two; ends are trimmed. Newlines are collapsed last so
/// that blank lines uncovered by the space rules still merge.
pub fn normalize_whitespace(text: &str) -> String {
    static NEWLINES: OnceLock<Regex> = OnceLock::new();
    static HSPACE: OnceLock<Regex> = OnceLock::new();
    static LEADING: OnceLock<Regex> = OnceLock::new();

    let newlines = NEWLINES.get_or_init(|| Regex::new(r"\n{3,}").expect("valid pattern"));
    let hspace = HSPACE.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("valid pattern"));
    let leading = LEADING.get_or_init(|| Regex::new(r"\n +").expect("valid pattern"));

    let text = hspace.replace_all(text, " ");
    let text = leading.replace_all(&text, "\n");
    let text = newlines.replace_all(&text, "\n\n");
    text.trim().to_string()
}
