use std::collections::{HashMap, HashSet};

use pulldown_cmark::{Event, Options, Parser};

const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

/// One run of a math-bearing string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MathSegment {
    Text(String),
    Inline(String),
    Display(String),
}

/// Split `input` on `$...$` and `$$...$$`. `\$` is a literal dollar sign and
/// an unmatched or empty delimiter stays text.
#[must_use]
pub fn split_math(input: &str) -> Vec<MathSegment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(pos) = rest.find(['$', '\\']) {
        let (before, tail) = rest.split_at(pos);
        text.push_str(before);

        if let Some(after) = tail.strip_prefix("\\$") {
            text.push('$');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix('\\') {
            text.push('\\');
            rest = after;
            continue;
        }

        let (delimiter, display) = if tail.starts_with("$$") {
            ("$$", true)
        } else {
            ("$", false)
        };
        let body = &tail[delimiter.len()..];
        match find_closing(body, delimiter) {
            Some(end) if !body[..end].trim().is_empty() => {
                if !text.is_empty() {
                    segments.push(MathSegment::Text(std::mem::take(&mut text)));
                }
                let math = body[..end].trim().to_string();
                segments.push(if display {
                    MathSegment::Display(math)
                } else {
                    MathSegment::Inline(math)
                });
                rest = &body[end + delimiter.len()..];
            }
            _ => {
                text.push_str(delimiter);
                rest = body;
            }
        }
    }

    text.push_str(rest);
    if !text.is_empty() {
        segments.push(MathSegment::Text(text));
    }
    segments
}

fn find_closing(body: &str, delimiter: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'\\' => index += 2,
            b'$' if body[index..].starts_with(delimiter) => return Some(index),
            _ => index += 1,
        }
    }
    None
}

fn math_html(segment: &MathSegment) -> Option<String> {
    match segment {
        MathSegment::Text(_) => None,
        MathSegment::Inline(math) => Some(format!("\\({}\\)", ammonia::clean_text(math))),
        MathSegment::Display(math) => Some(format!("\\[{}\\]", ammonia::clean_text(math))),
    }
}

/// Escaped plain text with math in the delimiters the typesetter scans for.
#[must_use]
pub fn render_statement_html(input: &str) -> String {
    split_math(input)
        .iter()
        .map(|segment| match segment {
            MathSegment::Text(text) => ammonia::clean_text(text),
            math => math_html(math).unwrap_or_default(),
        })
        .collect()
}

/// Render solution steps as sanitized markdown.
///
/// Math spans are swapped for private-use placeholders before markdown runs,
/// so `*`, `_` and `\` inside formulas reach the typesetter untouched. Single
/// newlines are kept as line breaks.
#[must_use]
pub fn render_steps_html(input: &str) -> String {
    let segments = split_math(input);
    let mut markdown = String::with_capacity(input.len());
    let mut formulas = Vec::new();

    for segment in &segments {
        match segment {
            MathSegment::Text(text) => markdown.push_str(text),
            math => {
                markdown.push(PLACEHOLDER_OPEN);
                markdown.push_str(&formulas.len().to_string());
                markdown.push(PLACEHOLDER_CLOSE);
                formulas.push(math_html(math).unwrap_or_default());
            }
        }
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(&markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);

    restore_formulas(&sanitize_steps_html(&html), &formulas)
}

fn restore_formulas(html: &str, formulas: &[String]) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        out.push_str(&rest[..start]);
        let tail = &rest[start + PLACEHOLDER_OPEN.len_utf8()..];
        let Some(end) = tail.find(PLACEHOLDER_CLOSE) else {
            rest = tail;
            continue;
        };
        if let Some(formula) = tail[..end]
            .parse::<usize>()
            .ok()
            .and_then(|index| formulas.get(index))
        {
            out.push_str(formula);
        }
        rest = &tail[end + PLACEHOLDER_CLOSE.len_utf8()..];
    }
    out.push_str(rest);
    out
}

fn sanitize_steps_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "u", "del", "sub", "sup", "code",
        "pre", "blockquote", "ul", "ol", "li", "h1", "h2", "h3", "h4", "table", "thead",
        "tbody", "tr", "th", "td", "hr",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("ol", ["start"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

/// Keep only drawing elements and presentation attributes of a model SVG.
/// Returns `None` when nothing drawable survives.
#[must_use]
pub fn sanitize_svg(svg: &str) -> Option<String> {
    let tags: HashSet<&str> = [
        "svg", "g", "defs", "marker", "line", "polyline", "polygon", "path", "circle",
        "ellipse", "rect", "text", "tspan", "title",
    ]
    .into_iter()
    .collect();

    let generic: HashSet<&str> = [
        "fill",
        "fill-opacity",
        "stroke",
        "stroke-width",
        "stroke-dasharray",
        "stroke-linecap",
        "stroke-linejoin",
        "opacity",
        "transform",
        "font-size",
        "font-family",
        "font-style",
        "font-weight",
        "text-anchor",
        "dominant-baseline",
        "marker-end",
        "marker-start",
        "id",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert(
        "svg",
        ["viewBox", "width", "height", "xmlns", "preserveAspectRatio"]
            .into_iter()
            .collect(),
    );
    attributes.insert("line", ["x1", "y1", "x2", "y2"].into_iter().collect());
    attributes.insert("polyline", ["points"].into_iter().collect());
    attributes.insert("polygon", ["points"].into_iter().collect());
    attributes.insert("path", ["d"].into_iter().collect());
    attributes.insert("circle", ["cx", "cy", "r"].into_iter().collect());
    attributes.insert("ellipse", ["cx", "cy", "rx", "ry"].into_iter().collect());
    attributes.insert("rect", ["x", "y", "width", "height", "rx", "ry"].into_iter().collect());
    attributes.insert("text", ["x", "y", "dx", "dy"].into_iter().collect());
    attributes.insert("tspan", ["x", "y", "dx", "dy"].into_iter().collect());
    attributes.insert(
        "marker",
        ["viewBox", "refX", "refY", "markerWidth", "markerHeight", "orient"]
            .into_iter()
            .collect(),
    );

    let cleaned = ammonia::Builder::new()
        .tags(tags)
        .generic_attributes(generic)
        .tag_attributes(attributes)
        .clean(svg)
        .to_string();

    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Script that typesets the element with `element_id` once MathJax is ready.
/// Resolves to `"ok"`, `"skipped"` or `"error: ..."`.
#[must_use]
pub fn typeset_script(element_id: &str) -> String {
    format!(
        r#"
        const el = document.getElementById({id});
        const mj = window.MathJax;
        if (!el || !mj || typeof mj.typesetPromise !== "function") {{
            return "skipped";
        }}
        try {{
            if (mj.startup && mj.startup.promise) {{
                await mj.startup.promise;
            }}
            if (typeof mj.typesetClear === "function") {{
                mj.typesetClear([el]);
            }}
            await mj.typesetPromise([el]);
            return "ok";
        }} catch (err) {{
            return "error: " + String(err && err.message ? err.message : err);
        }}
        "#,
        id = js_string_literal(element_id),
    )
}

fn js_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
