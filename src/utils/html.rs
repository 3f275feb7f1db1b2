use html2text::from_read;
use textwrap::Options;

/// Width handed to html2text so it never wraps on its own; wrapping happens
/// afterwards once the indent is known.
const UNWRAPPED_WIDTH: usize = 10_000;

/// Extracts readable text from an HTML string.
/// Strips tags and decodes entities using the `html2text` crate.
pub fn extract_text_from_html(html: &str) -> String {
    let mut bytes = html.as_bytes();
    from_read(&mut bytes, UNWRAPPED_WIDTH).unwrap_or_default()
}

/// Convert a comment body to plain text wrapped at `width` columns with
/// `indent` in front of every line. Blank lines between paragraphs stay
/// blank.
pub fn render_body(html: &str, indent: &str, width: usize) -> String {
    let text = extract_text_from_html(html);
    let options = Options::new(width)
        .initial_indent(indent)
        .subsequent_indent(indent);

    text.trim_end()
        .lines()
        .map(|line| match line.trim().is_empty() {
            true => String::new(),
            false => textwrap::fill(line, &options),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
