//! Read-only inspection of markdown bodies: excerpts, plain text, word counts

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Marker separating the excerpt from the rest of a post
pub const MORE_MARKER: &str = "<!-- more -->";

fn parser(markdown: &str) -> Parser<'_> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    Parser::new_ext(markdown, options)
}

/// Markdown before `<!-- more -->`, if the body has one
pub fn split_excerpt(content: &str) -> Option<&str> {
    content
        .find(MORE_MARKER)
        .map(|pos| content[..pos].trim())
}

/// Strip markup, keeping text and inline code. Blocks end with a newline.
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in parser(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::CodeBlock) => {
                if !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    text
}

/// Number of whitespace-separated words in the rendered text
pub fn word_count(markdown: &str) -> usize {
    plain_text(markdown).split_whitespace().count()
}

/// Short plain-text summary: the excerpt if there is one, otherwise the
/// first paragraph, cut at a word boundary after `max_chars` characters.
pub fn summary(markdown: &str, max_chars: usize) -> String {
    let text = match split_excerpt(markdown) {
        Some(excerpt) => plain_text(excerpt),
        None => first_paragraph(markdown),
    };
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.chars().count() <= max_chars {
        return text;
    }

    let mut out = String::new();
    for word in text.split(' ') {
        let needed = if out.is_empty() { word.chars().count() } else { word.chars().count() + 1 };
        if out.chars().count() + needed > max_chars {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    if out.is_empty() {
        out = text.chars().take(max_chars).collect();
    }
    out.push('…');
    out
}

fn first_paragraph(markdown: &str) -> String {
    let mut text = String::new();
    let mut inside = false;

    for event in parser(markdown) {
        match event {
            Event::Start(Tag::Paragraph) => inside = true,
            Event::End(TagEnd::Paragraph) if inside => break,
            Event::Text(t) | Event::Code(t) if inside => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if inside => text.push(' '),
            _ => {}
        }
    }

    text
}
