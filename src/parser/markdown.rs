use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Reduce markdown to its prose. Code blocks, inline code and raw HTML are
/// dropped; block ends and hard breaks become newlines.
pub fn extract(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    let mut in_code_block = false;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
            }
            Event::Text(t) if !in_code_block => {
                text.push_str(&t);
            }
            Event::SoftBreak => text.push(' '),
            Event::HardBreak => text.push('\n'),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                if !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    text.truncate(text.trim_end().len());
    text
}
