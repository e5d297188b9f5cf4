//! README rendering.

use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html};

use super::consts::AUTOLINK_REGEX;

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_SMART_PUNCTUATION
}

/// Render README markdown to HTML.
///
/// Raw HTML in the source passes through, bare URLs, `www.` hosts and
/// email addresses become links, and quotes, dashes and ellipses get their typographic forms.
pub fn render_markdown(text: &str) -> String {
    let parser = TextMergeStream::new(Parser::new_ext(text, markdown_options()));
    let events = linkify(parser);

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Wrap bare URLs and addresses in text events with link events.
///
/// Text inside existing links, images and code blocks is left alone.
fn linkify<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut link_depth = 0usize;
    let mut code_depth = 0usize;

    for event in events {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. }) => link_depth += 1,
            Event::End(TagEnd::Link | TagEnd::Image) => link_depth = link_depth.saturating_sub(1),
            Event::Start(Tag::CodeBlock(_)) => code_depth += 1,
            Event::End(TagEnd::CodeBlock) => code_depth = code_depth.saturating_sub(1),
            Event::Text(text)
                if link_depth == 0 && code_depth == 0 && AUTOLINK_REGEX.is_match(text) =>
            {
                push_linked_text(&mut out, text);
                continue;
            }
            _ => {}
        }
        out.push(event);
    }

    out
}

fn link_target(matched: &str) -> String {
    if matched.starts_with("www.") {
        format!("http://{matched}")
    } else if !matched.contains("://") && matched.contains('@') {
        format!("mailto:{matched}")
    } else {
        matched.to_string()
    }
}

fn push_linked_text<'a>(out: &mut Vec<Event<'a>>, text: &str) {
    let mut last = 0;
    for url in AUTOLINK_REGEX.find_iter(text) {
        if url.start() > last {
            out.push(Event::Text(CowStr::from(text[last..url.start()].to_string())));
        }
        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(link_target(url.as_str())),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        out.push(Event::Text(CowStr::from(url.as_str().to_string())));
        out.push(Event::End(TagEnd::Link));
        last = url.end();
    }
    if last < text.len() {
        out.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}
