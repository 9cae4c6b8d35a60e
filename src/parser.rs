use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

use crate::tree::{Document, Node};

/// The fixed extension set, without smart punctuation.
///
/// Headings are read with these options so their text stays literal.
pub fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options.insert(Options::ENABLE_DEFINITION_LIST);
    options
}

/// Options for HTML output: the fixed set plus smart punctuation.
pub fn render_options() -> Options {
    let mut options = options();
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options
}

/// Parse markdown text into a document tree
pub fn parse(markdown: &str) -> Document {
    let parser = Parser::new_ext(markdown, options());
    let mut state = ParseState::default();

    for event in parser {
        process_event(event, &mut state);
    }

    // pulldown-cmark always balances start/end, but flush anything left open
    while !state.stack.is_empty() {
        state.close();
    }

    Document {
        children: state.root,
    }
}

/// A container whose end tag has not been seen yet
enum Open {
    Heading(u8),
    Container,
}

#[derive(Default)]
struct ParseState {
    // Finished top-level nodes
    root: Vec<Node>,
    // Open containers with the children collected so far
    stack: Vec<(Open, Vec<Node>)>,
}

impl ParseState {
    fn open(&mut self, open: Open) {
        self.stack.push((open, Vec::new()));
    }

    fn close(&mut self) {
        if let Some((open, children)) = self.stack.pop() {
            let node = match open {
                Open::Heading(level) => Node::Heading { level, children },
                Open::Container => Node::Container(children),
            };
            self.push(node);
        }
    }

    fn push(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some((_, children)) => children.push(node),
            None => self.root.push(node),
        }
    }
}

fn process_event(event: Event, state: &mut ParseState) {
    match event {
        Event::Start(Tag::Heading { level, .. }) => {
            state.open(Open::Heading(heading_level_to_u8(level)))
        }
        Event::Start(_) => state.open(Open::Container),
        Event::End(_) => state.close(),
        Event::Text(text) => state.push(Node::Text(text.into_string())),
        _ => state.push(Node::Leaf),
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
