/// A parsed markdown document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
}

/// A node of the document tree.
///
/// Only headings and text are told apart; every other construct is kept as
/// a container or a leaf so headings nested in quotes or lists are still found.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading { level: u8, children: Vec<Node> },
    Text(String),
    /// Paragraphs, lists, quotes, emphasis, links and other containers
    Container(Vec<Node>),
    /// Inline code, HTML, breaks, rules and other leaves
    Leaf,
}

impl Node {
    /// Child nodes, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Heading { children, .. } | Node::Container(children) => children,
            Node::Text(_) | Node::Leaf => &[],
        }
    }

    /// Concatenation of the literals of direct `Text` children.
    ///
    /// Text nested in emphasis, links or inline code is not included.
    pub fn text(&self) -> String {
        self.children()
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Document {
    /// Visit every node in document order (pre-order, depth first).
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        fn walk_nodes<'a>(nodes: &'a [Node], visit: &mut impl FnMut(&'a Node)) {
            for node in nodes {
                visit(node);
                walk_nodes(node.children(), visit);
            }
        }
        walk_nodes(&self.children, visit);
    }

    /// Headings as `(level, text)` in document order.
    pub fn headings(&self) -> Vec<(u8, String)> {
        let mut headings = Vec::new();
        self.walk(&mut |node| {
            if let Node::Heading { level, .. } = node {
                headings.push((*level, node.text()));
            }
        });
        headings
    }
}
