//! Tag/value block reader.
//!
//! # Responsibilities
//! - Turn a block file into a tree of statements and nested `<tag>` blocks
//! - Keep the line number of every node for fault reports
//!
//! # Design Decisions
//! - One statement per line; `#` lines and blank lines are skipped
//! - The first word is the tag name, lower-cased; the rest are arguments
//! - A closing tag that does not close the innermost open block is kept as
//!   a plain statement, so the enclosing block reports it as unknown
//! - A block left open at end of input is marked unterminated rather than
//!   dropped

/// A single `name arg...` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub name: String,
    pub args: Vec<String>,
    pub line: usize,
}

impl Statement {
    /// First argument, if any.
    pub fn arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// A `<tag> ... </tag>` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Tag name without angle brackets, lower-cased.
    pub tag: String,
    /// Line of the opening tag.
    pub line: usize,
    /// False when the closing tag never appeared.
    pub terminated: bool,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Statement(Statement),
    Block(Block),
}

impl Node {
    pub fn line(&self) -> usize {
        match self {
            Node::Statement(st) => st.line,
            Node::Block(b) => b.line,
        }
    }
}

/// Parsed block file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTree {
    /// File name used in fault reports.
    pub file: String,
    pub nodes: Vec<Node>,
}

impl ConfigTree {
    /// Top-level blocks with the given tag.
    pub fn blocks<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Block> + 'a {
        self.nodes.iter().filter_map(move |node| match node {
            Node::Block(b) if b.tag == tag => Some(b),
            _ => None,
        })
    }
}

fn opening_tag(name: &str) -> Option<&str> {
    if name.starts_with("</") {
        return None;
    }
    name.strip_prefix('<')?.strip_suffix('>').filter(|t| !t.is_empty())
}

fn closing_tag(name: &str) -> Option<&str> {
    name.strip_prefix("</")?.strip_suffix('>')
}

fn attach(stack: &mut [Block], root: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.body.push(node),
        None => root.push(node),
    }
}

/// Read a block file's text into a tree.
pub fn read_blocks(file: impl Into<String>, text: &str) -> ConfigTree {
    let mut root = Vec::new();
    let mut stack: Vec<Block> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut words = trimmed.split_whitespace();
        let name = match words.next() {
            Some(word) => word.to_ascii_lowercase(),
            None => continue,
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        if let Some(tag) = closing_tag(&name) {
            if stack.last().is_some_and(|open| open.tag == tag) {
                if let Some(mut done) = stack.pop() {
                    done.terminated = true;
                    attach(&mut stack, &mut root, Node::Block(done));
                }
                continue;
            }
        } else if let Some(tag) = opening_tag(&name) {
            stack.push(Block {
                tag: tag.to_string(),
                line,
                terminated: false,
                body: Vec::new(),
            });
            continue;
        }

        attach(
            &mut stack,
            &mut root,
            Node::Statement(Statement { name, args, line }),
        );
    }

    while let Some(open) = stack.pop() {
        tracing::trace!(tag = %open.tag, line = open.line, "Block left open at end of input");
        attach(&mut stack, &mut root, Node::Block(open));
    }

    ConfigTree {
        file: file.into(),
        nodes: root,
    }
}
