//! Table of contents tree construction

use crate::heading::Heading;

/// One node of the table of contents tree.
///
/// A node's children are all subsequent headings of strictly greater level,
/// up to but not including the next heading of equal-or-lower level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocNode {
    pub title: String,
    pub level: u8,
    pub id: String,
    pub children: Vec<TocNode>,
}

impl TocNode {
    fn new(heading: &Heading) -> Self {
        Self {
            title: heading.text.clone(),
            level: heading.level,
            id: heading.id.clone(),
            children: Vec::new(),
        }
    }
}

/// Build a forest of TOC nodes from a document-ordered heading list.
///
/// Uses a stack of currently open nodes: each heading closes out every open
/// node at its own level or deeper, then attaches to the nearest still-open
/// ancestor, or becomes a root when none exists. Malformed level sequences
/// (a deep heading with no preceding ancestor) are tolerated and produce
/// extra roots rather than an error.
pub fn build_toc(headings: &[Heading]) -> Vec<TocNode> {
    let mut roots: Vec<TocNode> = Vec::new();
    let mut stack: Vec<TocNode> = Vec::new();

    for heading in headings {
        while stack
            .last()
            .map_or(false, |open| open.level >= heading.level)
        {
            close_top(&mut stack, &mut roots);
        }
        stack.push(TocNode::new(heading));
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }

    roots
}

/// Pop the top open node and attach it to its parent (or the root list).
fn close_top(stack: &mut Vec<TocNode>, roots: &mut Vec<TocNode>) {
    if let Some(closed) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(closed),
            None => roots.push(closed),
        }
    }
}
