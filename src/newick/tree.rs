//! Newick parsing into a node arena, and an ASCII drawing of the result.
//!
//! Grammar:
//! ```text
//! tree     = subtree ';'
//! subtree  = '(' children ')' label | label
//! children = subtree (',' subtree)*
//! label    = name? (':' length)?
//! ```
//! Whitespace between tokens is skipped, so re-indented text parses too.

use log::debug;
use crate::error::{MsaError, Result};

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub name: Option<String>,
    pub branch_length: Option<f64>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhyloTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl PhyloTree {
    pub fn parse(input: &str) -> Result<PhyloTree> {
        let mut parser = Parser::new(input);
        let root = parser.parse_tree()?;
        debug!("Parsed guide tree with {} nodes", parser.nodes.len());
        Ok(PhyloTree {
            nodes: parser.nodes,
            root,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids in depth-first preorder
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev());
        }
        order
    }

    pub fn leaves(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| self.nodes[id].is_leaf())
            .collect()
    }

    pub fn leaf_names(&self) -> Vec<String> {
        self.leaves()
            .into_iter()
            .map(|id| self.nodes[id].name.clone().unwrap_or_default())
            .collect()
    }

    fn has_branch_lengths(&self) -> bool {
        self.nodes.iter().any(|n| n.branch_length.is_some())
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    nodes: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            input: input.as_bytes(),
            pos: 0,
            nodes: Vec::new(),
        }
    }

    fn error(&self, message: impl Into<String>) -> MsaError {
        let line = self.input[..self.pos.min(self.input.len())]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1;
        MsaError::Parse {
            line,
            message: message.into(),
        }
    }

    fn parse_tree(&mut self) -> Result<NodeId> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(self.error("empty Newick text"));
        }
        let root = self.parse_subtree(None)?;
        self.skip_whitespace();
        if self.peek() != Some(b';') {
            return Err(self.error("expected ';' at end of Newick text"));
        }
        self.pos += 1;
        Ok(root)
    }

    fn parse_subtree(&mut self, parent: Option<NodeId>) -> Result<NodeId> {
        self.skip_whitespace();
        let id = self.nodes.len();
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            name: None,
            branch_length: None,
        });

        if self.peek() == Some(b'(') {
            self.pos += 1;
            loop {
                let child = self.parse_subtree(Some(id))?;
                self.nodes[id].children.push(child);
                self.skip_whitespace();
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    Some(b')') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error("expected ',' or ')' in Newick text")),
                }
            }
        }

        self.parse_label(id)?;
        Ok(id)
    }

    fn parse_label(&mut self, id: NodeId) -> Result<()> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(b) = self.peek() {
            if matches!(b, b':' | b',' | b')' | b'(' | b';') || b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        if self.pos > start {
            let name = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
            self.nodes[id].name = Some(name);
        }

        self.skip_whitespace();
        if self.peek() == Some(b':') {
            self.pos += 1;
            self.skip_whitespace();
            let start = self.pos;
            while let Some(b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E') = self.peek() {
                self.pos += 1;
            }
            let text = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
            let length = text
                .parse::<f64>()
                .map_err(|_| self.error(format!("invalid branch length '{text}'")))?;
            self.nodes[id].branch_length = Some(length);
        }
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }
}

const MIN_DRAWING_WIDTH: usize = 10;

/// Draw the tree sideways with the root on the left.
///
/// Leaves sit on every other row in preorder. The horizontal axis is the
/// cumulative branch length, or the node depth when the tree carries no
/// lengths. `width` is the total line width including leaf labels.
pub fn render_dendrogram(tree: &PhyloTree, width: usize) -> Vec<String> {
    let order = tree.preorder();
    let leaves = tree.leaves();
    let n = tree.node_count();

    let use_lengths = tree.has_branch_lengths();
    let mut x = vec![0.0f64; n];
    for &id in &order {
        if let Some(parent) = tree.nodes[id].parent {
            let step = if use_lengths {
                tree.nodes[id].branch_length.unwrap_or(0.0).max(0.0)
            } else {
                1.0
            };
            x[id] = x[parent] + step;
        }
    }

    let mut row = vec![0usize; n];
    for (i, &leaf) in leaves.iter().enumerate() {
        row[leaf] = i * 2;
    }
    for &id in order.iter().rev() {
        let children = &tree.nodes[id].children;
        if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
            row[id] = (row[first] + row[last]) / 2;
        }
    }

    let label_width = tree
        .leaf_names()
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);
    let drawing_width = width.saturating_sub(label_width + 1).max(MIN_DRAWING_WIDTH);
    let max_x = leaves.iter().map(|&id| x[id]).fold(0.0, f64::max);
    let col: Vec<usize> = x
        .iter()
        .map(|&value| {
            if max_x > 0.0 {
                ((value / max_x) * (drawing_width - 1) as f64).round() as usize
            } else {
                0
            }
        })
        .collect();

    let rows = leaves.len().saturating_mul(2).saturating_sub(1).max(1);
    let mut grid = vec![vec![' '; drawing_width + 1 + label_width]; rows];

    for &id in &order {
        if let Some(parent) = tree.nodes[id].parent {
            for c in (col[parent] + 1)..=col[id] {
                grid[row[id]][c] = '-';
            }
        }
    }

    for &id in &order {
        let children = &tree.nodes[id].children;
        if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
            for r in row[first]..=row[last] {
                grid[r][col[id]] = '|';
            }
            for &child in children {
                grid[row[child]][col[id]] = '+';
            }
        }
    }

    for &leaf in &leaves {
        let name = tree.nodes[leaf].name.as_deref().unwrap_or("");
        for (offset, c) in name.chars().enumerate() {
            grid[row[leaf]][col[leaf] + 1 + offset] = c;
        }
    }

    grid.into_iter()
        .map(|line| line.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}
