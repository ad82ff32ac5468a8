use std::collections::HashSet;

use crate::metadata::MetadataRow;

pub mod annotate;
pub mod layout;
pub mod newick;
pub mod prepare;
pub mod select;

/// Tree node as produced by the Newick parser, before any layout.
///
/// A node is a leaf iff `children` is empty. An absent or unparseable
/// branch length is `None`, never a NaN sentinel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNode {
    pub name: Option<String>,
    pub length: Option<f64>,
    pub children: Vec<RawNode>,
}

impl RawNode {
    pub fn new(name: Option<String>, length: Option<f64>) -> Self {
        Self {
            name,
            length,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Node with layout coordinates and a stable preorder identity.
///
/// Ids are a permutation of `0..N` assigned parent-first, children left to
/// right, so structurally identical trees always get identical ids.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub name: Option<String>,
    pub length: Option<f64>,
    pub x: f64,
    pub y: f64,
    pub id: usize,
    pub leaf_names: Option<HashSet<String>>,
    pub children: Vec<PositionedNode>,
}

impl PositionedNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Descendant-membership test; O(1) once leaf names are indexed.
    pub fn contains_leaf(&self, name: &str) -> bool {
        self.leaf_names
            .as_ref()
            .map(|names| names.contains(name))
            .unwrap_or(false)
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(PositionedNode::node_count)
            .sum::<usize>()
    }

    /// Maximum x over this node and all of its descendants.
    pub fn max_x(&self) -> f64 {
        self.children
            .iter()
            .map(PositionedNode::max_x)
            .fold(self.x, f64::max)
    }
}

/// Leaf extracted from a prepared tree, in left-to-right display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tip {
    pub id: usize,
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub metadata: Option<MetadataRow>,
}

/// Output of the preparation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTree {
    pub tree: PositionedNode,
    pub tips: Vec<Tip>,
    pub max_depth: f64,
}
