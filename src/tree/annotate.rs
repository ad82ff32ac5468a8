use std::collections::HashSet;

use super::PositionedNode;

/// Assign preorder ids: parent before children, children left to right.
///
/// The counter is threaded through explicitly so structurally identical
/// trees always produce identical ids and concurrent calls cannot
/// interfere.
pub fn assign_ids(mut node: PositionedNode, next: usize) -> (PositionedNode, usize) {
    node.id = next;
    let mut counter = next + 1;

    node.children = node
        .children
        .into_iter()
        .map(|child| {
            let (annotated, advanced) = assign_ids(child, counter);
            counter = advanced;
            annotated
        })
        .collect();

    (node, counter)
}

/// Index the set of descendant leaf names at every node, bottom up.
///
/// A leaf's set holds its own name (empty when unnamed); an internal
/// node's set is the union of its children's sets.
pub fn assign_leaf_names(mut node: PositionedNode) -> PositionedNode {
    if node.children.is_empty() {
        let mut names = HashSet::new();
        if let Some(name) = &node.name {
            names.insert(name.clone());
        }
        node.leaf_names = Some(names);
        return node;
    }

    node.children = node.children.into_iter().map(assign_leaf_names).collect();

    let mut names = HashSet::new();
    for child in &node.children {
        if let Some(child_names) = &child.leaf_names {
            names.extend(child_names.iter().cloned());
        }
    }
    node.leaf_names = Some(names);
    node
}
