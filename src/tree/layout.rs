use super::{PositionedNode, RawNode};

/// Assign vertical positions depth-first, left to right.
///
/// Leaves take sequential integer y values from the threaded counter; an
/// internal node sits at the mean of its first and last child's y. Nodes
/// with more than two children deliberately ignore the middle children,
/// matching the ladder layout convention.
pub fn assign_y(node: &RawNode, counter: usize) -> (PositionedNode, usize) {
    let mut children = Vec::with_capacity(node.children.len());
    let mut next = counter;

    for child in &node.children {
        let (positioned, advanced) = assign_y(child, next);
        children.push(positioned);
        next = advanced;
    }

    let y = if children.is_empty() {
        let y = next as f64;
        next += 1;
        y
    } else {
        let first = children[0].y;
        let last = children[children.len() - 1].y;
        (first + last) / 2.0
    };

    let positioned = PositionedNode {
        name: node.name.clone(),
        length: node.length,
        x: 0.0,
        y,
        id: 0,
        leaf_names: None,
        children,
    };

    (positioned, next)
}

/// Assign horizontal positions.
///
/// The root is pinned at x = 0 and its own branch length is ignored;
/// every other node sits at its parent's x plus its branch length, with
/// an absent length contributing 0.
pub fn assign_x(node: PositionedNode) -> PositionedNode {
    assign_x_from(node, 0.0)
}

fn assign_x_from(mut node: PositionedNode, x: f64) -> PositionedNode {
    node.x = x;
    node.children = node
        .children
        .into_iter()
        .map(|child| {
            let child_x = x + child.length.unwrap_or(0.0);
            assign_x_from(child, child_x)
        })
        .collect();
    node
}
