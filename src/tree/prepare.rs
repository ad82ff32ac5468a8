use std::collections::HashMap;

use crate::metadata::{Column, MetadataRow};

use super::{annotate, layout, newick, PositionedNode, PreparedTree, Tip};

/// Build a fully prepared tree from a Newick string and metadata rows.
///
/// Steps run in a fixed order: parse, assign y (fresh counter), assign x
/// (root pinned at 0), assign preorder ids (fresh counter), index leaf
/// names, collect tips left to right, join metadata on the first column's
/// key, and compute the maximum depth.
///
/// Never fails: malformed Newick degenerates to a single-node tree, join
/// misses leave tips without metadata, and an empty column list skips the
/// join entirely.
pub fn prepare_tree(
    newick_text: &str,
    rows: &[MetadataRow],
    columns: &[Column],
) -> PreparedTree {
    let raw = newick::parse(newick_text);
    let (tree, _) = layout::assign_y(&raw, 0);
    let tree = layout::assign_x(tree);
    let (tree, _) = annotate::assign_ids(tree, 0);
    let tree = annotate::assign_leaf_names(tree);

    let lookup = columns
        .first()
        .map(|column| build_lookup(rows, &column.key));
    let tips = collect_tips(&tree, lookup.as_ref());
    let max_depth = tree.max_x();

    PreparedTree {
        tree,
        tips,
        max_depth,
    }
}

/// Identifier value to full row; later rows win on duplicate values.
fn build_lookup<'a>(rows: &'a [MetadataRow], key: &str) -> HashMap<&'a str, &'a MetadataRow> {
    let mut lookup = HashMap::new();
    for row in rows {
        if let Some(value) = row.get(key) {
            lookup.insert(value.as_str(), row);
        }
    }
    lookup
}

/// Collect leaves in left-to-right order with an explicit stack, so very
/// deep or unbalanced trees cannot overflow the call stack on this path.
fn collect_tips(
    root: &PositionedNode,
    lookup: Option<&HashMap<&str, &MetadataRow>>,
) -> Vec<Tip> {
    let mut tips = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_leaf() {
            let metadata = match (&node.name, lookup) {
                (Some(name), Some(lookup)) => {
                    lookup.get(name.as_str()).map(|row| (*row).clone())
                }
                _ => None,
            };
            tips.push(Tip {
                id: node.id,
                name: node.name.clone(),
                x: node.x,
                y: node.y,
                metadata,
            });
        } else {
            // Reversed so the leftmost child pops first.
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> MetadataRow {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn sample_columns() -> Vec<Column> {
        vec![Column::new("sample_id"), Column::new("city")]
    }

    #[test]
    fn tips_come_back_in_leaf_order() {
        let prepared = prepare_tree("((A,B)AB,(C,D)CD);", &[], &[]);

        let names: Vec<_> = prepared
            .tips
            .iter()
            .map(|tip| tip.name.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, ["A", "B", "C", "D"]);

        for (index, tip) in prepared.tips.iter().enumerate() {
            assert_eq!(tip.y, index as f64);
        }
    }

    #[test]
    fn max_depth_is_maximum_x() {
        let prepared = prepare_tree("((A:0.25,B:0.5)AB:1.0,C:0.75);", &[], &[]);
        assert_eq!(prepared.max_depth, 1.5);
    }

    #[test]
    fn single_node_tree_has_zero_depth_and_one_tip() {
        let prepared = prepare_tree("Lonely;", &[], &[]);
        assert_eq!(prepared.max_depth, 0.0);
        assert_eq!(prepared.tips.len(), 1);
        assert_eq!(prepared.tips[0].name.as_deref(), Some("Lonely"));
    }

    #[test]
    fn malformed_input_still_prepares() {
        let prepared = prepare_tree("((A,B", &[], &[]);
        assert_eq!(prepared.tips.len(), 2);

        let prepared = prepare_tree("", &[], &[]);
        assert_eq!(prepared.tips.len(), 1);
        assert_eq!(prepared.max_depth, 0.0);
    }

    #[test]
    fn metadata_joins_on_first_column_key() {
        let rows = vec![
            row(&[("sample_id", "A"), ("city", "Berlin")]),
            row(&[("sample_id", "C"), ("city", "Nairobi")]),
        ];
        let prepared = prepare_tree("((A,B)AB,(C,D)CD);", &rows, &sample_columns());

        let a = &prepared.tips[0];
        assert_eq!(
            a.metadata.as_ref().and_then(|m| m.get("city")).map(String::as_str),
            Some("Berlin")
        );
        assert!(prepared.tips[1].metadata.is_none());
        assert!(prepared.tips[2].metadata.is_some());
        assert!(prepared.tips[3].metadata.is_none());
    }

    #[test]
    fn empty_columns_skip_the_join() {
        let rows = vec![row(&[("sample_id", "A")])];
        let prepared = prepare_tree("(A,B);", &rows, &[]);
        assert!(prepared.tips.iter().all(|tip| tip.metadata.is_none()));
    }

    #[test]
    fn duplicate_identifier_values_take_the_last_row() {
        let rows = vec![
            row(&[("sample_id", "A"), ("city", "Old")]),
            row(&[("sample_id", "A"), ("city", "New")]),
        ];
        let prepared = prepare_tree("(A,B);", &rows, &sample_columns());

        assert_eq!(
            prepared.tips[0]
                .metadata
                .as_ref()
                .and_then(|m| m.get("city"))
                .map(String::as_str),
            Some("New")
        );
    }

    #[test]
    fn balanced_tree_ids_are_contiguous() {
        // 25 leaves under arbitrary nesting.
        let mut newick_text = String::from("L01");
        for index in 2..=25 {
            newick_text = format!("({},L{:02}:0.1)", newick_text, index);
        }
        newick_text.push(';');

        let prepared = prepare_tree(&newick_text, &[], &[]);
        assert_eq!(prepared.tips.len(), 25);

        fn collect_ids(node: &PositionedNode, ids: &mut Vec<usize>) {
            ids.push(node.id);
            for child in &node.children {
                collect_ids(child, ids);
            }
        }

        let mut ids = Vec::new();
        collect_ids(&prepared.tree, &mut ids);
        ids.sort_unstable();
        assert_eq!(ids, (0..prepared.tree.node_count()).collect::<Vec<_>>());
    }

    #[test]
    fn preparation_is_idempotent() {
        let rows = vec![row(&[("sample_id", "A"), ("city", "Tokyo")])];
        let columns = sample_columns();

        let first = prepare_tree("((A:0.1,B:0.2)AB:0.5,C:0.3);", &rows, &columns);
        let second = prepare_tree("((A:0.1,B:0.2)AB:0.5,C:0.3);", &rows, &columns);
        assert_eq!(first, second);
    }
}
