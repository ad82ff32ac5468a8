//! Random demo tree and metadata generation for quick experiments.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::metadata::{Column, MetadataRow, MetadataTable};
use crate::tree::{newick, RawNode};

const DEMO_COLUMNS: [&str; 10] = [
    "sample_id",
    "collection_date",
    "city",
    "country",
    "sample_type",
    "antimicrobial_resistance",
    "strain",
    "host",
    "lineage",
    "clade",
];

const CITIES: [(&str, &str); 10] = [
    ("Seattle", "USA"),
    ("Boston", "USA"),
    ("London", "UK"),
    ("Berlin", "Germany"),
    ("Nairobi", "Kenya"),
    ("Sao Paulo", "Brazil"),
    ("Mumbai", "India"),
    ("Sydney", "Australia"),
    ("Tokyo", "Japan"),
    ("Cape Town", "South Africa"),
];

/// Generated tree plus the matching metadata table.
#[derive(Debug, Clone)]
pub struct DemoData {
    pub newick: String,
    pub table: MetadataTable,
}

/// Generate a random binary tree over `S001..` sample ids and a metadata
/// row per sample. Deterministic under a fixed seed.
pub fn generate(samples: usize, ultrametric: bool, seed: Option<u64>) -> DemoData {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let sample_ids: Vec<String> = (1..=samples.max(2))
        .map(|index| format!("S{:03}", index))
        .collect();

    let mut shuffled = sample_ids.clone();
    let mut tree = build_random_tree(&mut shuffled, &mut rng);
    if ultrametric {
        let target = leaf_depths(&tree, 0.0).into_iter().fold(0.0f64, f64::max);
        stretch_to_depth(&mut tree, target, 0.0);
    }

    let clade_map = assign_clades(&tree, &mut rng);
    let rows = generate_rows(&sample_ids, &clade_map, &mut rng);
    let columns = DEMO_COLUMNS.iter().copied().map(Column::new).collect();

    DemoData {
        newick: newick::write(&tree),
        table: MetadataTable { columns, rows },
    }
}

/// Write the generated tree and metadata table to disk.
pub fn write_files(data: &DemoData, tree_path: &Path, metadata_path: &Path) -> Result<()> {
    fs::write(tree_path, format!("{}\n", data.newick))
        .with_context(|| format!("failed to write demo tree: {}", tree_path.display()))?;

    let mut writer = csv::Writer::from_path(metadata_path)
        .with_context(|| format!("failed to write demo metadata: {}", metadata_path.display()))?;
    writer.write_record(data.table.columns.iter().map(|column| column.key.as_str()))?;
    for row in &data.table.rows {
        writer.write_record(
            data.table
                .columns
                .iter()
                .map(|column| row.get(&column.key).map(String::as_str).unwrap_or("")),
        )?;
    }
    writer.flush()?;

    Ok(())
}

fn build_random_tree(ids: &mut [String], rng: &mut StdRng) -> RawNode {
    if ids.len() == 1 {
        return RawNode::new(Some(ids[0].clone()), Some(rng.gen_range(0.02..0.3)));
    }

    let split = rng.gen_range(1..ids.len());
    ids.shuffle(rng);
    let (left_ids, right_ids) = ids.split_at_mut(split);
    let left = build_random_tree(left_ids, rng);
    let right = build_random_tree(right_ids, rng);

    let mut node = RawNode::new(None, Some(rng.gen_range(0.02..0.2)));
    node.children = vec![left, right];
    node
}

fn leaf_depths(node: &RawNode, parent_depth: f64) -> Vec<f64> {
    let depth = parent_depth + node.length.unwrap_or(0.0);
    if node.is_leaf() {
        return vec![depth];
    }
    node.children
        .iter()
        .flat_map(|child| leaf_depths(child, depth))
        .collect()
}

/// Extend tip branches so every leaf sits at `target` depth.
fn stretch_to_depth(node: &mut RawNode, target: f64, parent_depth: f64) {
    let depth = parent_depth + node.length.unwrap_or(0.0);
    if node.is_leaf() {
        let extension = (target - depth).max(0.0);
        node.length = Some(node.length.unwrap_or(0.0) + extension);
        return;
    }
    for child in &mut node.children {
        stretch_to_depth(child, target, depth);
    }
}

/// Clade and lineage labels derived from the top-level tree structure.
fn assign_clades(tree: &RawNode, rng: &mut StdRng) -> HashMap<String, (String, String)> {
    let mut clades = ["A", "B", "C", "D"];
    clades.shuffle(rng);
    let bases: HashMap<&str, &str> = [("A", "L1"), ("B", "L2"), ("C", "L3"), ("D", "L4")]
        .into_iter()
        .collect();

    let mut mapping = HashMap::new();
    for (index, child) in tree.children.iter().enumerate() {
        let clade = clades[index % clades.len()];
        let base = bases.get(clade).copied().unwrap_or("L1");

        let subgroups: Vec<&RawNode> = if child.children.is_empty() {
            vec![child]
        } else {
            child.children.iter().collect()
        };

        for (sub_index, subgroup) in subgroups.iter().enumerate() {
            let lineage = format!("{}.{}", base, sub_index + 1);
            for leaf in collect_leaf_names(subgroup) {
                mapping.insert(leaf, (clade.to_string(), lineage.clone()));
            }
        }
    }

    mapping
}

fn collect_leaf_names(node: &RawNode) -> Vec<String> {
    if node.is_leaf() {
        return node.name.clone().into_iter().collect();
    }
    node.children.iter().flat_map(collect_leaf_names).collect()
}

fn generate_rows(
    sample_ids: &[String],
    clade_map: &HashMap<String, (String, String)>,
    rng: &mut StdRng,
) -> Vec<MetadataRow> {
    let sample_types = ["blood", "feces", "swab", "environmental"];
    let resistance = ["none", "low", "moderate", "high"];
    let hosts = ["human", "livestock", "wildlife", "environment"];
    let fallback_lineages = ["L1", "L2", "L3", "L4"];
    let fallback_clades = ["A", "B", "C", "D"];

    let mut rows = Vec::with_capacity(sample_ids.len());
    for sample_id in sample_ids {
        let (city, country) = CITIES[rng.gen_range(0..CITIES.len())];
        let (clade, lineage) = match clade_map.get(sample_id) {
            Some((clade, lineage)) => (clade.clone(), lineage.clone()),
            None => (
                fallback_clades.choose(rng).copied().unwrap_or("A").to_string(),
                fallback_lineages.choose(rng).copied().unwrap_or("L1").to_string(),
            ),
        };

        let mut row = MetadataRow::new();
        row.insert("sample_id".to_string(), sample_id.clone());
        row.insert("collection_date".to_string(), random_collection_date(rng));
        row.insert("city".to_string(), city.to_string());
        row.insert("country".to_string(), country.to_string());
        row.insert(
            "sample_type".to_string(),
            sample_types.choose(rng).copied().unwrap_or("blood").to_string(),
        );
        row.insert(
            "antimicrobial_resistance".to_string(),
            resistance.choose(rng).copied().unwrap_or("none").to_string(),
        );
        row.insert(
            "strain".to_string(),
            format!("ST{:02}", rng.gen_range(1..=99)),
        );
        row.insert(
            "host".to_string(),
            hosts.choose(rng).copied().unwrap_or("human").to_string(),
        );
        row.insert("lineage".to_string(), lineage);
        row.insert("clade".to_string(), clade);
        rows.push(row);
    }

    rows
}

/// ISO date between 2018-01-01 and 2024-12-31.
fn random_collection_date(rng: &mut StdRng) -> String {
    let offset = rng.gen_range(0..=2556u64);
    NaiveDate::from_ymd_opt(2018, 1, 1)
        .and_then(|start| start.checked_add_days(Days::new(offset)))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "2018-01-01".to_string())
}
