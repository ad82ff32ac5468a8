use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use log::info;

use crate::demo;
use crate::export::svg::{export_svg, SvgOptions};
use crate::io;
use crate::metadata::{self, MetadataTable};
use crate::scale::ScaleOrigin;
use crate::tree::prepare::prepare_tree;
use crate::ui;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "cladeview",
    about = "Lays out phylogenetic trees with metadata overlays and renders them to SVG."
)]
pub struct AppConfig {
    /// Tree file to load (Newick format).
    #[arg(value_name = "TREE_FILE")]
    pub tree_path: Option<PathBuf>,

    /// Metadata table joined against tip names (CSV, or TSV by extension).
    #[arg(short, long, value_name = "TABLE")]
    pub metadata: Option<PathBuf>,

    /// Export path for an SVG rendering.
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1100)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 760)]
    pub height: u32,

    /// Reference point for scale-bar distances.
    #[arg(long, value_enum, default_value_t = OriginArg::Tips)]
    pub origin: OriginArg,

    /// Generate a random demo tree with this many samples instead of
    /// loading a file.
    #[arg(long, value_name = "SAMPLES")]
    pub demo: Option<usize>,

    /// Random seed for demo generation.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stretch demo tip branches so all leaves share the same depth.
    #[arg(long)]
    pub ultrametric: bool,

    /// Directory to write generated demo files into.
    #[arg(long, value_name = "DIR")]
    pub demo_out: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum OriginArg {
    Tips,
    Root,
}

impl From<OriginArg> for ScaleOrigin {
    fn from(value: OriginArg) -> Self {
        match value {
            OriginArg::Tips => ScaleOrigin::Tips,
            OriginArg::Root => ScaleOrigin::Root,
        }
    }
}

pub struct CladeviewApp;

impl CladeviewApp {
    pub fn run(config: &AppConfig) -> Result<()> {
        let (newick_text, table) = Self::gather_inputs(config)?;
        let prepared = prepare_tree(&newick_text, &table.rows, &table.columns);
        ui::render_preview(&prepared, config);

        if let Some(dest) = &config.output {
            let options = SvgOptions {
                width: config.width as f64,
                height: config.height as f64,
                origin: config.origin.into(),
                ..SvgOptions::default()
            };
            export_svg(&prepared, &options, dest)?;
        }

        Ok(())
    }

    fn gather_inputs(config: &AppConfig) -> Result<(String, MetadataTable)> {
        if let Some(samples) = config.demo {
            info!("Generating demo data for {} sample(s).", samples);
            let data = demo::generate(samples, config.ultrametric, config.seed);
            if let Some(dir) = &config.demo_out {
                demo::write_files(
                    &data,
                    &dir.join("demo_tree.nwk"),
                    &dir.join("demo_metadata.csv"),
                )?;
                info!("Wrote demo files under {}", dir.display());
            }
            return Ok((data.newick, data.table));
        }

        let tree_path = config
            .tree_path
            .as_ref()
            .ok_or_else(|| anyhow!("a TREE_FILE argument or --demo is required"))?;
        let newick_text = io::load_newick(tree_path)?;

        let table = match &config.metadata {
            Some(path) => metadata::read_table(path)?,
            None => MetadataTable::default(),
        };

        Ok((newick_text, table))
    }
}
