use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use svg::node::element::{Circle, Group, Line, Rectangle, Text};
use svg::Document;

use crate::scale::{self, ScaleOrigin, ScaleTickOptions};
use crate::tree::{PositionedNode, PreparedTree};

/// Rendering options for SVG export.
#[derive(Debug, Clone)]
pub struct SvgOptions {
    pub width: f64,
    pub height: f64,
    pub origin: ScaleOrigin,
    pub show_tip_labels: bool,
    pub tip_label_font_size: f64,
    pub min_label_px: f64,
    pub minor_count: usize,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 760.0,
            origin: ScaleOrigin::Tips,
            show_tip_labels: true,
            tip_label_font_size: 11.0,
            min_label_px: 48.0,
            minor_count: 4,
        }
    }
}

/// Export a prepared tree to an SVG document with a distance scale bar.
pub fn export_svg(prepared: &PreparedTree, options: &SvgOptions, path: &Path) -> Result<()> {
    // Margins follow the interactive canvas conventions.
    let margin_x = (options.width * 0.05).max(20.0).min(60.0);
    let margin_y = (options.height * 0.05).max(20.0).min(40.0);
    let label_gutter = if options.show_tip_labels { 120.0 } else { 0.0 };
    let scale_bar_height = 40.0;

    let inner_width = (options.width - 2.0 * margin_x - label_gutter).max(1.0);
    let inner_height = (options.height - 2.0 * margin_y - scale_bar_height).max(1.0);

    let x_scale = if prepared.max_depth <= f64::EPSILON {
        inner_width
    } else {
        inner_width / prepared.max_depth
    };
    let tip_count = prepared.tips.len().max(1);
    let y_scale = if tip_count > 1 {
        inner_height / (tip_count - 1) as f64
    } else {
        inner_height
    };

    let to_svg = |x: f64, y: f64| (margin_x + x * x_scale, margin_y + y * y_scale);

    let mut document = Document::new()
        .set("width", options.width)
        .set("height", options.height)
        .set("viewBox", (0, 0, options.width as i32, options.height as i32));

    let background = Rectangle::new()
        .set("width", "100%")
        .set("height", "100%")
        .set("fill", "white");
    document = document.add(background);

    let tick_options = ScaleTickOptions {
        max_depth: prepared.max_depth,
        x_scale,
        min_label_px: options.min_label_px,
        minor_count: options.minor_count,
        origin: options.origin,
    };
    let tick_set = scale::scale_ticks(&tick_options);
    let axis_y = options.height - margin_y;

    // Gridlines sit behind the tree.
    let mut gridlines = Group::new()
        .set("id", "gridlines")
        .set("stroke", "#dddddd")
        .set("stroke-width", 1.0);
    for tick in &tick_set.major_ticks {
        let x = margin_x + tick * x_scale;
        gridlines = gridlines.add(
            Line::new()
                .set("x1", x)
                .set("y1", margin_y)
                .set("x2", x)
                .set("y2", axis_y - scale_bar_height / 2.0),
        );
    }
    document = document.add(gridlines);

    let mut branches = Group::new()
        .set("id", "branches")
        .set("stroke", "black")
        .set("stroke-width", 1.5)
        .set("fill", "none");
    branches = add_branches(&prepared.tree, &to_svg, branches);
    document = document.add(branches);

    let mut tips = Group::new().set("id", "tips");
    for tip in &prepared.tips {
        let (x, y) = to_svg(tip.x, tip.y);
        tips = tips.add(
            Circle::new()
                .set("cx", x)
                .set("cy", y)
                .set("r", 3.0)
                .set("fill", "#ffcd8c"),
        );

        if options.show_tip_labels {
            if let Some(name) = &tip.name {
                let label = Text::new()
                    .set("x", x + 6.0)
                    .set("y", y)
                    .set("font-size", options.tip_label_font_size)
                    .set("dominant-baseline", "central")
                    .set("fill", "black")
                    .add(svg::node::Text::new(name.clone()));
                tips = tips.add(label);
            }
        }
    }
    document = document.add(tips);

    document = document.add(scale_bar_group(
        &tick_set,
        &tick_options,
        margin_x,
        axis_y,
        x_scale,
    ));

    svg::save(path, &document)
        .with_context(|| format!("failed to write SVG export: {}", path.display()))?;
    info!("Wrote SVG export to {}", path.display());

    Ok(())
}

/// Rectangular branch drawing: a vertical connector spanning first to
/// last child, plus one horizontal segment per child.
fn add_branches<F>(node: &PositionedNode, to_svg: &F, mut group: Group) -> Group
where
    F: Fn(f64, f64) -> (f64, f64),
{
    if let (Some(first), Some(last)) = (node.children.first(), node.children.last()) {
        let (node_x, _) = to_svg(node.x, node.y);
        let (_, first_y) = to_svg(node.x, first.y);
        let (_, last_y) = to_svg(node.x, last.y);

        if node.children.len() > 1 {
            group = group.add(
                Line::new()
                    .set("x1", node_x)
                    .set("y1", first_y)
                    .set("x2", node_x)
                    .set("y2", last_y),
            );
        }

        for child in &node.children {
            let (child_x, child_y) = to_svg(child.x, child.y);
            group = group.add(
                Line::new()
                    .set("x1", node_x)
                    .set("y1", child_y)
                    .set("x2", child_x)
                    .set("y2", child_y),
            );
            group = add_branches(child, to_svg, group);
        }
    }

    group
}

fn scale_bar_group(
    tick_set: &scale::ScaleTickSet,
    tick_options: &ScaleTickOptions,
    margin_x: f64,
    axis_y: f64,
    x_scale: f64,
) -> Group {
    let mut group = Group::new()
        .set("id", "scale_bar")
        .set("stroke", "black")
        .set("stroke-width", 1.0);

    let axis_span = tick_options.max_depth.max(0.0) * x_scale;
    group = group.add(
        Line::new()
            .set("x1", margin_x)
            .set("y1", axis_y)
            .set("x2", margin_x + axis_span)
            .set("y2", axis_y),
    );

    for tick in &tick_set.minor_ticks {
        let x = margin_x + tick * x_scale;
        group = group.add(
            Line::new()
                .set("x1", x)
                .set("y1", axis_y)
                .set("x2", x)
                .set("y2", axis_y + 3.0),
        );
    }

    let decimals = scale::label_decimals(tick_options.max_depth);
    for tick in &tick_set.major_ticks {
        let x = margin_x + tick * x_scale;
        group = group.add(
            Line::new()
                .set("x1", x)
                .set("y1", axis_y)
                .set("x2", x)
                .set("y2", axis_y + 6.0),
        );

        let value = scale::label_value(tick_options.origin, tick_options.max_depth, *tick);
        let content = svg::node::Text::new(format!("{:.*}", decimals, value));
        let label = Text::new()
            .set("x", x)
            .set("y", axis_y + 18.0)
            .set("font-size", 10.0)
            .set("text-anchor", "middle")
            .set("stroke", "none")
            .set("fill", "black")
            .add(content);
        group = group.add(label);
    }

    group
}
