use crate::app::AppConfig;
use crate::scale::{self, ScaleTickOptions};
use crate::tree::PreparedTree;

/// Print a plain-text summary of a prepared tree.
pub fn render_preview(prepared: &PreparedTree, config: &AppConfig) {
    println!(
        "Prepared tree with {} tip(s) across {} node(s).",
        prepared.tips.len(),
        prepared.tree.node_count()
    );

    let decimals = scale::label_decimals(prepared.max_depth);
    println!("Max depth: {:.*}", decimals, prepared.max_depth);

    let x_scale = if prepared.max_depth > 0.0 {
        config.width as f64 / prepared.max_depth
    } else {
        1.0
    };
    let tick_set = scale::scale_ticks(&ScaleTickOptions {
        origin: config.origin.into(),
        ..ScaleTickOptions::new(prepared.max_depth, x_scale)
    });
    println!(
        "Scale unit {:.*} with {} major tick(s).",
        decimals,
        tick_set.unit,
        tick_set.major_ticks.len()
    );

    let joined = prepared
        .tips
        .iter()
        .filter(|tip| tip.metadata.is_some())
        .count();
    if joined > 0 {
        println!("Metadata joined for {}/{} tip(s).", joined, prepared.tips.len());
    }

    for tip in prepared.tips.iter().take(5) {
        let name = tip.name.as_deref().unwrap_or("<unnamed>");
        println!("  tip {:>3}  y={:<4} x={:.4}  {}", tip.id, tip.y, tip.x, name);
    }
    if prepared.tips.len() > 5 {
        println!("  ... {} more", prepared.tips.len() - 5);
    }
}
