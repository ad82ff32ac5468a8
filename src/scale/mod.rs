//! Distance-scale tick computation for scale bars and gridlines.
//!
//! Tick values are "nice" round numbers derived from the tree's maximum
//! depth; tick positions are those values mapped through the configured
//! origin (measuring from the tips or from the root).

/// Reference point from which scale-bar distances are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleOrigin {
    Tips,
    Root,
}

impl Default for ScaleOrigin {
    fn default() -> Self {
        ScaleOrigin::Tips
    }
}

/// Computed tick positions for one scale bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleTickSet {
    pub major_ticks: Vec<f64>,
    pub minor_ticks: Vec<f64>,
    pub base_ticks: Vec<f64>,
    pub unit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTickOptions {
    pub max_depth: f64,
    pub x_scale: f64,
    /// Minimum pixel width per major label.
    pub min_label_px: f64,
    /// Interpolated minor ticks per major gap.
    pub minor_count: usize,
    pub origin: ScaleOrigin,
}

impl ScaleTickOptions {
    pub fn new(max_depth: f64, x_scale: f64) -> Self {
        Self {
            max_depth,
            x_scale,
            ..Self::default()
        }
    }
}

impl Default for ScaleTickOptions {
    fn default() -> Self {
        Self {
            max_depth: 0.0,
            x_scale: 1.0,
            min_label_px: 48.0,
            minor_count: 4,
            origin: ScaleOrigin::Tips,
        }
    }
}

/// Pick a "nice" tick interval from the order of magnitude of `max_value`.
///
/// Undefined for `max_value <= 0`; callers guard.
pub fn scale_unit(max_value: f64) -> f64 {
    let magnitude = 10f64.powf(max_value.log10().floor());
    let ratio = max_value / magnitude;

    if ratio < 2.0 {
        0.1 * magnitude
    } else if ratio < 5.0 {
        0.5 * magnitude
    } else {
        magnitude
    }
}

/// Tick values from 0 to `max_value` inclusive in steps of `unit`.
///
/// `max_value <= 0` yields `[0]`; a non-positive `unit` yields an empty
/// sequence rather than looping forever.
pub fn ticks(max_value: f64, unit: f64) -> Vec<f64> {
    if max_value <= 0.0 {
        return vec![0.0];
    }
    if unit <= 0.0 {
        return Vec::new();
    }

    // Relative tolerance so binary near-multiples keep the final tick.
    let tolerance = unit * 1e-6;
    let mut values = Vec::new();
    let mut step = 0usize;

    loop {
        let value = step as f64 * unit;
        if value > max_value + tolerance {
            break;
        }
        values.push(value);
        step += 1;
    }

    values
}

/// Compute major, minor and base tick positions for a distance scale bar.
///
/// Major labels are a stride over the candidate ticks so that labels stay
/// at least `min_label_px` apart at the current scale; minor ticks are
/// interpolated evenly between consecutive major labels. Positions honor
/// the origin rule and come back sorted ascending.
pub fn scale_ticks(options: &ScaleTickOptions) -> ScaleTickSet {
    if options.max_depth <= 0.0 {
        return ScaleTickSet {
            major_ticks: vec![0.0],
            minor_ticks: Vec::new(),
            base_ticks: vec![0.0],
            unit: 0.0,
        };
    }

    let unit = scale_unit(options.max_depth / 5.0);
    let candidates = ticks(options.max_depth, unit);

    let width = options.max_depth * options.x_scale.max(0.0);
    let max_labels = ((width / options.min_label_px).floor() as usize).max(1);
    let every_n = candidates.len().div_ceil(max_labels).max(1);

    let major_values: Vec<f64> = candidates.iter().copied().step_by(every_n).collect();

    let mut minor_values = Vec::new();
    for pair in major_values.windows(2) {
        let gap = pair[1] - pair[0];
        for step in 1..=options.minor_count {
            let fraction = step as f64 / (options.minor_count + 1) as f64;
            minor_values.push(pair[0] + gap * fraction);
        }
    }

    let to_positions = |values: &[f64]| -> Vec<f64> {
        let mut positions: Vec<f64> = values
            .iter()
            .map(|value| tick_position(options.origin, options.max_depth, *value))
            .collect();
        positions.sort_by(f64::total_cmp);
        positions
    };

    ScaleTickSet {
        major_ticks: to_positions(&major_values),
        minor_ticks: to_positions(&minor_values),
        base_ticks: to_positions(&candidates),
        unit,
    }
}

/// Map a tick's label value to its position along the depth axis.
///
/// With the origin at the tips the axis is mirrored so 0 sits at the tips
/// while label values remain on round numbers.
pub fn tick_position(origin: ScaleOrigin, max_depth: f64, label: f64) -> f64 {
    match origin {
        ScaleOrigin::Tips => max_depth - label,
        ScaleOrigin::Root => label,
    }
}

/// Inverse of [`tick_position`]: the label value shown at a tick position.
pub fn label_value(origin: ScaleOrigin, max_depth: f64, tick: f64) -> f64 {
    match origin {
        ScaleOrigin::Tips => max_depth - tick,
        ScaleOrigin::Root => tick,
    }
}

/// Display precision for tick labels, derived from the tick unit.
pub fn label_decimals(max_depth: f64) -> usize {
    if max_depth <= 0.0 {
        return 1;
    }

    let unit = scale_unit(max_depth / 5.0);
    let decimals = (-unit.log10()).ceil();
    decimals.clamp(1.0, 4.0) as usize
}
