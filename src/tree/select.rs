use std::collections::HashSet;

use super::Tip;

/// Screen-space selection rectangle, in the same coordinate space as the
/// transformed tip positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Names of the tips whose marker falls inside `rect` after applying the
/// active scale and offset parameters.
///
/// Pure, order-independent linear scan; sufficient for typical tree
/// sizes. Unnamed tips cannot contribute a name and are skipped.
pub fn leaves_in_rect(
    tips: &[Tip],
    rect: &BoundingRect,
    x_scale: f64,
    y_mult: f64,
    pad_x: f64,
    pad_y: f64,
    left_shift: f64,
) -> HashSet<String> {
    let mut selected = HashSet::new();

    for tip in tips {
        if let Some(name) = &tip.name {
            let lx = pad_x + left_shift + tip.x * x_scale;
            let ly = pad_y + tip.y * y_mult;

            if lx >= rect.min_x && lx <= rect.max_x && ly >= rect.min_y && ly <= rect.max_y {
                selected.insert(name.clone());
            }
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip(name: Option<&str>, x: f64, y: f64) -> Tip {
        Tip {
            id: 0,
            name: name.map(str::to_string),
            x,
            y,
            metadata: None,
        }
    }

    #[test]
    fn selects_only_tips_inside_the_rect() {
        let tips = vec![tip(Some("near"), 10.0, 10.0), tip(Some("far"), 100.0, 100.0)];
        let rect = BoundingRect {
            min_x: 0.0,
            max_x: 50.0,
            min_y: 0.0,
            max_y: 50.0,
        };

        let selected = leaves_in_rect(&tips, &rect, 1.0, 1.0, 0.0, 0.0, 0.0);
        assert_eq!(selected.len(), 1);
        assert!(selected.contains("near"));
    }

    #[test]
    fn rect_bounds_are_inclusive() {
        let tips = vec![tip(Some("edge"), 50.0, 50.0)];
        let rect = BoundingRect {
            min_x: 0.0,
            max_x: 50.0,
            min_y: 0.0,
            max_y: 50.0,
        };

        let selected = leaves_in_rect(&tips, &rect, 1.0, 1.0, 0.0, 0.0, 0.0);
        assert!(selected.contains("edge"));
    }

    #[test]
    fn offsets_shift_tips_into_and_out_of_the_rect() {
        let tips = vec![tip(Some("A"), 10.0, 10.0)];
        let rect = BoundingRect {
            min_x: 100.0,
            max_x: 200.0,
            min_y: 0.0,
            max_y: 50.0,
        };

        // Screen x = 40 + 70 + 10 * 1.0 = 120, y = 5 + 10 * 2.0 = 25.
        let selected = leaves_in_rect(&tips, &rect, 1.0, 2.0, 40.0, 5.0, 70.0);
        assert!(selected.contains("A"));

        let selected = leaves_in_rect(&tips, &rect, 1.0, 2.0, 0.0, 5.0, 0.0);
        assert!(selected.is_empty());
    }

    #[test]
    fn scaling_transforms_tip_positions() {
        let tips = vec![tip(Some("A"), 0.5, 2.0), tip(Some("B"), 1.5, 3.0)];
        let rect = BoundingRect {
            min_x: 0.0,
            max_x: 100.0,
            min_y: 0.0,
            max_y: 50.0,
        };

        // A lands at (50, 40); B lands at (150, 60), outside on both axes.
        let selected = leaves_in_rect(&tips, &rect, 100.0, 20.0, 0.0, 0.0, 0.0);
        assert_eq!(selected.len(), 1);
        assert!(selected.contains("A"));
    }

    #[test]
    fn unnamed_tips_are_skipped() {
        let tips = vec![tip(None, 10.0, 10.0), tip(Some("named"), 10.0, 10.0)];
        let rect = BoundingRect {
            min_x: 0.0,
            max_x: 50.0,
            min_y: 0.0,
            max_y: 50.0,
        };

        let selected = leaves_in_rect(&tips, &rect, 1.0, 1.0, 0.0, 0.0, 0.0);
        assert_eq!(selected.len(), 1);
    }
}
