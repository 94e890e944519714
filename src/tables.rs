use chrono_tz::Tz;
use comfy_table::{Cell, CellAlignment, Table, modifiers, presets};

use crate::core::point::Point;

pub fn build_points_table(points: &[Point], time_zone: Tz) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Interval end", "Consumption", "Rate", "Cost", "Total cost"]);
    for point in points {
        let field = |key: &str| {
            point
                .fields
                .get(key)
                .map_or_else(|| Cell::new("-"), |value| Cell::new(format!("{value:.3}")))
                .set_alignment(CellAlignment::Right)
        };
        table.add_row(vec![
            Cell::new(point.time.with_timezone(&time_zone).format("%Y-%m-%d %H:%M %Z")),
            field("consumption"),
            field("rate"),
            field("cost"),
            field("total_cost"),
        ]);
    }
    table
}
