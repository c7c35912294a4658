//! InfluxDB line protocol rendering
//!
//! `measurement[,tag=value...] field=valuei[,field=valuei...] timestamp`
//!
//! Fields are integers and carry the `i` suffix. Keys come out sorted
//! because [`FieldSet`](crate::transform::FieldSet) is a `BTreeMap`.

use crate::transform::{Point, WriteBatch};

/// Render one point as a single line (no trailing newline).
pub fn render_point(point: &Point) -> String {
    let mut line = escape(&point.series, &[',', ' ']);

    for (key, value) in &point.tags {
        line.push(',');
        line.push_str(&escape(key, &[',', '=', ' ']));
        line.push('=');
        line.push_str(&escape(value, &[',', '=', ' ']));
    }

    line.push(' ');
    for (i, (key, value)) in point.fields.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        line.push_str(&escape(key, &[',', '=', ' ']));
        line.push_str(&format!("={}i", value));
    }

    line.push_str(&format!(" {}", point.epoch_seconds()));
    line
}

/// Render a whole batch, one line per point, in batch order.
pub fn render_batch(batch: &WriteBatch) -> String {
    batch
        .points()
        .iter()
        .map(render_point)
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape(raw: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '\\' || special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
