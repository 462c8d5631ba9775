pub const LIMIT: usize = 5;
pub const WIDTH: u32 = 100;
pub const HEIGHT: u32 = 40;
pub const MARGIN: u32 = 5;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// The most recent `LIMIT` known points, oldest first.
pub fn recent_points(sparkline: &[Option<f64>]) -> Vec<f64> {
    let known: Vec<f64> = sparkline
        .iter()
        .flatten()
        .copied()
        .filter(|p| p.is_finite())
        .collect();
    let skip = known.len().saturating_sub(LIMIT);
    known[skip..].to_vec()
}

/// Lays points out on a `WIDTH`x`HEIGHT` box with `MARGIN` on every side.
/// Higher prices sit nearer the top; a flat series sits mid-box.
pub fn layout(data: &[f64]) -> Vec<(f64, f64)> {
    if data.is_empty() {
        return Vec::new();
    }
    let (min, max) = bounds(data);
    let margin = MARGIN as f64;
    let range = if max - min == 0.0 { 2.0 } else { max - min };
    let v_factor = (HEIGHT as f64 - margin * 2.0) / range;
    let slots = LIMIT - usize::from(data.len() > 1);
    let h_factor = (WIDTH as f64 - margin * 2.0) / slots as f64;

    data.iter()
        .enumerate()
        .map(|(i, &p)| {
            let x = i as f64 * h_factor + margin;
            let y = if max == min { 1.0 } else { max - p } * v_factor + margin;
            (x, y)
        })
        .collect()
}

pub fn svg_points(data: &[f64]) -> String {
    layout(data)
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One block glyph per point, scaled between the series min and max.
pub fn glyphs(data: &[f64]) -> String {
    if data.is_empty() {
        return String::new();
    }
    let (min, max) = bounds(data);
    let range = max - min;
    data.iter()
        .map(|&p| {
            let normalized = if range > 1e-12 { (p - min) / range } else { 0.5 };
            let idx = (normalized * (BARS.len() - 1) as f64) as usize;
            BARS[idx.min(BARS.len() - 1)]
        })
        .collect()
}

fn bounds(data: &[f64]) -> (f64, f64) {
    data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
        (lo.min(p), hi.max(p))
    })
}
