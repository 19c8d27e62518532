// crates/agenticops-core/src/chart.rs
// Pure chart geometry for the bar and line card variants (SVG coordinates)

use agenticops_types::ChartPayload;

const PALETTE: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#8b5cf6", "#ef4444"];

/// Drawing area inside an SVG viewBox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub pad_left: f64,
    pub pad_right: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 192.0,
            pad_left: 32.0,
            pad_right: 10.0,
            pad_top: 5.0,
            pad_bottom: 20.0,
        }
    }
}

impl ChartFrame {
    pub fn plot_width(&self) -> f64 {
        (self.width - self.pad_left - self.pad_right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.pad_top - self.pad_bottom).max(0.0)
    }

    /// y coordinate of the value axis baseline
    pub fn baseline(&self) -> f64 {
        self.pad_top + self.plot_height()
    }

    fn scale_y(&self, value: f64, ceiling: f64) -> f64 {
        self.baseline() - (value.max(0.0) / ceiling) * self.plot_height()
    }
}

/// Series colour, falling back to a fixed palette when the payload omits one
pub fn series_color(color: &str, index: usize) -> String {
    if color.trim().is_empty() {
        PALETTE[index % PALETTE.len()].to_string()
    } else {
        color.to_string()
    }
}

/// Round the largest value up to 1, 2 or 5 times a power of ten
pub fn value_ceiling(payload: &ChartPayload) -> f64 {
    let max = payload
        .datasets
        .iter()
        .flat_map(|ds| ds.data.iter().copied())
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powi(max.log10().floor() as i32);
    let normalized = max / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub value: f64,
}

/// One bar per (label, dataset); missing points count as zero
pub fn bar_layout(payload: &ChartPayload, frame: &ChartFrame) -> Vec<BarRect> {
    let groups = payload.labels.len();
    let series = payload.datasets.len();
    if groups == 0 || series == 0 {
        return Vec::new();
    }

    let ceiling = value_ceiling(payload);
    let group_width = frame.plot_width() / groups as f64;
    let inner = group_width * 0.8;
    let bar_width = inner / series as f64;

    let mut bars = Vec::with_capacity(groups * series);
    for g in 0..groups {
        let group_x = frame.pad_left + g as f64 * group_width + (group_width - inner) / 2.0;
        for (s, ds) in payload.datasets.iter().enumerate() {
            let value = ds.data.get(g).copied().filter(|v| v.is_finite()).unwrap_or(0.0);
            let y = frame.scale_y(value, ceiling);
            bars.push(BarRect {
                x: group_x + s as f64 * bar_width,
                y,
                width: bar_width,
                height: frame.baseline() - y,
                color: series_color(&ds.color, s),
                value,
            });
        }
    }
    bars
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub color: String,
    pub points: Vec<(f64, f64)>,
}

/// Points spread evenly across the plot; missing points are skipped
pub fn line_points(payload: &ChartPayload, frame: &ChartFrame) -> Vec<LineSeries> {
    let n = payload.labels.len();
    let ceiling = value_ceiling(payload);
    let step = if n > 1 {
        frame.plot_width() / (n - 1) as f64
    } else {
        0.0
    };
    let x_at = |i: usize| {
        if n > 1 {
            frame.pad_left + i as f64 * step
        } else {
            frame.pad_left + frame.plot_width() / 2.0
        }
    };

    payload
        .datasets
        .iter()
        .enumerate()
        .map(|(s, ds)| LineSeries {
            label: ds.label.clone(),
            color: series_color(&ds.color, s),
            points: ds
                .data
                .iter()
                .take(n)
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, v)| (x_at(i), frame.scale_y(*v, ceiling)))
                .collect(),
        })
        .collect()
}

/// SVG `points` attribute
pub fn polyline_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}
