// crates/agenticops-app/src/components/cards/charts.rs
// SVG bar and line charts drawn from core chart geometry

use agenticops_core::chart::{
    ChartFrame, bar_layout, line_points, polyline_attr, series_color, value_ceiling,
};
use agenticops_types::ChartPayload;
use leptos::prelude::*;

/// SVG attribute text for a coordinate
fn num(v: f64) -> String {
    format!("{:.1}", v)
}

fn view_box(frame: &ChartFrame) -> String {
    format!("0 0 {} {}", frame.width, frame.height)
}

/// Gridlines at quarter steps of the value ceiling, labelled on the left
fn value_axis(frame: ChartFrame, ceiling: f64) -> impl IntoView {
    (0..=4)
        .map(|i| {
            let fraction = i as f64 / 4.0;
            let y = frame.baseline() - fraction * frame.plot_height();
            let label = format!("{}", (ceiling * fraction * 100.0).round() / 100.0);
            view! {
                <line
                    x1=num(frame.pad_left)
                    x2=num(frame.width - frame.pad_right)
                    y1=num(y)
                    y2=num(y)
                    stroke="#1f2937"
                    stroke-dasharray="3 3"
                ></line>
                <text x=num(frame.pad_left - 4.0) y=num(y + 3.0) text-anchor="end" font-size="9" fill="#6b7280">
                    {label}
                </text>
            }
        })
        .collect::<Vec<_>>()
}

fn legend(payload: &ChartPayload) -> impl IntoView + use<> {
    let items = payload
        .datasets
        .iter()
        .enumerate()
        .map(|(i, ds)| {
            let color = series_color(&ds.color, i);
            view! {
                <span class="flex items-center gap-1 text-[10px] text-gray-400">
                    <span class="w-2 h-2 rounded-sm" style=format!("background-color: {}", color)></span>
                    {ds.label.clone()}
                </span>
            }
        })
        .collect::<Vec<_>>();
    view! { <div class="flex flex-wrap gap-3 mt-1">{items}</div> }
}

fn category_labels(payload: &ChartPayload, frame: ChartFrame, centered: bool) -> impl IntoView + use<> {
    let n = payload.labels.len();
    payload
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let x = if centered || n < 2 {
                frame.pad_left + (i as f64 + 0.5) * frame.plot_width() / n.max(1) as f64
            } else {
                frame.pad_left + i as f64 * frame.plot_width() / (n - 1) as f64
            };
            view! {
                <text x=num(x) y=num(frame.height - 6.0) text-anchor="middle" font-size="9" fill="#9ca3af">
                    {label.clone()}
                </text>
            }
        })
        .collect::<Vec<_>>()
}

#[component]
pub fn BarChart(payload: ChartPayload) -> impl IntoView {
    let frame = ChartFrame::default();
    let ceiling = value_ceiling(&payload);
    let bars = bar_layout(&payload, &frame)
        .into_iter()
        .map(|bar| {
            view! {
                <rect x=num(bar.x) y=num(bar.y) width=num(bar.width) height=num(bar.height) fill=bar.color rx="2"></rect>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <svg class="w-full h-48" viewBox=view_box(&frame) preserveAspectRatio="none">
            {value_axis(frame, ceiling)}
            {bars}
            {category_labels(&payload, frame, true)}
        </svg>
        {legend(&payload)}
    }
}

#[component]
pub fn LineChart(payload: ChartPayload) -> impl IntoView {
    let frame = ChartFrame::default();
    let ceiling = value_ceiling(&payload);
    let series = line_points(&payload, &frame)
        .into_iter()
        .map(|s| {
            let dots = s
                .points
                .iter()
                .map(|(x, y)| view! { <circle cx=num(*x) cy=num(*y) r="3" fill=s.color.clone()></circle> })
                .collect::<Vec<_>>();
            view! {
                <polyline
                    points=polyline_attr(&s.points)
                    fill="none"
                    stroke=s.color.clone()
                    stroke-width="2"
                ></polyline>
                {dots}
            }
        })
        .collect::<Vec<_>>();

    view! {
        <svg class="w-full h-48" viewBox=view_box(&frame) preserveAspectRatio="none">
            {value_axis(frame, ceiling)}
            {series}
            {category_labels(&payload, frame, false)}
        </svg>
        {legend(&payload)}
    }
}
