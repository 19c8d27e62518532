// crates/agenticops-app/src/components/cards/variants.rs
// Card bodies for the table, alert, report and health variants

use crate::components::chat::Markdown;
use agenticops_core::cards::sorted_rows;
use agenticops_core::format::{severity_color, status_color};
use agenticops_types::{
    AlertSummaryPayload, DataTablePayload, MetricIcon, NetworkHealthPayload, TextReportPayload,
};
use leptos::prelude::*;

// ============================================================================
// Data Table
// ============================================================================

#[component]
pub fn DataTableCard(payload: DataTablePayload) -> impl IntoView {
    // (column, ascending)
    let sort = RwSignal::new(None::<(usize, bool)>);
    let rows = StoredValue::new(payload.rows);

    let click_header = move |col: usize| {
        sort.update(|s| {
            *s = match *s {
                Some((c, asc)) if c == col => Some((c, !asc)),
                _ => Some((col, true)),
            }
        });
    };

    let body = move || {
        let ordered = rows.with_value(|rows| match sort.get() {
            Some((col, asc)) => sorted_rows(rows, col, asc),
            None => rows.clone(),
        });
        ordered
            .into_iter()
            .map(|row| {
                view! {
                    <tr class="border-b border-gray-800/50 hover:bg-gray-800/30">
                        {row
                            .into_iter()
                            .map(|cell| view! { <td class="px-2 py-1.5 text-gray-300 whitespace-nowrap">{cell}</td> })
                            .collect::<Vec<_>>()}
                    </tr>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="overflow-auto max-h-64">
            <table class="w-full text-xs">
                <thead>
                    <tr class="border-b border-gray-700/50">
                        {payload
                            .columns
                            .into_iter()
                            .enumerate()
                            .map(|(i, col)| {
                                let arrow = move || match sort.get() {
                                    Some((c, true)) if c == i => "\u{2191}",
                                    Some((c, false)) if c == i => "\u{2193}",
                                    _ => "",
                                };
                                view! {
                                    <th
                                        class="px-2 py-1.5 text-left text-gray-400 font-medium cursor-pointer hover:text-gray-200 whitespace-nowrap"
                                        on:click=move |_| click_header(i)
                                    >
                                        {col}
                                        " "
                                        <span class="text-blue-400">{arrow}</span>
                                    </th>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
}

// ============================================================================
// Alert Summary
// ============================================================================

#[component]
pub fn AlertSummaryCard(payload: AlertSummaryPayload) -> impl IntoView {
    if payload.alerts.is_empty() {
        return view! { <p class="text-xs text-gray-500 text-center py-4">"No alerts"</p> }.into_any();
    }

    let alerts = payload
        .alerts
        .into_iter()
        .map(|alert| {
            let color = severity_color(alert.severity);
            view! {
                <div class="flex items-start gap-2 px-2 py-1.5 rounded bg-gray-800/30 border border-gray-700/30">
                    <div
                        class="w-2 h-2 rounded-full mt-1.5 flex-shrink-0"
                        style=format!("background-color: {}", color)
                    ></div>
                    <div class="min-w-0 flex-1">
                        <div class="flex items-center gap-2">
                            <span class="text-xs font-medium text-gray-200 truncate">{alert.title}</span>
                            <span
                                class="text-[10px] px-1 py-0.5 rounded font-medium uppercase"
                                style=format!("background-color: {}15; color: {}", color, color)
                            >
                                {alert.severity.as_str()}
                            </span>
                        </div>
                        <p class="text-[11px] text-gray-400 mt-0.5">{alert.description}</p>
                        {alert.timestamp.map(|ts| view! { <span class="text-[10px] text-gray-600 block">{ts}</span> })}
                    </div>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! { <div class="space-y-1.5 max-h-64 overflow-y-auto">{alerts}</div> }.into_any()
}

// ============================================================================
// Text Report
// ============================================================================

#[component]
pub fn TextReportCard(payload: TextReportPayload) -> impl IntoView {
    view! {
        <div class="max-h-72 overflow-y-auto text-xs text-gray-300">
            <Markdown content=payload.content/>
        </div>
    }
}

// ============================================================================
// Network Health
// ============================================================================

fn icon_path(icon: MetricIcon) -> &'static str {
    match icon {
        MetricIcon::Wifi => "M8.3 15a5.3 5.3 0 0 1 7.4 0M5.1 11.9a9.8 9.8 0 0 1 13.8 0M1.9 8.7a14.3 14.3 0 0 1 20.2 0M12 18.8h.01",
        MetricIcon::Server => "M3 5.25h18v5.25H3zM3 13.5h18v5.25H3zM6.75 7.9h.01M6.75 16.1h.01",
        MetricIcon::Shield => "M9 12.75 11.25 15 15 9.75M12 2.7A12 12 0 0 1 3.6 6 12 12 0 0 0 3 9.75c0 5.6 3.8 10.3 9 11.6 5.2-1.3 9-6 9-11.6 0-1.3-.2-2.6-.6-3.75A12 12 0 0 1 12 2.7Z",
        MetricIcon::Globe => "M12 21a9 9 0 1 0 0-18 9 9 0 0 0 0 18Zm0 0c2.5 0 4.5-4 4.5-9S14.5 3 12 3 7.5 7 7.5 12s2 9 4.5 9ZM3.3 14.3h17.4M3.3 9.7h17.4",
    }
}

#[component]
pub fn NetworkHealthCard(payload: NetworkHealthPayload) -> impl IntoView {
    let metrics = payload
        .metrics
        .into_iter()
        .map(|metric| {
            let color = status_color(metric.status);
            let path = icon_path(metric.icon.unwrap_or(MetricIcon::Server));
            view! {
                <div class="flex items-center gap-2 p-2 rounded-lg bg-gray-800/40 border border-gray-700/30">
                    <div
                        class="flex-shrink-0 p-1.5 rounded"
                        style=format!("background-color: {}15; color: {}", color, color)
                    >
                        <svg class="w-4 h-4" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5">
                            <path stroke-linecap="round" stroke-linejoin="round" d=path></path>
                        </svg>
                    </div>
                    <div class="min-w-0">
                        <p class="text-[10px] text-gray-500 truncate">{metric.label}</p>
                        <p class="text-sm font-semibold break-all" style=format!("color: {}", color)>
                            {metric.value}
                        </p>
                    </div>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! { <div class="grid grid-cols-2 gap-2">{metrics}</div> }
}
