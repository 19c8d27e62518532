// crates/agenticops-core/src/format.rs
// Formatting utilities for display values

use agenticops_types::{AlertSeverity, DataSource, HealthStatus};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::time::Duration;

const NEUTRAL: &str = "#6b7280";

/// `HH:MM` in whatever zone the timestamp carries
pub fn format_clock<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    ts.format("%H:%M").to_string()
}

/// `12s`, `1m 05s`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

pub fn agent_display_name(agent: &str) -> String {
    match agent {
        "troubleshooting" => "Troubleshooting",
        "compliance" => "Compliance",
        "security" => "Security",
        "discovery" => "Discovery",
        "canvas" => "Canvas",
        "orchestrator" => "Orchestrator",
        other => other,
    }
    .to_string()
}

pub fn source_label(source: DataSource) -> &'static str {
    match source {
        DataSource::Meraki => "Meraki",
        DataSource::Thousandeyes => "ThousandEyes",
    }
}

pub fn source_color(source: DataSource) -> &'static str {
    match source {
        DataSource::Meraki => "#3b82f6",
        DataSource::Thousandeyes => "#8b5cf6",
    }
}

pub fn severity_color(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Critical => "#ef4444",
        AlertSeverity::High => "#f97316",
        AlertSeverity::Medium => "#f59e0b",
        AlertSeverity::Low => "#3b82f6",
        AlertSeverity::Info => NEUTRAL,
    }
}

pub fn status_color(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Healthy => "#10b981",
        HealthStatus::Warning => "#f59e0b",
        HealthStatus::Critical => "#ef4444",
    }
}

/// Inline note appended to the transcript for a backend `error` event
pub fn format_error_notice(message: Option<&str>) -> String {
    format!("\n\n_Error: {}_", message.unwrap_or("Unknown error"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_clock() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 9, 7, 4, 59).unwrap();
        assert_eq!(format_clock(&ts), "07:04");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0s");
        assert_eq!(format_elapsed(Duration::from_millis(12_900)), "12s");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "1m 05s");
        assert_eq!(format_elapsed(Duration::from_secs(600)), "10m 00s");
    }

    #[test]
    fn test_agent_display_name() {
        assert_eq!(agent_display_name("discovery"), "Discovery");
        assert_eq!(agent_display_name("custom_agent"), "custom_agent");
    }

    #[test]
    fn test_colors() {
        assert_eq!(source_color(DataSource::Meraki), "#3b82f6");
        assert_eq!(severity_color(AlertSeverity::Info), NEUTRAL);
        assert_eq!(status_color(HealthStatus::Critical), "#ef4444");
    }

    #[test]
    fn test_error_notice() {
        assert_eq!(format_error_notice(Some("boom")), "\n\n_Error: boom_");
        assert_eq!(format_error_notice(None), "\n\n_Error: Unknown error_");
    }
}
