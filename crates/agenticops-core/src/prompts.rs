// crates/agenticops-core/src/prompts.rs
// Example prompt catalogue for the help menu

use agenticops_types::DataSource;

pub struct PromptCategory {
    pub label: &'static str,
    pub source: DataSource,
    pub prompts: &'static [&'static str],
}

pub const PROMPT_CATEGORIES: &[PromptCategory] = &[
    PromptCategory {
        label: "Discovery",
        source: DataSource::Meraki,
        prompts: &[
            "List all my networks",
            "Show me all devices in my network",
            "What's our network health status?",
            "Show organization license info",
            "List all SSIDs across networks",
        ],
    },
    PromptCategory {
        label: "Troubleshooting",
        source: DataSource::Meraki,
        prompts: &[
            "Why is WiFi slow?",
            "Show me client connectivity issues",
            "Check WAN uplink status",
            "Are there any network events in the last hour?",
        ],
    },
    PromptCategory {
        label: "Security",
        source: DataSource::Meraki,
        prompts: &[
            "Review our firewall rules",
            "Show security events from the last 24 hours",
            "Audit content filtering settings",
            "Check for overly permissive firewall rules",
        ],
    },
    PromptCategory {
        label: "Compliance",
        source: DataSource::Meraki,
        prompts: &[
            "Audit our SSID configurations",
            "Check VLAN compliance",
            "Review switch port configurations",
        ],
    },
    PromptCategory {
        label: "Monitoring",
        source: DataSource::Thousandeyes,
        prompts: &[
            "What ThousandEyes tests are running?",
            "Show me ThousandEyes alert history",
            "List ThousandEyes agent status",
            "Are there any active ThousandEyes alerts?",
        ],
    },
    PromptCategory {
        label: "Path Analysis",
        source: DataSource::Thousandeyes,
        prompts: &[
            "Show network path visualization to my critical apps",
            "Are there any BGP route changes?",
            "Check ISP performance metrics",
        ],
    },
];

pub fn categories_for(source: DataSource) -> impl Iterator<Item = &'static PromptCategory> {
    PROMPT_CATEGORIES.iter().filter(move |c| c.source == source)
}
