//! Statistics flow - Run summary for a scanned batch
//!
//! The counters are always logged; `--stats` additionally prints them to
//! stdout as a summary block or as JSON.

use anyhow::Result;
use colored::Colorize;

use crate::core::model::Counters;

/// Stats output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFormat {
    /// Human-readable summary
    Summary,
    /// JSON object with the full counters
    Json,
}

impl std::str::FromStr for StatsFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" | "text" => Ok(StatsFormat::Summary),
            "json" => Ok(StatsFormat::Json),
            _ => Err(format!("Unknown stats format: {}", s)),
        }
    }
}

/// Log the counters at info level
pub fn log_counters(counters: &Counters) {
    log::info!("total files parsed: {}", counters.all);
    log::info!("total tags found: {}", counters.tags);
    for entry in &counters.per_tag {
        log::info!("  {}: {}", entry.tag, entry.count);
    }
    log::info!("total files with missing tags found: {}", counters.incomplete);
    log::info!("total files without any tags found: {}", counters.nothing);
}

/// Human-readable summary block
pub fn render_summary(counters: &Counters) -> String {
    let mut lines = vec![
        format!("{}", "Scan Summary".bold()),
        "═══════════════════════════════════════".to_string(),
        format!("  Files:            {}", counters.all),
        format!("  Tags found:       {}", counters.tags),
    ];

    for entry in &counters.per_tag {
        lines.push(format!("    {:20} {}", entry.tag.as_str(), entry.count));
    }

    let incomplete = format!("{}", counters.incomplete);
    let nothing = format!("{}", counters.nothing);
    lines.push(format!(
        "  Incomplete:       {}",
        if counters.incomplete > 0 {
            incomplete.yellow().to_string()
        } else {
            incomplete
        }
    ));
    lines.push(format!(
        "  Without any tag:  {}",
        if counters.nothing > 0 {
            nothing.red().to_string()
        } else {
            nothing
        }
    ));
    lines.push("═══════════════════════════════════════".to_string());

    lines.join("\n")
}

/// Print the counters in the selected format
pub fn print_stats(counters: &Counters, format: StatsFormat) -> Result<()> {
    match format {
        StatsFormat::Summary => println!("{}", render_summary(counters)),
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(counters)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Tag, TagCount};

    fn sample() -> Counters {
        Counters {
            all: 3,
            tags: 4,
            per_tag: vec![
                TagCount {
                    tag: Tag::from("Tumorfläche"),
                    count: 2,
                },
                TagCount {
                    tag: Tag::from("Grading"),
                    count: 2,
                },
            ],
            incomplete: 1,
            nothing: 0,
        }
    }

    #[test]
    fn test_stats_format_parse() {
        assert_eq!("json".parse::<StatsFormat>().unwrap(), StatsFormat::Json);
        assert_eq!(
            "Summary".parse::<StatsFormat>().unwrap(),
            StatsFormat::Summary
        );
        assert!("table".parse::<StatsFormat>().is_err());
    }

    #[test]
    fn test_render_summary() {
        colored::control::set_override(false);
        let summary = render_summary(&sample());

        assert!(summary.contains("Files:            3"));
        assert!(summary.contains("Tags found:       4"));
        assert!(summary.contains("Tumorfläche"));
        assert!(summary.contains("Incomplete:       1"));
        assert!(summary.contains("Without any tag:  0"));
    }

    #[test]
    fn test_counters_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["all"], 3);
        assert_eq!(json["per_tag"][1]["tag"], "Grading");
        assert_eq!(json["per_tag"][1]["count"], 2);
    }
}
