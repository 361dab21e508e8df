use crate::metrics::MetricsReport;
use crate::model::Violation;

/// Render a deterministic markdown report from metrics and violations.
pub fn render_report(
    metrics: &MetricsReport,
    violations: &[Violation],
    max_examples: usize,
) -> String {
    let mut lines = Vec::new();

    lines.push("# Syngen Export Report".to_string());
    lines.push(String::new());
    lines.push("## Export summary".to_string());
    lines.push(format!("- export_dir: {}", metrics.export_dir));
    lines.push(format!("- users: {}", metrics.counts.users));
    lines.push(format!("- channels: {}", metrics.counts.channels));
    lines.push(format!("- messages: {}", metrics.counts.messages));
    lines.push(format!("- day_files: {}", metrics.counts.day_files));
    lines.push(format!("- thread_parents: {}", metrics.counts.thread_parents));
    lines.push(format!("- thread_replies: {}", metrics.counts.thread_replies));
    lines.push(String::new());

    lines.push("## Channels".to_string());
    lines.push("| channel | members | day_files | messages |".to_string());
    lines.push("| --- | --- | --- | --- |".to_string());
    for channel in &metrics.channels {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            channel.name, channel.members, channel.day_files, channel.messages
        ));
    }
    lines.push(String::new());

    lines.push("## Violation summary".to_string());
    if metrics.violations.is_empty() {
        lines.push("- none".to_string());
    } else {
        lines.push("| code | count |".to_string());
        lines.push("| --- | --- |".to_string());
        for (code, count) in &metrics.violations {
            lines.push(format!("| {code} | {count} |"));
        }
    }
    lines.push(String::new());

    if !metrics.warnings.is_empty() {
        lines.push("## Warnings".to_string());
        for warning in &metrics.warnings {
            lines.push(format!("- {}: {} ({})", warning.path, warning.message, warning.code));
        }
        lines.push(String::new());
    }

    if !violations.is_empty() {
        lines.push("## Top violations".to_string());
        for violation in violations.iter().take(max_examples) {
            let example = violation
                .example
                .as_ref()
                .map(|value| format!(" ts={value}"))
                .unwrap_or_default();
            lines.push(format!(
                "- [{}] {}: {}{}",
                violation.code, violation.path, violation.message, example
            ));
        }
        if violations.len() > max_examples {
            lines.push(format!("- ... {} more", violations.len() - max_examples));
        }
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.extend(recommendations(metrics, violations));
    lines.join("\n")
}

fn recommendations(metrics: &MetricsReport, violations: &[Violation]) -> Vec<String> {
    let count = |code: &str| metrics.violations.get(code).copied().unwrap_or(0);
    let mut lines = Vec::new();
    if count("wrong_day") > 0 {
        lines.push("- re-run verification with the day boundary the export was cut with (--utc).".to_string());
    }
    if count("orphan_reply") > 0 || count("reply_count_mismatch") > 0 {
        lines.push("- regenerate threads; replies and parent summaries disagree.".to_string());
    }
    if count("unknown_channel_dir") > 0 || count("bad_file_name") > 0 {
        lines.push("- remove files that were added to the export tree by hand.".to_string());
    }
    if violations.is_empty() {
        lines.push("- no violations detected; the export is internally consistent.".to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::metrics::{ExportCounts, PerformanceMetrics};

    fn metrics(violations: BTreeMap<String, u64>) -> MetricsReport {
        MetricsReport {
            metrics_version: "0.1".to_string(),
            export_dir: "/tmp/export".to_string(),
            counts: ExportCounts {
                users: 3,
                channels: 1,
                messages: 5,
                day_files: 2,
                thread_parents: 1,
                thread_replies: 2,
            },
            channels: Vec::new(),
            violations,
            warnings: Vec::new(),
            performance: PerformanceMetrics {
                load_ms: 0,
                validate_ms: 0,
                total_ms: 0,
            },
        }
    }

    #[test]
    fn clean_report_has_no_violation_section() {
        let report = render_report(&metrics(BTreeMap::new()), &[], 10);
        assert!(report.starts_with("# Syngen Export Report"));
        assert!(report.contains("- messages: 5"));
        assert!(!report.contains("## Top violations"));
        assert!(report.contains("no violations detected"));
    }

    #[test]
    fn violations_are_truncated_to_max_examples() {
        let violations: Vec<Violation> = (0..5)
            .map(|index| Violation::new("wrong_day", format!("c/{index}.json"), "late"))
            .collect();
        let by_code = BTreeMap::from([("wrong_day".to_string(), 5)]);
        let report = render_report(&metrics(by_code), &violations, 2);

        assert!(report.contains("| wrong_day | 5 |"));
        assert!(report.contains("- [wrong_day] c/1.json: late"));
        assert!(!report.contains("c/2.json"));
        assert!(report.contains("- ... 3 more"));
        assert!(report.contains("--utc"));
    }
}
