//! Console and JSON output formatting.

use fuzzgate_core::fuzz::{CrashRecord, FuzzReport};

use crate::catalog::ModuleCatalog;

/// Longest JSON input shown per crash in the console summary, in characters.
pub const CONSOLE_INPUT_LIMIT: usize = 120;

/// Prefix of `s` holding at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Compact JSON for a sanitized input tuple.
pub fn input_json(crash: &CrashRecord) -> String {
    serde_json::to_string(&crash.input).unwrap_or_else(|_| "[]".to_string())
}

/// Format one session report for display.
pub fn format_report(report: &FuzzReport) -> String {
    let mut out = String::new();

    let icon = if report.passed() {
        "\x1b[32m✓\x1b[0m"
    } else {
        "\x1b[31m✗\x1b[0m"
    };
    out.push_str(&format!(
        "{} {}: {} runs, {} unique crashes ({:.0}ms)\n",
        icon,
        report.target,
        report.runs,
        report.crashes.len(),
        report.elapsed_ms
    ));

    for crash in &report.crashes {
        out.push_str(&format!(
            "   \x1b[31m[{}]\x1b[0m {}\n",
            crash.label, crash.message
        ));
        out.push_str(&format!(
            "      Input: {}\n",
            truncate_chars(&input_json(crash), CONSOLE_INPUT_LIMIT)
        ));
    }

    out
}

/// Final gate line.
pub fn format_gate(failed: bool) -> String {
    if failed {
        "\n\x1b[31m✗ Gate: FAIL\x1b[0m".to_string()
    } else {
        "\n\x1b[32m✓ Gate: PASS\x1b[0m".to_string()
    }
}

/// Pretty JSON array of reports.
pub fn format_json(reports: &[FuzzReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

/// Available modules and their exports.
pub fn format_catalog(catalog: &ModuleCatalog) -> String {
    let mut out = String::new();
    for module in catalog.modules() {
        out.push_str(&format!(
            "\x1b[1m{}\x1b[0m - {}\n",
            module.name, module.description
        ));
        for (name, value) in module.exports() {
            match value.as_function() {
                Some(function) => out.push_str(&format!(
                    "  \x1b[34mfn\x1b[0m {}/{}\n",
                    name, function.arity
                )),
                None => out.push_str(&format!("  {} ({})\n", name, value.type_name())),
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzgate_core::fuzz::{FailureKind, Gate};
    use serde_json::json;

    fn report_with_crash(input: Vec<serde_json::Value>) -> FuzzReport {
        FuzzReport {
            target: "unsafe_length".into(),
            runs: 242,
            crashes: vec![CrashRecord {
                input,
                message: "Cannot read properties of null (reading 'length')".into(),
                label: "TypeError".into(),
                elapsed_ms: 0.02,
                kind: FailureKind::TypeViolation,
                call: 27,
            }],
            elapsed_ms: 12.4,
            gate: Gate::Fail,
            corpus_size: 242,
            seed: None,
        }
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("\u{1F4A9}\u{1F4A9}", 1), "\u{1F4A9}");
    }

    #[test]
    fn test_format_report_lists_crashes() {
        let out = format_report(&report_with_crash(vec![json!(null)]));
        assert!(out.contains("unsafe_length: 242 runs, 1 unique crashes (12ms)"));
        assert!(out.contains("[TypeError]"));
        assert!(out.contains("Input: [null]"));
    }

    #[test]
    fn test_format_report_truncates_long_inputs() {
        let out = format_report(&report_with_crash(vec![json!("a".repeat(500))]));
        let input_line = out
            .lines()
            .find(|line| line.contains("Input:"))
            .unwrap_or_default();
        let shown = input_line.trim_start().trim_start_matches("Input: ");
        assert_eq!(shown.chars().count(), CONSOLE_INPUT_LIMIT);
    }

    #[test]
    fn test_format_gate() {
        assert!(format_gate(false).contains("Gate: PASS"));
        assert!(format_gate(true).contains("Gate: FAIL"));
    }
}
