//! SARIF 2.1.0 rendering of fuzz reports.
//!
//! One result per crash record. Rules are the distinct crash labels, keyed
//! `fuzz/<label>`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use fuzzgate_core::fuzz::FuzzReport;

use crate::output::{input_json, truncate_chars};

pub const SARIF_VERSION: &str = "2.1.0";
pub const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json";
pub const TOOL_NAME: &str = "FuzzGate";

/// Longest JSON input embedded in a result message, in characters.
pub const MESSAGE_INPUT_LIMIT: usize = 200;

#[derive(Debug, Serialize)]
pub struct SarifLog {
    pub version: &'static str,
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRun {
    pub tool: Tool,
    pub results: Vec<SarifResult>,
    pub invocations: Vec<Invocation>,
    pub automation_details: AutomationDetails,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    pub driver: Driver,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub name: &'static str,
    pub version: &'static str,
    pub information_uri: &'static str,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub short_description: Message,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: String,
    pub level: &'static str,
    pub message: Message,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub execution_successful: bool,
    pub start_time_utc: DateTime<Utc>,
    pub end_time_utc: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AutomationDetails {
    pub guid: String,
}

pub fn rule_id(label: &str) -> String {
    format!("fuzz/{label}")
}

/// Build a SARIF log covering every crash in `reports`.
pub fn to_sarif(
    reports: &[FuzzReport],
    started: DateTime<Utc>,
    finished: DateTime<Utc>,
) -> SarifLog {
    let mut rules: Vec<Rule> = Vec::new();
    let mut results = Vec::new();

    for report in reports {
        for crash in &report.crashes {
            let id = rule_id(&crash.label);
            if !rules.iter().any(|rule| rule.id == id) {
                rules.push(Rule {
                    id: id.clone(),
                    short_description: Message {
                        text: format!("{} raised under fuzzing", crash.label),
                    },
                });
            }
            results.push(SarifResult {
                rule_id: id,
                level: "error",
                message: Message {
                    text: format!(
                        "{}(): {} | input: {}",
                        report.target,
                        crash.message,
                        truncate_chars(&input_json(crash), MESSAGE_INPUT_LIMIT)
                    ),
                },
            });
        }
    }

    SarifLog {
        version: SARIF_VERSION,
        schema: SARIF_SCHEMA,
        runs: vec![SarifRun {
            tool: Tool {
                driver: Driver {
                    name: TOOL_NAME,
                    version: env!("CARGO_PKG_VERSION"),
                    information_uri: "https://sarifweb.azurewebsites.net/",
                    rules,
                },
            },
            results,
            invocations: vec![Invocation {
                execution_successful: true,
                start_time_utc: started,
                end_time_utc: finished,
            }],
            automation_details: AutomationDetails {
                guid: Uuid::new_v4().to_string(),
            },
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzgate_core::fuzz::{CrashRecord, FailureKind, Gate};
    use serde_json::json;

    fn crash(label: &str, message: &str, input: serde_json::Value) -> CrashRecord {
        CrashRecord {
            input: vec![input],
            message: message.into(),
            label: label.into(),
            elapsed_ms: 0.1,
            kind: FailureKind::Unclassified,
            call: 1,
        }
    }

    fn report(target: &str, crashes: Vec<CrashRecord>) -> FuzzReport {
        let gate = if crashes.is_empty() {
            Gate::Pass
        } else {
            Gate::Fail
        };
        FuzzReport {
            target: target.into(),
            runs: 10,
            crashes,
            elapsed_ms: 1.0,
            gate,
            corpus_size: 242,
            seed: None,
        }
    }

    #[test]
    fn test_sarif_shape() {
        let reports = vec![
            report(
                "parse_json",
                vec![
                    crash("SyntaxError", "EOF while parsing a value", json!("")),
                    crash("SyntaxError", "expected value", json!("undefined")),
                ],
            ),
            report("safe_length", vec![]),
        ];
        let now = Utc::now();
        let value = serde_json::to_value(to_sarif(&reports, now, now)).unwrap();

        assert_eq!(value["version"], "2.1.0");
        assert!(value["$schema"].as_str().unwrap().contains("sarif-schema-2.1.0"));
        let run = &value["runs"][0];
        assert_eq!(run["tool"]["driver"]["name"], "FuzzGate");
        assert_eq!(run["tool"]["driver"]["rules"].as_array().unwrap().len(), 1);
        let results = run["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["ruleId"], "fuzz/SyntaxError");
        assert_eq!(results[0]["level"], "error");
        assert_eq!(
            results[0]["message"]["text"],
            r#"parse_json(): EOF while parsing a value | input: [""]"#
        );
        assert!(run["automationDetails"]["guid"].is_string());
    }

    #[test]
    fn test_sarif_message_input_is_truncated() {
        let reports = vec![report(
            "f",
            vec![crash("Error", "boom", json!("x".repeat(1000)))],
        )];
        let now = Utc::now();
        let log = to_sarif(&reports, now, now);
        let text = &log.runs[0].results[0].message.text;
        let input = text.split(" | input: ").nth(1).unwrap();
        assert_eq!(input.chars().count(), MESSAGE_INPUT_LIMIT);
    }
}
