//! Flattened record listings for the test-case and test-data detail panels.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::format::truncate_text;
use crate::payload::{display_at, text_at, value_at};

const MAX_TAGS: usize = 4;
const SAMPLE_VALUE_MAX_CHARS: usize = 50;
const SCENARIO_KEYWORD_TAGS: [(&str, &str); 4] = [
    ("upload", "upload"),
    ("error", "error handling"),
    ("valid", "validation"),
    ("file", "file processing"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseStatistics {
    pub total: String,
    pub functional: String,
    pub non_functional: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub complexity: String,
    pub estimated_duration: String,
    pub status_color: String,
    pub tags: Vec<String>,
    pub preconditions: String,
    pub steps: Vec<String>,
    pub expected_result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseListing {
    pub statistics: TestCaseStatistics,
    pub cases: Vec<TestCaseRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    Null,
    Number,
    Boolean,
    Email,
    DateTime,
    #[serde(rename = "IP Address")]
    IpAddress,
    #[serde(rename = "Reference ID")]
    ReferenceId,
    String,
}

impl DataType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Email => "Email",
            Self::DateTime => "DateTime",
            Self::IpAddress => "IP Address",
            Self::ReferenceId => "Reference ID",
            Self::String => "String",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataSource {
    Database,
    Synthetic,
    #[serde(rename = "Manual Entry")]
    ManualEntry,
    Unknown,
}

impl DataSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Database => "Database",
            Self::Synthetic => "Synthetic",
            Self::ManualEntry => "Manual Entry",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestDataRecord {
    pub id: String,
    pub test_case_id: String,
    pub entity: String,
    pub field: String,
    pub data_type: DataType,
    pub sample_value: String,
    pub source: DataSource,
    pub status: String,
    pub sub_type: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TestDataStatistics {
    pub total: usize,
    pub synthetic: usize,
    pub database: usize,
    /// Percentage of records with a known origin, rounded.
    pub coverage: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestDataListing {
    pub statistics: TestDataStatistics,
    pub records: Vec<TestDataRecord>,
}

fn date_time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}(\s[0-9]{2}:[0-9]{2}:[0-9]{2})?$")
            .expect("valid regex")
    })
}

fn ip_address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{1,3}(\.[0-9]{1,3}){3}$").expect("valid regex"))
}

fn reference_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{3}[0-9]+$").expect("valid regex"))
}

/// Id for a case without `testCaseId`, derived from its position in the payload.
fn fallback_case_id(document_index: usize, case_index: usize) -> String {
    format!("TC_{document_index}_{case_index}")
}

fn complexity_profile(sub_type: Option<&str>) -> (&'static str, &'static str, &'static str) {
    match sub_type {
        Some("happy") => ("Low complexity", "10 mins", "green"),
        Some("error") => ("Medium complexity", "15 mins", "orange"),
        Some("exception") => ("High complexity", "20 mins", "red"),
        Some("exploratory") => ("High complexity", "25 mins", "blue"),
        _ => ("Medium complexity", "15 mins", "blue"),
    }
}

fn case_tags(case: &Value) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(sub_type) = text_at(case, &["subType"]) {
        tags.push(sub_type.to_string());
    }
    if let Some(case_type) = text_at(case, &["testCaseType"]) {
        tags.push(case_type.to_lowercase());
    }
    let scenario = text_at(case, &["testScenario"])
        .unwrap_or_default()
        .to_lowercase();
    tags.extend(
        SCENARIO_KEYWORD_TAGS
            .iter()
            .filter(|(keyword, _)| scenario.contains(keyword))
            .map(|(_, tag)| (*tag).to_string()),
    );
    tags.truncate(MAX_TAGS);
    tags
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

fn project_case(case: &Value, document_index: usize, case_index: usize) -> TestCaseRecord {
    let sub_type = text_at(case, &["subType"]);
    let (complexity, estimated_duration, status_color) = complexity_profile(sub_type);
    let scenario = text_at(case, &["testScenario"]);
    let expected_result = match string_list(case.get("expectedResult")) {
        Some(items) => items.join("; "),
        None => text_at(case, &["expectedResult"])
            .unwrap_or("No expected result specified")
            .to_string(),
    };
    TestCaseRecord {
        id: text_at(case, &["testCaseId"])
            .map(str::to_string)
            .unwrap_or_else(|| fallback_case_id(document_index, case_index)),
        title: scenario.unwrap_or("No scenario provided").to_string(),
        description: scenario.unwrap_or("No description available").to_string(),
        complexity: complexity.to_string(),
        estimated_duration: estimated_duration.to_string(),
        status_color: status_color.to_string(),
        tags: case_tags(case),
        preconditions: string_list(case.get("prerequisites"))
            .map(|items| items.join("; "))
            .unwrap_or_else(|| "No prerequisites specified".to_string()),
        steps: string_list(case.get("testSteps"))
            .unwrap_or_else(|| vec!["No steps provided".to_string()]),
        expected_result,
    }
}

/// Projects `/api/testcases/all`.
pub fn project_test_case_listing(payload: &Value) -> TestCaseListing {
    let statistics = match value_at(payload, &["summary"]) {
        Some(summary) if !summary.is_null() => TestCaseStatistics {
            total: display_at(summary, &["total_test_cases"], "-"),
            functional: display_at(summary, &["by_type", "Functional"], "0"),
            non_functional: display_at(summary, &["by_type", "Non-Functional"], "0"),
        },
        _ => TestCaseStatistics {
            total: "-".to_string(),
            functional: "-".to_string(),
            non_functional: "-".to_string(),
        },
    };

    let cases = payload
        .get("data")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(document_index, document)| {
            document
                .get("testCases")
                .and_then(Value::as_array)
                .map(|cases| (document_index, cases))
        })
        .flat_map(|(document_index, cases)| {
            cases
                .iter()
                .enumerate()
                .map(move |(case_index, case)| project_case(case, document_index, case_index))
        })
        .collect();

    TestCaseListing { statistics, cases }
}

pub fn detect_data_type(value: &Value) -> DataType {
    match value {
        Value::Null => DataType::Null,
        Value::Number(_) => DataType::Number,
        Value::Bool(_) => DataType::Boolean,
        Value::String(text) if text.contains('@') && text.contains('.') => DataType::Email,
        Value::String(text) if date_time_pattern().is_match(text) => DataType::DateTime,
        Value::String(text) if ip_address_pattern().is_match(text) => DataType::IpAddress,
        Value::String(text) if reference_id_pattern().is_match(text) => DataType::ReferenceId,
        _ => DataType::String,
    }
}

pub fn source_for_status(status: Option<&str>) -> DataSource {
    match status {
        Some("Database") => DataSource::Database,
        Some("Generated") => DataSource::Synthetic,
        Some("Manual") => DataSource::ManualEntry,
        _ => DataSource::Unknown,
    }
}

fn sample_value(value: &Value) -> String {
    let rendered = match value {
        Value::Null => return "null".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    truncate_text(Some(&rendered), SAMPLE_VALUE_MAX_CHARS)
}

fn test_data_records(index: usize, case: &Value) -> Vec<TestDataRecord> {
    let Some(Value::Object(fields)) = case.get("testdata") else {
        return Vec::new();
    };
    let test_case_id = display_at(case, &["testCaseId"], "unknown");
    let status = text_at(case, &["status"]);
    fields
        .iter()
        .map(|(key, value)| {
            let mut segments = key.split('.');
            let entity = segments.next().unwrap_or_default();
            let field = segments.next().unwrap_or(key.as_str());
            TestDataRecord {
                id: format!("{test_case_id}_{index}_{key}"),
                test_case_id: test_case_id.clone(),
                entity: if entity.is_empty() { "Unknown" } else { entity }.to_string(),
                field: if field.is_empty() { key.as_str() } else { field }.to_string(),
                data_type: detect_data_type(value),
                sample_value: sample_value(value),
                source: source_for_status(status),
                status: status.unwrap_or("-").to_string(),
                sub_type: display_at(case, &["subType"], "-"),
            }
        })
        .collect()
}

impl TestDataStatistics {
    pub fn from_records(records: &[TestDataRecord]) -> Self {
        let total = records.len();
        if total == 0 {
            return Self::default();
        }
        let count = |source: DataSource| {
            records
                .iter()
                .filter(|record| record.source == source)
                .count()
        };
        let synthetic = count(DataSource::Synthetic);
        let database = count(DataSource::Database);
        let coverage = ((synthetic + database) as f64 / total as f64 * 100.0).round() as u32;
        Self {
            total,
            synthetic,
            database,
            coverage,
        }
    }
}

/// Projects `/api/testdata/all`; a malformed envelope yields an empty listing.
pub fn project_test_data_listing(payload: &Value) -> TestDataListing {
    let succeeded = payload.get("success").and_then(Value::as_bool) == Some(true);
    let cases = value_at(payload, &["data", "test_cases_with_data"]).and_then(Value::as_array);
    let Some(cases) = cases.filter(|_| succeeded) else {
        tracing::warn!(
            success = succeeded,
            "test data listing has an unexpected structure; showing no records"
        );
        return TestDataListing::default();
    };

    let records: Vec<TestDataRecord> = cases
        .iter()
        .enumerate()
        .flat_map(|(index, case)| test_data_records(index, case))
        .collect();
    tracing::debug!(
        records = records.len(),
        test_cases = cases.len(),
        "projected test data listing"
    );
    TestDataListing {
        statistics: TestDataStatistics::from_records(&records),
        records,
    }
}
