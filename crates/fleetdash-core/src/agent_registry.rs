//! Display-name to backend-key lookup for the agents the dashboard knows.
//!
//! The registry is immutable once built. Deployments either use the built-in
//! table or replace it with a TOML file:
//!
//! ```toml
//! [[agents]]
//! display_name = "Jira Management Agent"
//! backend_key = "jira_mcp_agent"
//! kind = "jira_management"
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
/// Stable agent-type identifier used for view and source dispatch.
pub enum AgentKind {
    JiraManagement,
    TestCaseGenerator,
    TestData,
    TestScriptGenerator,
    EnvironmentReadiness,
    TestExecution,
    TestReporting,
    TestFailureAnalysis,
    SelfHealing,
    Orchestration,
    Other,
}

impl AgentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JiraManagement => "jira_management",
            Self::TestCaseGenerator => "test_case_generator",
            Self::TestData => "test_data",
            Self::TestScriptGenerator => "test_script_generator",
            Self::EnvironmentReadiness => "environment_readiness",
            Self::TestExecution => "test_execution",
            Self::TestReporting => "test_reporting",
            Self::TestFailureAnalysis => "test_failure_analysis",
            Self::SelfHealing => "self_healing",
            Self::Orchestration => "orchestration",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// One registry row.
pub struct AgentRegistryEntry {
    pub display_name: String,
    pub backend_key: String,
    pub kind: AgentKind,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// An agent resolved against the registry.
pub struct AgentIdentity {
    pub display_name: String,
    pub backend_key: String,
    pub kind: AgentKind,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read agent registry {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse agent registry {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid agent registry: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    agents: Vec<AgentRegistryEntry>,
}

const BUILTIN_AGENTS: &[(&str, &str, AgentKind)] = &[
    ("Jira Management Agent", "jira_mcp_agent", AgentKind::JiraManagement),
    (
        "Test Case Generator Agent",
        "test_case_generator_agent",
        AgentKind::TestCaseGenerator,
    ),
    ("Test Data Agent", "test_data_root_agent", AgentKind::TestData),
    (
        "Test Script Generator Agent",
        "test_script_root_agent",
        AgentKind::TestScriptGenerator,
    ),
    (
        "Environment Readiness Agent",
        "env_readiness_agent",
        AgentKind::EnvironmentReadiness,
    ),
    (
        "Test Execution and DevOps Agent",
        "autonomous_test_execution_agent",
        AgentKind::TestExecution,
    ),
    (
        "Test Reporting Agent",
        "Test_Report_generation_agent",
        AgentKind::TestReporting,
    ),
    (
        "Test Failure Analysis Agent",
        "Test_Failure_Analysis_agent",
        AgentKind::TestFailureAnalysis,
    ),
    ("Self Healing Agent", "self_healing_root_agent", AgentKind::SelfHealing),
    ("Orchestration Agent", "orchestrator_agent", AgentKind::Orchestration),
];

fn whitespace_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Derives the backend key for a name with no registry entry.
pub fn fallback_backend_key(display_name: &str) -> String {
    whitespace_run()
        .replace_all(&display_name.to_lowercase(), "_")
        .into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable display-name lookup table.
pub struct AgentRegistry {
    entries: BTreeMap<String, AgentRegistryEntry>,
    order: Vec<String>,
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AgentRegistry {
    /// Registry with the agents the backend ships with.
    pub fn builtin() -> Self {
        let order = BUILTIN_AGENTS
            .iter()
            .map(|(display_name, _, _)| (*display_name).to_string())
            .collect();
        let entries = BUILTIN_AGENTS
            .iter()
            .map(|(display_name, backend_key, kind)| {
                (
                    (*display_name).to_string(),
                    AgentRegistryEntry {
                        display_name: (*display_name).to_string(),
                        backend_key: (*backend_key).to_string(),
                        kind: *kind,
                    },
                )
            })
            .collect();
        Self { entries, order }
    }

    pub fn from_entries(entries: Vec<AgentRegistryEntry>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        let mut map = BTreeMap::new();
        let mut order = Vec::with_capacity(entries.len());
        for entry in entries {
            let display_name = entry.display_name.trim();
            if display_name.is_empty() {
                return Err(RegistryError::Invalid(
                    "agent display_name cannot be empty".to_string(),
                ));
            }
            if entry.backend_key.trim().is_empty() {
                return Err(RegistryError::Invalid(format!(
                    "agent '{display_name}' has an empty backend_key"
                )));
            }
            if !seen.insert(display_name.to_string()) {
                return Err(RegistryError::Invalid(format!(
                    "duplicate agent display_name '{display_name}'"
                )));
            }
            order.push(display_name.to_string());
            map.insert(
                display_name.to_string(),
                AgentRegistryEntry {
                    display_name: display_name.to_string(),
                    backend_key: entry.backend_key.trim().to_string(),
                    kind: entry.kind,
                },
            );
        }
        Ok(Self {
            entries: map,
            order,
        })
    }

    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, RegistryError> {
        let file: RegistryFile = toml::from_str(raw).map_err(|source| RegistryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if file.agents.is_empty() {
            return Err(RegistryError::Invalid(format!(
                "{} declares no agents",
                path.display()
            )));
        }
        Self::from_entries(file.agents)
    }

    /// Loads a deployment registry file, replacing the built-in table.
    pub fn load_from(path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml_str(&raw, path)?;
        tracing::info!(
            path = %path.display(),
            agents = registry.len(),
            "loaded agent registry"
        );
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &AgentRegistryEntry> {
        self.order.iter().filter_map(|name| self.entries.get(name))
    }

    pub fn lookup(&self, display_name: &str) -> Option<&AgentRegistryEntry> {
        self.entries.get(display_name)
    }

    pub fn backend_key(&self, display_name: &str) -> String {
        self.lookup(display_name)
            .map(|entry| entry.backend_key.clone())
            .unwrap_or_else(|| fallback_backend_key(display_name))
    }

    pub fn resolve(&self, display_name: &str) -> AgentIdentity {
        match self.lookup(display_name) {
            Some(entry) => AgentIdentity {
                display_name: entry.display_name.clone(),
                backend_key: entry.backend_key.clone(),
                kind: entry.kind,
            },
            None => AgentIdentity {
                display_name: display_name.to_string(),
                backend_key: fallback_backend_key(display_name),
                kind: AgentKind::Other,
            },
        }
    }

    /// First registered orchestration agent.
    pub fn orchestrator(&self) -> Option<&AgentRegistryEntry> {
        self.entries()
            .find(|entry| entry.kind == AgentKind::Orchestration)
    }
}
