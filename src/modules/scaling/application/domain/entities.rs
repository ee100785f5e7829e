use serde::{Deserialize, Serialize};

/// The two worker services whose fleets the orchestrator manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Transform,
    Publisher,
}

impl ServiceKind {
    /// Key used in event tables and statistics files.
    pub fn key(&self) -> &'static str {
        match self {
            ServiceKind::Transform => "transform",
            ServiceKind::Publisher => "publisher",
        }
    }

    /// Human wording used in API messages.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::Transform => "transformation",
            ServiceKind::Publisher => "publication",
        }
    }
}

/// Agent state of a deployed unit, as the cluster reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitState {
    Started,
    Pending,
    Installed,
    Error,
    Unknown,
}

impl UnitState {
    pub fn from_agent_state(state: &str) -> Self {
        match state {
            "started" => UnitState::Started,
            "pending" => UnitState::Pending,
            "installed" => UnitState::Installed,
            "error" | "install-error" | "start-error" => UnitState::Error,
            _ => UnitState::Unknown,
        }
    }

    /// Bucket used by the statistics observer.
    pub fn bucket(&self) -> &'static str {
        match self {
            UnitState::Started => "started",
            UnitState::Pending | UnitState::Installed => "pending",
            UnitState::Error => "error",
            UnitState::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub number: u32,
    pub state: UnitState,
    pub public_address: Option<String>,
}

/// Inputs needed to register a new environment with the cluster.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub control_bucket: String,
}
