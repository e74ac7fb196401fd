use serde::{Deserialize, Serialize};

/// Target platform of a captured app tree.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

/// Ties a design node back to the design file it came from.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DesignTraceRef {
    pub node_id: String,
    /// Empty when the export only sets it at document level.
    #[serde(default)]
    pub file_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
}

impl DesignTraceRef {
    pub fn new(file_key: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            file_key: file_key.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.node_name = Some(name.into());
        self
    }

    /// Human readable name, falling back to the node id.
    pub fn display_name(&self) -> &str {
        self.node_name.as_deref().unwrap_or(&self.node_id)
    }
}

/// Ties an app element back to the inspection session that captured it.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppTraceRef {
    pub element_id: String,
    pub session_id: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpath: Option<String>,
}

impl AppTraceRef {
    pub fn new(session_id: impl Into<String>, element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn with_accessibility_id(mut self, accessibility_id: impl Into<String>) -> Self {
        self.accessibility_id = Some(accessibility_id.into());
        self
    }
}
