use std::fmt;

use serde::{Deserialize, Serialize};

/// Named ordering rule. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortPolicy {
    #[default]
    Default,
    Recent,
    ViewedFirst,
    ViewedLast,
}

impl SortPolicy {
    pub const ALL: [SortPolicy; 4] = [
        SortPolicy::Default,
        SortPolicy::Recent,
        SortPolicy::ViewedFirst,
        SortPolicy::ViewedLast,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortPolicy::Default => "default",
            SortPolicy::Recent => "recent",
            SortPolicy::ViewedFirst => "viewed-first",
            SortPolicy::ViewedLast => "viewed-last",
        }
    }

    /// Unknown names fall back to `Default`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    pub fn is_default(self) -> bool {
        self == SortPolicy::Default
    }
}

impl From<String> for SortPolicy {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<SortPolicy> for String {
    fn from(policy: SortPolicy) -> Self {
        policy.as_str().to_string()
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with items the user already applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppliedAction {
    Normal,
    #[default]
    Dim,
    Hide,
}

impl AppliedAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AppliedAction::Normal => "normal",
            AppliedAction::Dim => "dim",
            AppliedAction::Hide => "hide",
        }
    }
}

impl fmt::Display for AppliedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only copy of the user's settings for one processing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub sort_by: SortPolicy,
    pub applied_action: AppliedAction,
    pub highlight_viewed: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            sort_by: SortPolicy::Default,
            applied_action: AppliedAction::Dim,
            highlight_viewed: true,
        }
    }
}
