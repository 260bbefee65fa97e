use serde::{Deserialize, Serialize};

/// Per-group configuration, persisted one record per group.
///
/// Field names match the on-disk record shape `{"Prefix": .., "GuildID": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSettings {
    #[serde(rename = "Prefix")]
    pub prefix: String,
    #[serde(rename = "GuildID")]
    pub group_id: String,
}

impl GroupSettings {
    pub fn new(group_id: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            group_id: group_id.into(),
        }
    }
}

/// Result of a prefix change, carrying both sides so callers can tell
/// whether anything actually changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixChange {
    pub previous: String,
    pub settings: GroupSettings,
}

impl PrefixChange {
    pub fn changed(&self) -> bool {
        self.previous != self.settings.prefix
    }
}
