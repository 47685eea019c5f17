//! Tags for polymorphic references and relation kinds.
//!
//! Both are stored as snake_case text; the database carries matching
//! `CHECK` constraints.

use serde::{Deserialize, Serialize};

/// Which kind of external entity a participant or attachment points at.
///
/// The reference is opaque: nothing in this workspace dereferences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum EntityType {
    User,
    Organization,
    Team,
    WorkItem,
    Discussion,
}

/// Kind of a directed edge between two work items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum RelationType {
    RelatesTo,
    Blocks,
    Duplicates,
    ParentOf,
}

/// Which owner a participant or attachment row belongs to.
///
/// Discussions and work items keep their children in separate tables with
/// identical shapes; this selects the table and parent column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    Discussion,
    WorkItem,
}

impl ParentKind {
    /// Entity name used in not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            ParentKind::Discussion => "Discussion",
            ParentKind::WorkItem => "WorkItem",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&EntityType::WorkItem).unwrap(),
            "\"work_item\""
        );
        assert_eq!(
            serde_json::to_string(&RelationType::ParentOf).unwrap(),
            "\"parent_of\""
        );
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(serde_json::from_str::<EntityType>("\"planet\"").is_err());
    }
}
