use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::ReferenceTables;
use crate::error::OverviewError;

/// Token carried inside encoded scalars where a trailing `#` comment belongs.
///
/// The YAML emitter has no way to attach a comment to a sequence entry, so
/// codes are encoded as `"<int> EOTCOMMENT <name>"` strings and the render
/// stage rewrites the marker into a real comment.
pub const COMMENT_SENTINEL: &str = "EOTCOMMENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeKind {
    StateType,
    InvGroup,
    InvCategory,
}

impl CodeKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::StateType => "StateType",
            Self::InvGroup => "InvGroup",
            Self::InvCategory => "InvCategory",
        }
    }

    /// Name rendered for a code missing from its reference table.
    pub fn placeholder(&self) -> String {
        format!("Unknown {}", self.as_str())
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overview filter state (`flag_*`, `background_*`, and preset state lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateType(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InvGroupId(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InvCategoryId(pub i32);

/// An integer code that can be named through the reference tables.
pub trait ReferenceCode: Copy {
    const KIND: CodeKind;

    fn from_raw(raw: i32) -> Self;

    fn raw(self) -> i32;

    fn lookup(self, tables: &ReferenceTables) -> Result<String, OverviewError>;

    /// Resolved name, or `Unknown <Kind>` when the table has no entry.
    fn name(self, tables: &ReferenceTables) -> String {
        match self.lookup(tables) {
            Ok(name) => name,
            Err(err) => {
                debug!(%err, "rendering placeholder name");
                Self::KIND.placeholder()
            }
        }
    }

    /// `"<int> <name>"`, for people.
    fn label(self, tables: &ReferenceTables) -> String {
        format!("{} {}", self.raw(), self.name(tables))
    }

    /// `"<int> EOTCOMMENT <name>"`, for the emitter.
    fn commented(self, tables: &ReferenceTables) -> String {
        format!("{} {} {}", self.raw(), COMMENT_SENTINEL, self.name(tables))
    }
}

impl ReferenceCode for StateType {
    const KIND: CodeKind = CodeKind::StateType;

    fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    fn raw(self) -> i32 {
        self.0
    }

    fn lookup(self, tables: &ReferenceTables) -> Result<String, OverviewError> {
        tables
            .state(self)
            .map(ToOwned::to_owned)
            .ok_or(OverviewError::UnresolvedReference {
                kind: Self::KIND,
                code: self.0,
            })
    }
}

impl ReferenceCode for InvCategoryId {
    const KIND: CodeKind = CodeKind::InvCategory;

    fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    fn raw(self) -> i32 {
        self.0
    }

    fn lookup(self, tables: &ReferenceTables) -> Result<String, OverviewError> {
        tables
            .category(self)
            .map(|name| name.trim().to_string())
            .ok_or(OverviewError::UnresolvedReference {
                kind: Self::KIND,
                code: self.0,
            })
    }
}

impl InvCategoryId {
    /// `"<name> (<id>)"`, the form used inside group names.
    pub fn display_name(self, tables: &ReferenceTables) -> String {
        format!("{} ({})", self.name(tables), self.0)
    }
}

impl ReferenceCode for InvGroupId {
    const KIND: CodeKind = CodeKind::InvGroup;

    fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    fn raw(self) -> i32 {
        self.0
    }

    fn lookup(self, tables: &ReferenceTables) -> Result<String, OverviewError> {
        let group = tables.group(self).ok_or(OverviewError::UnresolvedReference {
            kind: Self::KIND,
            code: self.0,
        })?;
        Ok(format!(
            "{} -- {}",
            group.category.display_name(tables),
            group.name.trim()
        ))
    }
}
