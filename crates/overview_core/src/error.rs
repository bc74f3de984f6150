use std::fmt;

use thiserror::Error;

use crate::codes::CodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Shape,
    Type,
    UnknownAttribute,
    UnresolvedReference,
    ResourceLoad,
    NotFound,
    Emit,
}

/// The record kinds the codec knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Overview,
    Preset,
    TabSetup,
    ShipLabel,
    StateBlink,
    StateColorName,
    UserSetting,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Overview => "Overview",
            Self::Preset => "Preset",
            Self::TabSetup => "TabSetup",
            Self::ShipLabel => "ShipLabel",
            Self::StateBlink => "StateBlink",
            Self::StateColorName => "StateColorName",
            Self::UserSetting => "UserSetting",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifying key of a record: presets and labels are named, tabs are numbered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
    Name(String),
    Id(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Key,
    Value,
    Attributes,
    Attribute(String),
    Section(String),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("key"),
            Self::Value => f.write_str("value"),
            Self::Attributes => f.write_str("attribute list"),
            Self::Attribute(name) => write!(f, "attribute {name:?}"),
            Self::Section(name) => write!(f, "section {name:?}"),
        }
    }
}

/// Where in the document a codec error happened.
///
/// The YAML parser does not hand line numbers across the `Value` boundary, so
/// the entity kind, its position in the enclosing list, its key and the field
/// being read are what a user gets to find the offending record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub entity: EntityKind,
    pub index: Option<usize>,
    pub key: Option<RecordKey>,
    pub field: Option<Field>,
}

impl Location {
    pub fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            index: None,
            key: None,
            field: None,
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn keyed(mut self, key: RecordKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_field(&self, field: Field) -> Self {
        Self {
            field: Some(field),
            ..self.clone()
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entity)?;
        match (&self.key, self.index) {
            (Some(RecordKey::Name(name)), _) => write!(f, " {name:?}")?,
            (Some(RecordKey::Id(id)), _) => write!(f, " ({id})")?,
            (None, Some(index)) => write!(f, " #{index}")?,
            (None, None) => {}
        }
        if let Some(field) = &self.field {
            write!(f, " {field}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeProblem {
    WrongLength { expected: usize, actual: usize },
    NotSequence { found: &'static str },
    NotMapping { found: &'static str },
    NonStringKey { found: &'static str },
}

impl fmt::Display for ShapeProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => write!(
                f,
                "wrong number of entries (expected: {expected} got: {actual})"
            ),
            Self::NotSequence { found } => write!(f, "expected a sequence, got {found}"),
            Self::NotMapping { found } => write!(f, "expected a mapping, got {found}"),
            Self::NonStringKey { found } => write!(f, "mapping key is {found}, not a string"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OverviewError {
    #[error("{location}: {problem}: {raw}")]
    Shape {
        location: Location,
        problem: ShapeProblem,
        raw: String,
    },

    #[error("{location}: type is not {expected} ({found}): {raw}")]
    Type {
        location: Location,
        expected: &'static str,
        found: &'static str,
        raw: String,
    },

    #[error("{location} has unknown attribute {attribute:?}")]
    UnknownAttribute {
        location: Location,
        attribute: String,
    },

    #[error("no {kind} entry for code {code}")]
    UnresolvedReference { kind: CodeKind, code: i32 },

    #[error("unable to load {resource}: {source}")]
    ResourceLoad {
        resource: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no {0:?} preset found")]
    PresetNotFound(String),

    #[error("preset {0:?} has no groups attribute")]
    PresetWithoutGroups(String),

    #[error("unable to serialize overview: {0}")]
    Emit(#[source] serde_yaml::Error),
}

impl OverviewError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Shape { .. } => ErrorCode::Shape,
            Self::Type { .. } => ErrorCode::Type,
            Self::UnknownAttribute { .. } => ErrorCode::UnknownAttribute,
            Self::UnresolvedReference { .. } => ErrorCode::UnresolvedReference,
            Self::ResourceLoad { .. } => ErrorCode::ResourceLoad,
            Self::PresetNotFound(_) | Self::PresetWithoutGroups(_) => ErrorCode::NotFound,
            Self::Emit(_) => ErrorCode::Emit,
        }
    }

    /// Location of a codec failure, if this is one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Shape { location, .. }
            | Self::Type { location, .. }
            | Self::UnknownAttribute { location, .. } => Some(location),
            _ => None,
        }
    }

    pub fn resource_load(
        resource: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ResourceLoad {
            resource: resource.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OverviewError>;
