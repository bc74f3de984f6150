pub mod catalog;
pub mod codec;
pub mod codes;
pub mod document;
pub mod error;
pub mod types;

pub use catalog::{InvGroup, ReferenceTables, TableSources};
pub use codes::{COMMENT_SENTINEL, CodeKind, InvCategoryId, InvGroupId, ReferenceCode, StateType};
pub use document::{load_overview, parse_overview};
pub use error::{EntityKind, ErrorCode, Field, Location, OverviewError, RecordKey, Result};
pub use types::{
    NullableString, Overview, Preset, PresetAttribute, PresetAttributeKind, ShipLabel,
    ShipLabelState, StateBlink, StateColorName, TabSetup, UserSetting,
};
