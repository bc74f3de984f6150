use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use bzip2::read::BzDecoder;
use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use tracing::debug;

use super::InvGroup;
use crate::codes::{InvCategoryId, InvGroupId, StateType};
use crate::error::{OverviewError, Result};

pub const DEFAULT_CATEGORIES_PATH: &str = "data/invCategories.csv";
pub const DEFAULT_GROUPS_PATH: &str = "data/invGroups.csv";
pub const DEFAULT_STATES_PATH: &str = "data/filterStates.csv";

const CATEGORY_FIELDS: usize = 4;
const GROUP_FIELDS: usize = 9;
const STATE_FIELDS: usize = 2;

const CATEGORIES_RESOURCE: &str = "inventory categories table";
const GROUPS_RESOURCE: &str = "inventory groups table";
const STATES_RESOURCE: &str = "filter states table";

/// Where each reference table comes from. `None` means the default location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSources {
    pub categories: Option<PathBuf>,
    pub groups: Option<PathBuf>,
    pub states: Option<PathBuf>,
}

pub(super) fn load_categories(
    sources: &TableSources,
) -> Result<BTreeMap<InvCategoryId, String>> {
    let path = resolve_path(sources.categories.as_deref(), DEFAULT_CATEGORIES_PATH);
    let resource = format!("{CATEGORIES_RESOURCE} {}", path.display());
    categories_from(open_table(&path, &resource)?, &resource)
}

pub(super) fn load_groups(sources: &TableSources) -> Result<BTreeMap<InvGroupId, InvGroup>> {
    let path = resolve_path(sources.groups.as_deref(), DEFAULT_GROUPS_PATH);
    let resource = format!("{GROUPS_RESOURCE} {}", path.display());
    groups_from(open_table(&path, &resource)?, &resource)
}

pub(super) fn load_states(sources: &TableSources) -> Result<BTreeMap<StateType, String>> {
    let path = resolve_path(sources.states.as_deref(), DEFAULT_STATES_PATH);
    let resource = format!("{STATES_RESOURCE} {}", path.display());
    states_from(open_table(&path, &resource)?, &resource)
}

pub fn parse_categories<R: Read>(reader: R) -> Result<BTreeMap<InvCategoryId, String>> {
    categories_from(reader, CATEGORIES_RESOURCE)
}

pub fn parse_groups<R: Read>(reader: R) -> Result<BTreeMap<InvGroupId, InvGroup>> {
    groups_from(reader, GROUPS_RESOURCE)
}

pub fn parse_states<R: Read>(reader: R) -> Result<BTreeMap<StateType, String>> {
    states_from(reader, STATES_RESOURCE)
}

fn categories_from<R: Read>(reader: R, resource: &str) -> Result<BTreeMap<InvCategoryId, String>> {
    read_table(reader, resource, CATEGORY_FIELDS, |id, record| {
        Ok((InvCategoryId(id), record[1].to_string()))
    })
}

fn groups_from<R: Read>(reader: R, resource: &str) -> Result<BTreeMap<InvGroupId, InvGroup>> {
    read_table(reader, resource, GROUP_FIELDS, |id, record| {
        let category = record[1]
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("category id {:?}: {e}", &record[1]))?;
        let group = InvGroup {
            id: InvGroupId(id),
            category: InvCategoryId(category),
            name: record[2].to_string(),
        };
        Ok((group.id, group))
    })
}

fn states_from<R: Read>(reader: R, resource: &str) -> Result<BTreeMap<StateType, String>> {
    read_table(reader, resource, STATE_FIELDS, |id, record| {
        Ok((StateType(id), record[1].to_string()))
    })
}

/// Reads `fields`-wide CSV rows keyed by an integer first column.
///
/// Rows whose id does not parse are skipped until the first row is accepted,
/// which lets exports with or without a header line through. After that an
/// unparseable id is fatal, as is any row with the wrong width.
fn read_table<R, K, V, F>(
    reader: R,
    resource: &str,
    fields: usize,
    mut build: F,
) -> Result<BTreeMap<K, V>>
where
    R: Read,
    K: Ord,
    F: FnMut(i32, &StringRecord) -> std::result::Result<(K, V), String>,
{
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut table = BTreeMap::new();
    for (index, record) in csv.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| OverviewError::resource_load(resource, e))?;
        if record.len() != fields {
            return Err(OverviewError::resource_load(
                resource,
                format!("row {row}: expected {fields} fields, got {}", record.len()),
            ));
        }
        let id = match record[0].trim().parse::<i32>() {
            Ok(id) => id,
            Err(_) if table.is_empty() => {
                debug!(resource, row, "skipping header row");
                continue;
            }
            Err(e) => {
                return Err(OverviewError::resource_load(
                    resource,
                    format!("row {row}: id {:?}: {e}", &record[0]),
                ));
            }
        };
        let (key, value) = build(id, &record).map_err(|reason| {
            OverviewError::resource_load(resource, format!("row {row}: {reason}"))
        })?;
        table.insert(key, value);
    }
    Ok(table)
}

fn resolve_path(explicit: Option<&Path>, default: &str) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let plain = PathBuf::from(default);
    if plain.exists() {
        return plain;
    }
    let compressed = PathBuf::from(format!("{default}.bz2"));
    if compressed.exists() { compressed } else { plain }
}

fn open_table(path: &Path, resource: &str) -> Result<Box<dyn Read>> {
    let bytes = fs::read(path).map_err(|e| OverviewError::resource_load(resource, e))?;
    let lower = path.to_string_lossy().to_ascii_lowercase();
    let reader: Box<dyn Read> = if lower.ends_with("bz2") {
        Box::new(BzDecoder::new(Cursor::new(bytes)))
    } else if lower.ends_with(".gz") {
        Box::new(GzDecoder::new(Cursor::new(bytes)))
    } else {
        Box::new(Cursor::new(bytes))
    };
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write as _;

    use bzip2::Compression as BzCompression;
    use bzip2::write::BzEncoder;
    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;
    use crate::error::ErrorCode;

    const CATEGORIES_CSV: &str = "\
categoryID,categoryName,iconID,published
6,Ship,,1
7,Module,67,1
";

    #[test]
    fn header_row_is_skipped() {
        let parsed = parse_categories(CATEGORIES_CSV.as_bytes()).expect("categories should parse");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get(&InvCategoryId(7)).map(String::as_str), Some("Module"));
    }

    #[test]
    fn headerless_table_parses() {
        let parsed = parse_states("9,At war\n10,Outlaw\n".as_bytes()).expect("states should parse");
        assert_eq!(parsed.get(&StateType(10)).map(String::as_str), Some("Outlaw"));
    }

    #[test]
    fn bad_id_after_first_row_is_fatal() {
        let err = parse_states("9,At war\nten,Outlaw\n".as_bytes()).expect_err("row 2 should fail");
        assert_eq!(err.code(), ErrorCode::ResourceLoad);
        assert!(err.to_string().contains("row 2"), "{err}");
    }

    #[test]
    fn wrong_field_count_is_fatal() {
        let err = parse_states("9,At war,extra\n".as_bytes()).expect_err("width should be checked");
        assert!(err.to_string().contains("expected 2 fields, got 3"), "{err}");
    }

    #[test]
    fn groups_need_numeric_category() {
        let csv = "1000,7,Widgets,0,1,0,0,0,1\n1001,x,Broken,0,1,0,0,0,1\n";
        let err = parse_groups(csv.as_bytes()).expect_err("category id should be checked");
        assert!(err.to_string().contains("category id"), "{err}");

        let ok = parse_groups("1000,7,Widgets,0,1,0,0,0,1\n".as_bytes()).expect("groups parse");
        let group = ok.get(&InvGroupId(1000)).expect("group 1000 present");
        assert_eq!(group.category, InvCategoryId(7));
        assert_eq!(group.name, "Widgets");
    }

    #[test]
    fn compressed_tables_are_decoded_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");

        let bz_path = dir.path().join("invCategories.csv.bz2");
        let mut bz = BzEncoder::new(Vec::new(), BzCompression::default());
        bz.write_all(CATEGORIES_CSV.as_bytes()).expect("bzip2 write");
        fs::write(&bz_path, bz.finish().expect("bzip2 finish")).expect("write bz2 fixture");

        let gz_path = dir.path().join("filterStates.csv.gz");
        let mut gz = GzEncoder::new(Vec::new(), Compression::default());
        gz.write_all(b"9,At war\n").expect("gzip write");
        fs::write(&gz_path, gz.finish().expect("gzip finish")).expect("write gz fixture");

        let sources = TableSources {
            categories: Some(bz_path),
            groups: None,
            states: Some(gz_path),
        };
        let categories = load_categories(&sources).expect("bz2 categories should load");
        assert_eq!(categories.len(), 2);
        let states = load_states(&sources).expect("gz states should load");
        assert_eq!(states.get(&StateType(9)).map(String::as_str), Some("At war"));
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        let sources = TableSources {
            states: Some(PathBuf::from("/nonexistent/filterStates.csv")),
            ..TableSources::default()
        };
        let err = load_states(&sources).expect_err("missing file should fail");
        assert_eq!(err.code(), ErrorCode::ResourceLoad);
        assert!(err.to_string().contains("/nonexistent/filterStates.csv"), "{err}");
    }
}
