mod comments;

use std::fmt::Write as _;

use overview_core::codec::{self, encode_overview};
use overview_core::{
    InvCategoryId, InvGroupId, Overview, OverviewError, Preset, PresetAttribute, ReferenceCode,
    ReferenceTables, Result,
};
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::{debug, warn};

pub use comments::restore_comments;

/// Preset whose groups drive the per-category listings.
pub const ALL_GROUPS_PRESET: &str = "all";

const LISTING_INDENT: &str = "        ";

/// Full overview file text, with code comments restored and CRLF endings.
pub fn render_overview(overview: &Overview, tables: &ReferenceTables) -> Result<String> {
    let encoded = encode_overview(overview, tables);
    let text = serde_yaml::to_string(&encoded).map_err(OverviewError::Emit)?;
    Ok(restore_comments(&text))
}

pub fn render_json_summary(overview: &Overview, tables: &ReferenceTables) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("sections".to_string(), section_counts(overview));
    out.insert(
        "presets".to_string(),
        JsonValue::Array(
            overview
                .presets
                .iter()
                .map(|preset| preset_to_json(preset, tables))
                .collect(),
        ),
    );
    out.insert(
        "tabs".to_string(),
        JsonValue::Array(
            overview
                .tab_setup
                .iter()
                .map(|tab| serde_json::to_value(tab).expect("tab setup has only string keys"))
                .collect(),
        ),
    );
    JsonValue::Object(out)
}

fn section_counts(overview: &Overview) -> JsonValue {
    let counts = [
        (codec::BACKGROUND_ORDER, overview.background_order.len()),
        (codec::BACKGROUND_STATES, overview.background_states.len()),
        (codec::COLUMN_ORDER, overview.column_order.len()),
        (codec::FLAG_ORDER, overview.flag_order.len()),
        (codec::FLAG_STATES, overview.flag_states.len()),
        (codec::OVERVIEW_COLUMNS, overview.overview_columns.len()),
        (codec::PRESETS, overview.presets.len()),
        (codec::SHIP_LABEL_ORDER, overview.ship_label_order.len()),
        (codec::SHIP_LABELS, overview.ship_labels.len()),
        (codec::STATE_BLINKS, overview.state_blinks.len()),
        (codec::STATE_COLORS_NAME_LIST, overview.state_colors.len()),
        (codec::TAB_SETUP, overview.tab_setup.len()),
        (codec::USER_SETTINGS, overview.user_settings.len()),
    ];
    let mut out = JsonMap::new();
    for (key, count) in counts {
        out.insert(key.to_string(), JsonValue::from(count));
    }
    JsonValue::Object(out)
}

fn labels<T: ReferenceCode>(codes: &[T], tables: &ReferenceTables) -> JsonValue {
    JsonValue::Array(
        codes
            .iter()
            .map(|code| JsonValue::from(code.label(tables)))
            .collect(),
    )
}

fn preset_to_json(preset: &Preset, tables: &ReferenceTables) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("name".to_string(), JsonValue::from(preset.name.as_str()));
    for attr in preset.attributes() {
        let values = match attr {
            PresetAttribute::AlwaysShownStates(states)
            | PresetAttribute::FilteredStates(states) => labels(states, tables),
            PresetAttribute::Groups(groups) => labels(groups, tables),
        };
        out.insert(attr.kind().as_str().to_string(), values);
    }
    JsonValue::Object(out)
}

/// One `groups/<category>.yaml` file worth of group entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupListing {
    pub category: InvCategoryId,
    pub file_name: String,
    pub contents: String,
}

/// Buckets the groups of the `all` preset by category.
///
/// Categories appear in the order their first group does; groups keep the
/// preset's order. Groups missing from the reference tables are skipped.
pub fn group_listings(overview: &Overview, tables: &ReferenceTables) -> Result<Vec<GroupListing>> {
    let preset = overview
        .preset_ignore_case(ALL_GROUPS_PRESET)
        .ok_or_else(|| OverviewError::PresetNotFound(ALL_GROUPS_PRESET.to_string()))?;
    let groups = preset
        .groups()
        .ok_or_else(|| OverviewError::PresetWithoutGroups(preset.name.clone()))?;

    let mut buckets: Vec<(InvCategoryId, Vec<InvGroupId>)> = Vec::new();
    for &id in groups {
        let Some(group) = tables.group(id) else {
            warn!(group = id.raw(), "group not in reference table, leaving it out of listings");
            continue;
        };
        match buckets.iter_mut().find(|(cat, _)| *cat == group.category) {
            Some((_, ids)) => ids.push(id),
            None => buckets.push((group.category, vec![id])),
        }
    }

    let listings: Vec<GroupListing> = buckets
        .into_iter()
        .map(|(category, ids)| {
            let mut contents = String::new();
            for id in ids {
                writeln!(
                    &mut contents,
                    "{LISTING_INDENT}- {} # {}",
                    id.raw(),
                    id.name(tables)
                )
                .expect("writing to String cannot fail");
            }
            GroupListing {
                category,
                file_name: listing_file_name(category, tables),
                contents,
            }
        })
        .collect();
    debug!(listings = listings.len(), preset = %preset, "built group listings");
    Ok(listings)
}

fn listing_file_name(category: InvCategoryId, tables: &ReferenceTables) -> String {
    format!("{}.yaml", category.name(tables).to_lowercase().replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use overview_core::{InvGroup, NullableString, StateType, TabSetup};

    fn tables() -> ReferenceTables {
        let mut tables = ReferenceTables::default();
        tables.insert_category(InvCategoryId(6), "Ship");
        tables.insert_category(InvCategoryId(18), "Deployable Structure");
        let groups = [
            (25, 6, "Frigate"),
            (26, 6, "Cruiser"),
            (361, 18, "Mobile Warp Disruptor"),
        ];
        for (id, category, name) in groups {
            tables.insert_group(InvGroup {
                id: InvGroupId(id),
                category: InvCategoryId(category),
                name: name.to_string(),
            });
        }
        tables.insert_state(StateType(9), "Pilot is at war");
        tables
    }

    fn overview_with_all(groups: Vec<i32>) -> Overview {
        let mut preset = Preset::new("All");
        preset.set(PresetAttribute::Groups(groups.into_iter().map(InvGroupId).collect()));
        Overview {
            presets: vec![preset],
            ..Overview::default()
        }
    }

    #[test]
    fn listings_follow_first_seen_category_order() {
        let listings = group_listings(&overview_with_all(vec![361, 26, 25]), &tables())
            .expect("listings should build");
        let names: Vec<&str> = listings.iter().map(|l| l.file_name.as_str()).collect();
        assert_eq!(names, vec!["deployable_structure.yaml", "ship.yaml"]);
        assert_eq!(
            listings[1].contents,
            "        - 26 # Ship (6) -- Cruiser\n        - 25 # Ship (6) -- Frigate\n"
        );
    }

    #[test]
    fn unknown_groups_are_left_out() {
        let listings =
            group_listings(&overview_with_all(vec![25, 4040]), &tables()).expect("listings");
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].contents.lines().count(), 1);
    }

    #[test]
    fn missing_all_preset_is_an_error() {
        let err = group_listings(&Overview::default(), &tables()).expect_err("no preset");
        assert_eq!(err.code(), overview_core::ErrorCode::NotFound);

        let overview = Overview {
            presets: vec![Preset::new("ALL")],
            ..Overview::default()
        };
        let err = group_listings(&overview, &tables()).expect_err("no groups");
        assert!(matches!(err, OverviewError::PresetWithoutGroups(name) if name == "ALL"));
    }

    #[test]
    fn json_summary_tabs_omit_unset_flags() {
        let overview = Overview {
            tab_setup: vec![TabSetup {
                id: 3,
                bracket: NullableString::from("PvP"),
                name: "PvP".to_string(),
                overview: "all".to_string(),
                show_none: Some(true),
                ..TabSetup::default()
            }],
            ..Overview::default()
        };
        let summary = render_json_summary(&overview, &tables());
        assert_eq!(
            summary["tabs"][0],
            serde_json::json!({
                "id": 3,
                "bracket": "PvP",
                "name": "PvP",
                "overview": "all",
                "showNone": true
            })
        );
    }

    #[test]
    fn json_summary_lists_sections_and_resolved_labels() {
        let mut overview = overview_with_all(vec![25]);
        overview.presets[0].set(PresetAttribute::FilteredStates(vec![StateType(9), StateType(7)]));
        let summary = render_json_summary(&overview, &tables());
        assert_eq!(summary["sections"]["presets"], JsonValue::from(1));
        assert_eq!(summary["sections"]["tabSetup"], JsonValue::from(0));
        assert_eq!(
            summary["presets"][0]["groups"][0],
            JsonValue::from("25 Ship (6) -- Frigate")
        );
        assert_eq!(
            summary["presets"][0]["filteredStates"],
            serde_json::json!(["9 Pilot is at war", "7 Unknown StateType"])
        );
    }
}
