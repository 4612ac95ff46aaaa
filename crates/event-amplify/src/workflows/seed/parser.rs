use super::SeedImportError;
use crate::workflows::catalog::domain::{ChannelGroup, ChannelGroupType, EntityId};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ChannelGroupRow {
    id: u64,
    name: String,
    #[serde(rename = "type")]
    group_type: String,
    point: i64,
}

/// Rows are numbered from 1, excluding the header.
pub(crate) fn parse_channel_groups<R: Read>(
    reader: R,
) -> Result<Vec<ChannelGroup>, SeedImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut groups = Vec::new();

    for (index, record) in csv_reader.deserialize::<ChannelGroupRow>().enumerate() {
        let row = record?;
        let row_number = index + 1;

        if row.name.is_empty() {
            return Err(SeedImportError::BlankName { row: row_number });
        }

        let group_type =
            parse_group_type(&row.group_type).ok_or_else(|| SeedImportError::UnknownType {
                row: row_number,
                value: row.group_type.clone(),
            })?;

        groups.push(ChannelGroup {
            id: Some(EntityId(row.id)),
            name: row.name,
            point: row.point,
            group_type,
        });
    }

    Ok(groups)
}

fn parse_group_type(value: &str) -> Option<ChannelGroupType> {
    match value.trim().to_ascii_uppercase().as_str() {
        "ROLE" => Some(ChannelGroupType::Role),
        "INVITEE" => Some(ChannelGroupType::Invitee),
        "SCALE" => Some(ChannelGroupType::Scale),
        _ => None,
    }
}
