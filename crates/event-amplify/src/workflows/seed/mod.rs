//! Channel group reference data import.
//!
//! Seed files are CSV with the header `id,name,type,point`; `type` is one of
//! `ROLE`, `INVITEE` or `SCALE` (case-insensitive).

mod parser;

use crate::workflows::catalog::domain::ChannelGroup;
use crate::workflows::catalog::repository::{EntityRepository, RepositoryError};
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum SeedImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownType { row: usize, value: String },
    BlankName { row: usize },
    Repository(RepositoryError),
}

impl std::fmt::Display for SeedImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedImportError::Io(err) => write!(f, "failed to read channel group seed: {}", err),
            SeedImportError::Csv(err) => write!(f, "invalid channel group CSV data: {}", err),
            SeedImportError::UnknownType { row, value } => write!(
                f,
                "row {}: unknown channel group type '{}' (expected ROLE, INVITEE or SCALE)",
                row, value
            ),
            SeedImportError::BlankName { row } => {
                write!(f, "row {}: channel group name must not be blank", row)
            }
            SeedImportError::Repository(err) => {
                write!(f, "could not store channel group seed: {}", err)
            }
        }
    }
}

impl std::error::Error for SeedImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedImportError::Io(err) => Some(err),
            SeedImportError::Csv(err) => Some(err),
            SeedImportError::Repository(err) => Some(err),
            SeedImportError::UnknownType { .. } | SeedImportError::BlankName { .. } => None,
        }
    }
}

impl From<std::io::Error> for SeedImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<RepositoryError> for SeedImportError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

impl From<csv::Error> for SeedImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ChannelGroupImporter;

impl ChannelGroupImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ChannelGroup>, SeedImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ChannelGroup>, SeedImportError> {
        parser::parse_channel_groups(reader)
    }

    /// Parse `reader` and store every row. An invalid row or an id already in `store`
    /// fails the import without storing anything.
    pub fn import_into<R, S>(reader: R, store: &S) -> Result<usize, SeedImportError>
    where
        R: Read,
        S: EntityRepository<ChannelGroup> + ?Sized,
    {
        let groups = Self::from_reader(reader)?;
        let count = store.insert_all(groups)?.len();
        info!(count, "channel groups imported");
        Ok(count)
    }
}
