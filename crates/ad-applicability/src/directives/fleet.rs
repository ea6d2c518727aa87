use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use super::domain::AircraftConfiguration;

/// Errors raised while importing a fleet roster CSV.
#[derive(Debug, thiserror::Error)]
pub enum FleetImportError {
    #[error("failed to open fleet roster '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fleet roster: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: MSN '{value}' is not a whole number")]
    InvalidMsn { row: usize, value: String },
}

/// Reads an operator fleet roster into aircraft configurations.
///
/// Expected headers: `Aircraft Model`, `MSN`, `Modifications Applied`, the
/// last a `;`-separated list. MSN and modifications may be blank.
pub struct FleetImporter;

impl FleetImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<AircraftConfiguration>, FleetImportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FleetImportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<AircraftConfiguration>, FleetImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut fleet = Vec::new();
        for (index, record) in csv_reader.deserialize::<FleetRow>().enumerate() {
            let row = record?;
            fleet.push(row.into_configuration(index + 1)?);
        }

        Ok(fleet)
    }
}

#[derive(Debug, Deserialize)]
struct FleetRow {
    #[serde(rename = "Aircraft Model")]
    aircraft_model: String,
    #[serde(rename = "MSN", default, deserialize_with = "empty_string_as_none")]
    msn: Option<String>,
    #[serde(
        rename = "Modifications Applied",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    modifications: Option<String>,
}

impl FleetRow {
    fn into_configuration(self, row: usize) -> Result<AircraftConfiguration, FleetImportError> {
        let msn = match self.msn {
            Some(value) => Some(value.parse::<u32>().map_err(|_| {
                FleetImportError::InvalidMsn { row, value }
            })?),
            None => None,
        };

        let modifications_applied = self
            .modifications
            .as_deref()
            .map(|value| {
                value
                    .split(';')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(AircraftConfiguration {
            aircraft_model: self.aircraft_model,
            msn,
            modifications_applied,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ROSTER: &str = "\
Aircraft Model,MSN,Modifications Applied
A320-214,5234,
A320-232,6789,mod 24591 (production)
A321-112,364,mod 24977 (production); SB A320-57-1089 Rev 04
MD-11F,,
";

    #[test]
    fn roster_rows_become_configurations() {
        let fleet = FleetImporter::from_reader(Cursor::new(ROSTER)).expect("roster parses");
        assert_eq!(fleet.len(), 4);

        assert_eq!(fleet[0].aircraft_model, "A320-214");
        assert_eq!(fleet[0].msn, Some(5234));
        assert!(fleet[0].modifications_applied.is_empty());

        assert_eq!(
            fleet[1].modifications_applied,
            vec!["mod 24591 (production)".to_string()]
        );

        assert_eq!(fleet[2].modifications_applied.len(), 2);
        assert_eq!(fleet[2].modifications_applied[1], "SB A320-57-1089 Rev 04");

        assert_eq!(fleet[3].msn, None);
    }

    #[test]
    fn non_numeric_msn_is_rejected_with_row_number() {
        let roster = "Aircraft Model,MSN,Modifications Applied\nA320-214,forty-two,\n";
        let err = FleetImporter::from_reader(Cursor::new(roster)).expect_err("invalid MSN");
        match err {
            FleetImportError::InvalidMsn { row, value } => {
                assert_eq!(row, 1);
                assert_eq!(value, "forty-two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_roster_file_reports_path() {
        let err = FleetImporter::from_path("/nonexistent/fleet.csv").expect_err("missing file");
        assert!(matches!(err, FleetImportError::Open { .. }));
    }
}
