use serde::Deserialize;
use std::io::Read;

use super::domain::LeadProfile;

/// Column headers a lead upload must carry. Cells may be blank; missing
/// headers reject the whole batch before any state changes.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "role",
    "company",
    "industry",
    "location",
    "linkedin_bio",
];

#[derive(Debug, thiserror::Error)]
pub enum LeadCsvError {
    #[error("failed to read CSV: {0}")]
    Malformed(#[from] csv::Error),
    #[error("CSV is missing required columns: {0}")]
    MissingColumns(String),
    #[error("CSV contained no lead rows")]
    Empty,
}

pub fn parse_leads<R: Read>(reader: R) -> Result<Vec<LeadProfile>, LeadCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(LeadCsvError::MissingColumns(missing.join(", ")));
    }

    let mut profiles = Vec::new();
    for record in csv_reader.deserialize::<LeadRow>() {
        profiles.push(record?.into());
    }

    if profiles.is_empty() {
        return Err(LeadCsvError::Empty);
    }

    Ok(profiles)
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    industry: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    linkedin_bio: String,
}

impl From<LeadRow> for LeadProfile {
    fn from(row: LeadRow) -> Self {
        LeadProfile {
            name: row.name,
            role: row.role,
            company: row.company,
            industry: row.industry,
            location: row.location,
            linkedin_bio: row.linkedin_bio,
        }
    }
}
