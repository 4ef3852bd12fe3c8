//! Roster ingestion
//!
//! Loads the candidate pool from a CSV roster. Reserved columns carry
//! identity (`id`, `type`, `name`); every other column is read as a
//! numeric attribute unless explicitly excluded.

use std::collections::HashSet;
use std::path::Path;

use csv::StringRecord;

use crate::candidate::{Candidate, CandidateId, CandidatePool};
use crate::error::RosterError;

/// Reserved column carrying the candidate id
pub const COLUMN_ID: &str = "id";
/// Reserved column carrying the candidate category
pub const COLUMN_TYPE: &str = "type";
/// Reserved column carrying the display name
pub const COLUMN_NAME: &str = "name";

/// A loaded roster: the candidate pool plus the attribute columns found
#[derive(Clone, Debug)]
pub struct Roster {
    /// Candidates grouped by category
    pub pool: CandidatePool,
    /// Attribute column names, in header order
    pub attributes: Vec<String>,
}

/// Load a roster CSV into a candidate pool
///
/// Attribute cells must hold finite numbers; `NaN` and infinite values
/// are rejected with the same row context as unparseable cells. Rows are
/// reported one-based, counting the header as line 1, so error positions
/// match what an editor shows.
pub fn load_roster(path: &Path, excluded: &[String]) -> Result<Roster, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let id_index = column_index(&headers, COLUMN_ID)?;
    let type_index = column_index(&headers, COLUMN_TYPE)?;
    let name_index = column_index(&headers, COLUMN_NAME)?;

    let reserved = [id_index, type_index, name_index];
    let attribute_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| !reserved.contains(index))
        .filter(|(_, column)| !excluded.iter().any(|skip| skip == column))
        .map(|(index, column)| (index, column.to_string()))
        .collect();

    let mut candidates = Vec::new();
    let mut seen: HashSet<CandidateId> = HashSet::new();
    for (row_number, record) in reader.records().enumerate() {
        let record = record?;
        let row = row_number + 2;

        let raw_id = field(&record, id_index, COLUMN_ID, row)?;
        let id: CandidateId = raw_id.parse().map_err(|_| RosterError::BadId {
            row,
            value: raw_id.to_string(),
        })?;
        if !seen.insert(id) {
            return Err(RosterError::DuplicateId { id, row });
        }

        let category = field(&record, type_index, COLUMN_TYPE, row)?;
        let name = field(&record, name_index, COLUMN_NAME, row)?;
        let mut candidate = Candidate::new(id, name, category);
        for (index, column) in &attribute_columns {
            let raw = field(&record, *index, column, row)?;
            let value = match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    return Err(RosterError::BadNumber {
                        row,
                        column: column.clone(),
                        value: raw.to_string(),
                    })
                }
            };
            candidate = candidate.with_attribute(column.clone(), value);
        }
        candidates.push(candidate);
    }

    if candidates.is_empty() {
        return Err(RosterError::Empty);
    }

    let pool = CandidatePool::from_candidates(candidates)?;
    let attributes = attribute_columns
        .into_iter()
        .map(|(_, column)| column)
        .collect();
    Ok(Roster { pool, attributes })
}

fn column_index(headers: &StringRecord, column: &'static str) -> Result<usize, RosterError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or(RosterError::MissingColumn(column))
}

fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<&'r str, RosterError> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RosterError::MissingValue {
            row,
            column: column.to_string(),
        }),
    }
}
