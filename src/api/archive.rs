use log::{debug, info};
use serde_json::Value;

use super::client::CamaraClient;
use super::types::{records, RawRecord};
use crate::error::{LegitrackError, Result};
use crate::transform::fields::text_of;

/// Array-valued keys probed on archive documents, in order. `dados` is the
/// current envelope; the rest appear in older yearly exports.
const ARCHIVE_LIST_KEYS: [&str; 4] = ["dados", "proposicoes", "lista", "itens"];

impl CamaraClient {
    /// Download the bulk JSON archive of one legislative year.
    ///
    /// The document's top-level shape varies across years; see
    /// [`archive_records`] for the accepted shapes. An unrecognized shape
    /// yields an empty list, not an error.
    pub fn fetch_archive_year(&self, year: i32) -> Result<Vec<RawRecord>> {
        let url = format!("{}/proposicoes-{}.json", self.config().archive_base, year);
        let payload = self.get_archive(&url)?;
        Ok(archive_records(payload))
    }

    /// Search a year's archive locally for bills matching `term`.
    ///
    /// A record is kept when its type code passes `types` (an empty slice
    /// means no type filter) and `term` occurs case-insensitively in the
    /// concatenated summary, keywords and detailed-summary text. Results
    /// sort descending by `(ano, numero)`.
    pub fn search_by_topic(&self, term: &str, year: i32, types: &[&str]) -> Result<Vec<RawRecord>> {
        if term.trim().is_empty() {
            return Err(LegitrackError::InvalidInput(
                "Search term must not be empty".to_string(),
            ));
        }

        let all = self.fetch_archive_year(year)?;
        let total = all.len();
        let mut kept = filter_by_topic(all, term, types);
        sort_by_year_and_number(&mut kept);
        info!(
            "Topic search for {:?} in {} kept {} of {} records",
            term,
            year,
            kept.len(),
            total
        );
        Ok(kept)
    }
}

/// Normalize the archive document's top-level shape into a record list.
///
/// Accepted shapes: an object with one of the [`ARCHIVE_LIST_KEYS`] arrays,
/// a single record object (wrapped as a singleton), or a bare array.
/// Anything else yields no records.
fn archive_records(payload: Value) -> Vec<RawRecord> {
    match payload {
        Value::Object(mut map) => {
            for key in ARCHIVE_LIST_KEYS {
                if matches!(map.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove(key) {
                        return records(items);
                    }
                }
            }
            vec![map]
        }
        Value::Array(items) => records(items),
        _ => Vec::new(),
    }
}

/// Conjunctive filter: type code must pass `types` AND the term must occur
/// in the record's free-text fields.
fn filter_by_topic(all: Vec<RawRecord>, term: &str, types: &[&str]) -> Vec<RawRecord> {
    let needle = term.trim().to_lowercase();
    let wanted: Vec<String> = types.iter().map(|t| t.to_uppercase()).collect();

    all.into_iter()
        .filter(|record| {
            if !wanted.is_empty() {
                let type_code = text_of(record.get("siglaTipo")).to_uppercase();
                if !wanted.contains(&type_code) {
                    return false;
                }
            }

            let haystack = [
                text_of(record.get("ementa")),
                text_of(record.get("keywords")),
                text_of(record.get("ementaDetalhada")),
            ]
            .join(" ")
            .to_lowercase();

            haystack.contains(&needle)
        })
        .collect()
}

/// Stable descending sort by `(ano, numero)`.
///
/// Absent or null keys coerce to 0. If any present key is non-numeric the
/// input order is preserved rather than failing the search.
fn sort_by_year_and_number(kept: &mut Vec<RawRecord>) {
    let keys: Option<Vec<(i64, i64)>> = kept
        .iter()
        .map(|record| Some((sort_key(record, "ano")?, sort_key(record, "numero")?)))
        .collect();
    let Some(keys) = keys else {
        debug!("Non-numeric sort key in archive records, leaving results unsorted");
        return;
    };

    let mut keyed: Vec<((i64, i64), RawRecord)> =
        keys.into_iter().zip(std::mem::take(kept)).collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    kept.extend(keyed.into_iter().map(|(_, record)| record));
}

fn sort_key(record: &RawRecord, key: &str) -> Option<i64> {
    match record.get(key) {
        None | Some(Value::Null) => Some(0),
        Some(value) => crate::transform::fields::coerce_int(value),
    }
}
