use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dates::parse_date;
use super::fields::{first_int, first_text, first_value, non_empty};
use crate::api::types::RawRecord;

/// Tracking page for a bill on the chamber's site.
const TRACKING_URL: &str =
    "https://www.camara.leg.br/proposicoesWeb/fichadetramitacao?idProposicao=";

/// Alternate key names for the nested status container.
const STATUS_KEYS: [&str; 3] = ["statusProposicao", "ultimoStatus", "status_proposicao"];

const ID_KEYS: [&str; 2] = ["id", "idProposicao"];
const TYPE_KEYS: [&str; 2] = ["siglaTipo", "sigla_tipo"];
const NUMBER_KEYS: [&str; 3] = ["numero", "numProposicao", "num"];
const YEAR_KEYS: [&str; 2] = ["ano", "anoProposicao"];
const SUMMARY_KEYS: [&str; 2] = ["ementa", "ementaDetalhada"];
const SITUATION_KEYS: [&str; 3] = ["descricaoSituacao", "situacao", "descricaoTramitacao"];
const STEP_KEYS: [&str; 2] = ["descricaoTramitacao", "apreciacao"];
const STATUS_DATE_KEYS: [&str; 3] = ["dataHora", "dataUltimoDespacho", "data"];

/// One bill flattened into the canonical row schema.
///
/// Every column is always present; `None` stands in for data the upstream
/// record did not carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRow {
    pub id: Option<i64>,
    pub type_code: Option<String>,
    pub number: Option<i64>,
    pub year: Option<i64>,
    /// Display label, `"{type} {number}/{year}"` when all parts are known.
    pub label: Option<String>,
    pub summary: Option<String>,
    pub status_description: Option<String>,
    pub current_procedural_step: Option<String>,
    pub status_date: Option<DateTime<Utc>>,
    /// Human-facing tracking URL, empty when it cannot be derived.
    pub link: String,
}

/// Flatten raw bill records into canonical rows, one row per input record.
pub fn normalize_rows(records: &[RawRecord]) -> Vec<BillRow> {
    records.iter().map(normalize_row).collect()
}

fn normalize_row(record: &RawRecord) -> BillRow {
    let id = first_int(record, &ID_KEYS);
    let type_code = first_text(record, &TYPE_KEYS);
    let number = first_int(record, &NUMBER_KEYS);
    let year = first_int(record, &YEAR_KEYS);

    let label = match (&type_code, number, year) {
        (Some(t), Some(n), Some(y)) => Some(format!("{} {}/{}", t, n, y)),
        _ => None,
    };

    let status = status_container(record);
    let status_description = status_field(record, status, &SITUATION_KEYS);
    let current_procedural_step = status_field(record, status, &STEP_KEYS);
    let status_date =
        status_field(record, status, &STATUS_DATE_KEYS).and_then(|raw| parse_date(&raw));

    let link = derive_link(id, record);

    BillRow {
        id,
        type_code,
        number,
        year,
        label,
        summary: first_text(record, &SUMMARY_KEYS),
        status_description,
        current_procedural_step,
        status_date,
        link,
    }
}

/// First present status container, when it is a nested object.
fn status_container(record: &RawRecord) -> Option<&Map<String, Value>> {
    first_value(record, &STATUS_KEYS).and_then(Value::as_object)
}

/// Resolve a status sub-field: inside the nested container when one exists,
/// otherwise through the dotted flattened spellings
/// (`statusProposicao.dataHora`, ...).
fn status_field(
    record: &RawRecord,
    status: Option<&Map<String, Value>>,
    keys: &[&str],
) -> Option<String> {
    if let Some(status) = status {
        return keys.iter().find_map(|key| non_empty(status.get(*key)));
    }

    STATUS_KEYS.iter().find_map(|container| {
        keys.iter()
            .find_map(|key| non_empty(record.get(&format!("{}.{}", container, key))))
    })
}

/// Canonical tracking URL from the bill id; for id-less records, a
/// human-facing URL derived from the record's API URI by dropping the
/// `api.` host prefix and the `/v2` path segment; else empty.
fn derive_link(id: Option<i64>, record: &RawRecord) -> String {
    if let Some(id) = id {
        return format!("{}{}", TRACKING_URL, id);
    }
    match first_text(record, &["uri"]) {
        Some(uri) => uri.replacen("api.", "", 1).replacen("/v2", "", 1),
        None => String::new(),
    }
}
