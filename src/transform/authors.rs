use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{first_text, non_empty};
use crate::api::types::RawRecord;

const NAME_KEYS: [&str; 3] = ["nome", "nomeAutor", "nomeAutorPrimeiroSignatario"];
const TYPE_KEYS: [&str; 2] = ["tipo", "tipoAutor"];

/// Selected primary author of a bill.
///
/// All fields are best-effort. Party and region come only from the nested
/// `autor` shape; the flat shape carries them too inconsistently upstream
/// to be trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryAuthor {
    pub name: Option<String>,
    pub party: Option<String>,
    pub region: Option<String>,
    pub author_type: Option<String>,
}

/// Name-only primary author extraction.
///
/// Selection prefers the first entry typed as a deputy ("deputado",
/// case-insensitive substring), else the first entry.
pub fn primary_author_name(entries: &[RawRecord]) -> Option<String> {
    resolve_name(select_entry(entries)?)
}

/// Structured primary author extraction: name plus party, region and
/// author-type label where the nested `autor` shape provides them.
pub fn primary_author(entries: &[RawRecord]) -> PrimaryAuthor {
    let Some(selected) = select_entry(entries) else {
        return PrimaryAuthor::default();
    };

    let nested = selected.get("autor").and_then(Value::as_object);
    PrimaryAuthor {
        name: resolve_name(selected),
        party: nested.and_then(|autor| non_empty(autor.get("siglaPartido"))),
        region: nested.and_then(|autor| non_empty(autor.get("siglaUf"))),
        author_type: first_text(selected, &["tipoAutor", "tipo"]),
    }
}

/// First deputy-typed entry, else the first entry.
fn select_entry(entries: &[RawRecord]) -> Option<&RawRecord> {
    entries
        .iter()
        .find(|entry| {
            first_text(entry, &TYPE_KEYS)
                .map(|t| t.to_lowercase().contains("deputado"))
                .unwrap_or(false)
        })
        .or_else(|| entries.first())
}

fn resolve_name(entry: &RawRecord) -> Option<String> {
    first_text(entry, &NAME_KEYS).or_else(|| {
        entry
            .get("autor")
            .and_then(Value::as_object)
            .and_then(|autor| non_empty(autor.get("nome")))
    })
}
