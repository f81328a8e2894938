use log::debug;

use super::client::CamaraClient;
use super::types::{dados_list, dados_object, dados_or_list, RawRecord};
use crate::error::Result;

/// Server-side search parameters for `GET /proposicoes`.
///
/// Field docs name the upstream query parameter each one maps to.
#[derive(Debug, Clone)]
pub struct KeywordQuery {
    /// Term matched against the bill summary (`ementa`)
    pub term: String,
    /// Restrict to a legislative year (`ano`)
    pub year: Option<i32>,
    /// Bill type code such as PL or PEC (`siglaTipo`)
    pub type_code: String,
    /// Results per page (`itens`)
    pub page_size: u32,
    /// Server-side sort field (`ordenarPor`)
    pub sort_field: String,
    /// Sort direction (`ordem`)
    pub sort_order: String,
}

impl Default for KeywordQuery {
    fn default() -> Self {
        Self {
            term: String::new(),
            year: None,
            type_code: "PL".to_string(),
            page_size: 100,
            sort_field: "ano".to_string(),
            sort_order: "DESC".to_string(),
        }
    }
}

impl CamaraClient {
    /// Search bills through the API's own query/filter/sort parameters,
    /// as opposed to the local filtering of
    /// [`search_by_topic`](CamaraClient::search_by_topic).
    pub fn search_by_keyword(&self, query: &KeywordQuery) -> Result<Vec<RawRecord>> {
        let mut params = vec![
            ("ementa", query.term.clone()),
            ("siglaTipo", query.type_code.clone()),
            ("itens", query.page_size.to_string()),
            ("ordenarPor", query.sort_field.clone()),
            ("ordem", query.sort_order.clone()),
        ];
        if let Some(year) = query.year {
            params.push(("ano", year.to_string()));
        }

        let payload = self.get_api("/proposicoes", &params)?;
        let found = dados_list(payload);
        debug!(
            "Keyword search for {:?} returned {} records",
            query.term,
            found.len()
        );
        Ok(found)
    }

    /// Fetch a single bill, unwrapping the `dados` envelope.
    pub fn bill_detail(&self, id: u64) -> Result<RawRecord> {
        let payload = self.get_api(&format!("/proposicoes/{}", id), &[])?;
        Ok(dados_object(payload))
    }

    /// Procedural history (tramitações) of a bill, in the order served.
    pub fn procedural_history(&self, id: u64) -> Result<Vec<RawRecord>> {
        let payload = self.get_api(&format!("/proposicoes/{}/tramitacoes", id), &[])?;
        Ok(dados_list(payload))
    }

    /// Authorship entries of a bill.
    ///
    /// The endpoint sometimes answers with a bare array instead of the
    /// usual envelope; both shapes are accepted.
    pub fn bill_authors(&self, id: u64) -> Result<Vec<RawRecord>> {
        let payload = self.get_api(&format!("/proposicoes/{}/autores", id), &[])?;
        Ok(dados_or_list(payload))
    }

    /// Fallback for records that embed a direct authors URI.
    ///
    /// Best-effort: an empty, malformed or unreachable URI yields an empty
    /// list, never an error.
    pub fn authors_by_uri(&self, uri: &str) -> Vec<RawRecord> {
        if uri.trim().is_empty() {
            return Vec::new();
        }
        match self.fetch_uri(uri) {
            Some(payload) => dados_or_list(payload),
            None => Vec::new(),
        }
    }
}
