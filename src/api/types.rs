use serde_json::{Map, Value};

/// Raw bill record as returned by the upstream API.
///
/// Key names are inconsistent across endpoints and archive years (`id` vs
/// `idProposicao`, `numero` vs `numProposicao`, nested vs dotted status
/// fields), so records stay untyped. `crate::transform::fields` resolves
/// each concept through an ordered fallback chain.
pub type RawRecord = Map<String, Value>;

/// Unwrap a `{"dados": {...}}` envelope into a single record.
///
/// A missing or non-object `dados` yields an empty record.
pub(crate) fn dados_object(payload: Value) -> RawRecord {
    match payload {
        Value::Object(mut map) => match map.remove("dados") {
            Some(Value::Object(dados)) => dados,
            _ => RawRecord::new(),
        },
        _ => RawRecord::new(),
    }
}

/// Unwrap a `{"dados": [...]}` envelope into a list of records.
pub(crate) fn dados_list(payload: Value) -> Vec<RawRecord> {
    match payload {
        Value::Object(mut map) => match map.remove("dados") {
            Some(Value::Array(items)) => records(items),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// The authors endpoint answers either with the usual envelope or with a
/// bare array; accept both.
pub(crate) fn dados_or_list(payload: Value) -> Vec<RawRecord> {
    match payload {
        Value::Object(_) => dados_list(payload),
        Value::Array(items) => records(items),
        _ => Vec::new(),
    }
}

/// Keep only the object entries of a JSON array.
pub(crate) fn records(items: Vec<Value>) -> Vec<RawRecord> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_envelope_unwraps() {
        let dados = dados_object(json!({"dados": {"id": 1}}));
        assert_eq!(dados.get("id"), Some(&json!(1)));
    }

    #[test]
    fn missing_dados_defaults_to_empty_record() {
        assert!(dados_object(json!({"links": []})).is_empty());
        assert!(dados_object(json!(null)).is_empty());
    }

    #[test]
    fn list_envelope_unwraps() {
        let list = dados_list(json!({"dados": [{"id": 1}, {"id": 2}]}));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn dados_or_list_accepts_bare_array() {
        let list = dados_or_list(json!([{"nome": "A"}]));
        assert_eq!(list.len(), 1);
        assert!(dados_or_list(json!("nope")).is_empty());
    }

    #[test]
    fn non_object_entries_are_dropped() {
        let list = dados_list(json!({"dados": [{"id": 1}, 42, "x"]}));
        assert_eq!(list.len(), 1);
    }
}
