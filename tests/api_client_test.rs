use mockito::{Matcher, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::json;

use legitrack::api::{CamaraClient, ClientConfig, KeywordQuery};
use legitrack::error::LegitrackError;

fn client_for(server: &ServerGuard) -> CamaraClient {
    let _ = env_logger::builder().is_test(true).try_init();
    CamaraClient::new(ClientConfig {
        api_base: server.url(),
        archive_base: server.url(),
        ..Default::default()
    })
}

#[test]
fn bill_detail_unwraps_envelope() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/proposicoes/2270976")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "dados": {"id": 2270976, "siglaTipo": "PL", "numero": 1234, "ano": 2022}
            })
            .to_string(),
        )
        .create();

    let client = client_for(&server);
    let detail = client.bill_detail(2270976).unwrap();
    assert_eq!(detail.get("siglaTipo"), Some(&json!("PL")));
    assert_eq!(detail.get("numero"), Some(&json!(1234)));
}

#[test]
fn bill_detail_defaults_to_empty_record_without_dados() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/proposicoes/1")
        .with_status(200)
        .with_body(json!({"links": []}).to_string())
        .create();

    let client = client_for(&server);
    assert!(client.bill_detail(1).unwrap().is_empty());
}

#[test]
fn procedural_history_unwraps_dados_list() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/proposicoes/42/tramitacoes")
        .with_status(200)
        .with_body(
            json!({
                "dados": [
                    {"sequencia": 1, "descricaoTramitacao": "Apresentação"},
                    {"sequencia": 2, "descricaoTramitacao": "Despacho"}
                ]
            })
            .to_string(),
        )
        .create();

    let client = client_for(&server);
    let history = client.procedural_history(42).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].get("sequencia"), Some(&json!(1)));
}

#[test]
fn bill_authors_accepts_envelope_and_bare_array() {
    let mut server = mockito::Server::new();
    let _enveloped = server
        .mock("GET", "/proposicoes/1/autores")
        .with_status(200)
        .with_body(json!({"dados": [{"nome": "Fulano", "tipo": "Deputado"}]}).to_string())
        .create();
    let _bare = server
        .mock("GET", "/proposicoes/2/autores")
        .with_status(200)
        .with_body(json!([{"nome": "Beltrano", "tipo": "Deputado"}]).to_string())
        .create();

    let client = client_for(&server);
    assert_eq!(client.bill_authors(1).unwrap().len(), 1);
    assert_eq!(
        client.bill_authors(2).unwrap()[0].get("nome"),
        Some(&json!("Beltrano"))
    );
}

#[test]
fn search_by_keyword_sends_documented_params() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/proposicoes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ementa".to_string(), "educação".to_string()),
            Matcher::UrlEncoded("siglaTipo".to_string(), "PEC".to_string()),
            Matcher::UrlEncoded("itens".to_string(), "50".to_string()),
            Matcher::UrlEncoded("ordenarPor".to_string(), "ano".to_string()),
            Matcher::UrlEncoded("ordem".to_string(), "DESC".to_string()),
            Matcher::UrlEncoded("ano".to_string(), "2023".to_string()),
        ]))
        .with_status(200)
        .with_body(json!({"dados": [{"id": 1, "siglaTipo": "PEC"}]}).to_string())
        .create();

    let client = client_for(&server);
    let query = KeywordQuery {
        term: "educação".to_string(),
        year: Some(2023),
        type_code: "PEC".to_string(),
        page_size: 50,
        ..Default::default()
    };

    let found = client.search_by_keyword(&query).unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn search_by_keyword_returns_empty_without_dados() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/proposicoes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"links": []}).to_string())
        .create();

    let client = client_for(&server);
    let query = KeywordQuery {
        term: "qualquer".to_string(),
        ..Default::default()
    };
    assert!(client.search_by_keyword(&query).unwrap().is_empty());
}

#[test]
fn rest_errors_surface_with_target_url() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/proposicoes/9")
        .with_status(500)
        .create();

    let client = client_for(&server);
    match client.bill_detail(9) {
        Err(LegitrackError::Fetch { url, .. }) => assert!(url.contains("/proposicoes/9")),
        other => panic!("expected Fetch error, got {:?}", other),
    }
}

#[test]
fn authors_by_uri_is_best_effort() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/autores-fallback")
        .with_status(500)
        .create();

    let client = client_for(&server);
    let failing = format!("{}/autores-fallback", server.url());
    assert!(client.authors_by_uri(&failing).is_empty());
    assert!(client.authors_by_uri("").is_empty());
    assert!(client.authors_by_uri("not a url").is_empty());
}

#[test]
fn authors_by_uri_unwraps_successful_payloads() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/autores-ok")
        .with_status(200)
        .with_body(json!({"dados": [{"nome": "Fulano"}]}).to_string())
        .create();

    let client = client_for(&server);
    let authors = client.authors_by_uri(&format!("{}/autores-ok", server.url()));
    assert_eq!(authors.len(), 1);
}

#[test]
fn archive_year_fetches_and_normalizes_shape() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/proposicoes-2023.json")
        .with_status(200)
        .with_body(
            json!({"proposicoes": [{"id": 1, "ano": 2023}, {"id": 2, "ano": 2023}]}).to_string(),
        )
        .create();

    let client = client_for(&server);
    let found = client.fetch_archive_year(2023).unwrap();
    assert_eq!(found.len(), 2);
}

#[test]
fn topic_search_rejects_empty_term_before_any_request() {
    // no server at this address: a network attempt would produce Fetch
    let client = CamaraClient::new(ClientConfig {
        api_base: "http://127.0.0.1:1".to_string(),
        archive_base: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    });

    match client.search_by_topic("   ", 2023, &[]) {
        Err(LegitrackError::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn topic_search_filters_and_sorts_archive_records() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/proposicoes-2023.json")
        .with_status(200)
        .with_body(
            json!({
                "dados": [
                    {"siglaTipo": "PL", "ano": 2021, "numero": 5, "ementa": "Reforma da escola pública"},
                    {"siglaTipo": "PEC", "ano": 2023, "numero": 7, "ementa": "Verbas para a escola"},
                    {"siglaTipo": "PL", "ano": 2023, "numero": 1, "keywords": "escola; ensino"},
                    {"siglaTipo": "PL", "ano": 2023, "numero": 2, "ementa": "Código florestal"}
                ]
            })
            .to_string(),
        )
        .create();

    let client = client_for(&server);
    let found = client.search_by_topic("Escola", 2023, &["pl"]).unwrap();

    // PEC is excluded by type, "Código florestal" by term; 2023 sorts first
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].get("ano"), Some(&json!(2023)));
    assert_eq!(found[1].get("ano"), Some(&json!(2021)));
}
