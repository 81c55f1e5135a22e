//! O JSON de log precisa ser parseável de volta e carregar código, título,
//! mensagem e contexto exatamente como o catálogo define.

use std::collections::HashSet;

use serde_json::Value;

use swap_engine_core::swap::error::FormError;
use swap_engine_core::swap::error_catalog::FormErrorCode;

fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("to_log_json deve emitir JSON válido")
}

#[test]
fn json_shape_per_code() {
    for code in FormErrorCode::all() {
        let err = FormError::new(*code);
        let value = parse(&err.to_log_json());
        assert_eq!(value["code"].as_str(), Some(code.code()));
        assert_eq!(value["title"].as_str(), Some(code.title()));
        assert_eq!(value["message"].as_str(), Some(code.message_pt()));
        assert!(value["context"].is_object());
    }
}

#[test]
fn context_survives_roundtrip_with_escapes() {
    let err = FormError::new(FormErrorCode::SourceUnavailable)
        .with_context("fonte", "precos")
        .with_context("causa", "aspas \" e barra \\");
    let value = parse(&err.to_log_json());
    assert_eq!(value["context"]["fonte"].as_str(), Some("precos"));
    assert_eq!(value["context"]["causa"].as_str(), Some("aspas \" e barra \\"));
}

#[test]
fn all_codes_seen() {
    let mut seen = HashSet::new();
    for code in FormErrorCode::all() {
        let err = FormError::new(*code);
        let value = parse(&err.to_log_json());
        if let Some(code_str) = value["code"].as_str() {
            seen.insert(code_str.to_string());
        }
    }
    assert_eq!(seen.len(), 7);
}
