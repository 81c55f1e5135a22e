//! Regras de validação do formulário.
//! Duas camadas: validação viva por campo (após o campo ser tocado) e a
//! validação completa, único portão da submissão.

use std::collections::BTreeMap;

use super::error::FormError;
use super::error_catalog::FormErrorCode;
use super::types::{Field, Token};

/// Filtro de teclado do campo de valor: apenas dígitos ASCII e no máximo um
/// ponto decimal. O campo nunca chega a conter um caractere fora disso.
pub fn accepts_amount_text(raw: &str) -> bool {
    let mut dots = 0usize;
    for ch in raw.chars() {
        match ch {
            '.' => dots += 1,
            c if c.is_ascii_digit() => {}
            _ => return false,
        }
    }
    dots <= 1
}

/// Regra de campo do valor: em branco ou "0" literal ⇒ `EmptyAmount`;
/// texto que não parseia como decimal finito não-negativo ⇒ `NotANumber`.
pub fn validate_amount(raw: &str) -> Option<FormErrorCode> {
    if raw.is_empty() || raw == "0" {
        return Some(FormErrorCode::EmptyAmount);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => None,
        _ => Some(FormErrorCode::NotANumber),
    }
}

/// Regras de seleção de tokens, incluindo a regra cross-field de símbolo
/// repetido (erro geral, não de campo).
pub fn validate_selection(
    from: Option<&Token>,
    to: Option<&Token>,
) -> Vec<(Field, FormErrorCode)> {
    let mut found = Vec::new();
    if from.is_none() {
        found.push((Field::SellToken, FormErrorCode::MissingSellToken));
    }
    if to.is_none() {
        found.push((Field::BuyToken, FormErrorCode::MissingBuyToken));
    }
    if let (Some(a), Some(b)) = (from, to) {
        if a.symbol == b.symbol {
            found.push((Field::General, FormErrorCode::SameTokenSelected));
        }
    }
    found
}

/// Validação completa: roda todas as regras e devolve o conjunto de erros
/// por inteiro. Um campo sem erro vivo ainda pode bloquear a submissão aqui.
pub fn validate_form(
    amount: &str,
    from: Option<&Token>,
    to: Option<&Token>,
) -> BTreeMap<Field, FormError> {
    let mut errors = BTreeMap::new();
    if let Some(code) = validate_amount(amount) {
        errors.insert(Field::Amount, FormError::new(code));
    }
    for (field, code) in validate_selection(from, to) {
        let mut err = FormError::new(code);
        if code == FormErrorCode::SameTokenSelected {
            if let Some(token) = from {
                err = err.with_context("simbolo", &token.symbol);
            }
        }
        errors.insert(field, err);
    }
    errors
}
