//! Mapeamento entre o estado cru da submissão e códigos de erro do formulário.
use crate::swap::error::FormError;
use crate::swap::error_catalog::FormErrorCode;
use crate::swap::validate::validate_amount;

/// Determina o primeiro código que bloqueia a submissão, em ordem estável:
/// seleção de tokens, regra cross-field, depois o valor digitado.
pub fn first_blocking_code(
    amount: &str,
    from_symbol: Option<&str>,
    to_symbol: Option<&str>,
) -> Option<FormErrorCode> {
    let from = match from_symbol {
        Some(symbol) => symbol,
        None => return Some(FormErrorCode::MissingSellToken),
    };
    let to = match to_symbol {
        Some(symbol) => symbol,
        None => return Some(FormErrorCode::MissingBuyToken),
    };
    if from == to {
        return Some(FormErrorCode::SameTokenSelected);
    }
    validate_amount(amount)
}

/// Constrói um [`FormError`] diretamente de um código.
pub fn to_error(code: FormErrorCode) -> FormError {
    FormError::new(code)
}
