//! Funções puras de cotação entre dois tokens do catálogo.
//! Política: qualquer entrada inutilizável (token ausente, preço não-positivo,
//! divisão não-finita, texto não-numérico) vira `0.0`, nunca um erro.

use super::types::Token;

#[inline]
fn usable_price(token: &Token) -> bool {
    token.price.is_finite() && token.price > 0.0
}

/// Taxa de câmbio `from → to`: `from.price / to.price`.
/// `exchange_rate(a, a) == 1.0` para qualquer token com preço positivo.
pub fn exchange_rate(from: Option<&Token>, to: Option<&Token>) -> f64 {
    let (Some(from), Some(to)) = (from, to) else {
        return 0.0;
    };
    if !usable_price(from) || !usable_price(to) {
        return 0.0;
    }
    let rate = from.price / to.price;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

/// Valor de saída para o texto digitado: `amount * exchange_rate(from, to)`.
/// Recalculado a cada mudança de entrada; sem cache (entradas são pequenas).
pub fn output_amount(amount: &str, from: Option<&Token>, to: Option<&Token>) -> f64 {
    let Ok(value) = amount.parse::<f64>() else {
        return 0.0;
    };
    value * exchange_rate(from, to)
}
