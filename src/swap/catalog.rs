//! Montagem do catálogo: reduz o feed de preços a um registro por moeda,
//! cruza com o mapa de imagens e ordena por símbolo.
//! Falha de qualquer fonte degrada para catálogo vazio — logada, nunca fatal.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use super::error_catalog::FormErrorCode;
use super::sources::{PriceFeed, TokenImageSource};
use super::types::{Catalog, PriceRecord, Token};

fn parse_feed_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

/// Reduz o feed a um registro por moeda: vence a data mais recente; em empate
/// de datas vence o último registro na ordem do feed. Uma data que não parseia
/// nunca desloca o ocupante nem é deslocável (semântica da comparação
/// original, preservada de propósito).
pub fn latest_prices(records: Vec<PriceRecord>) -> BTreeMap<String, PriceRecord> {
    let mut latest: BTreeMap<String, (Option<DateTime<FixedOffset>>, PriceRecord)> =
        BTreeMap::new();
    for record in records {
        let parsed = parse_feed_date(&record.date);
        match latest.get(&record.currency) {
            None => {
                latest.insert(record.currency.clone(), (parsed, record));
            }
            Some((Some(current), _)) => {
                if let Some(candidate) = parsed {
                    if candidate >= *current {
                        latest.insert(record.currency.clone(), (Some(candidate), record));
                    }
                }
            }
            Some((None, _)) => {}
        }
    }
    latest
        .into_iter()
        .map(|(currency, (_, record))| (currency, record))
        .collect()
}

/// Monta o catálogo juntando as duas fontes. As buscas rodam como um join —
/// nunca em sequência — e resultado parcial não escapa daqui: qualquer falha
/// vira catálogo vazio (o formulário segue utilizável, só que sem pares).
pub async fn build_catalog(images: &dyn TokenImageSource, feed: &dyn PriceFeed) -> Catalog {
    let (images_result, prices_result) = tokio::join!(images.fetch_images(), feed.fetch_prices());

    let images = match images_result {
        Ok(map) => map,
        Err(err) => {
            warn_source("imagens", &err);
            BTreeMap::new()
        }
    };
    let prices = match prices_result {
        Ok(records) => latest_prices(records),
        Err(err) => {
            warn_source("precos", &err);
            BTreeMap::new()
        }
    };

    let mut tokens = Vec::new();
    for (symbol, image) in images {
        // símbolo entra sse tem imagem E preço resolvido
        if let Some(record) = prices.get(&symbol) {
            tokens.push(Token {
                symbol: symbol.clone(),
                name: symbol,
                image,
                price: record.price,
                last_updated: record.date.clone(),
            });
        }
    }
    Catalog::from_tokens(tokens)
}

fn warn_source(source: &str, err: &anyhow::Error) {
    let logged = crate::swap_err!(FormErrorCode::SourceUnavailable, fonte => source, causa => err);
    warn!(target: "se_core", "{}", logged.to_log_json());
}
