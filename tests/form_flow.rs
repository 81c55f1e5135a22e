//! Ciclo de vida do formulário de ponta a ponta, com fontes e sorvedouro
//! determinísticos (sem atraso real, sem rede).

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use swap_engine_core::swap::sources::{PriceFeed, SubmissionSink, TokenImageSource};
use swap_engine_core::swap::types::{ImageRef, PriceRecord};
use swap_engine_core::{Field, FormErrorCode, Status, SubmitOutcome, SwapController, SwapReport};

struct StubFeed(Vec<PriceRecord>);

#[async_trait]
impl PriceFeed for StubFeed {
    async fn fetch_prices(&self) -> Result<Vec<PriceRecord>> {
        Ok(self.0.clone())
    }
}

struct StubImages(BTreeMap<String, ImageRef>);

#[async_trait]
impl TokenImageSource for StubImages {
    async fn fetch_images(&self) -> Result<BTreeMap<String, ImageRef>> {
        Ok(self.0.clone())
    }
}

/// Resolve na hora, sem atraso.
struct OkSink;

#[async_trait]
impl SubmissionSink for OkSink {
    async fn execute(&self, _order: &SwapReport) -> Result<()> {
        Ok(())
    }
}

/// Rejeita sempre, simulando a liquidação falhando.
struct FailSink;

#[async_trait]
impl SubmissionSink for FailSink {
    async fn execute(&self, _order: &SwapReport) -> Result<()> {
        anyhow::bail!("liquidação recusada")
    }
}

fn record(currency: &str, price: f64) -> PriceRecord {
    PriceRecord {
        currency: currency.to_string(),
        price,
        date: "2023-08-29T07:10:40.000Z".to_string(),
    }
}

// preços escolhidos para as cotações saírem exatas em binário
async fn controller_with(sink: Arc<dyn SubmissionSink>) -> SwapController {
    let images = StubImages(
        [("ATOM", "a"), ("ETH", "e"), ("USDT", "u")]
            .into_iter()
            .map(|(s, i)| (s.to_string(), i.to_string()))
            .collect(),
    );
    let feed = StubFeed(vec![
        record("ATOM", 8.0),
        record("ETH", 0.5),
        record("USDT", 1.0),
    ]);
    let mut controller = SwapController::new(Arc::new(images), Arc::new(feed), sink);
    controller.load().await;
    controller
}

#[tokio::test]
async fn keystroke_gate_rejects_invalid_text() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    assert!(!c.edit_amount("12a"));
    assert!(!c.edit_amount("1.2.3"));
    assert!(!c.edit_amount("-5"));
    // rejeição não toca o estado
    assert_eq!(c.state().from_amount, "");
    assert!(c.state().touched.is_empty());
    assert!(c.edit_amount("12.5"));
    assert_eq!(c.state().from_amount, "12.5");
}

#[tokio::test]
async fn derived_amount_follows_every_edit() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    c.select_buy_token("USDT");
    c.edit_amount("100");
    // 100 ETH a 0.5 → 50 USDT
    assert_eq!(c.state().to_amount, "50.000000");
    c.edit_amount("10");
    assert_eq!(c.state().to_amount, "5.000000");
    c.edit_amount("");
    assert_eq!(c.state().to_amount, "");
}

#[tokio::test]
async fn direction_swap_carries_derived_amount() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    c.select_buy_token("USDT");
    c.edit_amount("100");
    assert_eq!(c.state().to_amount, "50.000000");

    c.swap_direction().expect("dois lados selecionados");
    assert_eq!(c.state().from_token.as_deref(), Some("USDT"));
    assert_eq!(c.state().to_token.as_deref(), Some("ETH"));
    // o valor derivado vira o novo valor digitado…
    assert_eq!(c.state().from_amount, "50.000000");
    // …e o derivado é recalculado do par invertido (50 USDT a 2.0 → 100 ETH)
    assert_eq!(c.state().to_amount, "100.000000");
}

#[tokio::test]
async fn direction_swap_with_empty_derived_clears_amount() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    c.select_buy_token("USDT");
    c.edit_amount("0");
    assert_eq!(c.state().to_amount, "");

    c.swap_direction().expect("dois lados selecionados");
    assert_eq!(c.state().from_amount, "");
    assert_eq!(c.state().to_amount, "");
}

#[tokio::test]
async fn direction_swap_needs_both_tokens() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    c.edit_amount("3");
    let err = c.swap_direction().expect_err("token de compra ausente");
    assert_eq!(err.code, FormErrorCode::MissingBuyToken);
    // aviso ao chamador, zero mudança de estado
    assert_eq!(c.state().from_token.as_deref(), Some("ETH"));
    assert_eq!(c.state().from_amount, "3");
}

#[tokio::test]
async fn empty_amount_reported_once_touched() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    c.select_buy_token("USDT");
    // ainda não tocado: sem erro, mas submissão já desabilitada
    assert!(c.state().errors.get(&Field::Amount).is_none());
    assert!(!c.can_submit());

    c.blur_amount();
    assert_eq!(
        c.state().errors.get(&Field::Amount).map(|e| e.code),
        Some(FormErrorCode::EmptyAmount)
    );
    assert!(matches!(c.submit().await, SubmitOutcome::Rejected));
}

#[tokio::test]
async fn live_validation_tracks_amount_edits() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    c.edit_amount("1");
    assert!(c.state().errors.get(&Field::Amount).is_none());
    c.edit_amount("");
    assert_eq!(
        c.state().errors.get(&Field::Amount).map(|e| e.code),
        Some(FormErrorCode::EmptyAmount)
    );
    c.edit_amount(".");
    assert_eq!(
        c.state().errors.get(&Field::Amount).map(|e| e.code),
        Some(FormErrorCode::NotANumber)
    );
    c.edit_amount("2.5");
    assert!(c.state().errors.get(&Field::Amount).is_none());
}

#[tokio::test]
async fn same_token_raises_and_clears_general_error() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    c.select_buy_token("ETH");
    assert_eq!(
        c.state().errors.get(&Field::General).map(|e| e.code),
        Some(FormErrorCode::SameTokenSelected)
    );
    c.edit_amount("5");
    assert!(!c.can_submit());
    assert!(matches!(c.submit().await, SubmitOutcome::Rejected));

    // limpa no instante em que os lados divergem
    c.select_buy_token("USDT");
    assert!(c.state().errors.get(&Field::General).is_none());
    assert!(c.can_submit());
}

#[tokio::test]
async fn full_validation_catches_amount_entered_before_token() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    c.edit_amount("5");
    // sem erro vivo de seleção, mas a validação completa bloqueia
    assert!(c.state().errors.get(&Field::BuyToken).is_none());
    assert!(matches!(c.submit().await, SubmitOutcome::Rejected));
    assert_eq!(
        c.state().errors.get(&Field::BuyToken).map(|e| e.code),
        Some(FormErrorCode::MissingBuyToken)
    );
    // submissão marca todos os campos como tocados
    assert!(c.state().touched.contains(&Field::SellToken));
    assert!(c.state().touched.contains(&Field::BuyToken));
    assert!(c.state().touched.contains(&Field::Amount));
}

#[tokio::test]
async fn submission_disabled_for_non_positive_amount() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    c.select_buy_token("USDT");
    // "0.0" passa na regra de campo (não é o literal "0"), mas não é positivo
    c.edit_amount("0.0");
    assert!(c.state().errors.get(&Field::Amount).is_none());
    assert!(!c.can_submit());
    assert!(matches!(c.submit().await, SubmitOutcome::Rejected));
}

#[tokio::test]
async fn successful_submission_reports_and_resets() {
    let mut c = controller_with(Arc::new(OkSink)).await;
    c.select_buy_token("USDT");
    c.edit_amount("100");

    let outcome = c.submit().await;
    let report = match outcome {
        SubmitOutcome::Completed(report) => report,
        other => panic!("esperava Completed, veio {other:?}"),
    };
    assert_eq!(report.from_symbol, "ETH");
    assert_eq!(report.to_symbol, "USDT");
    assert_eq!(report.from_amount, "100");
    assert_eq!(report.to_amount, "50.000000");

    // sucesso zera valores, toques e erros
    assert_eq!(c.state().from_amount, "");
    assert_eq!(c.state().to_amount, "");
    assert!(c.state().touched.is_empty());
    assert!(c.state().errors.is_empty());
    assert_eq!(c.state().status, Status::Ready);
    // os tokens selecionados permanecem
    assert_eq!(c.state().from_token.as_deref(), Some("ETH"));
    assert_eq!(c.state().to_token.as_deref(), Some("USDT"));
}

#[tokio::test]
async fn failed_submission_preserves_everything() {
    let mut c = controller_with(Arc::new(FailSink)).await;
    c.select_buy_token("USDT");
    c.edit_amount("100");

    let outcome = c.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(
        c.state().errors.get(&Field::General).map(|e| e.code),
        Some(FormErrorCode::SwapExecutionError)
    );
    // nada digitado se perde; dá para tentar de novo com os mesmos valores
    assert_eq!(c.state().from_amount, "100");
    assert_eq!(c.state().to_amount, "50.000000");
    assert_eq!(c.state().status, Status::Ready);
    assert!(c.can_submit());
}
