use anyhow::Result;
use opentelemetry::KeyValue;
use std::sync::Arc;
use std::time::Instant;

use swap_engine_core::swap::sources::{FixedDelaySink, HttpPriceFeed, StaticImageSource};
use swap_engine_core::{telemetry, SubmitOutcome, SwapController};

#[tokio::main]
async fn main() -> Result<()> {
    let tel = telemetry::init("swap-engine-core")?;

    // imagens resolvidas localmente; preços vêm do feed público
    let images = StaticImageSource::from_entries([
        ("ATOM", "assets/ATOM.svg"),
        ("ETH", "assets/ETH.svg"),
        ("LUNA", "assets/LUNA.svg"),
        ("OSMO", "assets/OSMO.svg"),
        ("USDC", "assets/USDC.svg"),
        ("USD", "assets/USD.svg"),
    ]);
    let mut controller = SwapController::new(
        Arc::new(images),
        Arc::new(HttpPriceFeed::default()),
        Arc::new(FixedDelaySink::default()),
    );

    {
        let span = telemetry::make_info_span("load", 0, "form_demo");
        let _guard = span.enter();
        let t0 = Instant::now();
        controller.load().await;
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
        tel.catalog_load_ms
            .record(elapsed_ms, &[KeyValue::new("op", "load")]);
    }

    println!("catálogo: {} tokens", controller.catalog().len());
    for token in controller.catalog().iter() {
        println!("  {:<6} {:>14.6} USD  ({})", token.symbol, token.price, token.last_updated);
    }

    controller.select_buy_token("USDC");
    controller.edit_amount("1.5");
    println!(
        "cotação: {} {} → {} {}",
        controller.state().from_amount,
        controller.state().from_token.as_deref().unwrap_or("?"),
        controller.state().to_amount,
        controller.state().to_token.as_deref().unwrap_or("?"),
    );

    if controller.can_submit() {
        let span = telemetry::make_info_span("submit", 1, "form_demo");
        let _guard = span.enter();
        let t0 = Instant::now();
        let outcome = controller.submit().await;
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
        tel.submit_latency_ms
            .record(elapsed_ms, &[KeyValue::new("op", "submit")]);
        match outcome {
            SubmitOutcome::Completed(report) => println!(
                "troca concluída: {} {} → {} {}",
                report.from_amount, report.from_symbol, report.to_amount, report.to_symbol
            ),
            other => println!("submissão não concluída: {other:?}"),
        }
    } else {
        println!("submissão desabilitada (catálogo vazio ou formulário incompleto)");
    }

    tel.shutdown();
    Ok(())
}
