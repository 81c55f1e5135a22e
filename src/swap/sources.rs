//! Fontes externas do motor: feed de preços, imagens e o sorvedouro de
//! submissão. Tudo atrás de traits async para os testes injetarem
//! sucesso/falha determinísticos sem atraso real.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::OnceCell;

use super::types::{ImageRef, PriceRecord, SwapReport};

/// Endpoint público do feed de preços, um fetch por carga de catálogo.
pub const PRICES_API_URL: &str = "https://interview.switcheo.com/prices.json";

/// Latência simulada da liquidação no sorvedouro padrão.
const SETTLEMENT_LATENCY: Duration = Duration::from_secs(2);

static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Cliente HTTP compartilhado do processo (pool de conexões único).
fn http_client() -> reqwest::Client {
    HTTP_CLIENT.get_or_init(reqwest::Client::new).clone()
}

/// Feed de preços: sequência de registros, possivelmente vários por moeda.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch_prices(&self) -> Result<Vec<PriceRecord>>;
}

/// Provedor de imagens: mapa `símbolo → handle`, já resolvido.
#[async_trait]
pub trait TokenImageSource: Send + Sync {
    async fn fetch_images(&self) -> Result<BTreeMap<String, ImageRef>>;
}

/// Execução da troca: resolve após um atraso limitado, ou rejeita.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn execute(&self, order: &SwapReport) -> Result<()>;
}

/// Feed HTTP padrão sobre o endpoint público.
pub struct HttpPriceFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpPriceFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: http_client(),
            url: url.into(),
        }
    }
}

impl Default for HttpPriceFeed {
    fn default() -> Self {
        Self::new(PRICES_API_URL)
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    async fn fetch_prices(&self) -> Result<Vec<PriceRecord>> {
        let records = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PriceRecord>>()
            .await?;
        Ok(records)
    }
}

/// Fonte de imagens em memória.
pub struct StaticImageSource {
    images: BTreeMap<String, ImageRef>,
}

impl StaticImageSource {
    pub fn new(images: BTreeMap<String, ImageRef>) -> Self {
        Self { images }
    }

    pub fn from_entries<S, I>(entries: impl IntoIterator<Item = (S, I)>) -> Self
    where
        S: Into<String>,
        I: Into<ImageRef>,
    {
        Self {
            images: entries
                .into_iter()
                .map(|(symbol, image)| (symbol.into(), image.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl TokenImageSource for StaticImageSource {
    async fn fetch_images(&self) -> Result<BTreeMap<String, ImageRef>> {
        Ok(self.images.clone())
    }
}

/// Sorvedouro padrão: dorme a latência fixa e resolve com sucesso.
pub struct FixedDelaySink {
    latency: Duration,
}

impl FixedDelaySink {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for FixedDelaySink {
    fn default() -> Self {
        Self::new(SETTLEMENT_LATENCY)
    }
}

#[async_trait]
impl SubmissionSink for FixedDelaySink {
    async fn execute(&self, _order: &SwapReport) -> Result<()> {
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}
