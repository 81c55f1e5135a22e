//! Tipos básicos do motor de swap: catálogo, estado do formulário e fiação.
//! O formulário nunca guarda ponteiros para o catálogo — apenas símbolos,
//! resolvidos a cada uso (recarga do catálogo não deixa referência pendurada).

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use super::error::FormError;

/// Handle opaco para a imagem de um token (resolvido pela camada visual).
pub type ImageRef = String;

/// Registro cru do feed de preços, um por atualização histórica.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PriceRecord {
    pub currency: String,
    pub price: f64,
    pub date: String,
}

/// Token negociável montado pelo catálogo. Imutável depois de construído.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    pub image: ImageRef,
    /// Preço em USD; só é utilizável quando > 0.
    pub price: f64,
    /// Texto ISO-8601 do feed, preservado verbatim.
    pub last_updated: String,
}

/// Catálogo ordenado de tokens, sem símbolos repetidos.
/// Reconstruído por inteiro a cada carga; nunca atualizado parcialmente.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tokens: Vec<Token>,
}

impl Catalog {
    /// Constrói ordenando por símbolo (comparação ordinal) e descartando
    /// símbolos duplicados (o primeiro da sequência ordenada permanece).
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        tokens.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        tokens.dedup_by(|a, b| a.symbol == b.symbol);
        Self { tokens }
    }

    pub fn get(&self, symbol: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}

/// Campos do formulário, também usados como chave do mapa de erros.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    SellToken,
    BuyToken,
    Amount,
    /// Erros de formulário que não pertencem a um campo específico.
    General,
}

impl Field {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SellToken => "sell_token",
            Self::BuyToken => "buy_token",
            Self::Amount => "amount",
            Self::General => "general",
        }
    }
}

/// Ciclo de vida do formulário.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
    Submitting,
    Success,
    Failed,
}

/// Estado completo de uma sessão do formulário.
/// `to_amount` é sempre derivado de `(from_amount, from_token, to_token)`.
#[derive(Clone, Debug)]
pub struct FormState {
    pub from_token: Option<String>,
    pub to_token: Option<String>,
    pub from_amount: String,
    pub to_amount: String,
    pub errors: BTreeMap<Field, FormError>,
    pub touched: BTreeSet<Field>,
    pub status: Status,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            from_token: None,
            to_token: None,
            from_amount: String::new(),
            to_amount: String::new(),
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            status: Status::Loading,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Par negociado e valores, reportados ao chamador após a submissão.
#[derive(Clone, Debug, PartialEq)]
pub struct SwapReport {
    pub from_symbol: String,
    pub to_symbol: String,
    pub from_amount: String,
    pub to_amount: String,
}
