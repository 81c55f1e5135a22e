//! Máquina de estados do formulário: carga do catálogo, edições reativas,
//! validação em duas camadas e ciclo de submissão.
//! Loading → Ready → Submitting → {Success, Failed} → Ready.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::catalog;
use super::error::FormError;
use super::error_catalog::FormErrorCode;
use super::error_map;
use super::quote;
use super::sources::{PriceFeed, SubmissionSink, TokenImageSource};
use super::types::{Catalog, Field, FormState, Status, SwapReport, Token};
use super::validate;

/// Token de venda pré-selecionado quando presente no catálogo.
const DEFAULT_SELL_SYMBOL: &str = "ETH";

/// Casas decimais do valor derivado. Parte da semântica do motor: o texto
/// derivado realimenta `from_amount` na inversão de direção.
const TO_AMOUNT_DECIMALS: usize = 6;

/// Desfecho de uma chamada de submissão.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Liquidação concluída; o formulário foi zerado.
    Completed(SwapReport),
    /// Liquidação rejeitada; valores preservados para nova tentativa.
    Failed(FormError),
    /// Bloqueada pela validação completa ou pelas condições de desabilitação.
    Rejected,
    /// Já existe uma submissão em voo; chamada ignorada.
    AlreadyInFlight,
}

/// Orquestrador da sessão. Único mutador do `FormState`, sempre em resposta a
/// um evento externo por vez; o catálogo é somente-leitura após a carga.
pub struct SwapController {
    images: Arc<dyn TokenImageSource>,
    feed: Arc<dyn PriceFeed>,
    sink: Arc<dyn SubmissionSink>,
    catalog: Catalog,
    state: FormState,
}

impl SwapController {
    pub fn new(
        images: Arc<dyn TokenImageSource>,
        feed: Arc<dyn PriceFeed>,
        sink: Arc<dyn SubmissionSink>,
    ) -> Self {
        Self {
            images,
            feed,
            sink,
            catalog: Catalog::default(),
            state: FormState::new(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Token de venda resolvido contra o catálogo atual.
    pub fn sell_token(&self) -> Option<&Token> {
        self.state
            .from_token
            .as_deref()
            .and_then(|symbol| self.catalog.get(symbol))
    }

    /// Token de compra resolvido contra o catálogo atual.
    pub fn buy_token(&self) -> Option<&Token> {
        self.state
            .to_token
            .as_deref()
            .and_then(|symbol| self.catalog.get(symbol))
    }

    /// Carrega (ou recarrega) o catálogo por inteiro e pré-seleciona o token
    /// de venda: ETH se presente, senão o primeiro do catálogo, senão nenhum.
    pub async fn load(&mut self) {
        self.state.status = Status::Loading;
        let images = Arc::clone(&self.images);
        let feed = Arc::clone(&self.feed);
        self.catalog = catalog::build_catalog(images.as_ref(), feed.as_ref()).await;
        self.state.from_token = self
            .catalog
            .get(DEFAULT_SELL_SYMBOL)
            .or_else(|| self.catalog.first())
            .map(|t| t.symbol.clone());
        self.state.status = Status::Ready;
        self.refresh_derived();
        info!(target: "se_core", tokens = self.catalog.len(), "catálogo carregado");
    }

    /// Edição do campo de valor. Retorna `false` quando o texto é rejeitado
    /// ainda no teclado (o campo nunca chega a conter caractere inválido).
    pub fn edit_amount(&mut self, raw: &str) -> bool {
        if self.state.status != Status::Ready {
            return false;
        }
        if !validate::accepts_amount_text(raw) {
            return false;
        }
        self.state.from_amount = raw.to_string();
        self.state.touched.insert(Field::Amount);
        self.apply_live_amount_validation();
        self.refresh_derived();
        true
    }

    /// Saída de foco do campo de valor: marca como tocado e valida.
    pub fn blur_amount(&mut self) {
        if self.state.status != Status::Ready {
            return;
        }
        self.state.touched.insert(Field::Amount);
        self.apply_live_amount_validation();
    }

    pub fn select_sell_token(&mut self, symbol: &str) -> bool {
        self.select_token(Field::SellToken, symbol)
    }

    pub fn select_buy_token(&mut self, symbol: &str) -> bool {
        self.select_token(Field::BuyToken, symbol)
    }

    fn select_token(&mut self, field: Field, symbol: &str) -> bool {
        if self.state.status != Status::Ready {
            return false;
        }
        let Some(resolved) = self.catalog.get(symbol).map(|t| t.symbol.clone()) else {
            warn!(target: "se_core", simbolo = symbol, "seleção ignorada: símbolo fora do catálogo");
            return false;
        };
        let slot = match field {
            Field::SellToken => &mut self.state.from_token,
            Field::BuyToken => &mut self.state.to_token,
            Field::Amount | Field::General => return false,
        };
        *slot = Some(resolved);
        self.state.touched.insert(field);
        self.state.errors.remove(&field);
        // seleção limpa o erro geral; a regra cross-field reavalia a seguir
        self.state.errors.remove(&Field::General);
        self.refresh_derived();
        true
    }

    /// Inverte a direção da troca. Exige os dois lados selecionados; sem isso
    /// devolve o aviso ao chamador e não muda nada. Quando `to_amount` tem
    /// valor, ele vira o novo `from_amount`; senão o valor digitado é limpo.
    pub fn swap_direction(&mut self) -> Result<(), FormError> {
        if self.sell_token().is_none() {
            return Err(FormError::new(FormErrorCode::MissingSellToken));
        }
        if self.buy_token().is_none() {
            return Err(FormError::new(FormErrorCode::MissingBuyToken));
        }
        std::mem::swap(&mut self.state.from_token, &mut self.state.to_token);
        if self.state.to_amount.is_empty() {
            self.state.from_amount.clear();
        } else {
            self.state.from_amount = std::mem::take(&mut self.state.to_amount);
        }
        self.state.errors.remove(&Field::General);
        self.refresh_derived();
        Ok(())
    }

    /// Submissão fica desabilitada (não apenas inválida) quando: algum token
    /// não resolve, o valor não parseia positivo, os símbolos coincidem, ou
    /// já há submissão em voo.
    pub fn can_submit(&self) -> bool {
        if self.state.status != Status::Ready {
            return false;
        }
        let (Some(from), Some(to)) = (self.sell_token(), self.buy_token()) else {
            return false;
        };
        if from.symbol == to.symbol {
            return false;
        }
        matches!(
            self.state.from_amount.parse::<f64>(),
            Ok(v) if v.is_finite() && v > 0.0
        )
    }

    /// Submete a troca. Marca todos os campos como tocados, roda a validação
    /// completa (o conjunto de erros é substituído por inteiro) e só então
    /// entra em `Submitting`. Reentrância durante `Submitting` é no-op.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state.status == Status::Submitting {
            debug!(target: "se_core", "submissão ignorada: já em voo");
            return SubmitOutcome::AlreadyInFlight;
        }
        if self.state.status != Status::Ready {
            return SubmitOutcome::Rejected;
        }

        self.state.touched.insert(Field::SellToken);
        self.state.touched.insert(Field::BuyToken);
        self.state.touched.insert(Field::Amount);

        let errors = {
            let from = self.sell_token();
            let to = self.buy_token();
            validate::validate_form(&self.state.from_amount, from, to)
        };
        self.state.errors = errors;

        if !self.state.errors.is_empty() || !self.can_submit() {
            let blocking = error_map::first_blocking_code(
                &self.state.from_amount,
                self.state.from_token.as_deref(),
                self.state.to_token.as_deref(),
            );
            debug!(
                target: "se_core",
                bloqueio = blocking.map(|c| c.code()).unwrap_or("desabilitado"),
                "submissão rejeitada"
            );
            return SubmitOutcome::Rejected;
        }

        let (Some(from_symbol), Some(to_symbol)) =
            (self.state.from_token.clone(), self.state.to_token.clone())
        else {
            return SubmitOutcome::Rejected;
        };
        let report = SwapReport {
            from_symbol,
            to_symbol,
            from_amount: self.state.from_amount.clone(),
            to_amount: self.state.to_amount.clone(),
        };

        self.state.status = Status::Submitting;
        let sink = Arc::clone(&self.sink);
        match sink.execute(&report).await {
            Ok(()) => {
                self.state.status = Status::Success;
                // sucesso zera valores, toques e erros
                self.state.from_amount.clear();
                self.state.to_amount.clear();
                self.state.touched.clear();
                self.state.errors.clear();
                self.state.status = Status::Ready;
                info!(
                    target: "se_core",
                    de = %report.from_symbol,
                    para = %report.to_symbol,
                    "troca concluída"
                );
                SubmitOutcome::Completed(report)
            }
            Err(err) => {
                self.state.status = Status::Failed;
                let failure =
                    crate::swap_err!(FormErrorCode::SwapExecutionError, causa => err);
                warn!(target: "se_core", "{}", failure.to_log_json());
                // nada digitado se perde: valores e toques ficam como estão
                self.state.errors.insert(Field::General, failure.clone());
                self.state.status = Status::Ready;
                SubmitOutcome::Failed(failure)
            }
        }
    }

    /// Validação viva do valor: roda apenas depois do campo ser tocado e
    /// atualiza somente o erro desse campo.
    fn apply_live_amount_validation(&mut self) {
        if !self.state.touched.contains(&Field::Amount) {
            return;
        }
        match validate::validate_amount(&self.state.from_amount) {
            Some(code) => {
                let err = crate::swap_err!(code, valor => self.state.from_amount.clone());
                self.state.errors.insert(Field::Amount, err);
            }
            None => {
                self.state.errors.remove(&Field::Amount);
            }
        }
    }

    /// Recalcula os derivados após cada mutação aceita, antes do estado ser
    /// observável: `to_amount` e a regra cross-field de símbolo repetido.
    fn refresh_derived(&mut self) {
        let derived = {
            let from = self.sell_token();
            let to = self.buy_token();
            let amount = self.state.from_amount.as_str();
            if from.is_some() && to.is_some() && !amount.is_empty() && amount != "0" {
                let out = quote::output_amount(amount, from, to);
                format!("{out:.prec$}", prec = TO_AMOUNT_DECIMALS)
            } else {
                String::new()
            }
        };
        self.state.to_amount = derived;

        let same_symbol = match (self.sell_token(), self.buy_token()) {
            (Some(a), Some(b)) if a.symbol == b.symbol => Some(a.symbol.clone()),
            _ => None,
        };
        match same_symbol {
            Some(symbol) => {
                let err = crate::swap_err!(FormErrorCode::SameTokenSelected, simbolo => symbol);
                self.state.errors.insert(Field::General, err);
            }
            None => {
                // limpa no instante em que os tokens divergem; outros erros
                // gerais (falha de execução) não são tocados aqui
                if let Some(existing) = self.state.errors.get(&Field::General) {
                    if existing.code == FormErrorCode::SameTokenSelected {
                        self.state.errors.remove(&Field::General);
                    }
                }
            }
        }
    }
}
