//! Catálogo imutável de erros do formulário de swap.
use core::fmt;

/// Código de erro do formulário.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum FormErrorCode {
    /// Valor em branco ou literalmente "0".
    EmptyAmount,
    /// Texto que não parseia como decimal não-negativo.
    NotANumber,
    /// Token de venda não selecionado.
    MissingSellToken,
    /// Token de compra não selecionado.
    MissingBuyToken,
    /// Os dois lados apontam para o mesmo símbolo.
    SameTokenSelected,
    /// A operação de liquidação falhou; valores preservados.
    SwapExecutionError,
    /// Fonte de dados do catálogo inacessível; degrada para catálogo vazio.
    SourceUnavailable,
}

impl FormErrorCode {
    /// Código textual estável do erro.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyAmount => "SWP-0001",
            Self::NotANumber => "SWP-0002",
            Self::MissingSellToken => "SWP-0003",
            Self::MissingBuyToken => "SWP-0004",
            Self::SameTokenSelected => "SWP-0005",
            Self::SwapExecutionError => "SWP-0006",
            Self::SourceUnavailable => "SWP-0007",
        }
    }

    /// Título curto em português.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::EmptyAmount => "Valor ausente",
            Self::NotANumber => "Valor inválido",
            Self::MissingSellToken => "Token de venda ausente",
            Self::MissingBuyToken => "Token de compra ausente",
            Self::SameTokenSelected => "Tokens idênticos",
            Self::SwapExecutionError => "Falha na execução",
            Self::SourceUnavailable => "Fonte indisponível",
        }
    }

    /// Mensagem base em português.
    pub const fn message_pt(&self) -> &'static str {
        match self {
            Self::EmptyAmount => "informe um valor para continuar",
            Self::NotANumber => "o valor informado não é um número válido",
            Self::MissingSellToken => "selecione o token de venda",
            Self::MissingBuyToken => "selecione o token de compra",
            Self::SameTokenSelected => "não é possível trocar um token por ele mesmo",
            Self::SwapExecutionError => "a troca falhou, tente novamente",
            Self::SourceUnavailable => "fonte de dados indisponível, operando com catálogo vazio",
        }
    }

    /// Retorna todas as variantes em ordem estável.
    pub fn all() -> &'static [FormErrorCode] {
        const ALL: &[FormErrorCode] = &[
            FormErrorCode::EmptyAmount,
            FormErrorCode::NotANumber,
            FormErrorCode::MissingSellToken,
            FormErrorCode::MissingBuyToken,
            FormErrorCode::SameTokenSelected,
            FormErrorCode::SwapExecutionError,
            FormErrorCode::SourceUnavailable,
        ];
        ALL
    }
}

impl fmt::Display for FormErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mensagem padrão na localidade ativa (pt-BR).
pub fn default_locale_message(code: FormErrorCode) -> &'static str {
    code.message_pt()
}
