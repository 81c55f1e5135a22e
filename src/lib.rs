//! swap-engine-core — motor de cotação e formulário de swap.
//!
//! O catálogo de tokens nasce de duas fontes independentes (preços e
//! imagens), as cotações são funções puras sobre ele e o formulário é uma
//! máquina de estados de sessão única, em memória, sem persistência.

pub mod swap;
pub mod telemetry;

pub use swap::controller::{SubmitOutcome, SwapController};
pub use swap::error::FormError;
pub use swap::error_catalog::FormErrorCode;
pub use swap::types::{Catalog, Field, FormState, Status, SwapReport, Token};
