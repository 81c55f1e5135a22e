pub mod types;      // modelo de dados: catálogo, estado do formulário
pub mod sources;    // fontes externas atrás de traits async
pub mod catalog;    // montagem do catálogo (redução + join + ordenação)
pub mod quote;      // funções puras de cotação
pub mod validate;   // regras de campo e cross-field
pub mod controller; // máquina de estados da sessão

// módulos unificados de erro
pub mod error_catalog;
pub mod error;
pub mod error_map;
