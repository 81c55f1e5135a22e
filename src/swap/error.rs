//! Tipo de erro unificado do formulário com formatação estável.
use core::fmt;
use std::collections::BTreeMap;

use crate::swap::error_catalog::{default_locale_message, FormErrorCode};

const CONTEXT_VALUE_MAX: usize = 256;

/// Valores de contexto viram uma linha só e nunca passam do limite.
fn sanitize_value(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|ch| match ch {
            '\n' | '\r' | '\t' => ' ',
            other => other,
        })
        .collect();
    if cleaned.chars().count() <= CONTEXT_VALUE_MAX {
        return cleaned;
    }
    let mut truncated: String = cleaned.chars().take(CONTEXT_VALUE_MAX - 1).collect();
    truncated.push('…');
    truncated
}

fn escape_json(input: &str) -> String {
    use core::fmt::Write as _;
    let mut escaped = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{08}' => escaped.push_str("\\b"),
            '\u{0c}' => escaped.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(&mut escaped, "\\u{:04x}", c as u32);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Substitui `{chave}` pelos valores do contexto; chave desconhecida fica como está.
fn render_template(template: &str, context: &BTreeMap<String, String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match context.get(key) {
                    Some(value) if !key.is_empty() => rendered.push_str(value),
                    _ => {
                        rendered.push('{');
                        rendered.push_str(key);
                        rendered.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                // abre-chave sem fechamento: o restante é literal
                rendered.push('{');
                rendered.push_str(after);
                return rendered;
            }
        }
    }
    rendered.push_str(rest);
    rendered
}

/// Erro do formulário com contexto estruturado.
#[derive(Debug, Clone)]
pub struct FormError {
    pub code: FormErrorCode,
    pub context: BTreeMap<String, String>,
}

impl FormError {
    /// Cria um novo erro sem contexto adicional.
    pub fn new(code: FormErrorCode) -> Self {
        Self {
            code,
            context: BTreeMap::new(),
        }
    }

    /// Adiciona um par chave/valor ao contexto.
    pub fn with_context<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        let key_string = key.into();
        if !key_string.is_empty() {
            self.context
                .insert(key_string, sanitize_value(&value.to_string()));
        }
        self
    }

    fn resolved_message(&self) -> String {
        render_template(default_locale_message(self.code), &self.context)
    }

    /// Mensagem curta para UI.
    pub fn to_user_string(&self) -> String {
        format!("[{}] {}", self.code.code(), self.resolved_message())
    }

    /// Renderiza um template arbitrário usando o contexto atual.
    pub fn render_with_template(&self, template: &str) -> String {
        render_template(template, &self.context)
    }

    /// Serialização estável em JSON para logs.
    pub fn to_log_json(&self) -> String {
        let mut json = String::from("{");
        push_json_field(&mut json, "code", self.code.code(), false);
        push_json_field(&mut json, "title", self.code.title(), true);
        push_json_field(&mut json, "message", &self.resolved_message(), true);
        json.push_str(",\"context\":{");
        let mut first = true;
        for (key, value) in &self.context {
            if !first {
                json.push(',');
            }
            first = false;
            push_json_field(&mut json, key, value, false);
        }
        json.push_str("}}");
        json
    }
}

fn push_json_field(buf: &mut String, key: &str, value: &str, comma: bool) {
    if comma {
        buf.push(',');
    }
    buf.push('"');
    buf.push_str(&escape_json(key));
    buf.push_str("\":\"");
    buf.push_str(&escape_json(value));
    buf.push('"');
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_user_string())
    }
}

impl std::error::Error for FormError {}

/// Resultado padrão para operações do formulário.
pub type Result<T> = std::result::Result<T, FormError>;

#[macro_export]
macro_rules! swap_err {
  ($code:expr) => {{
    $crate::swap::error::FormError::new($code)
  }};
  ($code:expr, $($key:ident => $value:expr),+ $(,)?) => {{
    let mut err = $crate::swap::error::FormError::new($code);
    $(
      err = err.with_context(stringify!($key), $value);
    )+
    err
  }};
  ($code:expr, $($key:expr => $value:expr),+ $(,)?) => {{
    let mut err = $crate::swap::error::FormError::new($code);
    $(
      err = err.with_context($key, $value);
    )+
    err
  }};
}

#[macro_export]
macro_rules! swap_bail {
  ($($tt:tt)*) => {
    return Err($crate::swap_err!($($tt)*));
  };
}
