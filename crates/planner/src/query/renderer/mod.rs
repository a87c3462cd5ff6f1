//! Rendering context shared by the filter compiler.

use crate::query::dialect::Dialect;
use model::core::value::Value;
use std::collections::BTreeMap;

pub mod filter;

/// How placeholders are spelled and how parameters are handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    /// The dialect's own placeholder (`$1`, `?`, `@p0`), parameters as a list.
    Positional,
    /// `@p<N>` placeholders, parameters keyed by `p<N>`.
    Named,
}

/// Overrides the dialect's identifier quoting.
pub type QuoteFn<'a> = &'a dyn Fn(&str) -> String;

/// A context that holds the state during the rendering process.
///
/// It accumulates the parameters and hands out placeholders, and provides
/// access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
    style: ParamStyle,
    start_index: usize,
    quote: Option<QuoteFn<'a>>,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect, style: ParamStyle, start_index: usize) -> Self {
        Self {
            params: Vec::new(),
            dialect,
            style,
            start_index,
            quote: None,
        }
    }

    pub fn with_quote(mut self, quote: Option<QuoteFn<'a>>) -> Self {
        self.quote = quote;
        self
    }

    pub fn quote(&self, ident: &str) -> String {
        match self.quote {
            Some(quote) => quote(ident),
            None => self.dialect.quote_identifier(ident),
        }
    }

    /// Records `value` and returns the placeholder that refers to it.
    pub fn add_param(&mut self, value: Value) -> String {
        let index = self.start_index + self.params.len();
        self.params.push(value);
        match self.style {
            ParamStyle::Positional => self.dialect.get_placeholder(index),
            ParamStyle::Named => format!("@p{index}"),
        }
    }

    /// Consumes the renderer and returns the parameters in placeholder order.
    pub fn finish(self) -> Vec<Value> {
        self.params
    }

    /// Consumes the renderer and returns the parameters keyed by name.
    pub fn finish_named(self) -> BTreeMap<String, Value> {
        let start = self.start_index;
        self.params
            .into_iter()
            .enumerate()
            .map(|(i, value)| (format!("p{}", start + i), value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::dialect::{MySql, Postgres};

    #[test]
    fn test_positional_placeholders_continue_from_start() {
        let mut r = Renderer::new(&Postgres, ParamStyle::Positional, 3);
        assert_eq!(r.add_param(Value::Int(1)), "$3");
        assert_eq!(r.add_param(Value::Int(2)), "$4");
        assert_eq!(r.finish(), vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_named_ignores_dialect_placeholder() {
        let mut r = Renderer::new(&MySql, ParamStyle::Named, 0);
        assert_eq!(r.add_param(Value::from("a")), "@p0");
        assert_eq!(r.add_param(Value::from("b")), "@p1");
        let params = r.finish_named();
        assert_eq!(params.get("p1"), Some(&Value::from("b")));
    }

    #[test]
    fn test_quote_override() {
        let upper = |s: &str| format!("<{}>", s.to_uppercase());
        let r = Renderer::new(&Postgres, ParamStyle::Positional, 1).with_quote(Some(&upper));
        assert_eq!(r.quote("name"), "<NAME>");
    }
}
