use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};
use crate::numeric::{parse_float, parse_int};

/// The value type carried by a registered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    Flag,
    Str,
    Int,
    Float,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "flag",
            Self::Str => "string",
            Self::Int => "integer",
            Self::Float => "floating-point",
        })
    }
}

/// One occurrence (or the fallback) of an option.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Flag(bool),
    Str(String),
    Int(i32),
    Float(f64),
}

impl Value {
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Flag(_) => OptionKind::Flag,
            Self::Str(_) => OptionKind::Str,
            Self::Int(_) => OptionKind::Int,
            Self::Float(_) => OptionKind::Float,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:.6}"),
        }
    }
}

/// Typed extraction of an option [`Value`].
pub trait FromValue: Sized {
    const KIND: OptionKind;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const KIND: OptionKind = OptionKind::Flag;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for String {
    const KIND: OptionKind = OptionKind::Str;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    const KIND: OptionKind = OptionKind::Int;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const KIND: OptionKind = OptionKind::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
}

/// A registered flag or option.
///
/// Every occurrence on the command line is appended in order, whichever alias
/// it was spelled with. Queries for a single value return the last occurrence,
/// or the fallback if there were none.
#[derive(Debug, Clone)]
pub struct Opt {
    kind: OptionKind,
    values: Vec<Value>,
    fallback: Value,
    greedy: bool,
}

impl Opt {
    pub fn flag() -> Self {
        Self::with_fallback(Value::Flag(false))
    }

    pub fn string(fallback: impl Into<String>) -> Self {
        Self::with_fallback(Value::Str(fallback.into()))
    }

    pub fn int(fallback: i32) -> Self {
        Self::with_fallback(Value::Int(fallback))
    }

    pub fn float(fallback: f64) -> Self {
        Self::with_fallback(Value::Float(fallback))
    }

    fn with_fallback(fallback: Value) -> Self {
        Self {
            kind: fallback.kind(),
            values: Vec::new(),
            fallback,
            greedy: false,
        }
    }

    /// Make this option consume every following token that doesn't look like
    /// an option, in addition to its first value (e.g. `-s a b c`).
    ///
    /// Has no effect on flags.
    pub fn greedy(&mut self, enable: bool) -> &mut Self {
        self.greedy = enable;
        self
    }

    pub fn is_greedy(&self) -> bool {
        self.greedy && self.takes_value()
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn takes_value(&self) -> bool {
        self.kind != OptionKind::Flag
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn found(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn fallback(&self) -> &Value {
        &self.fallback
    }

    /// The last occurrence, or the fallback.
    pub fn current(&self) -> &Value {
        self.values.last().unwrap_or(&self.fallback)
    }

    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn append(&mut self, value: Value) {
        debug_assert_eq!(value.kind(), self.kind);
        self.values.push(value);
    }

    /// Record one occurrence of a flag.
    pub(crate) fn append_flag(&mut self) {
        self.append(Value::Flag(true));
    }

    /// Parse `token` according to this option's kind and record it.
    pub(crate) fn try_parse(&mut self, token: &str) -> Result<()> {
        let value = match self.kind {
            OptionKind::Str => Value::Str(token.to_string()),
            OptionKind::Int => Value::Int(parse_int(token)?),
            OptionKind::Float => Value::Float(parse_float(token)?),
            // Flags never reach here: callers dispatch them to `append_flag`.
            OptionKind::Flag => Value::Flag(true),
        };
        self.append(value);
        Ok(())
    }

    pub(crate) fn typed<T: FromValue>(&self, name: &str, value: &Value) -> Result<T> {
        T::from_value(value).ok_or_else(|| self.mismatch::<T>(name))
    }

    pub(crate) fn check_kind<T: FromValue>(&self, name: &str) -> Result<()> {
        if T::KIND == self.kind {
            Ok(())
        } else {
            Err(self.mismatch::<T>(name))
        }
    }

    fn mismatch<T: FromValue>(&self, name: &str) -> Error {
        Error::KindMismatch {
            name: name.to_string(),
            expected: T::KIND,
            actual: self.kind,
        }
    }

    /// Debug rendering: occurrence count for flags, `(fallback) [values]`
    /// otherwise.
    pub(crate) fn describe(&self) -> String {
        if self.kind == OptionKind::Flag {
            return self.count().to_string();
        }
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        format!("({}) [{}]", self.fallback, values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_falls_back_until_found() {
        let mut opt = Opt::int(123);
        assert!(!opt.found());
        assert_eq!(opt.current(), &Value::Int(123));

        opt.try_parse("7").unwrap();
        opt.try_parse("0x10").unwrap();
        assert_eq!(opt.count(), 2);
        assert_eq!(opt.current(), &Value::Int(16));
        assert_eq!(opt.value_at(0), Some(&Value::Int(7)));
        assert_eq!(opt.value_at(2), None);
    }

    #[test]
    fn string_values_are_verbatim() {
        let mut opt = Opt::string("default");
        opt.try_parse("  spaced -- =value ").unwrap();
        assert_eq!(opt.current(), &Value::Str("  spaced -- =value ".to_string()));
    }

    #[test]
    fn failed_parse_records_nothing() {
        let mut opt = Opt::float(1.0);
        assert!(matches!(opt.try_parse("2.2x"), Err(Error::MalformedFloat(_))));
        assert_eq!(opt.count(), 0);
    }

    #[test]
    fn greedy_is_ignored_for_flags() {
        let mut flag = Opt::flag();
        flag.greedy(true);
        assert!(!flag.is_greedy());

        let mut list = Opt::string("");
        list.greedy(true);
        assert!(list.is_greedy());
    }

    #[test]
    fn describe_matches_dump_format() {
        let mut flag = Opt::flag();
        flag.append_flag();
        flag.append_flag();
        assert_eq!(flag.describe(), "2");

        let mut opt = Opt::float(1.0);
        opt.try_parse("2.5").unwrap();
        assert_eq!(opt.describe(), "(1.000000) [2.500000]");
    }

    #[test]
    fn typed_extraction_checks_kind() {
        let opt = Opt::string("x");
        let s: String = opt.typed("s", opt.current()).unwrap();
        assert_eq!(s, "x");
        let err = opt.typed::<i32>("s", opt.current()).unwrap_err();
        assert!(matches!(err, Error::KindMismatch { .. }));
    }
}
