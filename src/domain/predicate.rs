//! Typed predicates for the CDP query language
//!
//! Filters are built as an expression tree and rendered to query text only
//! when a request is issued. Literal values are quoted and escaped on render,
//! so a value can never terminate its string early or inject an operator.
//!
//! # Example
//!
//! ```
//! use cdp_report::domain::Predicate;
//!
//! let country = Predicate::any([
//!     Predicate::eq("attributes.country", "GB"),
//!     Predicate::eq("attributes.country", "IE"),
//! ]);
//! let exposed = Predicate::eq("attributes.data.internal.cdpABExposed", true);
//!
//! let filter = exposed.and(country);
//! assert_eq!(
//!     filter.to_string(),
//!     r#"attributes.data.internal.cdpABExposed = true AND (attributes.country = "GB" OR attributes.country = "IE")"#
//! );
//! ```

use std::fmt;

/// Literal value on the right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String literal, rendered double-quoted
    Str(String),
    /// Boolean literal
    Bool(bool),
    /// Numeric literal
    Number(f64),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        other => write!(f, "{other}")?,
                    }
                }
                f.write_str("\"")
            }
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Ge,
}

impl Comparison {
    /// Operator as written in the query language
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Lt => "<",
            Comparison::Ge => ">=",
        }
    }
}

/// Boolean filter over profile attributes
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field <op> value`
    Compare {
        field: String,
        op: Comparison,
        value: Value,
    },
    /// `field IS NULL`
    IsNull(String),
    /// `field IS NOT NULL`
    IsNotNull(String),
    /// `HAVING(collection, (condition))`: at least one element of a nested
    /// collection (segments, activity indicators) matches
    Having {
        collection: String,
        condition: Box<Predicate>,
    },
    /// Conjunction
    All(Vec<Predicate>),
    /// Disjunction
    Any(Vec<Predicate>),
}

impl Predicate {
    fn compare(field: impl Into<String>, op: Comparison, value: impl Into<Value>) -> Self {
        Predicate::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Comparison::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Comparison::Ne, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Comparison::Lt, value)
    }

    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, Comparison::Ge, value)
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Predicate::IsNull(field.into())
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Predicate::IsNotNull(field.into())
    }

    pub fn having(collection: impl Into<String>, condition: Predicate) -> Self {
        Predicate::Having {
            collection: collection.into(),
            condition: Box::new(condition),
        }
    }

    /// Conjunction of `terms`
    ///
    /// Empty groups are dropped and a single remaining term is returned as
    /// is, so callers can pass optional fragments without special-casing.
    pub fn all(terms: impl IntoIterator<Item = Predicate>) -> Self {
        Self::group(terms, Predicate::All)
    }

    /// Disjunction of `terms`, with the same collapsing rules as [`Predicate::all`]
    pub fn any(terms: impl IntoIterator<Item = Predicate>) -> Self {
        Self::group(terms, Predicate::Any)
    }

    fn group(
        terms: impl IntoIterator<Item = Predicate>,
        make: fn(Vec<Predicate>) -> Predicate,
    ) -> Self {
        let mut terms: Vec<Predicate> = terms.into_iter().filter(|t| !t.is_empty()).collect();
        if terms.len() == 1 {
            terms.remove(0)
        } else {
            make(terms)
        }
    }

    /// Appends `other` as a further conjunct
    ///
    /// A top-level conjunction is extended in place so chained calls render
    /// without extra parentheses.
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Predicate::All(mut terms) => {
                if !other.is_empty() {
                    terms.push(other);
                }
                Predicate::all(terms)
            }
            first => Predicate::all([first, other]),
        }
    }

    /// True for a group with no terms
    pub fn is_empty(&self) -> bool {
        matches!(self, Predicate::All(t) | Predicate::Any(t) if t.is_empty())
    }

    fn is_compound(&self) -> bool {
        matches!(self, Predicate::All(t) | Predicate::Any(t) if t.len() > 1)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Predicate::Compare { field, op, value } => {
                write!(f, "{field} {} {value}", op.as_str())
            }
            Predicate::IsNull(field) => write!(f, "{field} IS NULL"),
            Predicate::IsNotNull(field) => write!(f, "{field} IS NOT NULL"),
            Predicate::Having {
                collection,
                condition,
            } => {
                write!(f, "HAVING({collection}, (")?;
                condition.render(f, false)?;
                f.write_str("))")
            }
            Predicate::All(terms) | Predicate::Any(terms) => {
                let joiner = if matches!(self, Predicate::All(_)) {
                    " AND "
                } else {
                    " OR "
                };
                let wrap = nested && self.is_compound();
                if wrap {
                    f.write_str("(")?;
                }
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(joiner)?;
                    }
                    term.render(f, true)?;
                }
                if wrap {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}
