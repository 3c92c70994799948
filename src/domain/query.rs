//! Profile queries and labelled report queries

use super::predicate::Predicate;
use std::fmt;

/// Attribute holding the CRM identifier sampled into each report line
pub const CRM_ID_FIELD: &str = "attributes.crmId";

/// A complete `SELECT attributes.crmId FROM profiles WHERE ...` statement
///
/// Report lines only ever sample CRM ids, so that is the one field selected.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileQuery {
    predicate: Predicate,
}

impl ProfileQuery {
    /// Selects the CRM identifier of profiles matching `predicate`
    pub fn crm_ids(predicate: Predicate) -> Self {
        Self { predicate }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl fmt::Display for ProfileQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {CRM_ID_FIELD} FROM profiles")?;
        if !self.predicate.is_empty() {
            write!(f, " WHERE {}", self.predicate)?;
        }
        Ok(())
    }
}

/// A human-readable label paired with the query whose count it reports
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    label: String,
    query: ProfileQuery,
}

impl ReportQuery {
    pub fn new(label: impl Into<String>, query: ProfileQuery) -> Self {
        Self {
            label: label.into(),
            query,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn query(&self) -> &ProfileQuery {
        &self.query
    }
}
