//! Policy documents for signed-POST uploads to the object store.
//!
//! Only the data model and its stream formatting live here. Building the
//! signed URL (canonicalization, key handling, signature) is done by the
//! storage client.

use std::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// One condition of a policy document, kept as its raw string elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocumentCondition {
    elements: Vec<String>,
}

impl PolicyDocumentCondition {
    pub fn new(elements: Vec<String>) -> Self {
        Self { elements }
    }

    /// `["eq", "$<field>", "<value>"]`
    pub fn exact_match(field: &str, value: &str) -> Self {
        Self::new(vec![
            "eq".to_string(),
            format!("${field}"),
            value.to_string(),
        ])
    }

    /// `["starts-with", "$<field>", "<value>"]`
    pub fn starts_with(field: &str, value: &str) -> Self {
        Self::new(vec![
            "starts-with".to_string(),
            format!("${field}"),
            value.to_string(),
        ])
    }

    /// `["content-length-range", <min>, <max>]`
    pub fn content_length_range(min_range: u64, max_range: u64) -> Self {
        Self::new(vec![
            "content-length-range".to_string(),
            min_range.to_string(),
            max_range.to_string(),
        ])
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }
}

impl fmt::Display for PolicyDocumentCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolicyDocumentCondition=[{}]", self.elements.join(", "))
    }
}

/// A V2 policy document: an absolute expiration and a list of conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocument {
    pub expiration: DateTime<Utc>,
    pub conditions: Vec<PolicyDocumentCondition>,
}

impl fmt::Display for PolicyDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolicyDocument={{expiration={}, conditions=[", rfc3339(self.expiration))?;
        let mut sep = "";
        for condition in &self.conditions {
            write!(f, "{sep}{condition}")?;
            sep = ", ";
        }
        write!(f, "]}}")
    }
}

/// A V4 policy document: bucket/object scoped, with a validity duration
/// anchored at `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocumentV4 {
    pub bucket: String,
    pub object: String,
    pub expiration: Duration,
    pub timestamp: DateTime<Utc>,
    pub conditions: Vec<PolicyDocumentCondition>,
}

impl fmt::Display for PolicyDocumentV4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PolicyDocumentV4={{bucket={}, object={}, expiration={}, timestamp={}, conditions=[",
            self.bucket,
            self.object,
            self.expiration.num_seconds(),
            rfc3339(self.timestamp)
        )?;
        let mut sep = "";
        for condition in &self.conditions {
            write!(f, "{sep}{condition}")?;
            sep = ", ";
        }
        write!(f, "]}}")
    }
}

/// The signed form of a V2 policy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocumentResult {
    pub access_id: String,
    pub expiration: DateTime<Utc>,
    pub policy: String,
    pub signature: String,
}

impl fmt::Display for PolicyDocumentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PolicyDocumentResult={{access_id={}, expiration={}, policy={}, signature={}}}",
            self.access_id,
            rfc3339(self.expiration),
            self.policy,
            self.signature
        )
    }
}

/// The signed form of a V4 policy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocumentV4Result {
    pub url: String,
    pub access_id: String,
    pub expiration: DateTime<Utc>,
    pub policy: String,
    pub signature: String,
    pub signing_algorithm: String,
}

impl fmt::Display for PolicyDocumentV4Result {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PolicyDocumentV4Result={{url={}, access_id={}, expiration={}, policy={}, \
             signature={}, signing_algorithm={}}}",
            self.url,
            self.access_id,
            rfc3339(self.expiration),
            self.policy,
            self.signature,
            self.signing_algorithm
        )
    }
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
