//! Gem version requirement parsing and matching
//!
//! Handles:
//! - Fixed versions: `= 1.2.3`, `1.2.3`
//! - Pessimistic constraints: `~> 1.2`, `~> 1.2.3`
//! - Comparison operators: `>=`, `<`, `>`, `<=`, `!=`
//! - Compound constraints: `>= 1.0, < 2.0`
//!
//! The comparator here follows Gem segment rules (numeric where numeric,
//! alphabetic segments sort before numeric as prereleases, short versions pad
//! with zeros). It is used only for requirement satisfaction; classification
//! and suggestion elsewhere compare version strings directly.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

// A single constraint: optional operator, then a version token
static CONSTRAINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(~>|!=|>=|<=|=|>|<)?\s*([0-9A-Za-z][0-9A-Za-z.\-]*)$").unwrap());

/// Comparison operator of a single constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintOp {
    /// Exact match (`= 1.2.3` or a bare version)
    Exact,
    /// Exclusion (`!= 1.2.3`)
    NotEqual,
    /// Greater than (`> 1.2.3`)
    Greater,
    /// Greater than or equal (`>= 1.2.3`)
    GreaterOrEqual,
    /// Less than (`< 1.2.3`)
    Less,
    /// Less than or equal (`<= 1.2.3`)
    LessOrEqual,
    /// Pessimistic constraint (`~> 1.2.3`)
    Pessimistic,
}

/// One operator/version pair inside a requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub op: ConstraintOp,
    pub version: String,
}

impl Constraint {
    fn satisfied_by(&self, candidate: &str) -> bool {
        let ord = compare_versions(candidate, &self.version);
        match self.op {
            ConstraintOp::Exact => ord == Ordering::Equal,
            ConstraintOp::NotEqual => ord != Ordering::Equal,
            ConstraintOp::Greater => ord == Ordering::Greater,
            ConstraintOp::GreaterOrEqual => ord != Ordering::Less,
            ConstraintOp::Less => ord == Ordering::Less,
            ConstraintOp::LessOrEqual => ord != Ordering::Greater,
            ConstraintOp::Pessimistic => {
                ord != Ordering::Less
                    && compare_versions(candidate, &pessimistic_upper(&self.version))
                        == Ordering::Less
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            ConstraintOp::Exact => "=",
            ConstraintOp::NotEqual => "!=",
            ConstraintOp::Greater => ">",
            ConstraintOp::GreaterOrEqual => ">=",
            ConstraintOp::Less => "<",
            ConstraintOp::LessOrEqual => "<=",
            ConstraintOp::Pessimistic => "~>",
        };
        write!(f, "{} {}", op, self.version)
    }
}

/// A declared version requirement for a gem
///
/// A candidate version matches when every constraint is satisfied. An empty
/// declaration (`gem 'rake'` with no version) is the catch-all `>= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    constraints: Vec<Constraint>,
}

impl Requirement {
    /// The catch-all requirement (`>= 0`)
    pub fn any() -> Self {
        Self {
            constraints: vec![Constraint {
                op: ConstraintOp::GreaterOrEqual,
                version: "0".to_string(),
            }],
        }
    }

    /// Parse a requirement string, possibly compound (`>= 1.0, < 2.0`)
    ///
    /// Returns None when any part of the string does not fit the constraint
    /// grammar.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Some(Self::any());
        }

        let mut constraints = Vec::new();
        for part in trimmed.split(',') {
            let caps = CONSTRAINT_RE.captures(part.trim())?;
            let op = match caps.get(1).map(|m| m.as_str()) {
                None | Some("=") => ConstraintOp::Exact,
                Some("!=") => ConstraintOp::NotEqual,
                Some(">") => ConstraintOp::Greater,
                Some(">=") => ConstraintOp::GreaterOrEqual,
                Some("<") => ConstraintOp::Less,
                Some("<=") => ConstraintOp::LessOrEqual,
                Some("~>") => ConstraintOp::Pessimistic,
                Some(_) => return None,
            };
            constraints.push(Constraint {
                op,
                version: caps.get(2)?.as_str().to_string(),
            });
        }
        Some(Self { constraints })
    }

    /// Returns true if the candidate version satisfies every constraint
    pub fn matches(&self, candidate: &str) -> bool {
        self.constraints.iter().all(|c| c.satisfied_by(candidate))
    }

    /// Returns true if this is the catch-all requirement
    pub fn is_any(&self) -> bool {
        *self == Self::any()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.constraints.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// One dot/dash separated piece of a version string
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Number(u64),
    Text(String),
}

fn segments(version: &str) -> Vec<Segment> {
    version
        .split(['.', '-'])
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<u64>()
                .map(Segment::Number)
                .unwrap_or_else(|_| Segment::Text(p.to_string()))
        })
        .collect()
}

/// Compare two version strings using Gem segment rules
///
/// Shorter versions pad with zeros ("1.0" == "1.0.0"); a textual segment
/// marks a prerelease and sorts below a numeric one ("1.0.rc1" < "1.0.0").
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);
    let len = left.len().max(right.len());
    left.resize(len, Segment::Number(0));
    right.resize(len, Segment::Number(0));

    for (sa, sb) in left.iter().zip(right.iter()) {
        let ord = match (sa, sb) {
            (Segment::Number(m), Segment::Number(n)) => m.cmp(n),
            (Segment::Text(s), Segment::Text(t)) => s.cmp(t),
            (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
            (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Exclusive upper bound implied by a pessimistic constraint
///
/// `~> 1.2.3` allows up to (excluding) 1.3; `~> 2` allows up to 3.
fn pessimistic_upper(base: &str) -> String {
    let parts: Vec<u64> = base
        .split('.')
        .map(|p| p.parse().unwrap_or(0))
        .collect();
    let mut bumped: Vec<u64> = if parts.len() <= 1 {
        parts
    } else {
        parts[..parts.len() - 1].to_vec()
    };
    if let Some(last) = bumped.last_mut() {
        *last += 1;
    }
    bumped
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
