//! Authorization gate and anti-forgery tokens.
//!
//! Every mutating operation passes through a single policy decision, and
//! form submissions carry a per-action-scope token that must verify before
//! any state is touched.

use crate::types::StyleId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Token scope for single-record saves.
pub const SAVE_SCOPE: &str = "save-style";

/// Token scope for bulk block assignment.
pub const BULK_SCOPE: &str = "bulk-assign";

/// A mutating operation, evaluated once per request by the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Create,
    Update(StyleId),
    Delete(StyleId),
    BulkUpdate,
}

/// The consolidated authorization gate.
///
/// Returns a plain allow/deny decision consumed uniformly by every entry
/// point; no entry point carries its own capability logic.
pub trait AccessPolicy: Send + Sync {
    fn allows(&self, actor: &str, action: &Action) -> bool;
}

/// Capability-based policy: actors granted the manage capability may do
/// everything, with optional per-record edit denial.
///
/// Per-record denial models the host's finer-grained edit permission; bulk
/// updates use it to skip individual records while the batch proceeds.
#[derive(Debug, Default)]
pub struct CapabilityPolicy {
    managers: HashSet<String>,
    denied_records: HashSet<(String, StyleId)>,
}

impl CapabilityPolicy {
    /// Create a policy with no grants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant the manage capability to an actor.
    pub fn grant(&mut self, actor: impl Into<String>) -> &mut Self {
        self.managers.insert(actor.into());
        self
    }

    /// Deny an actor edit access to one record.
    pub fn deny_record(&mut self, actor: impl Into<String>, id: StyleId) -> &mut Self {
        self.denied_records.insert((actor.into(), id));
        self
    }
}

impl AccessPolicy for CapabilityPolicy {
    fn allows(&self, actor: &str, action: &Action) -> bool {
        if !self.managers.contains(actor) {
            return false;
        }

        match action {
            Action::Update(id) | Action::Delete(id) => {
                !self.denied_records.contains(&(actor.to_string(), *id))
            }
            Action::Create | Action::BulkUpdate => true,
        }
    }
}

/// An anti-forgery token, as carried in a form field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub String);

/// Issues and verifies per-action anti-forgery tokens.
///
/// A token binds a secret, an action scope, and an actor; a token issued
/// for one scope never verifies for another.
#[derive(Debug)]
pub struct TokenIssuer {
    secret: Vec<u8>,
}

impl TokenIssuer {
    /// Create an issuer with the given secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issue a token for an action scope and actor.
    pub fn issue(&self, scope: &str, actor: &str) -> Token {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update([0]);
        hasher.update(scope.as_bytes());
        hasher.update([0]);
        hasher.update(actor.as_bytes());
        Token(hex::encode(hasher.finalize()))
    }

    /// Verify a token against an action scope and actor.
    pub fn verify(&self, token: &Token, scope: &str, actor: &str) -> bool {
        self.issue(scope, actor) == *token
    }
}
