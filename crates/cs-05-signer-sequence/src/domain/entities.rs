//! # Domain Entities

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A person who can be asked to sign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerUser {
    /// Directory id
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Organizational role, e.g. `HR`
    pub role: String,
    /// Department
    #[serde(default)]
    pub department: String,
    /// Wallet address used on the ledger
    #[serde(default)]
    pub address: Option<String>,
}

impl SignerUser {
    /// Create a user without a wallet address.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
            department: String::new(),
            address: None,
        }
    }

    /// Set the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Set the wallet address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// One position in a signer sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerAssignment {
    /// Assigned user
    pub user: SignerUser,
    /// 1-based rank, equal to position + 1
    pub order: u32,
    /// Optional signing deadline
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// Catalog entry: a document type and its default signing flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    /// Slug, e.g. `onboarding`
    pub id: String,
    /// Display title
    pub title: String,
    /// Short description
    pub description: String,
    /// Roles in suggested signing order
    pub default_sign_flow: Vec<String>,
}
