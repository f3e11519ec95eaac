//! Static document-type catalog and in-memory role directory.

use std::collections::BTreeMap;

use crate::domain::{DocumentType, SignerUser};
use crate::ports::{DocumentTypeCatalog, RoleDirectory};

/// (id, title, description, default flow)
const STANDARD_TYPES: &[(&str, &str, &str, &[&str])] = &[
    (
        "onboarding",
        "Onboarding Documents",
        "Paperwork required for an employee to start",
        &["HR", "Employee"],
    ),
    (
        "employment_contract",
        "Employment Contract",
        "Written terms of employment",
        &["HR", "Employee", "Management"],
    ),
    (
        "nda",
        "Non-Disclosure Agreement",
        "Confidentiality agreement",
        &["Employee", "Management"],
    ),
    (
        "leave_request",
        "Leave Request",
        "Annual, excused or sick leave requests",
        &["Employee", "Manager", "HR"],
    ),
    (
        "overtime_form",
        "Overtime Form",
        "Record of additional working hours",
        &["Employee", "Manager", "HR"],
    ),
    (
        "expense_claim",
        "Expense Claim",
        "Reimbursement request for expenses",
        &["Employee", "Manager", "Accounting"],
    ),
    (
        "purchase_request",
        "Purchase Request",
        "Request to buy goods or services",
        &["Unit Lead", "Purchasing", "Finance"],
    ),
    (
        "purchase_order",
        "Purchase Order",
        "Approved purchase order",
        &["Purchasing", "Finance", "Management"],
    ),
    (
        "invoice_approval",
        "Invoice Approval",
        "Approval to pay an incoming invoice",
        &["Accounting", "Related Department", "Management"],
    ),
    (
        "handover_form",
        "Equipment Handover",
        "Hand-over of equipment or materials",
        &["Deliverer", "Employee"],
    ),
];

/// Fixed catalog, preserving insertion order.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    types: Vec<DocumentType>,
}

impl StaticCatalog {
    /// Catalog from explicit entries.
    pub fn new(types: Vec<DocumentType>) -> Self {
        Self { types }
    }

    /// The ten standard corporate document types.
    pub fn standard() -> Self {
        let types = STANDARD_TYPES
            .iter()
            .map(|(id, title, description, flow)| DocumentType {
                id: (*id).to_string(),
                title: (*title).to_string(),
                description: (*description).to_string(),
                default_sign_flow: flow.iter().map(|r| (*r).to_string()).collect(),
            })
            .collect();
        Self { types }
    }
}

impl DocumentTypeCatalog for StaticCatalog {
    fn get(&self, id: &str) -> Option<DocumentType> {
        self.types.iter().find(|t| t.id == id).cloned()
    }

    fn all(&self) -> Vec<DocumentType> {
        self.types.clone()
    }
}

/// User directory matching roles case-insensitively.
///
/// Users are kept in insertion order; the first user holding a role wins.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    users: Vec<SignerUser>,
    by_id: BTreeMap<String, usize>,
}

impl InMemoryDirectory {
    /// Directory seeded with `users`. Later duplicates of an id are ignored.
    pub fn new(users: Vec<SignerUser>) -> Self {
        let mut directory = Self::default();
        for user in users {
            directory.insert(user);
        }
        directory
    }

    /// Add a user. Returns false if the id is already present.
    pub fn insert(&mut self, user: SignerUser) -> bool {
        if self.by_id.contains_key(&user.id) {
            return false;
        }
        self.by_id.insert(user.id.clone(), self.users.len());
        self.users.push(user);
        true
    }

    /// User by id.
    pub fn get(&self, id: &str) -> Option<&SignerUser> {
        self.by_id.get(id).map(|&i| &self.users[i])
    }

    /// All users in insertion order.
    pub fn users(&self) -> &[SignerUser] {
        &self.users
    }

    /// Users whose name, email, role or department contains `term`,
    /// ignoring case. An empty term matches everyone.
    pub fn search(&self, term: &str) -> Vec<&SignerUser> {
        let term = term.to_lowercase();
        self.users
            .iter()
            .filter(|u| {
                [&u.name, &u.email, &u.role, &u.department]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            })
            .collect()
    }
}

impl RoleDirectory for InMemoryDirectory {
    fn find_by_role(&self, role: &str) -> Option<SignerUser> {
        let role = role.to_lowercase();
        self.users
            .iter()
            .find(|u| u.role.to_lowercase() == role)
            .cloned()
    }
}
