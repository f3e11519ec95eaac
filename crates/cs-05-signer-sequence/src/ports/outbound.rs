//! # Outbound Ports (Driven Ports)

use crate::domain::{DocumentType, SignerUser};

/// Document-type catalog: `id -> { title, default_sign_flow }`.
pub trait DocumentTypeCatalog: Send + Sync {
    /// Entry for `id`.
    fn get(&self, id: &str) -> Option<DocumentType>;

    /// All entries in display order.
    fn all(&self) -> Vec<DocumentType>;
}

/// Role directory: `role -> user | absent`.
pub trait RoleDirectory: Send + Sync {
    /// First user holding `role`.
    fn find_by_role(&self, role: &str) -> Option<SignerUser>;
}
