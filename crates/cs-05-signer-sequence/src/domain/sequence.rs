//! # Signer Sequence
//!
//! Ordered signer assignments with a dense `1..=len` rank.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::DocumentSubmission;
use tracing::debug;

use super::entities::{SignerAssignment, SignerUser};
use super::errors::SequenceError;
use super::invariants::{check_dense_order, check_unique_users};
use crate::ports::{DocumentTypeCatalog, RoleDirectory};

/// Signer list for one document being composed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSequence {
    entries: Vec<SignerAssignment>,
}

impl SignerSequence {
    /// Empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in signing order.
    pub fn entries(&self) -> &[SignerAssignment] {
        &self.entries
    }

    /// Number of signers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no signer is assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `user_id` has a position.
    pub fn contains(&self, user_id: &str) -> bool {
        self.position(user_id).is_some()
    }

    fn position(&self, user_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.user.id == user_id)
    }

    fn renumber(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.order = i as u32 + 1;
        }
        debug_assert!(check_dense_order(&self.entries));
        debug_assert!(check_unique_users(&self.entries));
    }

    /// Append `user` as the last signer.
    pub fn add(&mut self, user: SignerUser) -> Result<(), SequenceError> {
        if self.contains(&user.id) {
            return Err(SequenceError::AlreadyAssigned(user.id));
        }
        self.entries.push(SignerAssignment {
            user,
            order: 0,
            deadline: None,
        });
        self.renumber();
        Ok(())
    }

    /// Remove `user_id`. Returns false if it was not present.
    pub fn remove(&mut self, user_id: &str) -> bool {
        match self.position(user_id) {
            Some(index) => {
                self.entries.remove(index);
                self.renumber();
                true
            }
            None => false,
        }
    }

    /// Move the entry at `from` to `to` (splice semantics), then renumber.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), SequenceError> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(SequenceError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        let moved = self.entries.remove(from);
        self.entries.insert(to, moved);
        self.renumber();
        Ok(())
    }

    /// Prefill from a role list when empty. Unresolved roles are skipped and
    /// a user resolved twice keeps its first position.
    ///
    /// Returns the number of signers added; a non-empty sequence is left
    /// untouched and yields zero.
    pub fn apply_default_flow<D>(&mut self, roles: &[String], directory: &D) -> usize
    where
        D: RoleDirectory + ?Sized,
    {
        if !self.entries.is_empty() {
            return 0;
        }
        for role in roles {
            match directory.find_by_role(role) {
                Some(user) if !self.contains(&user.id) => self.entries.push(SignerAssignment {
                    user,
                    order: 0,
                    deadline: None,
                }),
                Some(_) => {}
                None => debug!(role = %role, "[cs-05] No user for role, skipping"),
            }
        }
        self.renumber();
        self.entries.len()
    }

    /// Look up `doc_type_id` and apply its default flow.
    pub fn prefill_from_catalog<C, D>(
        &mut self,
        doc_type_id: &str,
        catalog: &C,
        directory: &D,
    ) -> Result<usize, SequenceError>
    where
        C: DocumentTypeCatalog + ?Sized,
        D: RoleDirectory + ?Sized,
    {
        let doc_type = catalog
            .get(doc_type_id)
            .ok_or_else(|| SequenceError::UnknownDocumentType(doc_type_id.to_string()))?;
        Ok(self.apply_default_flow(&doc_type.default_sign_flow, directory))
    }

    /// Set or clear a signer's deadline.
    pub fn set_deadline(
        &mut self,
        user_id: &str,
        deadline: Option<NaiveDate>,
    ) -> Result<(), SequenceError> {
        let index = self
            .position(user_id)
            .ok_or_else(|| SequenceError::UnknownUser(user_id.to_string()))?;
        self.entries[index].deadline = deadline;
        Ok(())
    }

    /// Wallet addresses in signing order.
    pub fn signer_addresses(&self) -> Result<Vec<String>, SequenceError> {
        self.entries
            .iter()
            .map(|entry| {
                entry
                    .user
                    .address
                    .clone()
                    .ok_or_else(|| SequenceError::MissingAddress {
                        user_id: entry.user.id.clone(),
                    })
            })
            .collect()
    }

    /// Build the submission handed to the encoder.
    pub fn to_submission(
        &self,
        title: impl Into<String>,
        doc_type_id: impl Into<String>,
        content_hash: impl Into<String>,
    ) -> Result<DocumentSubmission, SequenceError> {
        Ok(DocumentSubmission::new(
            title,
            doc_type_id,
            self.signer_addresses()?,
            content_hash,
        ))
    }
}
