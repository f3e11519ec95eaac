//! # Domain Invariants

use std::collections::HashSet;

use super::entities::SignerAssignment;

/// Orders are exactly `1..=len` and match positions.
pub fn check_dense_order(entries: &[SignerAssignment]) -> bool {
    entries
        .iter()
        .enumerate()
        .all(|(i, entry)| entry.order as usize == i + 1)
}

/// No user appears twice.
pub fn check_unique_users(entries: &[SignerAssignment]) -> bool {
    let mut seen = HashSet::with_capacity(entries.len());
    entries.iter().all(|entry| seen.insert(entry.user.id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignerUser;

    fn entry(id: &str, order: u32) -> SignerAssignment {
        SignerAssignment {
            user: SignerUser::new(id, id, format!("{}@corp.com", id), "HR"),
            order,
            deadline: None,
        }
    }

    #[test]
    fn test_dense_order() {
        assert!(check_dense_order(&[]));
        assert!(check_dense_order(&[entry("a", 1), entry("b", 2)]));
        assert!(!check_dense_order(&[entry("a", 1), entry("b", 3)]));
        assert!(!check_dense_order(&[entry("a", 2), entry("b", 1)]));
    }

    #[test]
    fn test_unique_users() {
        assert!(check_unique_users(&[entry("a", 1), entry("b", 2)]));
        assert!(!check_unique_users(&[entry("a", 1), entry("a", 2)]));
    }
}
