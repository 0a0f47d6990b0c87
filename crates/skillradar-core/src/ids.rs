//! Short prefixed identifiers for locally created records.
//!
//! Ids look like `cand_k3v9x0qa`: a caller-chosen prefix and eight random
//! base-36 characters. Uniqueness is not checked against existing records.

use uuid::Uuid;

const SUFFIX_LEN: usize = 8;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a new id with the given prefix.
pub fn generate_id(prefix: &str) -> String {
    // The low 48 bits of a v4 uuid are all random; 8 base-36 digits use ~41.
    let mut entropy = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(ALPHABET[(entropy % 36) as usize] as char);
        entropy /= 36;
    }
    format!("{prefix}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_shape() {
        let id = generate_id("test");
        let suffix = id.strip_prefix("test_").unwrap();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn ids_differ() {
        let a = generate_id("cand");
        let b = generate_id("cand");
        assert_ne!(a, b);
    }
}
