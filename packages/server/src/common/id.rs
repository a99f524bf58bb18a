//! Post identity generation.
//!
//! Post ids are the first 24 hex characters of a random v4 UUID with the
//! hyphens stripped. Collisions are not checked.

use uuid::Uuid;

/// Length of every generated post id.
pub const POST_ID_LEN: usize = 24;

/// Generate a fresh post id.
pub fn generate_post_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(POST_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_shape() {
        let id = generate_post_id();
        assert_eq!(id.len(), POST_ID_LEN);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_no_collisions_over_ten_thousand_ids() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_post_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
