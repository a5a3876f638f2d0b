//! Deterministic conversation id for first-contact messages
//!
//! When a message is sent without an existing conversation id, the id is
//! derived from the unordered participant pair so that whichever side
//! writes first, both land in the same conversation.

/// Canonical key for the unordered pair `(a, b)`.
pub fn conversation_key(a: &str, b: &str) -> String {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    format!("{low}:{high}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_symmetric() {
        assert_eq!(conversation_key("u1", "u2"), conversation_key("u2", "u1"));
    }

    #[test]
    fn key_is_stable_for_uuid_like_ids() {
        let a = "b7a9c9a0-0000-4000-8000-000000000001";
        let b = "0f3d2e10-0000-4000-8000-000000000002";
        let key = conversation_key(a, b);
        assert_eq!(key, format!("{b}:{a}"));
        assert_eq!(key, conversation_key(b, a));
    }
}
