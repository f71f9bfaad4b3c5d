//! ID generation utilities.

use uuid::Uuid;

/// Generates a new time-ordered UUID v7 as a string.
///
/// Used for run identifiers, which sort by creation time.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Generates a random UUID v4 for addressing a resource that almost
/// certainly does not exist on the server.
#[must_use]
pub fn random_resource_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        // 8-4-4-4-12 = 36 chars
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_random_resource_id_is_v4() {
        let id = random_resource_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_random_resource_id_uniqueness() {
        assert_ne!(random_resource_id(), random_resource_id());
    }
}
