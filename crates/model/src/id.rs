use crate::LocationId;
use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 7;

/// Generate a short base-36 identifier.
///
/// Drawn from a non-cryptographic RNG. Collisions are unlikely but possible; callers that need
/// uniqueness against a live list must check for it.
pub fn generate_id() -> LocationId {
    let mut rng = rand::thread_rng();
    let id: String = (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    LocationId(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.as_str().len(), ID_LEN);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_generate_id_varies() {
        let ids: HashSet<LocationId> = (0..100).map(|_| generate_id()).collect();
        // 36^7 possibilities; 100 draws colliding down to a handful would mean a broken RNG.
        assert!(ids.len() > 95);
    }
}
