//! Room code generation.

use dotgrid_protocol::RoomCode;
use rand::Rng;

/// 32 symbols: digits and upper-case letters without `0 O 1 I`, which are
/// easy to misread when a code is read aloud or typed.
pub const CODE_ALPHABET: &[u8; 32] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Symbols per code (6 × 5 bits = 30 bits).
pub const CODE_LEN: usize = 6;

/// Draws a random code. Uniqueness among open rooms is the registry's job.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> RoomCode {
    let code: String = (0..CODE_LEN)
        .map(|_| char::from(CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())]))
        .collect();
    RoomCode::new(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_code_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let code = generate_code(&mut rng);
            assert_eq!(code.as_str().len(), CODE_LEN);
            assert!(code.as_str().bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_alphabet_has_no_ambiguous_symbols() {
        for ambiguous in [b'0', b'O', b'1', b'I'] {
            assert!(!CODE_ALPHABET.contains(&ambiguous));
        }
        let mut sorted = CODE_ALPHABET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 32, "alphabet symbols must be distinct");
    }

    #[test]
    fn test_codes_are_already_normalized() {
        let mut rng = StdRng::seed_from_u64(1);
        let code = generate_code(&mut rng);
        assert_eq!(RoomCode::new(code.as_str().to_lowercase()), code);
    }
}
