use onceler_core::digest;
use onceler_core::digest::DIGEST_HEX_LEN;
use proptest::prelude::*;

proptest! {
    #[test]
    fn digest_is_fixed_length_lowercase_hex(text in ".*") {
        let d = digest(&text);
        prop_assert_eq!(d.len(), DIGEST_HEX_LEN);
        prop_assert!(d.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn digest_is_deterministic(text in ".*") {
        prop_assert_eq!(digest(&text), digest(&text));
    }

    #[test]
    fn appending_anything_changes_digest(text in ".*", suffix in ".+") {
        let extended = format!("{text}{suffix}");
        prop_assert_ne!(digest(&text), digest(&extended));
    }
}
