//! Content fingerprint for duplicate-upload detection
//!
//! A weak rolling hash, deliberately not cryptographic: it only gates a soft
//! duplicate check, so an accidental collision costs one false "duplicate"
//! rejection and can never corrupt data. Do not swap in a longer digest
//! without widening the stored fingerprint column first.

/// Fingerprint the raw file content for exact-duplicate detection
///
/// Rolls `hash = hash * 31 + unit` over the UTF-16 code units of the content
/// in wrapping 32-bit signed arithmetic and renders the absolute value as
/// lowercase hex. Identical content always produces the identical
/// fingerprint; distinct content is merely expected, not guaranteed, to
/// differ.
///
/// # Examples
/// ```
/// use tokenboard_core::fingerprint::content_fingerprint;
///
/// let a = content_fingerprint("Date,Kind,Model\n");
/// let b = content_fingerprint("Date,Kind,Model\n");
/// assert_eq!(a, b);
/// ```
pub fn content_fingerprint(content: &str) -> String {
    let mut hash: i32 = 0;
    for unit in content.encode_utf16() {
        // (hash << 5) - hash == hash * 31, with wraparound
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    format!("{:x}", hash.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_content_hashes_to_zero() {
        assert_eq!(content_fingerprint(""), "0");
    }

    #[test]
    fn known_values() {
        // hash("a") = 97
        assert_eq!(content_fingerprint("a"), "61");
        // hash("ab") = 97 * 31 + 98 = 3105
        assert_eq!(content_fingerprint("ab"), "c21");
    }

    #[test]
    fn distinct_content_usually_differs() {
        assert_ne!(content_fingerprint("model,tokens"), content_fingerprint("model,cost"));
    }

    #[test]
    fn non_ascii_content_is_stable() {
        let content = "Modèle,Jetons\nGPT-4,12 — ok\n";
        assert_eq!(content_fingerprint(content), content_fingerprint(content));
    }

    proptest! {
        #[test]
        fn fingerprint_is_deterministic(content in ".{0,256}") {
            prop_assert_eq!(content_fingerprint(&content), content_fingerprint(&content));
        }

        #[test]
        fn fingerprint_is_valid_hex(content in ".{0,256}") {
            let fp = content_fingerprint(&content);
            prop_assert!(!fp.is_empty());
            prop_assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
            prop_assert!(u32::from_str_radix(&fp, 16).is_ok());
        }
    }
}
