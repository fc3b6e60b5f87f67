use std::hash::{Hash, Hasher};

/// X-coordinate of a derived public key, 32 bytes big-endian.
///
/// Two candidates match iff their X-coordinates are byte-identical, so this
/// is the membership key for the target set.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, align(8))]
pub struct XCoordinate([u8; 32]);

impl XCoordinate {
    #[inline]
    pub fn from_slice(slice: &[u8]) -> Self {
        debug_assert_eq!(slice.len(), 32);
        let mut arr = [0u8; 32];
        arr.copy_from_slice(slice);
        Self(arr)
    }

    /// Parse a 64-character hex encoding, as found in the target file.
    /// Case-insensitive.
    pub fn from_hex(s: &str) -> Option<Self> {
        if s.len() != 64 {
            return None;
        }
        let bytes = hex::decode(s).ok()?;
        Some(Self::from_slice(&bytes))
    }

    /// Lowercase hex, the encoding used in hit lines and notices.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Hash for XCoordinate {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Feed all 32 bytes; fast hashers like FxHash digest this directly.
        state.write(&self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let hex = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
        let x = XCoordinate::from_hex(hex).unwrap();
        assert_eq!(x.to_hex(), hex);
    }

    #[test]
    fn hex_parse_is_case_insensitive() {
        let lower = XCoordinate::from_hex(
            "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",
        )
        .unwrap();
        let upper = XCoordinate::from_hex(
            "C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5",
        )
        .unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn hex_parse_rejects_bad_input() {
        assert!(XCoordinate::from_hex("").is_none());
        assert!(XCoordinate::from_hex("abcd").is_none());
        // Right length, invalid characters.
        assert!(XCoordinate::from_hex(&"zz".repeat(32)).is_none());
        // Too long.
        assert!(XCoordinate::from_hex(&"ab".repeat(33)).is_none());
    }

    #[test]
    fn usable_as_set_key() {
        use fxhash::FxHashSet;

        let mut set = FxHashSet::default();
        set.insert(XCoordinate::from_slice(&[1u8; 32]));
        assert!(set.contains(&XCoordinate::from_slice(&[1u8; 32])));
        assert!(!set.contains(&XCoordinate::from_slice(&[2u8; 32])));
    }
}
