/// Trie key path as a sequence of 4-bit digits.
///
/// Hashed keys are 32 bytes, so every leaf path in a secure trie is 64
/// nibbles long. Paths order lexicographically, which is the order branch
/// children are laid out in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Nibbles(pub Vec<u8>);

impl Nibbles {
    /// Split every byte of `key` into its high and low nibble.
    pub fn unpack(key: &[u8]) -> Self {
        Nibbles(key.iter().flat_map(|b| [b >> 4, b & 0x0f]).collect())
    }

    /// Path from `start` to the end.
    pub fn suffix(&self, start: usize) -> Self {
        Nibbles(self.0[start..].to_vec())
    }

    pub fn range(&self, start: usize, end: usize) -> Self {
        Nibbles(self.0[start..end].to_vec())
    }

    /// How many nibbles `self` and `other` share, counting from `start`.
    pub fn shared_from(&self, other: &Nibbles, start: usize) -> usize {
        self.0[start..]
            .iter()
            .zip(&other.0[start..])
            .take_while(|(a, b)| a == b)
            .count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn at(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Compact (hex-prefix) encoding of the path.
    ///
    /// The flag nibble is `2` for leaves plus `1` for odd lengths. An odd
    /// path packs its first nibble next to the flag; an even one pads with 0.
    pub fn compact(&self, is_leaf: bool) -> Vec<u8> {
        let odd = self.len() % 2;
        let flag = (u8::from(is_leaf) << 1) | odd as u8;

        let (head, tail) = self.0.split_at(odd);
        let first = (flag << 4) | head.first().copied().unwrap_or(0);

        std::iter::once(first)
            .chain(tail.chunks(2).map(|pair| (pair[0] << 4) | pair[1]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack() {
        let nibbles = Nibbles::unpack(&[0xab, 0x0f]);
        assert_eq!(nibbles.0, vec![0x0a, 0x0b, 0x00, 0x0f]);
        assert!(Nibbles::unpack(&[]).is_empty());
    }

    #[test]
    fn test_compact_encoding() {
        // Yellow Paper appendix C vectors.
        let cases: [(&[u8], bool, &[u8]); 4] = [
            (&[1, 2, 3, 4, 5], false, &[0x11, 0x23, 0x45]),
            (&[0, 1, 2, 3, 4, 5], false, &[0x00, 0x01, 0x23, 0x45]),
            (&[0x0f, 1, 0x0c, 0x0b, 8], true, &[0x3f, 0x1c, 0xb8]),
            (&[], true, &[0x20]),
        ];
        for (path, is_leaf, expected) in cases {
            assert_eq!(Nibbles(path.to_vec()).compact(is_leaf), expected);
        }
    }

    #[test]
    fn test_shared_from_offset() {
        let a = Nibbles(vec![1, 2, 3, 4]);
        let b = Nibbles(vec![9, 2, 3, 5]);
        assert_eq!(a.shared_from(&b, 0), 0);
        assert_eq!(a.shared_from(&b, 1), 2);
        assert_eq!(a.range(1, 3), Nibbles(vec![2, 3]));
        assert_eq!(a.suffix(3), Nibbles(vec![4]));
    }
}
