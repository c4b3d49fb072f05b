use shared_types::rlp::EMPTY_STRING;
use shared_types::{keccak256, Hash, RlpStream};

use super::nibbles::Nibbles;

// =============================================================================
// NODE REFERENCE: how a parent points at a child
// =============================================================================

/// Reference from a parent node to a child node.
///
/// Children whose encoding is shorter than 32 bytes are embedded in the
/// parent; larger children are referenced by their Keccak256 hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeRef {
    Empty,
    Inline(Vec<u8>),
    Hashed(Hash),
}

impl NodeRef {
    /// Reference an RLP-encoded node.
    pub fn from_encoded(encoded: Vec<u8>) -> Self {
        if encoded.len() < 32 {
            NodeRef::Inline(encoded)
        } else {
            NodeRef::Hashed(keccak256(&encoded))
        }
    }

    fn append_to(&self, stream: &mut RlpStream) {
        match self {
            NodeRef::Empty => {
                stream.append_raw(&[EMPTY_STRING], 1);
            }
            NodeRef::Inline(encoded) => {
                stream.append_raw(encoded, 1);
            }
            NodeRef::Hashed(hash) => {
                stream.append_bytes(hash);
            }
        }
    }
}

// =============================================================================
// TRIE NODE: The node types in MPT
// =============================================================================

/// Node types in the Patricia Merkle Trie.
///
/// Per Ethereum Yellow Paper Appendix D:
/// - Leaf (remaining path + value)
/// - Extension (shared prefix + single child)
/// - Branch (16 children + optional value)
///
/// The empty trie has no node; its root is `EMPTY_TRIE_ROOT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrieNode {
    /// RLP: [hex_prefix_encode(path, true), value]
    Leaf { path: Nibbles, value: Vec<u8> },

    /// RLP: [hex_prefix_encode(path, false), child]
    Extension { path: Nibbles, child: NodeRef },

    /// RLP: \[child\[0\], ..., child\[15\], value\]
    Branch {
        children: Box<[NodeRef; 16]>,
        value: Option<Vec<u8>>,
    },
}

impl TrieNode {
    /// RLP-encode this node.
    pub fn rlp_encode(&self) -> Vec<u8> {
        let mut stream = RlpStream::new();
        match self {
            TrieNode::Leaf { path, value } => {
                stream
                    .append_bytes(&path.compact(true))
                    .append_bytes(value);
            }

            TrieNode::Extension { path, child } => {
                stream.append_bytes(&path.compact(false));
                child.append_to(&mut stream);
            }

            TrieNode::Branch { children, value } => {
                for child in children.iter() {
                    child.append_to(&mut stream);
                }
                match value {
                    Some(v) => stream.append_bytes(v),
                    None => stream.append_raw(&[EMPTY_STRING], 1),
                };
            }
        }
        stream.out_list()
    }

    /// Compute Keccak256 hash of RLP-encoded node.
    pub fn hash(&self) -> Hash {
        keccak256(&self.rlp_encode())
    }
}
