use dsg_types::ContentRoot;

const LEAF_DOMAIN: &[u8] = b"dsg-chunk-v1:";
const NODE_DOMAIN: &[u8] = b"dsg-node-v1:";

/// Hash a chunk of file bytes into a Merkle leaf.
///
/// Domain-separated from internal nodes so a crafted chunk can never collide
/// with a computed node hash.
pub fn hash_leaf(chunk: &[u8]) -> ContentRoot {
    let mut hasher = blake3::Hasher::new();
    hasher.update(LEAF_DOMAIN);
    hasher.update(chunk);
    ContentRoot::from_hash(*hasher.finalize().as_bytes())
}

/// Hash two child digests into their parent node.
pub fn hash_node(left: &ContentRoot, right: &ContentRoot) -> ContentRoot {
    let mut hasher = blake3::Hasher::new();
    hasher.update(NODE_DOMAIN);
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    ContentRoot::from_hash(*hasher.finalize().as_bytes())
}

/// Binary Merkle tree over chunk leaf hashes.
///
/// Built bottom-up: at each level adjacent hashes are paired and hashed
/// upward; an odd node at a level is paired with itself (duplicate-last
/// policy). Only the root is part of the public data model — internal nodes
/// are discarded during the fold.
///
/// A single leaf is its own root (no tree construction). An empty leaf set
/// produces the leaf hash of the zero-length chunk, matching the defined
/// root for empty input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    root: ContentRoot,
    leaf_count: usize,
}

impl MerkleTree {
    /// Fold a Merkle tree over leaf hashes.
    pub fn from_leaves(leaves: Vec<ContentRoot>) -> Self {
        let leaf_count = leaves.len();
        if leaves.is_empty() {
            return Self {
                root: hash_leaf(&[]),
                leaf_count: 0,
            };
        }

        let mut current = leaves;
        while current.len() > 1 {
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            for pair in current.chunks(2) {
                let hash = if pair.len() == 2 {
                    hash_node(&pair[0], &pair[1])
                } else {
                    // Odd node: pair with itself.
                    hash_node(&pair[0], &pair[0])
                };
                next.push(hash);
            }
            current = next;
        }

        Self {
            root: current[0],
            leaf_count,
        }
    }

    /// The root hash of the tree.
    pub fn root(&self) -> ContentRoot {
        self.root
    }

    /// Number of leaves the tree was built from.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }
}
