//! RFC 6962-style Merkle tree (Certificate Transparency) over SM3.
//!
//! Leaf and interior hashes are domain-separated with a `0x00`/`0x01`
//! prefix byte, so a leaf can never be reinterpreted as an interior node.
//! Levels are built by pairing left to right; an odd node at the end of a
//! level is promoted unchanged. Verifiers therefore need the tree size to
//! replay which levels contributed a sibling.
//!
//! [`ExclusionIndex`] sorts its items before building the tree, which turns
//! two adjacent-leaf inclusion proofs straddling a target into a proof that
//! the target is absent.

use alloc::vec::Vec;

use crate::{sm3_hash, DIGEST_SIZE};

/// Hash of a leaf entry: `SM3(0x00 || data)`.
pub fn leaf_hash(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut buf = Vec::with_capacity(1 + data.len());
    buf.push(0x00);
    buf.extend_from_slice(data);
    sm3_hash(&buf)
}

/// Hash of an interior node: `SM3(0x01 || left || right)`.
pub fn node_hash(left: &[u8; DIGEST_SIZE], right: &[u8; DIGEST_SIZE]) -> [u8; DIGEST_SIZE] {
    let mut buf = Vec::with_capacity(1 + 2 * DIGEST_SIZE);
    buf.push(0x01);
    buf.extend_from_slice(left);
    buf.extend_from_slice(right);
    sm3_hash(&buf)
}

// RFC 6962: the root of an empty tree is the hash of the empty string.
fn empty_root() -> [u8; DIGEST_SIZE] {
    sm3_hash(b"")
}

/// Merkle tree over SM3 with RFC 6962 domain separation.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    // levels[0] holds the leaf hashes, the last level the root.
    levels: Vec<Vec<[u8; DIGEST_SIZE]>>,
}

impl MerkleTree {
    /// Builds a tree over the given leaf entries (raw data, not hashes).
    pub fn new<I, T>(leaves: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut level: Vec<[u8; DIGEST_SIZE]> =
            leaves.into_iter().map(|d| leaf_hash(d.as_ref())).collect();
        let mut levels = Vec::new();
        while level.len() > 1 {
            let next = level
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => node_hash(left, right),
                    _ => pair[0],
                })
                .collect();
            levels.push(level);
            level = next;
        }
        levels.push(level);
        Self { levels }
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    /// Whether the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// Root digest of the tree.
    pub fn root(&self) -> [u8; DIGEST_SIZE] {
        match self.levels.last().and_then(|level| level.first()) {
            Some(root) => *root,
            None => empty_root(),
        }
    }

    /// Inclusion proof for the leaf at `index`: the sibling digest of each
    /// node on the path to the root, leaf level first. Levels where the
    /// node was promoted without a sibling contribute nothing.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn inclusion_proof(&self, index: usize) -> Option<Vec<[u8; DIGEST_SIZE]>> {
        if index >= self.len() {
            return None;
        }
        let mut proof = Vec::new();
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sib = idx ^ 1;
            if sib < level.len() {
                proof.push(level[sib]);
            }
            idx /= 2;
        }
        Some(proof)
    }

    /// Checks an inclusion proof against a trusted root.
    ///
    /// `tree_size` is the leaf count of the tree the proof was taken from;
    /// it is needed to replay which levels promoted the path node without
    /// consuming a proof element.
    pub fn verify_inclusion(
        root: &[u8; DIGEST_SIZE],
        leaf_data: &[u8],
        index: usize,
        tree_size: usize,
        proof: &[[u8; DIGEST_SIZE]],
    ) -> bool {
        if index >= tree_size {
            return false;
        }
        let mut h = leaf_hash(leaf_data);
        let mut idx = index;
        let mut width = tree_size;
        let mut siblings = proof.iter();
        while width > 1 {
            if (idx ^ 1) < width {
                let sib = match siblings.next() {
                    Some(sib) => sib,
                    None => return false,
                };
                h = if idx % 2 == 0 {
                    node_hash(&h, sib)
                } else {
                    node_hash(sib, &h)
                };
            }
            idx /= 2;
            width = (width + 1) / 2;
        }
        siblings.next().is_none() && h == *root
    }
}

/// Inclusion proof for one neighbor of an excluded target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundProof {
    /// The neighbor's leaf data.
    pub data: Vec<u8>,
    /// The neighbor's leaf index in the sorted tree.
    pub index: usize,
    /// Its inclusion proof.
    pub proof: Vec<[u8; DIGEST_SIZE]>,
}

/// Proof that a target is absent from an [`ExclusionIndex`]: inclusion
/// proofs for the sorted neighbors on either side of where the target
/// would sit. A missing side means the target sorts before the first or
/// after the last item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExclusionProof {
    /// Leaf count of the tree the proofs were taken from.
    pub tree_size: usize,
    /// Greatest item smaller than the target, if any.
    pub left: Option<BoundProof>,
    /// Smallest item greater than the target, if any.
    pub right: Option<BoundProof>,
}

impl ExclusionProof {
    /// Checks the proof against a trusted `root` for a given `target`.
    ///
    /// Both neighbors must verify against the root, sort strictly around
    /// the target, and be adjacent leaves; a one-sided proof must sit at
    /// the matching end of the tree.
    pub fn verify(&self, root: &[u8; DIGEST_SIZE], target: &[u8]) -> bool {
        let bound_ok = |bound: &BoundProof| {
            MerkleTree::verify_inclusion(
                root,
                &bound.data,
                bound.index,
                self.tree_size,
                &bound.proof,
            )
        };
        match (&self.left, &self.right) {
            (None, None) => self.tree_size == 0 && *root == empty_root(),
            (Some(left), None) => {
                left.index + 1 == self.tree_size
                    && bound_ok(left)
                    && left.data.as_slice() < target
            }
            (None, Some(right)) => {
                right.index == 0 && bound_ok(right) && target < right.data.as_slice()
            }
            (Some(left), Some(right)) => {
                right.index == left.index + 1
                    && bound_ok(left)
                    && bound_ok(right)
                    && left.data.as_slice() < target
                    && target < right.data.as_slice()
            }
        }
    }
}

/// Sorted Merkle index supporting both inclusion and exclusion proofs.
#[derive(Clone, Debug)]
pub struct ExclusionIndex {
    items: Vec<Vec<u8>>,
    tree: MerkleTree,
}

impl ExclusionIndex {
    /// Builds an index over the given items; they are sorted before the
    /// tree is built so that neighbors in the tree are neighbors in order.
    pub fn new<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut items: Vec<Vec<u8>> = items.into_iter().map(|d| d.as_ref().to_vec()).collect();
        items.sort_unstable();
        let tree = MerkleTree::new(&items);
        Self { items, tree }
    }

    /// Root digest of the underlying tree.
    pub fn root(&self) -> [u8; DIGEST_SIZE] {
        self.tree.root()
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Leaf index and inclusion proof for `data`, or `None` if absent.
    pub fn inclusion(&self, data: &[u8]) -> Option<(usize, Vec<[u8; DIGEST_SIZE]>)> {
        let idx = self
            .items
            .binary_search_by(|item| item.as_slice().cmp(data))
            .ok()?;
        let proof = self.tree.inclusion_proof(idx)?;
        Some((idx, proof))
    }

    /// Exclusion proof for `target`, or `None` if the target is present
    /// (a present item has no exclusion proof).
    pub fn exclusion(&self, target: &[u8]) -> Option<ExclusionProof> {
        let at = self.items.partition_point(|item| item.as_slice() < target);
        if self.items.get(at).map(Vec::as_slice) == Some(target) {
            return None;
        }

        let bound = |idx: usize| -> Option<BoundProof> {
            Some(BoundProof {
                data: self.items[idx].clone(),
                index: idx,
                proof: self.tree.inclusion_proof(idx)?,
            })
        };
        let left = match at.checked_sub(1) {
            Some(idx) => Some(bound(idx)?),
            None => None,
        };
        let right = if at < self.items.len() {
            Some(bound(at)?)
        } else {
            None
        };

        Some(ExclusionProof {
            tree_size: self.items.len(),
            left,
            right,
        })
    }
}
