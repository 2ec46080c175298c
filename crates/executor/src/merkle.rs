use alloy_primitives::{B256, U256};
use sha3::{Digest, Sha3_256};

/// Root a batch with no withdrawals commits to.
pub const EMPTY_ROOT: B256 = B256::ZERO;

pub fn sha3(data: &[u8]) -> B256 {
    B256::from_slice(&Sha3_256::digest(data))
}

/// One withdrawal in canonical form, ready for hashing.
///
/// The byte image fixes the field order and gives every field an unambiguous
/// encoding: `bridge_id` and `sequence` as 8-byte big-endian integers, the
/// three string fields length-prefixed (u32 big-endian) UTF-8, and `amount`
/// as 32-byte big-endian. Two semantically equal records therefore always
/// hash to the same leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalLeaf {
    pub bridge_id: u64,
    pub sequence: u64,
    pub sender: String,
    pub receiver: String,
    pub l1_denom: String,
    pub amount: U256,
}

impl WithdrawalLeaf {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            8 + 8 + 32 + 12 + self.sender.len() + self.receiver.len() + self.l1_denom.len(),
        );
        buf.extend_from_slice(&self.bridge_id.to_be_bytes());
        buf.extend_from_slice(&self.sequence.to_be_bytes());
        append_prefixed(&mut buf, &self.sender);
        append_prefixed(&mut buf, &self.receiver);
        append_prefixed(&mut buf, &self.l1_denom);
        buf.extend_from_slice(&self.amount.to_be_bytes::<32>());
        buf
    }

    pub fn hash(&self) -> B256 {
        sha3(&self.to_bytes())
    }
}

fn append_prefixed(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Interior nodes hash the sorted pair, so a verifier folding a proof never
/// needs position bits.
fn hash_pair(a: &B256, b: &B256) -> B256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Sha3_256::new();
    hasher.update(lo);
    hasher.update(hi);
    B256::from_slice(&hasher.finalize())
}

/// Binary merkle tree over one ordered withdrawal batch.
///
/// Levels are built bottom-up, pairing digests left to right; a lone digest
/// at the end of an odd level is promoted to the next level unchanged. The
/// promotion rule and the sorted-pair interior hash must match
/// [`verify_proof`] exactly, or committed roots stop being reproducible.
pub struct WithdrawalStorage {
    levels: Vec<Vec<B256>>,
}

impl WithdrawalStorage {
    pub fn new(txs: &[WithdrawalLeaf]) -> Self {
        let mut level: Vec<B256> = txs.iter().map(WithdrawalLeaf::hash).collect();
        let mut levels = Vec::new();
        while level.len() > 1 {
            let next = level
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [lone] => *lone,
                    _ => unreachable!("chunks(2) yields 1 or 2 digests"),
                })
                .collect();
            levels.push(std::mem::replace(&mut level, next));
        }
        levels.push(level);
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Root over all records currently held; [`EMPTY_ROOT`] for an empty
    /// batch.
    pub fn merkle_root(&self) -> B256 {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(EMPTY_ROOT)
    }

    /// Sibling digests from leaf `index` to the root. Promotion steps
    /// contribute no sibling. `None` when the index is out of range.
    pub fn merkle_proof(&self, mut index: usize) -> Option<Vec<B256>> {
        if index >= self.len() {
            return None;
        }
        let mut proof = Vec::new();
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = index ^ 1;
            if let Some(digest) = level.get(sibling) {
                proof.push(*digest);
            }
            index /= 2;
        }
        Some(proof)
    }
}

/// Recomputes the root from a claimed leaf and proof; the exact check an
/// L1-side verifier runs.
pub fn verify_proof(leaf: &WithdrawalLeaf, proof: &[B256], root: B256) -> bool {
    let mut digest = leaf.hash();
    for sibling in proof {
        digest = hash_pair(&digest, sibling);
    }
    digest == root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(sequence: u64, amount: u64) -> WithdrawalLeaf {
        WithdrawalLeaf {
            bridge_id: 1,
            sequence,
            sender: "a".to_owned(),
            receiver: "b".to_owned(),
            l1_denom: "uusdc".to_owned(),
            amount: U256::from(amount),
        }
    }

    fn batch(n: u64) -> Vec<WithdrawalLeaf> {
        (1..=n).map(|i| leaf(i, 1000 * i)).collect()
    }

    #[test]
    fn empty_batch_commits_to_zero_root() {
        let storage = WithdrawalStorage::new(&[]);
        assert!(storage.is_empty());
        assert_eq!(storage.merkle_root(), EMPTY_ROOT);
        assert!(storage.merkle_proof(0).is_none());
    }

    #[test]
    fn single_leaf_root_is_the_leaf_digest() {
        let txs = batch(1);
        let storage = WithdrawalStorage::new(&txs);
        assert_eq!(storage.merkle_root(), txs[0].hash());
        assert_eq!(storage.merkle_proof(0).unwrap(), Vec::<B256>::new());
        assert!(verify_proof(&txs[0], &[], storage.merkle_root()));
    }

    #[test]
    fn two_leaf_proofs_are_the_sibling_digest() {
        let txs = batch(2);
        let storage = WithdrawalStorage::new(&txs);
        let root = storage.merkle_root();

        let proof_0 = storage.merkle_proof(0).unwrap();
        let proof_1 = storage.merkle_proof(1).unwrap();
        assert_eq!(proof_0, vec![txs[1].hash()]);
        assert_eq!(proof_1, vec![txs[0].hash()]);
        assert!(verify_proof(&txs[0], &proof_0, root));
        assert!(verify_proof(&txs[1], &proof_1, root));
    }

    #[test]
    fn root_is_deterministic() {
        let txs = batch(5);
        assert_eq!(
            WithdrawalStorage::new(&txs).merkle_root(),
            WithdrawalStorage::new(&txs).merkle_root()
        );
    }

    #[test]
    fn any_field_change_changes_the_root() {
        let txs = batch(4);
        let root = WithdrawalStorage::new(&txs).merkle_root();

        let mut changed = txs.clone();
        changed[2].amount = U256::from(7u64);
        assert_ne!(WithdrawalStorage::new(&changed).merkle_root(), root);

        let mut changed = txs.clone();
        changed[0].receiver = "c".to_owned();
        assert_ne!(WithdrawalStorage::new(&changed).merkle_root(), root);
    }

    #[test]
    fn length_prefix_keeps_adjacent_strings_apart() {
        let mut a = leaf(1, 1);
        a.sender = "ab".to_owned();
        a.receiver = "c".to_owned();
        let mut b = leaf(1, 1);
        b.sender = "a".to_owned();
        b.receiver = "bc".to_owned();
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn odd_batches_verify_at_every_position() {
        for n in [3u64, 5, 7, 9] {
            let txs = batch(n);
            let storage = WithdrawalStorage::new(&txs);
            let root = storage.merkle_root();
            for (i, tx) in txs.iter().enumerate() {
                let proof = storage.merkle_proof(i).unwrap();
                assert!(verify_proof(tx, &proof, root), "leaf {i} of {n}");
            }
        }
    }

    #[test]
    fn proof_fails_against_a_different_batch_root() {
        let txs = batch(4);
        let storage = WithdrawalStorage::new(&txs);
        let proof = storage.merkle_proof(1).unwrap();

        let mut other = txs.clone();
        other[3].amount = U256::from(1u64);
        let other_root = WithdrawalStorage::new(&other).merkle_root();

        assert!(verify_proof(&txs[1], &proof, storage.merkle_root()));
        assert!(!verify_proof(&txs[1], &proof, other_root));
    }

    #[test]
    fn tampered_leaf_fails_verification() {
        let txs = batch(4);
        let storage = WithdrawalStorage::new(&txs);
        let proof = storage.merkle_proof(2).unwrap();

        let mut tampered = txs[2].clone();
        tampered.amount = U256::from(u64::MAX);
        assert!(!verify_proof(&tampered, &proof, storage.merkle_root()));
    }
}
