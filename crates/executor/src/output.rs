use alloy_primitives::B256;
use sha3::{Digest, Sha3_256};

use crate::merkle::sha3;

/// Block range and index of the next output to finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputWindow {
    pub output_index: u64,
    pub start_block_number: u64,
    pub end_block_number: u64,
}

/// Next window after `last` (index, end block of the previous output), up to
/// and including `current_height`. `None` when there is no new block to
/// cover, which makes finalization a no-op rather than a duplicate output.
pub fn plan_output(last: Option<(u64, u64)>, current_height: u64) -> Option<OutputWindow> {
    let (last_index, last_end) = last.unwrap_or((0, 0));
    let start = last_end + 1;
    if start > current_height {
        return None;
    }
    Some(OutputWindow {
        output_index: last_index + 1,
        start_block_number: start,
        end_block_number: current_height,
    })
}

/// `H( H(index) || state_root || withdrawal_root || last_block_hash )` with
/// SHA3-256 and the index as 8 big-endian bytes. This layout is what an
/// L1-side verifier recomputes from a claimed withdrawal + proof, so it must
/// never drift.
pub fn compute_output_root(
    output_index: u64,
    state_root: B256,
    withdrawal_root: B256,
    last_block_hash: B256,
) -> B256 {
    let version = sha3(&output_index.to_be_bytes());
    let mut hasher = Sha3_256::new();
    hasher.update(version);
    hasher.update(state_root);
    hasher.update(withdrawal_root);
    hasher.update(last_block_hash);
    B256::from_slice(&hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_window_starts_at_block_one() {
        assert_eq!(
            plan_output(None, 100),
            Some(OutputWindow {
                output_index: 1,
                start_block_number: 1,
                end_block_number: 100,
            })
        );
    }

    #[test]
    fn windows_are_contiguous() {
        let first = plan_output(None, 100).unwrap();
        let second = plan_output(
            Some((first.output_index, first.end_block_number)),
            250,
        )
        .unwrap();
        assert_eq!(second.output_index, 2);
        assert_eq!(second.start_block_number, first.end_block_number + 1);
        assert_eq!(second.end_block_number, 250);
    }

    #[test]
    fn no_new_blocks_means_no_window() {
        assert_eq!(plan_output(Some((3, 100)), 100), None);
        assert_eq!(plan_output(Some((3, 100)), 99), None);
        assert!(plan_output(Some((3, 100)), 101).is_some());
    }

    #[test]
    fn output_root_matches_manual_recomputation() {
        let state_root = B256::repeat_byte(0x11);
        let withdrawal_root = B256::repeat_byte(0x22);
        let block_hash = B256::repeat_byte(0x33);
        let root = compute_output_root(7, state_root, withdrawal_root, block_hash);

        let mut preimage = Vec::new();
        preimage.extend_from_slice(sha3(&7u64.to_be_bytes()).as_slice());
        preimage.extend_from_slice(state_root.as_slice());
        preimage.extend_from_slice(withdrawal_root.as_slice());
        preimage.extend_from_slice(block_hash.as_slice());
        assert_eq!(root, sha3(&preimage));
    }

    #[test]
    fn output_root_depends_on_every_input() {
        let base = compute_output_root(
            1,
            B256::repeat_byte(1),
            B256::repeat_byte(2),
            B256::repeat_byte(3),
        );
        assert_ne!(
            base,
            compute_output_root(
                2,
                B256::repeat_byte(1),
                B256::repeat_byte(2),
                B256::repeat_byte(3),
            )
        );
        assert_ne!(
            base,
            compute_output_root(
                1,
                B256::repeat_byte(9),
                B256::repeat_byte(2),
                B256::repeat_byte(3),
            )
        );
        assert_ne!(
            base,
            compute_output_root(
                1,
                B256::repeat_byte(1),
                B256::repeat_byte(2),
                B256::repeat_byte(9),
            )
        );
    }
}
