use digest::Digest;

use crate::prelude::{Error, Leaf, MerkleTree, Result};

/// Smallest power of two greater than or equal to `n`, with `n = 0`
/// mapping to 1.
///
/// The 2-leaf floor for empty and single-row inputs lives in
/// [`pad_to_power_of_two`], not here.
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Pads a sequence of row leaves out to a power-of-two count by appending
/// leaves holding a single empty block.
///
/// Zero or one rows still yield a valid 2-leaf tree. The result always
/// satisfies the even-length precondition of every level built by
/// [`build_tree`].
pub fn pad_to_power_of_two(mut rows: Vec<Leaf>) -> Vec<Leaf> {
    let target = if rows.len() <= 1 {
        2
    } else {
        next_power_of_two(rows.len())
    };

    let missing = target - rows.len();
    rows.extend(std::iter::repeat_with(Leaf::padding).take(missing));

    rows
}

fn check_pairable(len: usize) -> Result<()> {
    if len < 2 || len % 2 != 0 {
        return Err(Error::UnpairedLevel(len));
    }

    Ok(())
}

/// Builds the first tree level by pairing leaves by position:
/// `(0,1), (2,3), ...`, preserving order.
///
/// The leaf count must be even and at least 2.
pub fn build_first_level<D: Digest>(leaves: Vec<Leaf>) -> Result<Vec<MerkleTree>> {
    check_pairable(leaves.len())?;

    let mut nodes = Vec::with_capacity(leaves.len() / 2);
    let mut leaves = leaves.into_iter();

    while let (Some(left), Some(right)) = (leaves.next(), leaves.next()) {
        nodes.push(MerkleTree::combine_leaves::<D>(left, right)?);
    }

    Ok(nodes)
}

/// Builds the next tree level by pairing existing nodes by position, with
/// the same even-length requirement as [`build_first_level`].
pub fn build_next_level<D: Digest>(nodes: Vec<MerkleTree>) -> Result<Vec<MerkleTree>> {
    check_pairable(nodes.len())?;

    let mut parents = Vec::with_capacity(nodes.len() / 2);
    let mut nodes = nodes.into_iter();

    while let (Some(left), Some(right)) = (nodes.next(), nodes.next()) {
        parents.push(MerkleTree::combine_trees::<D>(left, right));
    }

    Ok(parents)
}

/// Builds a full tree bottom-up and returns its root.
///
/// Every level must pair up cleanly, which holds exactly when the leaf
/// count is a power of two; callers feeding real row data should pad with
/// [`pad_to_power_of_two`] first. Any other count surfaces as
/// [`Error::UnpairedLevel`] at the level where pairing breaks down, rather
/// than silently dropping the trailing node.
pub fn build_tree<D: Digest>(leaves: Vec<Leaf>) -> Result<MerkleTree> {
    let mut level = build_first_level::<D>(leaves)?;

    while level.len() > 1 {
        level = build_next_level::<D>(level)?;
    }

    Ok(level.swap_remove(0))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sha1::Sha1;
    use test_strategy::proptest;

    use crate::prelude::*;
    use crate::testing::{leaves, power_of_two_leaves};

    #[test]
    fn test_next_power_of_two_conventions() {
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(2), 2);
        assert_eq!(next_power_of_two(5), 8);
        assert_eq!(next_power_of_two(8), 8);
        assert_eq!(next_power_of_two(9), 16);
    }

    #[test]
    fn test_padding_counts() {
        assert_eq!(pad_to_power_of_two(vec![]).len(), 2);

        let one = vec![Leaf::new(vec![b"row".to_vec()])];
        assert_eq!(pad_to_power_of_two(one).len(), 2);

        let five = vec![Leaf::new(vec![b"row".to_vec()]); 5];
        let padded = pad_to_power_of_two(five);
        assert_eq!(padded.len(), 8);
        assert_eq!(&padded[5..], &[Leaf::padding(), Leaf::padding(), Leaf::padding()]);
    }

    #[proptest(fork = false)]
    fn test_padding_preserves_rows_and_reaches_a_power_of_two(
        #[strategy(leaves(0..20usize))] rows: Vec<Leaf>,
    ) {
        let padded = pad_to_power_of_two(rows.clone());

        prop_assert!(padded.len().is_power_of_two() && padded.len() >= 2);
        prop_assert_eq!(&padded[..rows.len()], &rows[..]);
        prop_assert!(padded[rows.len()..].iter().all(|leaf| leaf == &Leaf::padding()));
    }

    #[proptest(fork = false)]
    fn test_first_level_pairs_in_order(#[strategy(power_of_two_leaves(1..=4u32))] leaves: Vec<Leaf>) {
        let level = build_first_level::<Sha1>(leaves.clone())?;

        prop_assert_eq!(level.len(), leaves.len() / 2);

        for (node, pair) in level.iter().zip(leaves.chunks(2)) {
            prop_assert_eq!(node.left_leaf(), Some(&pair[0]));
            prop_assert_eq!(node.right_leaf(), Some(&pair[1]));
        }
    }

    #[proptest(fork = false)]
    fn test_unpairable_levels_are_rejected(#[strategy(0..16usize)] len: usize) {
        prop_assume!(len < 2 || len % 2 != 0);

        let row_leaves = vec![Leaf::padding(); len];
        prop_assert_eq!(
            build_first_level::<Sha1>(row_leaves).unwrap_err(),
            Error::UnpairedLevel(len)
        );

        let nodes = vec![MerkleTree::from_digest(Hash::from_slice(&[0; 20])); len];
        prop_assert_eq!(
            build_next_level::<Sha1>(nodes).unwrap_err(),
            Error::UnpairedLevel(len)
        );
    }

    #[test]
    fn test_build_tree_rejects_non_power_of_two_counts() {
        // Six leaves pair into three nodes, which cannot pair further.
        let six = vec![Leaf::new(vec![b"row".to_vec()]); 6];

        assert_eq!(build_tree::<Sha1>(six).unwrap_err(), Error::UnpairedLevel(3));
    }

    #[proptest(fork = false)]
    fn test_build_tree_reduces_power_of_two_input_to_one_root(
        #[strategy(power_of_two_leaves(1..=5u32))] leaves: Vec<Leaf>,
    ) {
        let levels = leaves.len().ilog2();
        let root = build_tree::<Sha1>(leaves)?;

        // Walking the leftmost spine crosses exactly log2(n) combined levels.
        let mut depth = 1;
        let mut node = &root;
        while let Some(left) = node.left_tree() {
            depth += 1;
            node = left;
        }

        prop_assert_eq!(depth, levels);
        prop_assert!(node.left_leaf().is_some());
    }

    #[test]
    fn test_root_digest_matches_manual_combination() {
        let rows: Vec<Leaf> = (0u8..4)
            .map(|n| Leaf::new(vec![vec![n], b"field".to_vec()]))
            .collect();

        let ab = Hash::combine::<Sha1>(
            &rows[0].digest::<Sha1>().unwrap(),
            &rows[1].digest::<Sha1>().unwrap(),
        );
        let cd = Hash::combine::<Sha1>(
            &rows[2].digest::<Sha1>().unwrap(),
            &rows[3].digest::<Sha1>().unwrap(),
        );
        let expected = Hash::combine::<Sha1>(&ab, &cd);

        let root = build_tree::<Sha1>(rows).unwrap();

        assert_eq!(root.digest(), &expected);
    }

    #[proptest(fork = false)]
    fn test_single_byte_mutation_changes_the_root(
        #[strategy(leaves(1..12usize))] rows: Vec<Leaf>,
        row_pick: proptest::sample::Index,
        byte_pick: proptest::sample::Index,
    ) {
        prop_assume!(rows.iter().any(|row| !row.blocks().concat().is_empty()));

        // Flip one byte in one row and rebuild; the roots must differ.
        let mut mutated = rows.clone();
        let candidates: Vec<usize> = (0..rows.len())
            .filter(|idx| !rows[*idx].blocks().concat().is_empty())
            .collect();
        let row_idx = candidates[row_pick.index(candidates.len())];

        let mut blocks: Vec<Vec<u8>> = rows[row_idx].blocks().to_vec();
        let flat_len: usize = blocks.iter().map(Vec::len).sum();
        let mut offset = byte_pick.index(flat_len);
        for block in &mut blocks {
            if offset < block.len() {
                block[offset] ^= 0x01;
                break;
            }
            offset -= block.len();
        }
        mutated[row_idx] = Leaf::new(blocks);

        let original = build_tree::<Sha1>(pad_to_power_of_two(rows))?;
        let changed = build_tree::<Sha1>(pad_to_power_of_two(mutated))?;

        prop_assert_ne!(original.digest(), changed.digest());
    }
}
