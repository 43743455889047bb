//! Permutation signs.

/// Sign of the permutation that sorts `items`: `1` for even, `-1` for odd and `0` when two
/// items compare equal. The slice is left sorted.
pub fn permutation_sign<T: Ord>(items: &mut [T]) -> i32 {
    let mut sign = 1;
    let n = items.len();
    for pass in 0..n {
        let mut swapped = false;
        for i in 0..n.saturating_sub(pass + 1) {
            match items[i].cmp(&items[i + 1]) {
                std::cmp::Ordering::Greater => {
                    items.swap(i, i + 1);
                    sign = -sign;
                    swapped = true;
                }
                std::cmp::Ordering::Equal => return 0,
                std::cmp::Ordering::Less => {}
            }
        }
        if !swapped {
            break;
        }
    }
    sign
}

/// All permutations of `0..n` paired with their signs.
pub(crate) fn signed_permutations(n: usize) -> Vec<(Vec<usize>, i32)> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(n);
    let mut used = vec![false; n];
    collect_permutations(n, &mut current, &mut used, &mut out);
    out
}

fn collect_permutations(
    n: usize,
    current: &mut Vec<usize>,
    used: &mut [bool],
    out: &mut Vec<(Vec<usize>, i32)>,
) {
    if current.len() == n {
        let mut scratch = current.clone();
        let sign = permutation_sign(&mut scratch);
        out.push((current.clone(), sign));
        return;
    }
    for k in 0..n {
        if used[k] {
            continue;
        }
        used[k] = true;
        current.push(k);
        collect_permutations(n, current, used, out);
        current.pop();
        used[k] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_of_small_permutations() {
        assert_eq!(permutation_sign(&mut [0, 1, 2]), 1);
        assert_eq!(permutation_sign(&mut [1, 0, 2]), -1);
        assert_eq!(permutation_sign(&mut [2, 0, 1]), 1);
        assert_eq!(permutation_sign(&mut [0, 0, 1]), 0);
        assert_eq!(permutation_sign::<i32>(&mut []), 1);
    }

    #[test]
    fn equal_items_detected_after_swaps() {
        assert_eq!(permutation_sign(&mut [3, 1, 2, 1]), 0);
    }

    #[test]
    fn permutations_balance_signs() {
        let perms = signed_permutations(4);
        assert_eq!(perms.len(), 24);
        assert_eq!(perms.iter().map(|(_, s)| s).sum::<i32>(), 0);
    }
}
