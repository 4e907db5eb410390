// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Array two-pointer techniques.
//!
//! These are not backtracking searches, but they are traced the same way: the
//! sorted Two Sum records every pointer move so a host can replay it.
//!
//! Sums are taken in `i128`, so no `i64` input can overflow them.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use strum_macros::Display;

/// Indices of two numbers adding up to `target`, using a map of values seen so
/// far. Returns the pair completed first while scanning left to right.
///
/// A number whose complement lies outside `i64` has no partner.
///
/// ```
/// use backtrack_trace::two_pointer::two_sum;
///
/// assert_eq!(two_sum(&[2, 7, 11, 15], 9), Some((0, 1)));
/// assert_eq!(two_sum(&[1, 2, 3], 7), None);
/// ```
pub fn two_sum(nums: &[i64], target: i64) -> Option<(usize, usize)> {
    let mut seen: HashMap<i64, usize> = HashMap::with_capacity(nums.len());
    for (i, &num) in nums.iter().enumerate() {
        if let Some(&j) = target.checked_sub(num).and_then(|complement| seen.get(&complement)) {
            return Some((j, i));
        }
        seen.insert(num, i);
    }
    None
}

/// What the pointers did after comparing a sum with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PointerAction {
    Found,
    /// Sum too small.
    AdvanceLeft,
    /// Sum too large.
    RetreatRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointerMove {
    pub left: usize,
    pub right: usize,
    pub sum: i128,
    pub action: PointerAction,
}

/// Outcome and full pointer history of [`two_sum_sorted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PointerTrace {
    pub pair: Option<(usize, usize)>,
    pub moves: Vec<PointerMove>,
}

/// Two Sum on an ascending slice with converging pointers.
pub fn two_sum_sorted(nums: &[i64], target: i64) -> PointerTrace {
    let mut trace = PointerTrace::default();
    if nums.len() < 2 {
        return trace;
    }
    let (mut left, mut right) = (0, nums.len() - 1);
    while left < right {
        let sum = i128::from(nums[left]) + i128::from(nums[right]);
        let action = match sum.cmp(&i128::from(target)) {
            Ordering::Equal => PointerAction::Found,
            Ordering::Less => PointerAction::AdvanceLeft,
            Ordering::Greater => PointerAction::RetreatRight,
        };
        trace.moves.push(PointerMove {
            left,
            right,
            sum,
            action,
        });
        match action {
            PointerAction::Found => {
                trace.pair = Some((left, right));
                break;
            }
            PointerAction::AdvanceLeft => left += 1,
            PointerAction::RetreatRight => right -= 1,
        }
    }
    trace
}

/// All distinct triplets summing to zero, each ascending, in ascending order.
pub fn three_sum(nums: &[i64]) -> Vec<[i64; 3]> {
    let mut sorted = nums.to_vec();
    sorted.sort_unstable();
    let mut triplets = Vec::new();

    for i in 0..sorted.len().saturating_sub(2) {
        if i > 0 && sorted[i] == sorted[i - 1] {
            continue;
        }
        let (mut left, mut right) = (i + 1, sorted.len() - 1);
        while left < right {
            let total = i128::from(sorted[i]) + i128::from(sorted[left]) + i128::from(sorted[right]);
            match total.cmp(&0) {
                Ordering::Less => left += 1,
                Ordering::Greater => right -= 1,
                Ordering::Equal => {
                    triplets.push([sorted[i], sorted[left], sorted[right]]);
                    while left < right && sorted[left] == sorted[left + 1] {
                        left += 1;
                    }
                    while left < right && sorted[right] == sorted[right - 1] {
                        right -= 1;
                    }
                    left += 1;
                    right -= 1;
                }
            }
        }
    }
    triplets
}

/// Largest water area between two lines (container with most water).
/// Areas beyond `u64::MAX` saturate.
pub fn max_area(heights: &[u64]) -> u64 {
    if heights.len() < 2 {
        return 0;
    }
    let (mut left, mut right) = (0, heights.len() - 1);
    let mut best = 0;
    while left < right {
        let width = (right - left) as u64;
        best = best.max(width.saturating_mul(heights[left].min(heights[right])));
        if heights[left] < heights[right] {
            left += 1;
        } else {
            right -= 1;
        }
    }
    best
}

/// Index of `target` in an ascending slice, halving the window each step.
///
/// ```
/// use backtrack_trace::two_pointer::binary_search;
///
/// assert_eq!(binary_search(&[1, 2, 3, 4, 5], 3), Some(2));
/// assert_eq!(binary_search(&[], 1), None);
/// ```
pub fn binary_search(nums: &[i64], target: i64) -> Option<usize> {
    // Half-open window [low, high).
    let (mut low, mut high) = (0, nums.len());
    while low < high {
        let mid = low + (high - low) / 2;
        match nums[mid].cmp(&target) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sum_cases() {
        assert_eq!(two_sum(&[3, 3], 6), Some((0, 1)));
        assert_eq!(two_sum(&[-1, -2, -3, -4, -5], -8), Some((2, 4)));
        assert_eq!(two_sum(&[-1, 0, 1], 0), Some((0, 2)));
        assert_eq!(two_sum(&[1], 1), None);
        assert_eq!(two_sum(&[], 0), None);
    }

    #[test]
    fn test_two_sum_sorted_trace() {
        let trace = two_sum_sorted(&[1, 2, 4, 7, 11], 9);
        assert_eq!(trace.pair, Some((1, 3)));
        let actions: Vec<PointerAction> = trace.moves.iter().map(|m| m.action).collect();
        assert_eq!(
            actions,
            vec![
                PointerAction::RetreatRight,
                PointerAction::AdvanceLeft,
                PointerAction::Found
            ]
        );
        assert_eq!(trace.moves[0].sum, 12);
    }

    #[test]
    fn test_two_sum_sorted_no_pair() {
        let trace = two_sum_sorted(&[1, 2, 3], 100);
        assert_eq!(trace.pair, None);
        assert_eq!(trace.moves.len(), 2);
        assert!(two_sum_sorted(&[5], 5).moves.is_empty());
    }

    #[test]
    fn test_three_sum() {
        assert_eq!(
            three_sum(&[-1, 0, 1, 2, -1, -4]),
            vec![[-1, -1, 2], [-1, 0, 1]]
        );
        assert_eq!(three_sum(&[0, 0, 0, 0]), vec![[0, 0, 0]]);
        assert!(three_sum(&[1, 2]).is_empty());
    }

    #[test]
    fn test_max_area() {
        assert_eq!(max_area(&[1, 8, 6, 2, 5, 4, 8, 3, 7]), 49);
        assert_eq!(max_area(&[1, 1]), 1);
        assert_eq!(max_area(&[1, 2, 3, 4, 5]), 6);
        assert_eq!(max_area(&[5, 5, 5, 5, 5]), 20);
        assert_eq!(max_area(&[3]), 0);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        assert_eq!(two_sum(&[i64::MAX, 1], i64::MIN), None);
        assert_eq!(two_sum(&[i64::MIN, 5, i64::MAX], -1), Some((0, 2)));

        let trace = two_sum_sorted(&[i64::MAX - 1, i64::MAX], 0);
        assert_eq!(trace.pair, None);
        assert_eq!(trace.moves[0].sum, 2 * i128::from(i64::MAX) - 1);
        assert_eq!(trace.moves[0].action, PointerAction::RetreatRight);

        let trace = two_sum_sorted(&[i64::MIN, i64::MAX], -1);
        assert_eq!(trace.pair, Some((0, 1)));

        assert!(three_sum(&[i64::MAX, i64::MAX, i64::MIN, i64::MIN]).is_empty());
        assert_eq!(max_area(&[u64::MAX; 3]), u64::MAX);
    }

    #[test]
    fn test_binary_search() {
        let nums = [1, 2, 3, 4, 5];
        assert_eq!(binary_search(&nums, 1), Some(0));
        assert_eq!(binary_search(&nums, 5), Some(4));
        assert_eq!(binary_search(&nums, 6), None);
        assert_eq!(binary_search(&nums, 0), None);
        assert_eq!(binary_search(&[1], 2), None);
        assert_eq!(binary_search(&[i64::MIN, 0, i64::MAX], i64::MAX), Some(2));
    }
}
