// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use super::TerminationCondition;

/// A [`TerminationCondition`] which never triggers; the search runs until the tree is exhausted.
#[derive(Clone, Copy, Debug, Default)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
