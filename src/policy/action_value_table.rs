use fxhash::FxBuildHasher;
use indexmap::map::Entry;
use indexmap::IndexMap;
use ndarray::Array1;
use std::hash::Hash;

use crate::algorithms::action_selection::EpsilonGreedy;
use crate::utils::max;

/// Action-value estimates indexed by state.
///
/// Every state maps to a vector of exactly `n_actions` values. Looking up a
/// state that was never seen stores a zero vector for it first, so `get` and
/// `get_mut` take `&mut self`. Use [`ActionValueTable::get_if_has`] for a
/// read-only lookup. Entries are never removed and iterate in the order the
/// states were first seen.
#[derive(Debug, Clone)]
pub struct ActionValueTable<T: Hash + Eq> {
    n_actions: usize,
    values: IndexMap<T, Array1<f64>, FxBuildHasher>,
}

impl<T: Hash + Eq + Clone> ActionValueTable<T> {
    pub fn new(n_actions: usize) -> Self {
        Self {
            n_actions,
            values: IndexMap::with_hasher(FxBuildHasher::default()),
        }
    }

    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    pub fn get_or_insert(&mut self, state: &T) -> (&mut Array1<f64>, bool) {
        let n_actions = self.n_actions;
        match self.values.entry(state.clone()) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => (entry.insert(Array1::zeros(n_actions)), true),
        }
    }

    pub fn get(&mut self, state: &T) -> &Array1<f64> {
        self.get_or_insert(state).0
    }

    pub fn get_mut(&mut self, state: &T) -> &mut Array1<f64> {
        self.get_or_insert(state).0
    }

    pub fn get_if_has(&self, state: &T) -> Option<&Array1<f64>> {
        self.values.get(state)
    }

    /// Overwrites the single estimate for `(state, action)`.
    ///
    /// Panics if `action` is outside of `0..n_actions`.
    pub fn update(&mut self, state: &T, action: usize, value: f64) {
        self.get_mut(state)[action] = value;
    }

    pub fn contains(&self, state: &T) -> bool {
        self.values.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &Array1<f64>)> {
        self.values.iter()
    }

    /// Greedy action for each state, `None` for states never visited.
    pub fn greedy_policy<'a, I>(&self, states: I) -> Vec<Option<usize>>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        states
            .into_iter()
            .map(|s| self.get_if_has(s).map(EpsilonGreedy::greedy_action))
            .collect()
    }

    /// Greedy state value for each state, `0.0` for states never visited.
    pub fn state_values<'a, I>(&self, states: I) -> Vec<f64>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        states
            .into_iter()
            .map(|s| self.get_if_has(s).map_or(0.0, |v| max(v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_materializes_zero_vector() {
        let mut table: ActionValueTable<usize> = ActionValueTable::new(4);
        assert!(table.is_empty());
        assert_eq!(table.get(&3).to_vec(), vec![0.0; 4]);
        assert!(table.contains(&3));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn get_if_has_does_not_insert() {
        let table: ActionValueTable<usize> = ActionValueTable::new(2);
        assert!(table.get_if_has(&7).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn get_or_insert_reports_insertion() {
        let mut table: ActionValueTable<&str> = ActionValueTable::new(2);
        assert!(table.get_or_insert(&"a").1);
        assert!(!table.get_or_insert(&"a").1);
    }

    #[test]
    fn update_touches_one_entry() {
        let mut table: ActionValueTable<usize> = ActionValueTable::new(3);
        table.update(&0, 1, -0.5);
        table.update(&1, 2, 2.0);
        assert_eq!(table.get(&0).to_vec(), vec![0.0, -0.5, 0.0]);
        assert_eq!(table.get(&1).to_vec(), vec![0.0, 0.0, 2.0]);
    }

    #[test]
    #[should_panic]
    fn update_out_of_range_panics() {
        let mut table: ActionValueTable<usize> = ActionValueTable::new(2);
        table.update(&0, 2, 1.0);
    }

    #[test]
    fn every_vector_has_n_actions_entries() {
        let mut table: ActionValueTable<usize> = ActionValueTable::new(5);
        for s in 0..20 {
            table.update(&s, s % 5, s as f64);
        }
        assert!(table.iter().all(|(_, v)| v.len() == 5));
    }

    #[test]
    fn iteration_follows_first_visit_order() {
        let mut table: ActionValueTable<usize> = ActionValueTable::new(1);
        for s in [9, 2, 5, 2, 9] {
            table.get(&s);
        }
        let order: Vec<usize> = table.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, vec![9, 2, 5]);
    }

    #[test]
    fn policy_and_values_skip_unvisited_states() {
        let mut table: ActionValueTable<usize> = ActionValueTable::new(3);
        table.update(&0, 2, 1.5);
        table.update(&1, 0, -1.0);
        let states = [0, 1, 2];
        assert_eq!(table.greedy_policy(&states), vec![Some(2), Some(1), None]);
        assert_eq!(table.state_values(&states), vec![1.5, 0.0, 0.0]);
        assert_eq!(table.len(), 2);
    }
}
