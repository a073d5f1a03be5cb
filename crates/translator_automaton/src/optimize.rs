//! Finite automaton minimization.
//!
//! Empty transition maps become `None`, states equal by value are merged into
//! the one with the lowest id until nothing changes, unreachable states are
//! dropped, and the survivors are renumbered densely in breadth-first order
//! from the start state.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use translator_foundation::StateId;

use crate::finite::FiniteState;
use crate::synth::DraftState;

/// Publishes and minimizes draft states. Returns the states and the new start.
pub(crate) fn optimize_finite_states(
    draft: Vec<DraftState>,
    start: StateId,
) -> (Vec<FiniteState>, StateId) {
    let mut states: Vec<FiniteState> = draft
        .into_iter()
        .map(|d| FiniteState {
            links: if d.links.is_empty() { None } else { Some(d.links) },
            token: d.token,
        })
        .collect();
    let mut live = vec![true; states.len()];

    merge_equal_states(&mut states, &mut live);
    renumber_reachable(&states, start)
}

fn merge_equal_states(states: &mut [FiniteState], live: &mut [bool]) {
    loop {
        let mut canonical: HashMap<FiniteState, StateId> = HashMap::new();
        let mut redirect: Vec<StateId> = (0..states.len()).map(StateId).collect();
        let mut changed = false;

        for index in 0..states.len() {
            if !live[index] {
                continue;
            }
            match canonical.entry(states[index].clone()) {
                Entry::Occupied(kept) => {
                    redirect[index] = *kept.get();
                    live[index] = false;
                    changed = true;
                }
                Entry::Vacant(slot) => {
                    slot.insert(StateId(index));
                }
            }
        }

        if !changed {
            return;
        }

        for state in states.iter_mut() {
            if let Some(links) = &mut state.links {
                for target in links.values_mut() {
                    *target = redirect[target.index()];
                }
            }
        }
    }
}

fn renumber_reachable(states: &[FiniteState], start: StateId) -> (Vec<FiniteState>, StateId) {
    let mut order: Vec<StateId> = Vec::new();
    let mut new_id: HashMap<StateId, StateId> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    new_id.insert(start, StateId(0));

    while let Some(id) = queue.pop_front() {
        order.push(id);
        if let Some(links) = &states[id.index()].links {
            for target in links.values() {
                if !new_id.contains_key(target) {
                    new_id.insert(*target, StateId(new_id.len()));
                    queue.push_back(*target);
                }
            }
        }
    }

    let renumbered = order
        .iter()
        .map(|id| {
            let mut state = states[id.index()].clone();
            if let Some(links) = &mut state.links {
                for target in links.values_mut() {
                    *target = new_id[target];
                }
            }
            state
        })
        .collect();
    (renumbered, StateId(0))
}
