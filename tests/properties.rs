//! Property tests for unlock resolution, effects and the save codec

use std::collections::BTreeSet;

use proptest::prelude::*;

use alter_life::content::Node;
use alter_life::effects::{self, Effect};
use alter_life::persistence::{Save, deserialize, serialize};
use alter_life::unlock::resolve;
use alter_life::{GameState, Stat};

const IDS: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

fn node_id() -> impl Strategy<Value = String> {
    // Includes an id that never appears in a catalog
    let mut ids = IDS.to_vec();
    ids.push("ghost");
    prop::sample::select(ids).prop_map(str::to_string)
}

fn catalog() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec((node_id(), prop::collection::vec(node_id(), 0..4)), 0..8).prop_map(
        |entries| {
            entries
                .into_iter()
                .map(|(id, requires)| {
                    let requires: Vec<&str> = requires.iter().map(String::as_str).collect();
                    Node::new(id, &requires)
                })
                .collect()
        },
    )
}

fn completed_set() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(node_id(), 0..6)
}

fn stat() -> impl Strategy<Value = Stat> {
    prop::sample::select(Stat::ALL.to_vec())
}

fn effect() -> impl Strategy<Value = Effect> {
    prop_oneof![
        (stat(), -150i64..150).prop_map(|(stat, delta)| Effect::stat_delta(stat, delta)),
        "[a-d]{1,2}".prop_map(Effect::GrantItem),
        "[a-d]{1,2}".prop_map(Effect::GrantAchievement),
        "[a-d]{1,2}".prop_map(Effect::SetFlag),
    ]
}

proptest! {
    #[test]
    fn unlocked_never_overlaps_completed(nodes in catalog(), completed in completed_set()) {
        let unlocked = resolve(&nodes, &completed);
        prop_assert!(unlocked.is_disjoint(&completed));
    }

    #[test]
    fn unlocked_iff_requirements_completed(nodes in catalog(), completed in completed_set()) {
        let unlocked = resolve(&nodes, &completed);
        for node in &nodes {
            let expected = !completed.contains(&node.id)
                && node.requires.iter().all(|req| completed.contains(req));
            // Duplicate ids in a catalog: any satisfied copy unlocks the id
            if expected {
                prop_assert!(unlocked.contains(&node.id));
            }
        }
        for id in &unlocked {
            prop_assert!(nodes.iter().any(|node| &node.id == id
                && !completed.contains(&node.id)
                && node.requires.iter().all(|req| completed.contains(req))));
        }
    }

    #[test]
    fn stats_stay_in_range(deltas in prop::collection::vec((stat(), any::<i64>()), 0..64)) {
        let mut state = GameState::new();
        for (stat, delta) in deltas {
            effects::apply(&mut state, &Effect::stat_delta(stat, delta));
            prop_assert!(state.stats.iter().all(|(_, value)| value <= 100));
        }
    }

    #[test]
    fn repeated_grants_match_single(items in prop::collection::vec("[a-c]", 1..10)) {
        let mut once = GameState::new();
        let mut twice = GameState::new();
        for item in &items {
            effects::apply(&mut once, &Effect::grant_item(item.clone()));
            effects::apply(&mut twice, &Effect::grant_item(item.clone()));
            effects::apply(&mut twice, &Effect::grant_item(item.clone()));
        }
        prop_assert_eq!(&once.inventory, &twice.inventory);

        let distinct: BTreeSet<&String> = items.iter().collect();
        prop_assert_eq!(once.inventory.len(), distinct.len());
    }

    #[test]
    fn save_round_trip(
        applied in prop::collection::vec(effect(), 0..32),
        completed in completed_set(),
    ) {
        let mut state = GameState::new();
        effects::apply_all(&mut state, &applied);
        state.progress.completed = completed;

        let save = deserialize(&serialize(&state).unwrap()).unwrap();
        let mut restored = GameState::new();
        save.apply_to(&mut restored);

        prop_assert_eq!(&restored.progress.completed, &state.progress.completed);
        prop_assert_eq!(&restored.stats, &state.stats);
        prop_assert_eq!(&restored.inventory, &state.inventory);
        prop_assert_eq!(&restored.achievements, &state.achievements);
        prop_assert_eq!(save, Save::from_state(&state));
    }
}
