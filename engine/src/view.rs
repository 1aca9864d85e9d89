//! Filtered view projector.
//!
//! Derives the display subset of a snapshot for a search term. Pure: no I/O,
//! no failure modes.

use crate::{Item, Snapshot};
use std::ops::Deref;

/// The items of a snapshot whose names match a search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    items: Vec<Item>,
}

impl FilteredView {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Reinterpret the view as a snapshot so it can be projected again.
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot::from(self.items)
    }
}

impl Deref for FilteredView {
    type Target = [Item];

    fn deref(&self) -> &[Item] {
        &self.items
    }
}

/// Keep the items whose lower-cased name contains the lower-cased term.
///
/// Order is preserved. An empty term keeps everything.
pub fn project(snapshot: &Snapshot, term: &str) -> FilteredView {
    let needle = term.to_lowercase();
    let items = snapshot
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    FilteredView { items }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> Snapshot {
        Snapshot::from(vec![
            Item::new("apple", 1),
            Item::new("banana", 5),
            Item::new("mango", 2),
        ])
    }

    #[test]
    fn empty_term_keeps_everything() {
        let snapshot = fruit();
        let view = project(&snapshot, "");
        assert_eq!(view.items(), snapshot.items());
    }

    #[test]
    fn case_insensitive_substring() {
        let view = project(&fruit(), "AN");
        assert_eq!(
            view.items(),
            &[Item::new("banana", 5), Item::new("mango", 2)]
        );
    }

    #[test]
    fn no_match() {
        let view = project(&fruit(), "kiwi");
        assert!(view.is_empty());
    }

    #[test]
    fn empty_snapshot() {
        assert!(project(&Snapshot::new(), "apple").is_empty());
        assert!(project(&Snapshot::new(), "").is_empty());
    }

    #[test]
    fn whitespace_is_part_of_the_term() {
        let snapshot = Snapshot::from(vec![Item::new("green apple", 1), Item::new("apple", 2)]);
        let view = project(&snapshot, "n a");
        assert_eq!(view.items(), &[Item::new("green apple", 1)]);
    }

    #[test]
    fn unicode_lowercasing() {
        let snapshot = Snapshot::from(vec![Item::new("ÄPFEL", 3), Item::new("birne", 1)]);
        let view = project(&snapshot, "äpf");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "ÄPFEL");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
            prop::collection::vec(("[a-zA-Z ]{1,12}", 1i64..1000), 0..20).prop_map(|entries| {
                entries
                    .into_iter()
                    .map(|(name, quantity)| Item::new(name, quantity))
                    .collect::<Snapshot>()
            })
        }

        proptest! {
            #[test]
            fn prop_empty_term_is_identity(snapshot in arb_snapshot()) {
                let view = project(&snapshot, "");
                prop_assert_eq!(view.into_snapshot(), snapshot);
            }

            #[test]
            fn prop_projection_idempotent(snapshot in arb_snapshot(), term in "[a-zA-Z]{0,3}") {
                let once = project(&snapshot, &term);
                let twice = project(&once.clone().into_snapshot(), &term);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn prop_projection_is_ordered_subsequence(
                snapshot in arb_snapshot(),
                term in "[a-zA-Z]{0,3}",
            ) {
                let view = project(&snapshot, &term);
                let mut source = snapshot.iter();
                for item in view.iter() {
                    prop_assert!(source.any(|candidate| candidate == item));
                    prop_assert!(item.name.to_lowercase().contains(&term.to_lowercase()));
                }
            }
        }
    }
}
