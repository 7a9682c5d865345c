//! Shallow-merge collaborator for member maps

use crate::value::Members;

/// Copy every own member of `source` onto `target`, overwriting same-named
/// members, and return `target`.
///
/// This is the single primitive every template and static accumulation step
/// of composition goes through. It never reads through a source's lookup
/// chain: a map passed here contributes exactly its own entries.
pub fn merge<'a>(source: &Members, target: &'a mut Members) -> &'a mut Members {
    for (name, value) in source {
        target.insert(name.clone(), value.clone());
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn members_of(entries: &HashMap<String, String>) -> Members {
        entries
            .iter()
            .map(|(name, value)| (name.clone(), Value::from(value.as_str())))
            .collect()
    }

    /// Test overwrite semantics and the returned target
    #[test]
    fn test_merge_overwrites() {
        let mut source = Members::new();
        source.insert("a".to_string(), Value::from("source"));

        let mut target = Members::new();
        target.insert("a".to_string(), Value::from("target"));
        target.insert("b".to_string(), Value::from("kept"));

        let merged = merge(&source, &mut target);
        assert_eq!(merged.get("a"), Some(&Value::from("source")));

        assert_eq!(target.get("a"), Some(&Value::from("source")));
        assert_eq!(target.get("b"), Some(&Value::from("kept")));
    }

    /// Test an empty source is a no-op
    #[test]
    fn test_merge_empty_source() {
        let source = Members::new();
        let mut target = Members::new();
        target.insert("a".to_string(), Value::from("a"));

        merge(&source, &mut target);
        assert_eq!(target.len(), 1);
    }

    proptest! {
        /// Every own source member lands on the target, target-only members
        /// survive, and the source is left untouched.
        #[test]
        fn merge_contract(
            source in prop::collection::hash_map("[a-d]{1,4}", "[a-z]{0,6}", 0..12),
            target in prop::collection::hash_map("[a-d]{1,4}", "[a-z]{0,6}", 0..12),
        ) {
            let source_members = members_of(&source);
            let source_snapshot = source_members.clone();
            let mut target_members = members_of(&target);

            merge(&source_members, &mut target_members);

            for (name, value) in &source_members {
                prop_assert_eq!(target_members.get(name), Some(value));
            }
            for (name, value) in &target {
                if !source.contains_key(name) {
                    prop_assert_eq!(
                        target_members.get(name.as_str()),
                        Some(&Value::from(value.as_str()))
                    );
                }
            }
            prop_assert_eq!(&source_members, &source_snapshot);
        }
    }
}
