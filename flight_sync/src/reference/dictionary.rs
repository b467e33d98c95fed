use std::{collections::HashMap, fmt};

use diesel::SqliteConnection;
use indexmap::IndexMap;

use super::{ReferenceTable, repo};

/// In-memory mirror of the stored dictionaries, keyed by table then code.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDictionary {
    airline: HashMap<String, String>,
    aircraft: HashMap<String, String>,
}

impl ReferenceDictionary {
    /// An empty snapshot. Everything reconciled against it counts as new.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of both tables as currently stored.
    pub fn load_all(conn: &mut SqliteConnection) -> diesel::QueryResult<Self> {
        let mut dict = Self::new();
        for table in ReferenceTable::ALL {
            dict.load(conn, table)?;
        }
        Ok(dict)
    }

    /// Replaces the snapshot of `table` with its stored rows.
    pub fn load(&mut self, conn: &mut SqliteConnection, table: ReferenceTable) -> diesel::QueryResult<usize> {
        let rows = repo::load_entries(conn, table)?;
        let n = rows.len();
        *self.entries_mut(table) = rows.into_iter().collect();
        Ok(n)
    }

    /// Name currently known for `code`.
    pub fn get(&self, table: ReferenceTable, code: &str) -> Option<&str> {
        self.entries(table).get(code).map(String::as_str)
    }

    pub fn len(&self, table: ReferenceTable) -> usize {
        self.entries(table).len()
    }

    /// Selects the incoming entries that are unseen or renamed and records them
    /// in the snapshot.
    ///
    /// The batch keeps the incoming order; a code repeated in `incoming` keeps its
    /// first position and its last name.
    pub fn reconcile<'a>(
        &mut self,
        table: ReferenceTable,
        incoming: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> ReferenceBatch {
        let known = self.entries_mut(table);
        let mut changed = IndexMap::<String, String>::new();

        for (code, name) in incoming {
            if known.get(code).is_some_and(|current| current == name) {
                continue;
            }
            known.insert(code.to_string(), name.to_string());
            changed.insert(code.to_string(), name.to_string());
        }

        ReferenceBatch {
            table,
            entries: changed.into_iter().collect(),
        }
    }

    fn entries(&self, table: ReferenceTable) -> &HashMap<String, String> {
        match table {
            ReferenceTable::Airline => &self.airline,
            ReferenceTable::Aircraft => &self.aircraft,
        }
    }

    fn entries_mut(&mut self, table: ReferenceTable) -> &mut HashMap<String, String> {
        match table {
            ReferenceTable::Airline => &mut self.airline,
            ReferenceTable::Aircraft => &mut self.aircraft,
        }
    }
}

/// Code → name pairs to upsert into one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceBatch {
    pub table: ReferenceTable,
    /// `(code, name)` in incoming order, one per code.
    pub entries: Vec<(String, String)>,
}

impl ReferenceBatch {
    /// True if nothing needs writing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for ReferenceBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "No changes");
        }

        let title = format!("{} (UPSERT)", self.table);
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "-".repeat(title.len()))?;
        for (code, name) in &self.entries {
            writeln!(f, "+ {code}  \"{name}\"")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn codes(batch: &ReferenceBatch) -> Vec<&str> {
        batch.entries.iter().map(|(c, _)| c.as_str()).collect()
    }

    #[test]
    fn first_sight_selects_everything_in_order() {
        let mut dict = ReferenceDictionary::new();
        let batch = dict.reconcile(
            ReferenceTable::Airline,
            [("UA", "UNITED AIRLINES"), ("AA", "AMERICAN AIRLINES")],
        );

        assert_eq!(codes(&batch), ["UA", "AA"]);
        assert_eq!(dict.get(ReferenceTable::Airline, "AA"), Some("AMERICAN AIRLINES"));
        assert_eq!(dict.len(ReferenceTable::Aircraft), 0);
    }

    #[test]
    fn only_renamed_or_new_codes_are_selected() {
        let mut dict = ReferenceDictionary::new();
        dict.reconcile(ReferenceTable::Aircraft, [("738", "BOEING 737-800"), ("320", "AIRBUS A320")]);

        let batch = dict.reconcile(
            ReferenceTable::Aircraft,
            [("738", "BOEING 737-800"), ("320", "AIRBUS A320NEO"), ("789", "BOEING 787-9")],
        );

        assert_eq!(
            batch.entries,
            vec![
                ("320".to_string(), "AIRBUS A320NEO".to_string()),
                ("789".to_string(), "BOEING 787-9".to_string()),
            ]
        );
        assert_eq!(dict.get(ReferenceTable::Aircraft, "320"), Some("AIRBUS A320NEO"));
    }

    #[test]
    fn tables_are_independent() {
        let mut dict = ReferenceDictionary::new();
        dict.reconcile(ReferenceTable::Airline, [("AA", "AMERICAN AIRLINES")]);

        let batch = dict.reconcile(ReferenceTable::Aircraft, [("AA", "AMERICAN AIRLINES")]);
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn repeated_code_keeps_last_name() {
        let mut dict = ReferenceDictionary::new();
        let batch = dict.reconcile(ReferenceTable::Airline, [("AA", "OLD"), ("DL", "DELTA"), ("AA", "NEW")]);

        assert_eq!(codes(&batch), ["AA", "DL"]);
        assert_eq!(batch.entries[0].1, "NEW");
    }

    #[test]
    fn display_lists_changes_or_says_none() {
        let mut dict = ReferenceDictionary::new();
        let batch = dict.reconcile(ReferenceTable::Airline, [("AA", "AMERICAN AIRLINES")]);
        let text = batch.to_string();
        assert!(text.starts_with("airline (UPSERT)\n----------------\n"), "{text}");
        assert!(text.contains("+ AA  \"AMERICAN AIRLINES\""));

        let again = dict.reconcile(ReferenceTable::Airline, [("AA", "AMERICAN AIRLINES")]);
        assert_eq!(again.to_string(), "No changes");
    }

    proptest! {
        #[test]
        fn reconciling_twice_yields_empty_batch(
            entries in proptest::collection::hash_map("[A-Z0-9]{2,3}", "[A-Z ]{1,12}", 0..20),
        ) {
            let mut dict = ReferenceDictionary::new();
            let incoming: Vec<(&str, &str)> =
                entries.iter().map(|(c, n)| (c.as_str(), n.as_str())).collect();

            let first = dict.reconcile(ReferenceTable::Airline, incoming.iter().copied());
            let second = dict.reconcile(ReferenceTable::Airline, incoming.iter().copied());

            prop_assert!(second.is_empty());
            prop_assert_eq!(first.len(), entries.len());
            for (code, name) in &first.entries {
                prop_assert_eq!(dict.get(ReferenceTable::Airline, code), Some(name.as_str()));
            }
        }

        #[test]
        fn batch_is_exactly_the_changed_codes(
            stored in proptest::collection::hash_map("[A-Z]{2}", "[a-c]", 0..10),
            incoming in proptest::collection::hash_map("[A-Z]{2}", "[a-c]", 0..10),
        ) {
            let mut dict = ReferenceDictionary::new();
            dict.reconcile(ReferenceTable::Aircraft, stored.iter().map(|(c, n)| (c.as_str(), n.as_str())));

            let batch = dict.reconcile(
                ReferenceTable::Aircraft,
                incoming.iter().map(|(c, n)| (c.as_str(), n.as_str())),
            );

            let expected = incoming
                .iter()
                .filter(|(c, n)| stored.get(*c) != Some(*n))
                .count();
            prop_assert_eq!(batch.len(), expected);
        }
    }
}
