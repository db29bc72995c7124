//! OutcomeBreakdown - Per-outcome call tally for one phone number
//!
//! Keeps label insertion order: the dominant-status fallback and the
//! composed summary both depend on the order labels appear in the
//! source document, so a plain HashMap would lose meaning.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered mapping from outcome label to occurrence count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeBreakdown {
    entries: Vec<(String, i64)>,
}

impl OutcomeBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `label`, merging with an existing entry
    pub fn insert(&mut self, label: impl Into<String>, count: i64) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing += count,
            None => self.entries.push((label, count)),
        }
    }

    /// Count recorded for `label`, 0 when absent
    pub fn get(&self, label: &str) -> i64 {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// First label in insertion order, regardless of its count
    pub fn first_label(&self) -> Option<&str> {
        self.entries.first().map(|(l, _)| l.as_str())
    }

    /// Sum of all counts, voicemail attempts included
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, i64)> for OutcomeBreakdown {
    fn from_iter<T: IntoIterator<Item = (String, i64)>>(iter: T) -> Self {
        let mut breakdown = Self::new();
        for (label, count) in iter {
            breakdown.insert(label, count);
        }
        breakdown
    }
}

impl<'a> FromIterator<(&'a str, i64)> for OutcomeBreakdown {
    fn from_iter<T: IntoIterator<Item = (&'a str, i64)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(l, c)| (l.to_string(), c))
            .collect()
    }
}

impl Serialize for OutcomeBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OutcomeBreakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = OutcomeBreakdown;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of outcome label to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut breakdown = OutcomeBreakdown::new();
                while let Some((label, count)) = map.next_entry::<String, i64>()? {
                    breakdown.insert(label, count);
                }
                Ok(breakdown)
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_keeps_document_order() {
        let breakdown: OutcomeBreakdown =
            serde_json::from_str(r#"{"hang up": 3, "voicemail": 0, "success": 1}"#).unwrap();

        let labels: Vec<&str> = breakdown.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["hang up", "voicemail", "success"]);
        assert_eq!(breakdown.first_label(), Some("hang up"));
    }

    #[test]
    fn get_returns_zero_for_missing_label() {
        let breakdown: OutcomeBreakdown = [("hang up", 2)].into_iter().collect();
        assert_eq!(breakdown.get("success"), 0);
        assert_eq!(breakdown.get("hang up"), 2);
    }

    #[test]
    fn insert_merges_duplicate_labels() {
        let mut breakdown = OutcomeBreakdown::new();
        breakdown.insert("hang up", 2);
        breakdown.insert("hang up", 3);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown.get("hang up"), 5);
    }

    #[test]
    fn total_sums_all_counts() {
        let breakdown: OutcomeBreakdown =
            [("success", 1), ("hang up", 9), ("voicemail", 4)].into_iter().collect();
        assert_eq!(breakdown.total(), 14);
    }

    #[test]
    fn round_trips_through_json() {
        let breakdown: OutcomeBreakdown = [("success", 1), ("hang up", 9)].into_iter().collect();
        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(json, r#"{"success":1,"hang up":9}"#);
    }
}
