//! Append-only store of divergence records.

use sdelta_types::{DiffRecord, LocationPair, PropertyPath};
use tracing::debug;

/// Ordered list of divergences in detection order.
///
/// Records are never removed, merged or reordered.
#[derive(Clone, Debug, Default)]
pub struct DiffSink {
    records: Vec<DiffRecord>,
}

impl DiffSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record tagged with `locations`.
    pub fn push(&mut self, path: &PropertyPath, message: String, locations: LocationPair) {
        debug!(path = %path, message = %message, "divergence");
        self.records.push(DiffRecord::new(path.clone(), message, locations));
    }

    pub fn records(&self) -> &[DiffRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<DiffRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdelta_types::Location;

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let mut sink = DiffSink::new();
        let path = PropertyPath::root() + "A";
        sink.push(&path, "second".into(), LocationPair::unknown());
        sink.push(&path, "first".into(), LocationPair::unknown());
        sink.push(&path, "first".into(), LocationPair::unknown());

        let messages: Vec<_> = sink.records().iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first", "first"]);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn records_carry_locations() {
        let mut sink = DiffSink::new();
        let locations = LocationPair::new(Location::known("l.xml (1, 1)"), Location::Unknown);
        sink.push(&PropertyPath::root(), "m".into(), locations.clone());
        assert_eq!(sink.into_records()[0].locations(), locations);
    }
}
