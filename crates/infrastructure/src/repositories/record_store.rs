use ferrous_lookup_application::ports::RecordRepository;
use ferrous_lookup_domain::{normalize_name, DnsRecord, DomainError, RecordType};
use rustc_hash::FxHashMap;
use tracing::info;

/// Immutable record table built once at startup.
///
/// Records are indexed by normalized name; each bucket keeps load order so a
/// name-only lookup deterministically returns the first record loaded.
pub struct InMemoryRecordStore {
    records: Vec<DnsRecord>,
    by_name: FxHashMap<String, Vec<usize>>,
}

impl InMemoryRecordStore {
    pub fn load(records: Vec<DnsRecord>) -> Self {
        let mut by_name: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (index, record) in records.iter().enumerate() {
            by_name.entry(record.normalized_name()).or_default().push(index);
        }

        info!(
            records_loaded = records.len(),
            names = by_name.len(),
            "Record table loaded into memory"
        );

        Self { records, by_name }
    }

    pub fn records(&self) -> &[DnsRecord] {
        &self.records
    }
}

impl RecordRepository for InMemoryRecordStore {
    fn find(&self, name: &str, record_type: Option<RecordType>) -> Result<DnsRecord, DomainError> {
        self.by_name
            .get(&normalize_name(name))
            .and_then(|bucket| {
                bucket
                    .iter()
                    .map(|&i| &self.records[i])
                    .find(|r| record_type.map_or(true, |t| r.record_type == t))
            })
            .cloned()
            .ok_or_else(|| DomainError::NotFound(name.to_string()))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
