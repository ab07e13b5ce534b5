use ferrous_lookup_domain::{DnsRecord, DomainError, RecordType};

/// Read-only record table.
pub trait RecordRepository: Send + Sync {
    /// Without a type, the first record loaded under `name` wins.
    ///
    /// Returns `DomainError::NotFound` on a miss.
    fn find(&self, name: &str, record_type: Option<RecordType>)
        -> Result<DnsRecord, DomainError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
