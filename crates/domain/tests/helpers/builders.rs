#![allow(dead_code)]
use ferrous_lookup_domain::{DnsRecord, RecordType};

pub struct DnsRecordBuilder {
    name: String,
    record_type: RecordType,
    value: String,
    ttl: Option<u32>,
    priority: Option<u16>,
}

impl DnsRecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "example.com".to_string(),
            record_type: RecordType::A,
            value: "93.184.216.34".to_string(),
            ttl: None,
            priority: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn build(self) -> DnsRecord {
        DnsRecord {
            name: self.name,
            record_type: self.record_type,
            value: self.value,
            ttl: self.ttl,
            priority: self.priority,
        }
    }
}

impl Default for DnsRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
