pub mod record;
pub mod record_type;

pub use record::{normalize_name, DnsRecord};
pub use record_type::RecordType;
