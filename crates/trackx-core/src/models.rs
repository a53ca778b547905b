pub mod candidate;
pub mod case;
pub mod record;
pub mod summary;

pub use candidate::{RawCoordinateCandidate, SourcePattern};
pub use case::{CaseMeta, CasePayload, PayloadPoint, PayloadTrackPoint};
pub use record::{AssembledRecord, Extraction, GpsRecord, IgnitionStatus};
pub use summary::{CsvColumnMap, CsvIngestSummary};
