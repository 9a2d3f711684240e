// src/roster.rs

use crate::error::AppError;
use url::Url;

const PHOTO_PARAMS: &str = "w=800&h=800&fit=crop&q=80";

/// (identifier, display name, unsplash photo id)
const SAMPLE_EMPLOYEES: [(&str, &str, &str); 10] = [
    ("24EMP001", "John Smith", "photo-1560250097-0b93528c311a"),
    ("24EMP002", "Sarah Johnson", "photo-1573496359142-b8d87734a5a2"),
    ("24EMP003", "Michael Brown", "photo-1519085360753-af0119f7cbe7"),
    ("24EMP004", "Emily Davis", "photo-1580489944761-15a19d654956"),
    ("15EMP005", "David Wilson", "photo-1472099645785-5658abf4ff4e"),
    ("15EMP006", "Lisa Anderson", "photo-1607746882042-944635dfe10e"),
    ("22EMP007", "James Martinez", "photo-1507003211169-0a1dd7228f2d"),
    ("22EMP008", "Jennifer Taylor", "photo-1438761681033-6461ffad8d80"),
    ("23EMP009", "Robert Lee", "photo-1500648767791-00dcc994a43e"),
    ("23EMP010", "Mary White", "photo-1544005313-94ddf0286df2"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub identifier: String,
    pub display_name: String,
    pub source_url: Url,
}

impl Record {
    pub fn new(identifier: &str, display_name: &str, source_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            identifier: identifier.to_string(),
            display_name: display_name.to_string(),
            source_url: Url::parse(source_url)?,
        })
    }

    /// Name of the scratch file and of the archive entry.
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.identifier)
    }
}

/// The fixed roster of demo employees, in the order they are downloaded.
pub fn sample_roster() -> Result<Vec<Record>, AppError> {
    SAMPLE_EMPLOYEES
        .iter()
        .map(|(id, name, photo)| {
            Record::new(
                id,
                name,
                &format!("https://images.unsplash.com/{}?{}", photo, PHOTO_PARAMS),
            )
        })
        .collect()
}
