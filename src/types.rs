//! Core types shared by the extractor, the orchestrator and the NBIA client

use serde::Deserialize;
use std::fmt;

/// Ordered list of series identifiers extracted from one upload
///
/// Source order is preserved and duplicates are kept; uniqueness is the
/// remote service's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierList(Vec<String>);

impl IdentifierList {
    /// Create an empty list
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append one identifier
    pub fn push(&mut self, id: impl Into<String>) {
        self.0.push(id.into());
    }

    /// Number of identifiers
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no identifiers
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate identifiers in source order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Borrow as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for IdentifierList {
    fn from(ids: Vec<String>) -> Self {
        Self(ids)
    }
}

impl<S: Into<String>> FromIterator<S> for IdentifierList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a IdentifierList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A shared cart to be created on the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRequest {
    /// Cart name, must be unique on the remote service
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
    /// Link to a page describing the cart
    pub description_url: Option<String>,
    /// Series to include
    pub identifiers: IdentifierList,
}

/// Username/password pair used to obtain a session token
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// NBIA account name
    pub username: String,
    /// NBIA account password
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token issued by the NBIA token endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// OAuth access token
    pub access_token: String,
    /// Lifetime in seconds, when the server reports it
    pub expires_in: Option<u64>,
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Result of an authenticate call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    /// HTTP status reported by the token endpoint
    pub status: u16,
    /// Token, present only on success
    pub token: Option<SessionToken>,
}

impl AuthOutcome {
    /// Whether the token endpoint accepted the credentials
    pub fn is_success(&self) -> bool {
        self.status == 200 && self.token.is_some()
    }
}

/// Raw response of a create-cart call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, often a short message
    pub body: String,
}

/// Filters for the series metadata lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesQuery {
    /// Collection name (required by the API)
    pub collection: String,
    /// Modality, e.g. `CT`
    pub modality: Option<String>,
    /// Body part examined, e.g. `CHEST`
    pub body_part: Option<String>,
}

/// One series as reported by the metadata lookup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeriesRecord {
    /// DICOM Series Instance UID
    #[serde(rename = "SeriesInstanceUID")]
    pub series_instance_uid: String,
    /// Collection the series belongs to
    #[serde(default)]
    pub collection: Option<String>,
    /// Subject identifier
    #[serde(default, rename = "PatientID")]
    pub patient_id: Option<String>,
    /// DICOM Study Instance UID
    #[serde(default, rename = "StudyInstanceUID")]
    pub study_instance_uid: Option<String>,
    /// Imaging modality
    #[serde(default)]
    pub modality: Option<String>,
    /// Body part examined
    #[serde(default)]
    pub body_part_examined: Option<String>,
    /// Series description
    #[serde(default)]
    pub series_description: Option<String>,
    /// Number of images in the series
    #[serde(default)]
    pub image_count: Option<u64>,
}
