//! Parcel domain model.
//!
//! # Responsibility
//! - Define the shipment record persisted in the `parcel` table.
//! - Provide the status vocabulary and its forward transition.
//!
//! # Invariants
//! - `number` is assigned by storage and never reused.
//! - `address` may only change while `status == Registered`.
//! - Deletion is only permitted while `status == Registered`.
//! - Any status text survives a write/read cycle, known or not.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned primary key of a parcel.
pub type ParcelNumber = i64;

/// Identifier of the client owning a parcel.
pub type ClientId = i64;

/// Shipment lifecycle state.
///
/// The store does not validate transitions, so text outside the known set is
/// kept verbatim in `Other` instead of being rejected on read. Every text has
/// exactly one representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParcelStatus {
    /// Initial state. Address changes and deletion are allowed.
    Registered,
    /// Handed over to the carrier.
    Sent,
    /// Received by the client.
    Delivered,
    /// Status text written by an external caller.
    Other(CustomStatus),
}

/// Status text that is none of the known lifecycle values.
///
/// Only [`ParcelStatus::parse`] builds one, so it never holds known text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomStatus(String);

impl CustomStatus {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl ParcelStatus {
    /// Returns the persisted text form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Parses persisted text. Never fails.
    pub fn parse(value: &str) -> Self {
        match value {
            "registered" => Self::Registered,
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            other => Self::Other(CustomStatus(other.to_string())),
        }
    }

    /// Returns the forward transition, or `None` for terminal/unknown states.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::Sent),
            Self::Sent => Some(Self::Delivered),
            Self::Delivered | Self::Other(_) => None,
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ParcelStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for ParcelStatus {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<ParcelStatus> for String {
    fn from(value: ParcelStatus) -> Self {
        match value {
            ParcelStatus::Other(CustomStatus(text)) => text,
            known => known.as_str().to_string(),
        }
    }
}

/// Shipment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Assigned by storage on insert; ignored when adding.
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: ParcelStatus,
    pub address: String,
    /// RFC3339 UTC timestamp set once by the creator.
    pub created_at: String,
}

impl Parcel {
    /// Creates an unsaved parcel in `Registered` state.
    ///
    /// `number` stays `0` until the repository assigns one.
    pub fn new(
        client: ClientId,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Returns a copy carrying the storage-assigned number.
    pub fn with_number(mut self, number: ParcelNumber) -> Self {
        self.number = number;
        self
    }
}

impl Display for Parcel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parcel #{} client={} status={} address={} created_at={}",
            self.number, self.client, self.status, self.address, self.created_at
        )
    }
}
