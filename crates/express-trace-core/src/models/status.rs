// ABOUTME: Provider-independent shipment status vocabulary
// ABOUTME: Each provider maps its own status codes onto a subset of these values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical shipment status
///
/// Provider codes that have no mapping are represented as `None` wherever a
/// status is optional and serialize as an empty string. An unknown status is
/// never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalStatus {
    /// Tracking number or carrier is wrong
    None,
    /// No tracking information yet
    NoneYet,
    /// Picked up by the carrier
    Accepted,
    /// Moving through the network
    InTransit,
    /// Delivered and signed for
    Delivered,
    /// Problem shipment needing attention
    Question,
    /// Delivery exception
    Exception,
    /// Returned to sender
    Returned,
    /// Shipment canceled
    Canceled,
    /// Out for delivery
    InProgress,
    /// Handed over to another carrier
    Transfer,
    /// In customs clearance
    Clearance,
    /// Refused by the recipient
    Refused,
}

impl CanonicalStatus {
    /// Every canonical status
    pub const ALL: [Self; 13] = [
        Self::None,
        Self::NoneYet,
        Self::Accepted,
        Self::InTransit,
        Self::Delivered,
        Self::Question,
        Self::Exception,
        Self::Returned,
        Self::Canceled,
        Self::InProgress,
        Self::Transfer,
        Self::Clearance,
        Self::Refused,
    ];

    /// Wire name of this status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NoneYet => "noneYet",
            Self::Accepted => "accepted",
            Self::InTransit => "inTransit",
            Self::Delivered => "delivered",
            Self::Question => "question",
            Self::Exception => "exception",
            Self::Returned => "returned",
            Self::Canceled => "canceled",
            Self::InProgress => "inProgress",
            Self::Transfer => "transfer",
            Self::Clearance => "clearance",
            Self::Refused => "refused",
        }
    }

    /// Wire name of an optional status, `""` when unmapped
    #[must_use]
    pub const fn name_or_empty(status: Option<Self>) -> &'static str {
        match status {
            Some(status) => status.as_str(),
            None => "",
        }
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown canonical status: {s}"))
    }
}

/// Serde adapter writing `Option<CanonicalStatus>` as `""` when unmapped
pub(crate) mod empty_if_none {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::CanonicalStatus;

    #[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(value: &Option<CanonicalStatus>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(CanonicalStatus::name_or_empty(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<CanonicalStatus>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(name) => name.parse().map(Some).map_err(D::Error::custom),
        }
    }
}
