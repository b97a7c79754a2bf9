//! Entity-type tags used to scope correlations and controllers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of entity an identity belongs to.
///
/// Persisted as an integer code. The codes follow the host protocol's
/// bit-flag numbering, so they are stable across releases and must never be
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityType {
    Category,
    Customer,
    CustomerOrder,
    DeliveryNote,
    Image,
    Manufacturer,
    Product,
    Specific,
    SpecificValue,
    Payment,
    CrossSelling,
    CrossSellingGroup,
    ConfigGroup,
    CustomerGroup,
}

impl IdentityType {
    /// Every known identity type, in code order.
    pub const ALL: [IdentityType; 14] = [
        Self::Category,
        Self::Customer,
        Self::CustomerOrder,
        Self::DeliveryNote,
        Self::Image,
        Self::Manufacturer,
        Self::Product,
        Self::Specific,
        Self::SpecificValue,
        Self::Payment,
        Self::CrossSelling,
        Self::CrossSellingGroup,
        Self::ConfigGroup,
        Self::CustomerGroup,
    ];

    /// Returns the integer code stored in the `mapping.type` column.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Category => 1,
            Self::Customer => 2,
            Self::CustomerOrder => 4,
            Self::DeliveryNote => 8,
            Self::Image => 16,
            Self::Manufacturer => 32,
            Self::Product => 64,
            Self::Specific => 128,
            Self::SpecificValue => 256,
            Self::Payment => 512,
            Self::CrossSelling => 1024,
            Self::CrossSellingGroup => 2048,
            Self::ConfigGroup => 4096,
            Self::CustomerGroup => 8192,
        }
    }

    /// Looks up an identity type by its integer code.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Returns the snake_case name used in configuration and CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Customer => "customer",
            Self::CustomerOrder => "customer_order",
            Self::DeliveryNote => "delivery_note",
            Self::Image => "image",
            Self::Manufacturer => "manufacturer",
            Self::Product => "product",
            Self::Specific => "specific",
            Self::SpecificValue => "specific_value",
            Self::Payment => "payment",
            Self::CrossSelling => "cross_selling",
            Self::CrossSellingGroup => "cross_selling_group",
            Self::ConfigGroup => "config_group",
            Self::CustomerGroup => "customer_group",
        }
    }
}

impl fmt::Display for IdentityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentityType {
    type Err = crate::Error;

    /// Accepts either the snake_case name or the integer code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if let Ok(code) = needle.parse::<i64>() {
            return Self::from_code(code)
                .ok_or_else(|| crate::Error::UnknownIdentityType(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| crate::Error::UnknownIdentityType(s.to_string()))
    }
}
