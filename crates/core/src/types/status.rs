//! Status and role enums shared with the remote service.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Serialized in lowercase, matching the remote service's status strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// The wire name of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Account role issued by the remote service.
///
/// The service encodes roles as numbers; this type serializes the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UserRole {
    /// Shopper using the user portal.
    Customer,
    /// Shop owner using the merchant portal.
    Merchant,
    /// Platform administrator.
    Admin,
}

impl UserRole {
    /// Numeric code used on the wire.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Customer => 1,
            Self::Merchant => 5,
            Self::Admin => 10,
        }
    }
}

impl TryFrom<u8> for UserRole {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Customer),
            5 => Ok(Self::Merchant),
            10 => Ok(Self::Admin),
            _ => Err(format!("invalid role code: {code}")),
        }
    }
}

impl From<UserRole> for u8 {
    fn from(role: UserRole) -> Self {
        role.code()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Merchant => write!(f, "merchant"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "merchant" => Ok(Self::Merchant),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Shipped).unwrap(),
            "\"shipped\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
        assert_eq!("refunded".parse::<OrderStatus>().unwrap(), OrderStatus::Refunded);
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_role_serializes_as_number() {
        assert_eq!(serde_json::to_string(&UserRole::Merchant).unwrap(), "5");
        let parsed: UserRole = serde_json::from_str("10").unwrap();
        assert_eq!(parsed, UserRole::Admin);
        assert!(serde_json::from_str::<UserRole>("3").is_err());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("customer".parse::<UserRole>().unwrap(), UserRole::Customer);
        assert!("owner".parse::<UserRole>().is_err());
    }
}
