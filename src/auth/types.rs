use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Account role. Stored in `users.role` and in the session as the snake_case
/// form returned by [`Role::as_str`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Farmer,
    Retailer,
    WarehouseManager,
    LogisticsOperator,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Farmer,
        Role::Retailer,
        Role::WarehouseManager,
        Role::LogisticsOperator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Retailer => "retailer",
            Role::WarehouseManager => "warehouse_manager",
            Role::LogisticsOperator => "logistics_operator",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Farmer => "Farmer",
            Role::Retailer => "Retailer",
            Role::WarehouseManager => "Warehouse Manager",
            Role::LogisticsOperator => "Logistics Operator",
        }
    }

    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Farmer => "/farmer/dashboard",
            Role::Retailer => "/retailer/dashboard",
            Role::WarehouseManager => "/warehouse/dashboard",
            Role::LogisticsOperator => "/logistics/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Accepts the stored form and the display name in any casing, so
    /// "Warehouse Manager", "warehouse-manager" and "warehouse_manager" agree.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .map(|ch| match ch {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "farmer" => Ok(Role::Farmer),
            "retailer" => Ok(Role::Retailer),
            "warehouse_manager" | "warehouse" => Ok(Role::WarehouseManager),
            "logistics_operator" | "logistics" => Ok(Role::LogisticsOperator),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = UnknownRole;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

pub trait RequiredRole {
    fn required() -> Role;
}

pub struct FarmerRole;

impl RequiredRole for FarmerRole {
    fn required() -> Role {
        Role::Farmer
    }
}

pub struct RetailerRole;

impl RequiredRole for RetailerRole {
    fn required() -> Role {
        Role::Retailer
    }
}

pub struct WarehouseManagerRole;

impl RequiredRole for WarehouseManagerRole {
    fn required() -> Role {
        Role::WarehouseManager
    }
}

pub struct LogisticsOperatorRole;

impl RequiredRole for LogisticsOperatorRole {
    fn required() -> Role {
        Role::LogisticsOperator
    }
}
