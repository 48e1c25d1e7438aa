//! String-backed enums shared by several entities

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Soft-delete flag. Inactive rows stay in the table for history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Currency {
    #[sea_orm(string_value = "EUR")]
    #[serde(rename = "EUR")]
    Eur,
    #[sea_orm(string_value = "USD")]
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(format!(
                "Unsupported currency: '{}'. Must be one of: EUR, USD",
                other
            )),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Unit an item is sold in
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    #[sea_orm(string_value = "LITER")]
    Liter,
    #[sea_orm(string_value = "KILOGRAM")]
    Kilogram,
    #[sea_orm(string_value = "PIECE")]
    Piece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreType {
    #[sea_orm(string_value = "SUPERMARKET")]
    Supermarket,
    #[sea_orm(string_value = "DISCOUNTER")]
    Discounter,
    #[sea_orm(string_value = "MARKET")]
    Market,
    #[sea_orm(string_value = "ONLINE")]
    Online,
    #[sea_orm(string_value = "OTHER")]
    Other,
}
