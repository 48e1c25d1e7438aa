//! `SeaORM` Entity prelude

pub use super::categories::Entity as Categories;
pub use super::inflation_reports::Entity as InflationReports;
pub use super::item_categories::Entity as ItemCategories;
pub use super::items::Entity as Items;
pub use super::price_alerts::Entity as PriceAlerts;
pub use super::price_observations::Entity as PriceObservations;
pub use super::shopping_list_items::Entity as ShoppingListItems;
pub use super::shopping_lists::Entity as ShoppingLists;
pub use super::stores::Entity as Stores;
pub use super::user_preferences::Entity as UserPreferences;
pub use super::users::Entity as Users;
