//! Composable filter criteria for price observation searches
//!
//! `PriceObservationFilter` is a plain value object. It is turned into a
//! SeaORM `Condition` only at the storage boundary (`apply`). Every predicate
//! is optional; an absent predicate adds nothing to the WHERE clause.

use chrono::NaiveDate;
use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, Condition, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};
use uuid::Uuid;

use crate::entities::{
    price_observations,
    sea_orm_active_enums::{Currency, Status, StoreType},
    stores,
};
use crate::models::pagination::PageRequest;
use crate::models::price_observation::PriceSortField;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceObservationFilter {
    pub item_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
    pub store_type: Option<StoreType>,
    /// Matched case-insensitively against the store's city
    pub city: Option<String>,
    pub currency: Option<Currency>,
    /// Inclusive lower bound on observation_date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on observation_date
    pub date_to: Option<NaiveDate>,
    pub status: Option<Status>,
}

impl PriceObservationFilter {
    pub fn for_item(item_id: Uuid) -> Self {
        Self {
            item_id: Some(item_id),
            ..Default::default()
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    pub fn active_only(mut self) -> Self {
        self.status = Some(Status::Active);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(format!(
                    "date_from ({}) must not be after date_to ({})",
                    from, to
                ));
            }
        }
        Ok(())
    }

    /// Store-level predicates need the stores table joined in
    pub fn needs_store_join(&self) -> bool {
        self.store_type.is_some() || self.city.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(item_id) = self.item_id {
            condition = condition.add(price_observations::Column::ItemId.eq(item_id));
        }
        if let Some(store_id) = self.store_id {
            condition = condition.add(price_observations::Column::StoreId.eq(store_id));
        }
        if let Some(currency) = self.currency {
            condition = condition.add(price_observations::Column::Currency.eq(currency));
        }
        if let Some(from) = self.date_from {
            condition = condition.add(price_observations::Column::ObservationDate.gte(from));
        }
        if let Some(to) = self.date_to {
            condition = condition.add(price_observations::Column::ObservationDate.lte(to));
        }
        if let Some(status) = self.status {
            condition = condition.add(price_observations::Column::Status.eq(status));
        }
        if let Some(store_type) = self.store_type {
            condition = condition.add(stores::Column::StoreType.eq(store_type));
        }
        if let Some(ref city) = self.city {
            condition = condition.add(
                Expr::expr(Func::lower(Expr::col((stores::Entity, stores::Column::City))))
                    .eq(city.to_lowercase()),
            );
        }

        condition
    }

    pub fn apply(
        &self,
        select: Select<price_observations::Entity>,
    ) -> Select<price_observations::Entity> {
        let select = if self.needs_store_join() {
            select.join(JoinType::InnerJoin, price_observations::Relation::Stores.def())
        } else {
            select
        };
        if self.is_empty() {
            return select;
        }
        select.filter(self.to_condition())
    }
}

/// Ordering for a page of observations; id breaks ties so pages are stable
pub fn apply_sort(
    select: Select<price_observations::Entity>,
    page: &PageRequest<PriceSortField>,
) -> Select<price_observations::Entity> {
    let column = match page.sort {
        PriceSortField::ObservationDate => price_observations::Column::ObservationDate,
        PriceSortField::Price => price_observations::Column::Price,
        PriceSortField::CreatedAt => price_observations::Column::CreatedAt,
    };
    select
        .order_by(column, page.direction.as_order())
        .order_by(price_observations::Column::Id, page.direction.as_order())
}

/// Base query for the filter
pub fn select_filtered(filter: &PriceObservationFilter) -> Select<price_observations::Entity> {
    filter.apply(price_observations::Entity::find())
}

/// Same as `select_filtered` but limited to one page
pub fn select_page(
    filter: &PriceObservationFilter,
    page: &PageRequest<PriceSortField>,
) -> Select<price_observations::Entity> {
    apply_sort(select_filtered(filter), page)
        .offset(page.offset())
        .limit(page.size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pagination::SortDirection;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(filter: &PriceObservationFilter) -> String {
        select_filtered(filter).build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn test_empty_filter_has_no_where_clause() {
        let filter = PriceObservationFilter::default();
        assert!(filter.is_empty());
        let sql = sql(&filter);
        assert!(!sql.contains("WHERE"), "unexpected WHERE in {}", sql);
        assert!(!sql.contains("JOIN"));
    }

    #[test]
    fn test_item_and_currency_predicates() {
        let item_id = Uuid::parse_str("6f1c1b8e-3c43-4a53-9d5b-1a1f0d5f1c11").unwrap();
        let filter = PriceObservationFilter::for_item(item_id).with_currency(Currency::Usd);
        let sql = sql(&filter);
        assert!(sql.contains(r#""price_observations"."item_id" = '6f1c1b8e-3c43-4a53-9d5b-1a1f0d5f1c11'"#), "{}", sql);
        assert!(sql.contains(r#""price_observations"."currency""#), "{}", sql);
        assert!(sql.contains("'USD'"), "{}", sql);
        assert!(sql.contains(" AND "));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = PriceObservationFilter::default().between(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let sql = sql(&filter);
        assert!(sql.contains(r#""price_observations"."observation_date" >= '2024-01-01'"#), "{}", sql);
        assert!(sql.contains(r#""price_observations"."observation_date" <= '2024-03-31'"#), "{}", sql);
    }

    #[test]
    fn test_store_predicates_join_stores() {
        let filter = PriceObservationFilter {
            store_type: Some(StoreType::Discounter),
            city: Some("Berlin".to_string()),
            ..Default::default()
        };
        assert!(filter.needs_store_join());
        let sql = sql(&filter);
        assert!(sql.contains(r#"INNER JOIN "stores""#), "{}", sql);
        assert!(sql.contains("'DISCOUNTER'"), "{}", sql);
        assert!(sql.contains(r#"LOWER("stores"."city") = 'berlin'"#), "{}", sql);
    }

    #[test]
    fn test_no_join_without_store_predicates() {
        let filter = PriceObservationFilter {
            store_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(!filter.needs_store_join());
        assert!(!sql(&filter).contains("JOIN"));
    }

    #[test]
    fn test_page_adds_order_limit_offset() {
        let page = PageRequest {
            page: 2,
            size: 10,
            sort: PriceSortField::Price,
            direction: SortDirection::Asc,
        };
        let sql = select_page(&PriceObservationFilter::default(), &page)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#"ORDER BY "price_observations"."price" ASC"#), "{}", sql);
        assert!(sql.contains("LIMIT 10"), "{}", sql);
        assert!(sql.contains("OFFSET 20"), "{}", sql);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let filter = PriceObservationFilter::default().between(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        );
        assert!(filter.validate().is_err());
    }
}
