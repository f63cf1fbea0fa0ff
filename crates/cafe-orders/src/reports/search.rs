//! Case-insensitive text search over the menu and placed orders.

use super::Reports;
use crate::coordinator::OrderServiceError;
use crate::model::{CustomerId, MenuItem, Order, OrderId};
use actor_framework::ActorClient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// What to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchFilter {
    Menu,
    Orders,
    #[default]
    All,
}

impl SearchFilter {
    fn menu(self) -> bool {
        matches!(self, SearchFilter::Menu | SearchFilter::All)
    }

    fn orders(self) -> bool {
        matches!(self, SearchFilter::Orders | SearchFilter::All)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub filter: SearchFilter,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn only(mut self, filter: SearchFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn priced_between(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    fn in_range(&self, price: Decimal) -> bool {
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

/// One matching order line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderHit {
    pub order_id: OrderId,
    pub customer_name: String,
    pub item_name: String,
    /// The captured unit price of the line.
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub menu_items: Vec<MenuItem>,
    pub orders: Vec<OrderHit>,
}

impl Reports {
    /// Menu items match on name or description and are filtered on their price.
    /// Order lines match on the customer's full name or the item name and are
    /// filtered on the captured unit price.
    ///
    /// Empty text, or a minimum above the maximum, is a `Validation` error.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults, OrderServiceError> {
        let needle = query.text.trim().to_lowercase();
        if needle.is_empty() {
            return Err(OrderServiceError::Validation(
                "search text must not be empty".to_string(),
            ));
        }
        if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
            if min > max {
                return Err(OrderServiceError::Validation(format!(
                    "minimum price {min} is above maximum price {max}"
                )));
            }
        }

        let mut results = SearchResults::default();
        if query.filter.menu() {
            results.menu_items = match_menu(self.menu.list().await?, &needle, query);
        }
        if query.filter.orders() {
            let names: HashMap<CustomerId, String> = self
                .customers
                .list()
                .await?
                .into_iter()
                .map(|customer| (customer.id, customer.full_name))
                .collect();
            results.orders = match_orders(&self.orders.list().await?, &names, &needle, query);
        }
        debug!(
            menu = results.menu_items.len(),
            orders = results.orders.len(),
            "Search done"
        );
        Ok(results)
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn match_menu(items: Vec<MenuItem>, needle: &str, query: &SearchQuery) -> Vec<MenuItem> {
    items
        .into_iter()
        .filter(|item| contains(&item.name, needle) || contains(&item.description, needle))
        .filter(|item| query.in_range(item.price))
        .collect()
}

fn match_orders(
    orders: &[Order],
    names: &HashMap<CustomerId, String>,
    needle: &str,
    query: &SearchQuery,
) -> Vec<OrderHit> {
    let mut hits = Vec::new();
    for order in orders {
        let customer_name = names
            .get(&order.customer_id)
            .map(String::as_str)
            .unwrap_or_default();
        let customer_matches = contains(customer_name, needle);
        for line in &order.lines {
            if (customer_matches || contains(&line.item_name, needle))
                && query.in_range(line.unit_price)
            {
                hits.push(OrderHit {
                    order_id: order.id,
                    customer_name: customer_name.to_string(),
                    item_name: line.item_name.clone(),
                    unit_price: line.unit_price,
                });
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_bounds_are_inclusive() {
        let query = SearchQuery::new("x").priced_between(Some(dec!(3)), Some(dec!(4)));
        assert!(query.in_range(dec!(3)));
        assert!(query.in_range(dec!(4)));
        assert!(!query.in_range(dec!(4.01)));
        assert!(SearchQuery::new("x").in_range(dec!(1000)));
    }

    #[test]
    fn default_filter_searches_everything() {
        let filter = SearchFilter::default();
        assert!(filter.menu() && filter.orders());
        assert!(!SearchFilter::Menu.orders());
    }
}
