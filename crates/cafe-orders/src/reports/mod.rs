//! # Reporting & Search
//!
//! Read-only views over the order store, the menu and the customer registry.
//! Nothing here takes a claim: each report works on the lists as they were when it
//! read them.

mod search;

pub use search::*;

use crate::clients::{CustomerClient, MenuClient, OrderClient};
use crate::coordinator::OrderServiceError;
use crate::model::{Order, OrderStatus};
use actor_framework::ActorClient;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::instrument;

/// How many items [`Reports::popular_items`] returns when asked for the default.
pub const DEFAULT_POPULAR_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularItem {
    pub item_name: String,
    /// Number of order lines naming the item.
    pub ordered_times: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// 1 = January.
    pub month: u32,
    pub orders: usize,
}

#[derive(Clone)]
pub struct Reports {
    customers: CustomerClient,
    menu: MenuClient,
    orders: OrderClient,
}

impl Reports {
    pub fn new(customers: CustomerClient, menu: MenuClient, orders: OrderClient) -> Self {
        Self {
            customers,
            menu,
            orders,
        }
    }

    async fn all_orders(&self) -> Result<Vec<Order>, OrderServiceError> {
        Ok(self.orders.list().await?)
    }

    /// Sum of the totals of COMPLETED orders; zero when there are none.
    #[instrument(skip(self))]
    pub async fn total_revenue(&self) -> Result<Decimal, OrderServiceError> {
        self.all_orders()
            .await?
            .iter()
            .filter(|order| order.status == OrderStatus::Completed)
            .try_fold(Decimal::ZERO, |total, order| {
                total.checked_add(order.total_price)
            })
            .ok_or_else(|| {
                OrderServiceError::Validation("revenue exceeds the representable amount".to_string())
            })
    }

    /// Item names by how many order lines reference them, most popular first, ties
    /// by name.
    #[instrument(skip(self))]
    pub async fn popular_items(&self, limit: usize) -> Result<Vec<PopularItem>, OrderServiceError> {
        let orders = self.all_orders().await?;
        Ok(rank_items(&orders, limit))
    }

    /// Orders placed on each day of `month`, one entry per calendar day.
    #[instrument(skip(self))]
    pub async fn orders_by_day(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailyCount>, OrderServiceError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            OrderServiceError::Validation(format!("{year}-{month} is not a valid month"))
        })?;
        let orders = self.all_orders().await?;
        Ok(count_by_day(&orders, first))
    }

    /// Orders placed in each month of `year`; always twelve entries.
    #[instrument(skip(self))]
    pub async fn orders_by_month(&self, year: i32) -> Result<Vec<MonthlyCount>, OrderServiceError> {
        let orders = self.all_orders().await?;
        let mut counts = [0usize; 12];
        for order in orders.iter().filter(|order| order.created_at.year() == year) {
            counts[order.created_at.month0() as usize] += 1;
        }
        Ok(counts
            .iter()
            .zip(1..)
            .map(|(&orders, month)| MonthlyCount { month, orders })
            .collect())
    }
}

fn rank_items(orders: &[Order], limit: usize) -> Vec<PopularItem> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for line in orders.iter().flat_map(|order| &order.lines) {
        *counts.entry(line.item_name.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<PopularItem> = counts
        .into_iter()
        .map(|(name, ordered_times)| PopularItem {
            item_name: name.to_string(),
            ordered_times,
        })
        .collect();
    // stable sort keeps the BTreeMap's name order among equal counts
    ranked.sort_by(|a, b| b.ordered_times.cmp(&a.ordered_times));
    ranked.truncate(limit);
    ranked
}

fn count_by_day(orders: &[Order], first: NaiveDate) -> Vec<DailyCount> {
    let mut days: BTreeMap<NaiveDate, usize> = first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .map(|day| (day, 0))
        .collect();
    for order in orders {
        if let Some(count) = days.get_mut(&order.created_at.date_naive()) {
            *count += 1;
        }
    }
    days.into_iter()
        .map(|(date, orders)| DailyCount { date, orders })
        .collect()
}
