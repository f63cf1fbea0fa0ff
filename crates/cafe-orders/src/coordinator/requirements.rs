//! Pure arithmetic of a placement: what an order consumes and what it costs.

use super::{OrderLineRequest, OrderServiceError};
use crate::model::{IngredientId, MenuItem, MenuItemId, OrderLine};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// One version of every menu item an order references, keyed by id.
pub type MenuSnapshot = BTreeMap<MenuItemId, MenuItem>;

/// Total quantity of each ingredient the order consumes, summed across lines.
///
/// Lines naming the same menu item (or different items sharing an ingredient)
/// accumulate. Ingredients whose total is zero are left out. Lines whose item is
/// missing from `menu` contribute nothing; resolve the snapshot first.
///
/// A total that does not fit in a `Decimal` is a `Validation` error.
pub fn required_ingredients(
    lines: &[OrderLineRequest],
    menu: &MenuSnapshot,
) -> Result<BTreeMap<IngredientId, Decimal>, OrderServiceError> {
    let mut required: BTreeMap<IngredientId, Decimal> = BTreeMap::new();
    for line in lines {
        let Some(item) = menu.get(&line.menu_item_id) else {
            continue;
        };
        for entry in &item.bill_of_materials {
            let total = required.entry(entry.ingredient_id).or_insert(Decimal::ZERO);
            let so_far = *total;
            *total = entry
                .quantity
                .checked_mul(Decimal::from(line.quantity))
                .and_then(|amount| so_far.checked_add(amount))
                .ok_or_else(|| {
                    OrderServiceError::Validation(format!(
                        "required quantity of {} is out of range",
                        entry.ingredient_id
                    ))
                })?;
        }
    }
    required.retain(|_, amount| !amount.is_zero());
    Ok(required)
}

/// Order lines with name and unit price captured from the snapshot, in request order.
///
/// Fails with `Validation` when a line total or the order total would overflow, so
/// the store is never handed a draft it cannot price.
pub fn price_lines(
    lines: &[OrderLineRequest],
    menu: &MenuSnapshot,
) -> Result<Vec<OrderLine>, OrderServiceError> {
    let priced: Vec<OrderLine> = lines
        .iter()
        .filter_map(|line| {
            menu.get(&line.menu_item_id).map(|item| OrderLine {
                menu_item_id: item.id,
                item_name: item.name.clone(),
                quantity: line.quantity,
                customizations: line.customizations.clone(),
                unit_price: item.price,
            })
        })
        .collect();

    let mut total = Decimal::ZERO;
    for line in &priced {
        total = line
            .line_total()
            .and_then(|amount| total.checked_add(amount))
            .ok_or_else(|| {
                OrderServiceError::Validation(format!(
                    "price of {} × {} is out of range",
                    line.quantity, line.item_name
                ))
            })?;
    }
    Ok(priced)
}
