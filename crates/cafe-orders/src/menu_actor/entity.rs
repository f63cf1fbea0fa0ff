use super::MenuError;
use crate::model::{BomEntry, MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

/// Menu items have no custom actions; prices and recipes change through updates.
#[derive(Debug)]
pub enum MenuAction {}

fn validate_name(name: &str) -> Result<(), MenuError> {
    if name.trim().is_empty() {
        return Err(MenuError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), MenuError> {
    if price < Decimal::ZERO {
        return Err(MenuError::Validation(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}

fn validate_bom(bill_of_materials: &[BomEntry]) -> Result<(), MenuError> {
    match bill_of_materials
        .iter()
        .find(|entry| entry.quantity <= Decimal::ZERO)
    {
        Some(entry) => Err(MenuError::Validation(format!(
            "quantity of {} must be positive, got {}",
            entry.ingredient_id, entry.quantity
        ))),
        None => Ok(()),
    }
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = MenuAction;
    type ActionResult = ();
    type Context = ();
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, MenuError> {
        validate_name(&params.name)?;
        validate_price(params.price)?;
        validate_bom(&params.bill_of_materials)?;
        let now = Utc::now();
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            bill_of_materials: params.bill_of_materials,
            created_at: now,
            updated_at: now,
        })
    }

    fn id(&self) -> &MenuItemId {
        &self.id
    }

    async fn on_update(&mut self, update: MenuItemUpdate, _ctx: &()) -> Result<(), MenuError> {
        if let Some(name) = update.name {
            validate_name(&name)?;
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(bill_of_materials) = update.bill_of_materials {
            validate_bom(&bill_of_materials)?;
            self.bill_of_materials = bill_of_materials;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, action: MenuAction, _ctx: &()) -> Result<(), MenuError> {
        match action {}
    }
}
