//! [`ActorEntity`] implementation for [`Customer`].

use super::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

/// Customers have no custom actions.
#[derive(Debug)]
pub enum CustomerAction {}

fn require_name(full_name: &str) -> Result<(), CustomerError> {
    if full_name.trim().is_empty() {
        return Err(CustomerError::Validation(
            "full name must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = CustomerAction;
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, CustomerError> {
        require_name(&params.full_name)?;
        let now = Utc::now();
        Ok(Self {
            id,
            full_name: params.full_name,
            phone_number: params.phone_number,
            email: params.email,
            preferences: params.preferences,
            created_at: now,
            updated_at: now,
        })
    }

    fn id(&self) -> &CustomerId {
        &self.id
    }

    async fn on_update(&mut self, update: CustomerUpdate, _ctx: &()) -> Result<(), CustomerError> {
        if let Some(full_name) = update.full_name {
            require_name(&full_name)?;
            self.full_name = full_name;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(preferences) = update.preferences {
            self.preferences = preferences;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, action: CustomerAction, _ctx: &()) -> Result<(), CustomerError> {
        match action {}
    }
}
