use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{errors::DomainError, models::Customer, repositories::CustomerRepository};

pub struct GetCustomerUseCase {
    repo: Arc<dyn CustomerRepository>,
}

impl GetCustomerUseCase {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, customer_id: Uuid) -> Result<Customer, DomainError> {
        self.repo
            .get(customer_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("customer {customer_id} not found")))
    }
}
