use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{errors::DomainError, repositories::CustomerRepository};

pub struct DeleteCustomerUseCase {
    repo: Arc<dyn CustomerRepository>,
}

impl DeleteCustomerUseCase {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, customer_id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(customer_id).await? {
            return Err(DomainError::NotFound(format!(
                "customer {customer_id} not found"
            )));
        }
        info!(customer_id = %customer_id, "customer deleted");
        Ok(())
    }
}
