use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{errors::DomainError, models::Customer, repositories::CustomerRepository};

pub struct CreateCustomerUseCase {
    repo: Arc<dyn CustomerRepository>,
}

pub struct CreateCustomerRequest {
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub preferred_product: Option<String>,
}

impl CreateCustomerUseCase {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, request: CreateCustomerRequest) -> Result<Customer, DomainError> {
        let phone = request.phone.trim();
        if phone.is_empty() {
            return Err(DomainError::InvalidInput("phone is required".to_string()));
        }

        if self.repo.find_by_phone(phone).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "customer with phone {phone} already exists"
            )));
        }

        let customer = Customer {
            id: Uuid::new_v4(),
            phone: phone.to_string(),
            first_name: non_blank(request.first_name),
            last_name: non_blank(request.last_name),
            location: non_blank(request.location),
            preferred_product: non_blank(request.preferred_product),
            created_at: Utc::now(),
        };

        // a concurrent create can still win the unique phone index
        self.repo
            .create(&customer)
            .await
            .map_err(DomainError::from_store)?;

        info!(customer_id = %customer.id, "customer created");

        Ok(customer)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
