use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use crate::{
    application::usecases::create_customer::CreateCustomerRequest,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        errors::map_domain_error,
        mappers::map_customer,
        requests::CreateCustomerRequestDto,
        responses::{CreatedCustomerResponse, CustomerDto, DeletedResponse},
    },
};

#[derive(Clone)]
pub struct CustomersEndpoints {
    state: Arc<ApiState>,
}

impl CustomersEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl CustomersEndpoints {
    #[oai(path = "/customers", method = "post", tag = EndpointsTags::Customers)]
    pub async fn create_customer(
        &self,
        request: Json<CreateCustomerRequestDto>,
    ) -> PoemResult<CreatedCustomerResponse> {
        let request = request.0;
        let customer = self
            .state
            .create_customer_usecase
            .execute(CreateCustomerRequest {
                phone: request.phone,
                first_name: request.first_name,
                last_name: request.last_name,
                location: request.location,
                preferred_product: request.preferred_product,
            })
            .await
            .map_err(map_domain_error)?;

        Ok(CreatedCustomerResponse::Created(Json(map_customer(
            &customer,
        ))))
    }

    #[oai(path = "/customers/:id", method = "get", tag = EndpointsTags::Customers)]
    pub async fn get_customer(&self, id: Path<Uuid>) -> PoemResult<Json<CustomerDto>> {
        let customer = self
            .state
            .get_customer_usecase
            .execute(id.0)
            .await
            .map_err(map_domain_error)?;

        Ok(Json(map_customer(&customer)))
    }

    /// Also removes every outbound message addressed to the customer
    #[oai(path = "/customers/:id", method = "delete", tag = EndpointsTags::Customers)]
    pub async fn delete_customer(&self, id: Path<Uuid>) -> PoemResult<DeletedResponse> {
        self.state
            .delete_customer_usecase
            .execute(id.0)
            .await
            .map_err(map_domain_error)?;

        Ok(DeletedResponse::NoContent)
    }
}
