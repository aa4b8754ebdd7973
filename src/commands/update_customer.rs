use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use uuid::Uuid;

use crate::{domain::Customer, ports::customer::CustomerStore};

use super::{DomainLogic, Error};

pub struct UpdateCustomerRequest {
    /// Identifier of the customer being updated
    pub customer_id: Uuid,
    /// New profile data; its identifier must match `customer_id`
    pub customer: Customer,
}

impl<C, O> Service<UpdateCustomerRequest> for DomainLogic<C, O>
where
    C: CustomerStore + Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    type Response = Customer;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: UpdateCustomerRequest) -> Self::Future {
        let customers = self.customers.clone();
        Box::pin(async move {
            if req.customer.customer_id != req.customer_id {
                return Err(Error::InvalidInput(
                    format!(
                        "customer id {} does not match payload id {}",
                        req.customer_id, req.customer.customer_id
                    )
                    .into(),
                ));
            }

            let existing = customers.find_by_id(req.customer_id).await?;

            // Only the profile is updatable. The balance belongs to the
            // accrual path and cannot be set through an update.
            let customer = Customer {
                points_balance: existing.points_balance,
                ..req.customer
            };

            Ok(customers.save(customer).await?)
        })
    }
}
