use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use uuid::Uuid;

use crate::{domain::Customer, ports::customer::CustomerStore};

use super::{DomainLogic, Error};

pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl<C, O> Service<CreateCustomerRequest> for DomainLogic<C, O>
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

    fn call(&mut self, req: CreateCustomerRequest) -> Self::Future {
        let customers = self.customers.clone();
        Box::pin(async move {
            // New customers join the programme with an empty balance; points
            // only arrive through order accrual.
            let customer = Customer {
                customer_id: Uuid::new_v4(),
                name: req.name,
                email: req.email,
                address: req.address,
                points_balance: 0,
            };
            let customer = customers.save(customer).await?;
            tracing::debug!(customer_id = %customer.customer_id, "created customer");

            Ok(customer)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::store::memory::MemoryStore, domain::TierConfig};
    use rstest::*;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::{BoxError, ServiceExt};

    #[rstest]
    #[tokio::test]
    async fn test_call() -> Result<(), BoxError> {
        let store = Arc::new(MemoryStore::default());
        let mut domain = DomainLogic::new(store.clone(), store.clone(), TierConfig::default());

        let req = CreateCustomerRequest {
            name: "John Doe".to_string(),
            email: "johndoe@yahoo.com".to_string(),
            address: "Cochin, Kerala".to_string(),
        };
        let res = ServiceExt::<CreateCustomerRequest>::ready(&mut domain)
            .await?
            .call(req)
            .await;

        // The customer is persisted with a zero balance
        let created = res?;
        assert_that!(created.points_balance).is_equal_to(0);
        let stored = store.find_by_id(created.customer_id).await;
        assert_that!(stored).is_ok().is_equal_to(created);

        Ok(())
    }
}
