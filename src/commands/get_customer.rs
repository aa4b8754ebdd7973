use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use uuid::Uuid;

use crate::{domain::Customer, ports::customer::CustomerStore};

use super::{DomainLogic, Error};

pub struct GetCustomerRequest {
    pub customer_id: Uuid,
}

impl<C, O> Service<GetCustomerRequest> for DomainLogic<C, O>
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

    fn call(&mut self, req: GetCustomerRequest) -> Self::Future {
        let customers = self.customers.clone();
        Box::pin(async move { Ok(customers.find_by_id(req.customer_id).await?) })
    }
}
