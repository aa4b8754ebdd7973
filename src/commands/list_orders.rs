use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use uuid::Uuid;

use crate::{
    domain::Order,
    ports::{customer::CustomerStore, order::OrderStore},
};

use super::{DomainLogic, Error};

pub struct ListOrdersRequest {
    pub customer_id: Uuid,
}

impl<C, O> Service<ListOrdersRequest> for DomainLogic<C, O>
where
    C: CustomerStore + Send + Sync + 'static,
    O: OrderStore + Send + Sync + 'static,
{
    type Response = Vec<Order>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ListOrdersRequest) -> Self::Future {
        let customers = self.customers.clone();
        let orders = self.orders.clone();
        Box::pin(async move {
            let customer = customers.find_by_id(req.customer_id).await?;
            let customer_orders = orders.find_by_customer(customer.customer_id).await?;
            if customer_orders.is_empty() {
                return Err(Error::NoOrders(customer.customer_id));
            }

            Ok(customer_orders)
        })
    }
}
