use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use uuid::Uuid;

use crate::{domain::Order, ports::order::OrderStore};

use super::{DomainLogic, Error};

pub struct GetOrderRequest {
    pub order_id: Uuid,
}

impl<C, O> Service<GetOrderRequest> for DomainLogic<C, O>
where
    C: Send + Sync + 'static,
    O: OrderStore + Send + Sync + 'static,
{
    type Response = Order;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: GetOrderRequest) -> Self::Future {
        let orders = self.orders.clone();
        Box::pin(async move { Ok(orders.find_by_id(req.order_id).await?) })
    }
}
