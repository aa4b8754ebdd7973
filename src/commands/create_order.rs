use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tower::Service;
use uuid::Uuid;

use crate::{
    domain::Order,
    ports::{customer::CustomerStore, order::OrderStore},
};

use super::{DomainLogic, Error};

pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    /// Total purchase amount; must be non-negative
    pub amount: Decimal,
    pub order_date: NaiveDate,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CreateOrderResponse {
    pub order: Order,
    /// Customer's lifetime balance after this accrual
    pub new_balance: u32,
}

impl<C, O> Service<CreateOrderRequest> for DomainLogic<C, O>
where
    C: CustomerStore + Send + Sync + 'static,
    O: OrderStore + Send + Sync + 'static,
{
    type Response = CreateOrderResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: CreateOrderRequest) -> Self::Future {
        let customers = self.customers.clone();
        let orders = self.orders.clone();
        let tiers = self.tiers;
        Box::pin(async move {
            if req.amount < Decimal::ZERO {
                return Err(Error::InvalidInput(
                    format!("negative order amount: {}", req.amount).into(),
                ));
            }

            let customer = customers.find_by_id(req.customer_id).await?;

            // Computed exactly once; the stored value never changes, even if
            // the tier configuration does.
            let earned_points = tiers.points_for(req.amount);
            tracing::debug!(
                customer_id = %customer.customer_id,
                amount = %req.amount,
                earned_points,
                "calculated loyalty points for order",
            );

            // The store applies the order insert and the balance increment as
            // one atomic unit of work.
            let order = Order::new(customer.customer_id, req.amount, earned_points, req.order_date);
            let (order, customer) = orders.record(order).await?;

            Ok(CreateOrderResponse {
                order,
                new_balance: customer.points_balance,
            })
        })
    }
}
