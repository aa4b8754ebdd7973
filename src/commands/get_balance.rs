use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use uuid::Uuid;

use crate::ports::customer::CustomerStore;

use super::{DomainLogic, Error};

pub struct GetBalanceRequest {
    pub customer_id: Uuid,
}

#[derive(Debug, PartialEq, Eq)]
pub struct GetBalanceResponse {
    pub customer_id: Uuid,
    /// Lifetime number of accrued loyalty points
    pub points_balance: u32,
}

impl<C, O> Service<GetBalanceRequest> for DomainLogic<C, O>
where
    C: CustomerStore + Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    type Response = GetBalanceResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: GetBalanceRequest) -> Self::Future {
        let customers = self.customers.clone();
        Box::pin(async move {
            let customer = customers.find_by_id(req.customer_id).await?;
            tracing::debug!(
                customer_id = %customer.customer_id,
                points_balance = customer.points_balance,
                "fetched loyalty balance",
            );

            Ok(GetBalanceResponse {
                customer_id: customer.customer_id,
                points_balance: customer.points_balance,
            })
        })
    }
}
