use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use chrono::NaiveDate;
use tower::Service;
use uuid::Uuid;

use crate::{
    domain::LoyaltySummary,
    ports::{customer::CustomerStore, order::OrderStore},
};

use super::{DomainLogic, Error};

pub struct GetSummaryRequest {
    pub customer_id: Uuid,
    /// First purchase date included in the monthly breakdown
    pub start_date: NaiveDate,
    /// Last purchase date included in the monthly breakdown
    pub end_date: NaiveDate,
}

impl<C, O> Service<GetSummaryRequest> for DomainLogic<C, O>
where
    C: CustomerStore + Send + Sync + 'static,
    O: OrderStore + Send + Sync + 'static,
{
    type Response = LoyaltySummary;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: GetSummaryRequest) -> Self::Future {
        let customers = self.customers.clone();
        let orders = self.orders.clone();
        Box::pin(async move {
            if req.start_date > req.end_date {
                return Err(Error::InvalidInput(
                    format!(
                        "start date {} is after end date {}",
                        req.start_date, req.end_date
                    )
                    .into(),
                ));
            }

            let customer = customers.find_by_id(req.customer_id).await?;

            // A zero balance means nothing has ever been awarded; the
            // programme reports that as not-found rather than as an empty
            // summary.
            if customer.points_balance == 0 {
                return Err(Error::NoPointsAwarded(customer.customer_id));
            }

            let customer_orders = orders.find_by_customer(customer.customer_id).await?;
            tracing::debug!(
                customer_id = %customer.customer_id,
                order_count = customer_orders.len(),
                "building loyalty summary",
            );

            Ok(LoyaltySummary::build(
                customer,
                &customer_orders,
                req.start_date,
                req.end_date,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Customer, MonthlyBucket, Order, TierConfig},
        ports::{customer::MockCustomerStore, order::MockOrderStore},
    };
    use mockall::predicate::*;
    use rstest::*;
    use rust_decimal_macros::dec;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::{BoxError, ServiceExt};

    #[fixture]
    fn customer_id() -> Uuid {
        Uuid::new_v4()
    }

    fn customer(customer_id: Uuid, points_balance: u32) -> Customer {
        Customer {
            customer_id,
            name: "John Doe".to_string(),
            email: "johndoe@yahoo.com".to_string(),
            address: "Cochin, Kerala".to_string(),
            points_balance,
        }
    }

    fn date(ymd: &str) -> NaiveDate {
        ymd.parse().expect("valid test date")
    }

    fn request(customer_id: Uuid, start: &str, end: &str) -> GetSummaryRequest {
        GetSummaryRequest {
            customer_id,
            start_date: date(start),
            end_date: date(end),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_call(customer_id: Uuid) -> Result<(), BoxError> {
        // GIVEN a customer with a 270-point lifetime balance and two January
        // orders
        let mut customers = MockCustomerStore::new();
        customers
            .expect_find_by_id()
            .times(1)
            .with(eq(customer_id))
            .returning(move |_| Ok(customer(customer_id, 270)));
        let mut orders = MockOrderStore::new();
        orders
            .expect_find_by_customer()
            .times(1)
            .with(eq(customer_id))
            .returning(move |_| {
                Ok(vec![
                    Order::new(customer_id, dec!(100), 50, date("2023-01-15")),
                    Order::new(customer_id, dec!(120), 90, date("2023-01-15")),
                ])
            });

        let mut domain = DomainLogic::new(
            Arc::new(customers),
            Arc::new(orders),
            TierConfig::default(),
        );

        // WHEN requesting the summary for January
        let res = ServiceExt::<GetSummaryRequest>::ready(&mut domain)
            .await?
            .call(request(customer_id, "2023-01-01", "2023-02-01"))
            .await;

        // THEN the buckets hold the window's points while the total stays the
        // lifetime balance
        assert_that!(res).is_ok().matches(|summary| {
            summary.monthly_points
                == vec![MonthlyBucket {
                    year: 2023,
                    month: 1,
                    points: 140,
                }]
                && summary.total_points == 270
        });

        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_call_zero_balance(customer_id: Uuid) -> Result<(), BoxError> {
        // GIVEN a customer that has never been awarded points; the order
        // store must not even be consulted
        let mut customers = MockCustomerStore::new();
        customers
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(customer(customer_id, 0)));

        let mut domain = DomainLogic::new(
            Arc::new(customers),
            Arc::new(MockOrderStore::new()),
            TierConfig::default(),
        );

        // WHEN requesting the summary
        let res = ServiceExt::<GetSummaryRequest>::ready(&mut domain)
            .await?
            .call(request(customer_id, "2023-01-01", "2023-02-01"))
            .await;

        // THEN it fails as nothing-to-report
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::NoPointsAwarded(id) if *id == customer_id));

        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_call_unknown_customer(customer_id: Uuid) -> Result<(), BoxError> {
        let mut customers = MockCustomerStore::new();
        customers
            .expect_find_by_id()
            .times(1)
            .returning(move |id| Err(crate::ports::customer::Error::NotFound(id)));

        let mut domain = DomainLogic::new(
            Arc::new(customers),
            Arc::new(MockOrderStore::new()),
            TierConfig::default(),
        );

        let res = ServiceExt::<GetSummaryRequest>::ready(&mut domain)
            .await?
            .call(request(customer_id, "2023-01-01", "2023-02-01"))
            .await;

        assert_that!(res).is_err().matches(|err| {
            matches!(err, Error::Customer(crate::ports::customer::Error::NotFound(_)))
        });

        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_call_malformed_date_range(customer_id: Uuid) -> Result<(), BoxError> {
        // GIVEN stores that expect no calls at all
        let mut domain = DomainLogic::new(
            Arc::new(MockCustomerStore::new()),
            Arc::new(MockOrderStore::new()),
            TierConfig::default(),
        );

        // WHEN requesting a summary whose window ends before it starts
        let res = ServiceExt::<GetSummaryRequest>::ready(&mut domain)
            .await?
            .call(request(customer_id, "2023-02-01", "2023-01-01"))
            .await;

        // THEN the request is rejected up front
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::InvalidInput(_)));

        Ok(())
    }
}
