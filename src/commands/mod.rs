use std::{borrow::Cow, sync::Arc};

use crate::domain::TierConfig;

pub mod create_customer;
pub mod create_order;
pub mod get_balance;
pub mod get_customer;
pub mod get_order;
pub mod get_summary;
pub mod list_orders;
pub mod update_customer;

/// Shared state behind every command service.
///
/// Generic over the two store ports so commands can run against any adapter,
/// including mocks in tests.
pub struct DomainLogic<C, O> {
    customers: Arc<C>,
    orders: Arc<O>,
    tiers: TierConfig,
}

impl<C, O> DomainLogic<C, O> {
    pub fn new(customers: Arc<C>, orders: Arc<O>, tiers: TierConfig) -> Self {
        Self {
            customers,
            orders,
            tiers,
        }
    }
}

/// Manual impl: `Clone` must not require `C: Clone` or `O: Clone`.
impl<C, O> Clone for DomainLogic<C, O> {
    fn clone(&self) -> Self {
        Self {
            customers: self.customers.clone(),
            orders: self.orders.clone(),
            tiers: self.tiers,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("customer store error: {0:?}")]
    Customer(#[from] crate::ports::customer::Error),
    #[error("order store error: {0:?}")]
    Order(#[from] crate::ports::order::Error),

    /// The customer exists but has never been awarded any points
    #[error("no loyalty points awarded for customer {0} yet")]
    NoPointsAwarded(uuid::Uuid),

    /// The customer exists but has no orders
    #[error("no orders found for customer {0}")]
    NoOrders(uuid::Uuid),

    #[error("invalid input: {0}")]
    InvalidInput(Cow<'static, str>),
}
