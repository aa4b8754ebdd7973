use crate::{
    domain::{Customer, Order},
    ports::{
        customer::{self, CustomerStore},
        order::{self, OrderStore},
    },
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use uuid::Uuid;

/// In-memory store implementing both the customer and the order port.
///
/// Both entity maps live behind a single mutex so that [`OrderStore::record`]
/// can insert the order and bump the customer's balance in one lock
/// acquisition, which makes the accrual atomic and immune to lost updates.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    customers: HashMap<Uuid, Customer>,
    orders: HashMap<Uuid, Order>,
}

#[async_trait::async_trait]
impl CustomerStore for MemoryStore {
    async fn find_by_id(&self, customer_id: Uuid) -> Result<Customer, customer::Error> {
        self.inner
            .lock()?
            .customers
            .get(&customer_id)
            .cloned()
            .ok_or(customer::Error::NotFound(customer_id))
    }

    async fn save(&self, customer: Customer) -> Result<Customer, customer::Error> {
        self.inner
            .lock()?
            .customers
            .insert(customer.customer_id, customer.clone());

        Ok(customer)
    }
}

#[async_trait::async_trait]
impl OrderStore for MemoryStore {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Order, order::Error> {
        self.inner
            .lock()?
            .orders
            .get(&order_id)
            .cloned()
            .ok_or(order::Error::NotFound(order_id))
    }

    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, order::Error> {
        let mut orders: Vec<Order> = self
            .inner
            .lock()?
            .orders
            .values()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary, so impose one
        orders.sort_by(|a, b| (a.order_date, a.order_id).cmp(&(b.order_date, b.order_id)));

        Ok(orders)
    }

    async fn record(&self, order: Order) -> Result<(Order, Customer), order::Error> {
        let mut state = self.inner.lock()?;

        // Both writes happen under the same lock acquisition, so no accrual
        // can interleave between the order insert and the balance increment,
        // and a missing customer leaves the state untouched.
        let customer = state
            .customers
            .get_mut(&order.customer_id)
            .ok_or(order::Error::CustomerNotFound(order.customer_id))?;
        customer.points_balance = customer.points_balance.saturating_add(order.earned_points);
        let customer = customer.clone();
        state.orders.insert(order.order_id, order.clone());

        Ok((order, customer))
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

/// We need to create custom `From` implementations here for an error that's specific to this
/// adapter.
impl<T> From<PoisonError<T>> for customer::Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}

impl<T> From<PoisonError<T>> for order::Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
