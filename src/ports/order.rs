use uuid::Uuid;

use crate::domain::{Customer, Order};

#[mockall::automock]
#[async_trait::async_trait]
pub trait OrderStore {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Order, Error>;

    /// All orders belonging to a customer, oldest purchase first.
    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, Error>;

    /// Persists `order` and accrues its earned points onto the owning
    /// customer's balance as one unit of work.
    ///
    /// Implementations must apply both writes atomically: either the order
    /// exists and the balance reflects its points, or neither write is
    /// retained. The balance update must be an increment (`balance += delta`),
    /// not a read-modify-write, so that concurrent accruals for the same
    /// customer never lose an update.
    async fn record(&self, order: Order) -> Result<(Order, Customer), Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Domain-level error when an order does not exist
    #[error("order {0} does not exist")]
    NotFound(Uuid),

    /// The customer an order should accrue onto does not exist
    #[error("customer {0} does not exist")]
    CustomerNotFound(Uuid),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
