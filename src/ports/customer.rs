use uuid::Uuid;

use crate::domain::Customer;

#[mockall::automock]
#[async_trait::async_trait]
pub trait CustomerStore {
    async fn find_by_id(&self, customer_id: Uuid) -> Result<Customer, Error>;
    async fn save(&self, customer: Customer) -> Result<Customer, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Domain-level error when a customer does not exist
    #[error("customer {0} does not exist")]
    NotFound(Uuid),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
