use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Customer name must not be empty")]
    EmptyCustomerName,

    #[error("Query text must not be empty")]
    EmptyQuery,

    #[error("Weight must be a positive number, got {0}")]
    InvalidWeight(f64),

    #[error("Unit price must be a positive number, got {0}")]
    InvalidUnitPrice(f64),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
