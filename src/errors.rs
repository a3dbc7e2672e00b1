//! Unified error types for the POS core.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Callers that
//! need to decide how to present a failure (retry prompt, blocking dialog,
//! plain message) should branch on [`Error::kind`] rather than matching on
//! message text.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (missing file, bad TOML, empty required field).
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// A monetary amount was negative, NaN, or infinite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A quantity was zero or negative where at least 1 is required.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// Checkout or receipt preview was attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The product's stock snapshot is zero, so it cannot be added at all.
    #[error("'{name}' is out of stock")]
    OutOfStock {
        /// Product name
        name: String,
    },

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for '{name}': requested {requested}, available {available}")]
    InsufficientStock {
        /// Product name
        name: String,
        /// Quantity that was asked for
        requested: i32,
        /// Quantity actually available
        available: i32,
    },

    /// A cart mutation referenced a product with no line in the cart.
    #[error("Product {product_id} is not in the cart")]
    ProductNotInCart {
        /// The missing product id
        product_id: i64,
    },

    /// No product with the given id exists (or it has been deleted).
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// The missing product id
        id: i64,
    },

    /// A checkout was attempted without an open cash-drawer session.
    #[error("No active shift; start a shift before selling")]
    NoActiveShift,

    /// No shift with the given id exists.
    #[error("Shift not found: {id}")]
    ShiftNotFound {
        /// The missing shift id
        id: i64,
    },

    /// The shift exists but is not in the `active` state.
    #[error("Shift {id} is not active")]
    ShiftNotActive {
        /// The shift id
        id: i64,
    },

    /// The persisted receipt counter could not be interpreted.
    #[error("Receipt counter state is corrupt: {message}")]
    ReceiptCounterCorrupt {
        /// What was found instead of a counter value
        message: String,
    },

    /// Underlying SeaORM / SQLite failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (config file reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], used by presentation layers to
/// choose between "fix your input", "not there", and "try again later".
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was invalid; retrying unchanged will fail again.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// Stored state disagrees with what the operation requires.
    Conflict,
    /// The storage layer failed; the operation may succeed on retry.
    Storage,
}

impl Error {
    /// Classifies this error for presentation purposes.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidQuantity { .. }
            | Self::EmptyCart
            | Self::OutOfStock { .. }
            | Self::InsufficientStock { .. }
            | Self::ProductNotInCart { .. }
            | Self::NoActiveShift
            | Self::ShiftNotActive { .. } => ErrorKind::Validation,
            Self::ProductNotFound { .. } | Self::ShiftNotFound { .. } => ErrorKind::NotFound,
            Self::ReceiptCounterCorrupt { .. } => ErrorKind::Conflict,
            Self::Database(_) | Self::Io(_) => ErrorKind::Storage,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
