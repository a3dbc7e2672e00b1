//! Cart business logic - The in-memory order being rung up.
//!
//! A [`Cart`] holds one line per product, in insertion order, together with
//! derived totals. All mutation is synchronous and single-threaded; the
//! stock-ceiling checks run against the `stock_quantity` snapshot captured
//! when the product was added, and the authoritative check happens later as
//! a conditional decrement inside the checkout transaction
//! (see [`crate::core::inventory::decrement_stock`]).

use crate::{
    entities::product,
    errors::{Error, Result},
};

/// Fixed sales tax rate applied to the cart subtotal.
pub const TAX_RATE: f64 = 0.08;

/// One line of the in-progress order.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Snapshot of the product taken when the line was created
    pub product: product::Model,
    /// Units on this line, always >= 1
    pub quantity: i32,
    /// quantity x unit price, recomputed on every mutation
    pub subtotal: f64,
}

/// The in-progress order: an ordered collection of lines, one per product.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Read-only view of the lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// True when no lines are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct product lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Adds one unit of `product` to the cart.
    ///
    /// A new line starts at quantity 1; an existing line is bumped by 1.
    /// The line quantity never exceeds the product's stock snapshot.
    ///
    /// # Errors
    /// - [`Error::OutOfStock`] if the snapshot stock is zero or less
    /// - [`Error::InsufficientStock`] if the line is already at the ceiling
    pub fn add_item(&mut self, product: &product::Model) -> Result<()> {
        if product.stock_quantity <= 0 {
            return Err(Error::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            if line.quantity >= line.product.stock_quantity {
                return Err(Error::InsufficientStock {
                    name: line.product.name.clone(),
                    requested: line.quantity + 1,
                    available: line.product.stock_quantity,
                });
            }
            line.quantity += 1;
            line.subtotal = f64::from(line.quantity) * line.product.price;
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
                subtotal: product.price,
            });
        }

        Ok(())
    }

    /// Bumps an existing line by one unit, subject to the stock ceiling.
    ///
    /// # Errors
    /// - [`Error::ProductNotInCart`] if there is no line for `product_id`
    /// - [`Error::InsufficientStock`] if the line is already at the ceiling
    pub fn increase_quantity(&mut self, product_id: i64) -> Result<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product.id == product_id)
            .ok_or(Error::ProductNotInCart { product_id })?;

        if line.quantity >= line.product.stock_quantity {
            return Err(Error::InsufficientStock {
                name: line.product.name.clone(),
                requested: line.quantity + 1,
                available: line.product.stock_quantity,
            });
        }

        line.quantity += 1;
        line.subtotal = f64::from(line.quantity) * line.product.price;
        Ok(())
    }

    /// Drops an existing line by one unit, with a floor of 1.
    ///
    /// At the floor this is a no-op; removing the line entirely is the
    /// explicit [`Cart::remove_item`] operation. Unknown products are
    /// ignored, matching the floor behavior.
    pub fn decrease_quantity(&mut self, product_id: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            if line.quantity > 1 {
                line.quantity -= 1;
                line.subtotal = f64::from(line.quantity) * line.product.price;
            }
        }
    }

    /// Removes the whole line for `product_id`, regardless of quantity.
    pub fn remove_item(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(|l| l.subtotal).sum()
    }

    /// Tax due on the current subtotal.
    #[must_use]
    pub fn tax(&self) -> f64 {
        self.subtotal() * TAX_RATE
    }

    /// Subtotal plus tax.
    #[must_use]
    pub fn grand_total(&self) -> f64 {
        self.subtotal() + self.tax()
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
