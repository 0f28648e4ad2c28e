//! Repository for the `carts` and `cart_items` tables.
//!
//! Quantity-changing mutations run in a transaction that first locks the
//! product's inventory row (`FOR UPDATE`). Concurrent mutations touching the
//! same product therefore serialise, and the stock check always sees the
//! latest committed cart line.

use sqlx::PgPool;
use vitacart_core::stock::{check_requested, validate_line_quantity};
use vitacart_core::types::{DbId, UserId};

use crate::models::cart::{Cart, CartItem, CartLine, CartMutation};

/// Column list for `carts` queries.
const CART_COLUMNS: &str = "id, user_id, created_at, updated_at";

/// Column list for `cart_items` queries.
const ITEM_COLUMNS: &str = "id, cart_id, product_id, quantity, created_at, updated_at";

type Tx<'a> = sqlx::Transaction<'a, sqlx::Postgres>;

/// Provides cart reads and stock-checked cart mutations.
pub struct CartRepo;

impl CartRepo {
    // -----------------------------------------------------------------------
    // Carts
    // -----------------------------------------------------------------------

    /// Find the user's cart without creating one.
    pub async fn find_by_user(pool: &PgPool, user_id: UserId) -> Result<Option<Cart>, sqlx::Error> {
        let query = format!("SELECT {CART_COLUMNS} FROM carts WHERE user_id = $1");
        sqlx::query_as::<_, Cart>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Load every line of a cart with product, stock, and image data.
    pub async fn lines(pool: &PgPool, cart_id: DbId) -> Result<Vec<CartLine>, sqlx::Error> {
        sqlx::query_as::<_, CartLine>(
            "SELECT ci.id AS item_id, ci.product_id, ci.quantity, \
                    p.name, p.slug, p.price_cents, p.distributor_price_cents, p.is_active, \
                    COALESCE(i.quantity, 0) AS stock_quantity, \
                    (SELECT pi.url FROM product_images pi \
                      WHERE pi.product_id = p.id \
                      ORDER BY pi.is_primary DESC, pi.sort_order, pi.id \
                      LIMIT 1) AS image_url \
             FROM cart_items ci \
             JOIN products p ON p.id = ci.product_id \
             LEFT JOIN inventory i ON i.product_id = ci.product_id \
             WHERE ci.cart_id = $1 \
             ORDER BY ci.created_at, ci.id",
        )
        .bind(cart_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Stock-checked mutations
    // -----------------------------------------------------------------------

    /// Add `quantity` units of a product to the user's cart, merging into an
    /// existing line.
    ///
    /// The merged line quantity must not exceed the product's stock. The cart
    /// row is created in the same transaction, so a rejected add leaves no
    /// cart behind.
    pub async fn add_item(
        pool: &PgPool,
        user_id: UserId,
        product_id: DbId,
        quantity: i32,
    ) -> Result<CartMutation, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(rejection) = Self::check_product(&mut tx, product_id).await? {
            return Ok(rejection);
        }
        let available = Self::lock_stock(&mut tx, product_id).await?;
        let cart_id = Self::upsert_cart(&mut tx, user_id).await?;
        let current = Self::current_quantity(&mut tx, cart_id, product_id)
            .await?
            .unwrap_or(0);

        let requested = current.saturating_add(quantity);
        if let Some(rejection) = Self::check_quantity(requested, available) {
            return Ok(rejection);
        }

        let item = Self::write_line(&mut tx, cart_id, product_id, requested).await?;
        tx.commit().await?;

        Ok(CartMutation::Updated(item))
    }

    /// Set an existing line to `quantity`. Zero removes the line.
    pub async fn set_item_quantity(
        pool: &PgPool,
        cart_id: DbId,
        product_id: DbId,
        quantity: i32,
    ) -> Result<CartMutation, sqlx::Error> {
        if quantity <= 0 {
            return Ok(if Self::remove_item(pool, cart_id, product_id).await? {
                CartMutation::Removed
            } else {
                CartMutation::ItemNotFound
            });
        }

        let mut tx = pool.begin().await?;

        if let Some(rejection) = Self::check_product(&mut tx, product_id).await? {
            return Ok(rejection);
        }
        let available = Self::lock_stock(&mut tx, product_id).await?;
        if Self::current_quantity(&mut tx, cart_id, product_id)
            .await?
            .is_none()
        {
            return Ok(CartMutation::ItemNotFound);
        }

        if let Some(rejection) = Self::check_quantity(quantity, available) {
            return Ok(rejection);
        }

        let item = Self::write_line(&mut tx, cart_id, product_id, quantity).await?;
        Self::touch(&mut tx, cart_id).await?;
        tx.commit().await?;

        Ok(CartMutation::Updated(item))
    }

    /// Remove a product's line from the cart.
    ///
    /// Returns `true` if a line was removed.
    pub async fn remove_item(
        pool: &PgPool,
        cart_id: DbId,
        product_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every line from the cart, returning how many were removed.
    pub async fn clear(pool: &PgPool, cart_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Share-lock the product row so it cannot be deleted or deactivated
    /// mid-transaction. Returns a rejection if it is missing or inactive.
    async fn check_product(
        tx: &mut Tx<'_>,
        product_id: DbId,
    ) -> Result<Option<CartMutation>, sqlx::Error> {
        let is_active: Option<bool> =
            sqlx::query_scalar("SELECT is_active FROM products WHERE id = $1 FOR SHARE")
                .bind(product_id)
                .fetch_optional(&mut **tx)
                .await?;

        Ok(match is_active {
            None => Some(CartMutation::ProductNotFound),
            Some(false) => Some(CartMutation::ProductInactive),
            Some(true) => None,
        })
    }

    /// Lock the product's inventory row and return its quantity.
    ///
    /// A product without an inventory row has no stock.
    async fn lock_stock(tx: &mut Tx<'_>, product_id: DbId) -> Result<i32, sqlx::Error> {
        let quantity: Option<i32> =
            sqlx::query_scalar("SELECT quantity FROM inventory WHERE product_id = $1 FOR UPDATE")
                .bind(product_id)
                .fetch_optional(&mut **tx)
                .await?;
        Ok(quantity.unwrap_or(0))
    }

    /// Create the user's cart or bump its `updated_at`, returning its id.
    async fn upsert_cart(tx: &mut Tx<'_>, user_id: UserId) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO carts (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET updated_at = NOW() \
             RETURNING id",
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn current_quantity(
        tx: &mut Tx<'_>,
        cart_id: DbId,
        product_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT quantity FROM cart_items WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart_id)
        .bind(product_id)
        .fetch_optional(&mut **tx)
        .await
    }

    fn check_quantity(requested: i32, available: i32) -> Option<CartMutation> {
        if validate_line_quantity(requested).is_err() {
            return Some(CartMutation::QuantityTooLarge { requested });
        }
        if check_requested(requested, available).is_err() {
            return Some(CartMutation::InsufficientStock {
                requested,
                available,
            });
        }
        None
    }

    async fn write_line(
        tx: &mut Tx<'_>,
        cart_id: DbId,
        product_id: DbId,
        quantity: i32,
    ) -> Result<CartItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items (cart_id, product_id, quantity) VALUES ($1, $2, $3) \
             ON CONFLICT (cart_id, product_id) DO UPDATE SET quantity = EXCLUDED.quantity \
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(cart_id)
            .bind(product_id)
            .bind(quantity)
            .fetch_one(&mut **tx)
            .await
    }

    async fn touch(tx: &mut Tx<'_>, cart_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE carts SET updated_at = NOW() WHERE id = $1")
            .bind(cart_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
