//! Cart simulation.
//!
//! # Usage
//!
//! ```bash
//! # Two medium purple hoodies and one pair of earbuds, then bump the earbuds
//! neon cart simulate --add prod_1:2:M:purple --add prod_3 --set prod_3=3
//! ```
//!
//! Output is the resulting cart as JSON on stdout.

use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use neon_core::{Actor, IdError, ProductId};
use neon_storefront::AppError;
use neon_storefront::catalog::CatalogProvider;
use neon_storefront::session::{ShopperSession, VariantSelection};

use super::Context;

/// Errors parsing cart operation arguments.
#[derive(Debug, Error)]
pub enum ArgError {
    /// Product ID part is empty.
    #[error(transparent)]
    Id(#[from] IdError),

    /// Quantity part is not a number.
    #[error("invalid quantity '{0}'")]
    Quantity(String),

    /// `--set` argument lacks `=`.
    #[error("expected id=qty, got '{0}'")]
    MissingEquals(String),
}

/// `--add id[:qty[:size[:color]]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddArg {
    pub id: ProductId,
    pub quantity: u32,
    pub selection: VariantSelection,
}

impl FromStr for AddArg {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(4, ':');
        let id = ProductId::parse(parts.next().unwrap_or_default())?;
        let quantity = match parts.next().filter(|q| !q.is_empty()) {
            Some(q) => parse_quantity(q)?,
            None => 1,
        };
        let mut next_attr = || {
            parts
                .next()
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let size = next_attr();
        let color = next_attr();

        Ok(Self {
            id,
            quantity,
            selection: VariantSelection::new(size, color),
        })
    }
}

/// `--set id=qty`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetArg {
    pub id: ProductId,
    pub quantity: u32,
}

impl FromStr for SetArg {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = s
            .split_once('=')
            .ok_or_else(|| ArgError::MissingEquals(s.to_string()))?;
        Ok(Self {
            id: ProductId::parse(id)?,
            quantity: parse_quantity(quantity)?,
        })
    }
}

fn parse_quantity(raw: &str) -> Result<u32, ArgError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgError::Quantity(raw.to_string()))
}

/// Operations to apply, in application order.
pub struct Plan {
    pub adds: Vec<AddArg>,
    pub sets: Vec<SetArg>,
    pub removes: Vec<ProductId>,
    pub open: bool,
    pub signed_out: bool,
}

/// Apply `plan` to a fresh session and print the resulting cart.
///
/// # Errors
///
/// Returns an error on the first operation the cart rejects, or if an added
/// product does not exist.
pub async fn simulate(ctx: &Context, plan: Plan) -> Result<(), Box<dyn std::error::Error>> {
    let actor = if plan.signed_out {
        Actor::anonymous()
    } else {
        Actor::customer()
    };
    let mut session = ShopperSession::new(actor, ctx.config.currency);

    for add in plan.adds {
        let product = ctx
            .catalog
            .product(&add.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {}", add.id)))?;
        session.add_to_cart(&product, add.selection, add.quantity)?;
    }

    for set in plan.sets {
        let update = session
            .cart_mut()
            .update_quantity(&set.id, set.quantity)
            .map_err(AppError::from)?;
        if !update.is_updated() {
            warn!(product_id = %set.id, "Quantity set for product not in cart");
        }
    }

    for id in plan.removes {
        if session.cart_mut().remove_item(&id).is_none() {
            warn!(product_id = %id, "Remove requested for product not in cart");
        }
    }

    if plan.open {
        session.cart_mut().toggle_cart();
    }

    println!("{}", serde_json::to_string_pretty(&session.cart().view())?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_arg_defaults() {
        let arg: AddArg = "prod_3".parse().unwrap();
        assert_eq!(arg.id.as_str(), "prod_3");
        assert_eq!(arg.quantity, 1);
        assert_eq!(arg.selection, VariantSelection::default());
    }

    #[test]
    fn test_add_arg_full() {
        let arg: AddArg = "prod_1:2:M:purple".parse().unwrap();
        assert_eq!(arg.quantity, 2);
        assert_eq!(arg.selection.size.as_deref(), Some("M"));
        assert_eq!(arg.selection.color.as_deref(), Some("purple"));
    }

    #[test]
    fn test_add_arg_color_only() {
        let arg: AddArg = "prod_1:1::black".parse().unwrap();
        assert_eq!(arg.selection.size, None);
        assert_eq!(arg.selection.color.as_deref(), Some("black"));
    }

    #[test]
    fn test_add_arg_errors() {
        assert!(matches!("".parse::<AddArg>(), Err(ArgError::Id(_))));
        assert!(matches!(
            "prod_1:two".parse::<AddArg>(),
            Err(ArgError::Quantity(_))
        ));
    }

    #[test]
    fn test_set_arg() {
        let arg: SetArg = "prod_1=5".parse().unwrap();
        assert_eq!(arg.id.as_str(), "prod_1");
        assert_eq!(arg.quantity, 5);

        assert!(matches!(
            "prod_1".parse::<SetArg>(),
            Err(ArgError::MissingEquals(_))
        ));
    }
}
