//! The seed shop.
//!
//! The catalog is driven by configuration: each entry names a crop from the
//! plant table. Buying debits the seed cost from currency and grants one
//! seed to the inventory, all-or-nothing.

use tracing::info;

use verdant_ledger::ResourceLedger;
use verdant_types::{ActionFailure, CropId, ResourceKind, ShopListing};

use crate::config::GameConfig;

/// The purchasable catalog, in configuration order. Entries whose crop is
/// missing from the plant table are skipped (validation rejects such
/// configs, but a hand-edited save path should not panic here).
pub fn listings(config: &GameConfig) -> Vec<ShopListing> {
    config
        .shop
        .iter()
        .filter_map(|crop| {
            let def = config.plants.get(crop)?;
            Some(ShopListing {
                crop: def.id.clone(),
                name: def.name.clone(),
                icon: def.icon.clone(),
                cost: def.cost,
            })
        })
        .collect()
}

/// Buy one seed of `crop`, debiting its cost from currency.
///
/// # Errors
///
/// Returns [`ActionFailure::UnknownCrop`] if the crop is not in the catalog
/// and [`ActionFailure::InsufficientFunds`] if currency cannot cover the
/// cost. A failed purchase leaves the ledger untouched.
pub fn buy_seed(
    config: &GameConfig,
    ledger: &mut ResourceLedger,
    crop: &CropId,
) -> Result<(), ActionFailure> {
    if !config.shop.contains(crop) {
        return Err(ActionFailure::UnknownCrop);
    }
    let def = config.plants.get(crop).ok_or(ActionFailure::UnknownCrop)?;
    ledger.debit(ResourceKind::Currency, def.cost)?;
    ledger.grant_item(def.id.clone(), 1);
    info!(crop = %crop, cost = %def.cost, "Seed purchased");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn ledger(currency: i64) -> ResourceLedger {
        ResourceLedger::new(
            Decimal::new(currency, 0),
            Decimal::ZERO,
            Decimal::ZERO,
            std::collections::BTreeMap::new(),
        )
    }

    #[test]
    fn listings_follow_catalog_order() {
        let config = GameConfig::default();
        let listings = listings(&config);
        let names: Vec<&str> = listings.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Carrot", "Rose", "Corn"]);
    }

    #[test]
    fn purchase_debits_cost_and_grants_seed() {
        let config = GameConfig::default();
        let mut ledger = ledger(25);
        let carrot = CropId::new("carrot");
        assert!(buy_seed(&config, &mut ledger, &carrot).is_ok());
        assert_eq!(ledger.currency(), Decimal::new(15, 0));
        assert_eq!(ledger.item_count(&carrot), 1);
    }

    #[test]
    fn purchase_fails_on_insufficient_funds() {
        let config = GameConfig::default();
        let mut ledger = ledger(5);
        let carrot = CropId::new("carrot");
        assert_eq!(
            buy_seed(&config, &mut ledger, &carrot),
            Err(ActionFailure::InsufficientFunds)
        );
        assert_eq!(ledger.currency(), Decimal::new(5, 0));
        assert_eq!(ledger.item_count(&carrot), 0);
    }

    #[test]
    fn purchase_of_unknown_crop_is_rejected() {
        let config = GameConfig::default();
        let mut ledger = ledger(1000);
        assert_eq!(
            buy_seed(&config, &mut ledger, &CropId::new("pumpkin")),
            Err(ActionFailure::UnknownCrop)
        );
        assert_eq!(ledger.currency(), Decimal::new(1000, 0));
    }
}
