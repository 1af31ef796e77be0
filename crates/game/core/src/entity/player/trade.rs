use super::Player;
use crate::error::{ErrorSeverity, GameError};
use crate::items::{InventoryError, Item};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TradeError {
    #[error("{item} costs {price} gold, only {available} on hand")]
    NotEnoughGold {
        item: String,
        price: u32,
        available: u32,
    },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for TradeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnoughGold { .. } => ErrorSeverity::Recoverable,
            Self::Inventory(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEnoughGold { .. } => "TRADE_NOT_ENOUGH_GOLD",
            Self::Inventory(err) => err.error_code(),
        }
    }
}

impl Player {
    /// Buy `item` at its full value.
    ///
    /// Returns the price paid. Bought items do not count as found.
    ///
    /// # Errors
    ///
    /// - [`TradeError::NotEnoughGold`] when the price exceeds the purse
    /// - [`TradeError::Inventory`] when there is no room
    ///
    /// The item is handed back with the error and no gold changes hands.
    pub fn buy(&mut self, item: Item) -> Result<u32, (TradeError, Item)> {
        let price = item.value();
        if price > self.gold {
            let err = TradeError::NotEnoughGold {
                item: item.name().to_owned(),
                price,
                available: self.gold,
            };
            return Err((err, item));
        }
        self.inventory.add(item).map_err(|(err, item)| (err.into(), item))?;

        self.gold -= price;
        self.gold_spent = self.gold_spent.saturating_add(price);
        tracing::debug!(price, gold = self.gold, "item bought");
        Ok(price)
    }

    /// Sell the item at `index` for half its value.
    ///
    /// # Errors
    ///
    /// [`TradeError::Inventory`] when the slot is empty.
    pub fn sell(&mut self, index: usize) -> Result<(Item, u32), TradeError> {
        let item = self.inventory.remove(index)?;
        let price = item.sell_value();
        self.gold = self.gold.saturating_add(price);
        tracing::debug!(item = %item.name(), price, "item sold");
        Ok((item, price))
    }
}
