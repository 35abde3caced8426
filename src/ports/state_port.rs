//! Account state persistence port trait.

use crate::domain::account::AccountState;
use crate::domain::error::TradegateError;

pub trait StatePort {
    /// Returns `Ok(None)` when no state has been persisted yet.
    fn load(&self) -> Result<Option<AccountState>, TradegateError>;

    /// Replaces the persisted state.
    fn save(&self, state: &AccountState) -> Result<(), TradegateError>;
}
