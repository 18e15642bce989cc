//! Saveable trait for state that can be saved/loaded
//!
//! Each saveable type picks its own serializable data shape; the save file
//! embeds it and the manager only moves bytes.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::SaveError;

/// Trait for state that can be saved and loaded
pub trait Saveable {
    /// Serializable snapshot of this type
    type Data: Serialize + DeserializeOwned;

    /// Convert to saveable data
    fn to_save_data(&self) -> Result<Self::Data, SaveError>;

    /// Rebuild from saved data
    ///
    /// Data that can't describe a valid state is rejected with
    /// `SaveError::CorruptedData`, never partially applied.
    fn from_save_data(data: &Self::Data) -> Result<Self, SaveError>
    where
        Self: Sized;
}
