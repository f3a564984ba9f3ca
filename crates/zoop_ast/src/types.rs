//! The data types a zoop value can have

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A data type
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum DataType {
    Int,
    Uint,
    Dec,
    Udec,
    String,
    Bool,
    /// The name of a zoop
    Label,
    /// No value at all
    Void,
}

impl DataType {
    /// `int`, `uint`, `dec` or `udec`
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Dec | Self::Udec)
    }

    /// Values of this type are whole numbers
    pub fn is_integral(&self) -> bool {
        matches!(self, Self::Int | Self::Uint)
    }

    /// Values of this type are never negative
    pub fn is_unsigned(&self) -> bool {
        matches!(self, Self::Uint | Self::Udec)
    }
}
