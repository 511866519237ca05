//! Logical column types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The family a [`ColumnType`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Whole numbers.
    Integer,
    /// Floating point and fixed point numbers.
    Float,
    /// Character data.
    String,
    /// Dates and times.
    Time,
    /// Raw bytes.
    Binary,
    /// One value out of a fixed list.
    Enum,
    /// Any subset of a fixed list.
    Set,
    /// JSON documents.
    Json,
}

/// Logical type tag of a column.
///
/// The tag is rendered verbatim by the reference grammar, so the serde and
/// display spellings are the SQL keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    // Integer types
    Integer,
    BigInt,
    SmallInt,
    TinyInt,
    MediumInt,

    // Floating point types
    Float,
    Double,
    Decimal,

    // String types
    Char,
    Varchar,
    Text,
    MediumText,
    LongText,

    // Date and time types
    Date,
    DateTime,
    Time,
    Timestamp,

    // Binary types
    Binary,
    VarBinary,

    // Special types
    Enum,
    Set,
    Json,
}

impl ColumnType {
    /// Returns the SQL spelling of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::SmallInt => "smallint",
            Self::TinyInt => "tinyint",
            Self::MediumInt => "mediumint",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::Varchar => "varchar",
            Self::Text => "text",
            Self::MediumText => "mediumtext",
            Self::LongText => "longtext",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Binary => "binary",
            Self::VarBinary => "varbinary",
            Self::Enum => "enum",
            Self::Set => "set",
            Self::Json => "json",
        }
    }

    /// Returns the family of the type.
    #[must_use]
    pub const fn kind(self) -> TypeKind {
        match self {
            Self::Integer | Self::BigInt | Self::SmallInt | Self::TinyInt | Self::MediumInt => {
                TypeKind::Integer
            }
            Self::Float | Self::Double | Self::Decimal => TypeKind::Float,
            Self::Char | Self::Varchar | Self::Text | Self::MediumText | Self::LongText => {
                TypeKind::String
            }
            Self::Date | Self::DateTime | Self::Time | Self::Timestamp => TypeKind::Time,
            Self::Binary | Self::VarBinary => TypeKind::Binary,
            Self::Enum => TypeKind::Enum,
            Self::Set => TypeKind::Set,
            Self::Json => TypeKind::Json,
        }
    }

    /// Returns true for integer types.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self.kind(), TypeKind::Integer)
    }

    /// Returns true for floating and fixed point types.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self.kind(), TypeKind::Float)
    }

    /// Returns true for character types.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self.kind(), TypeKind::String)
    }

    /// Returns true for date and time types.
    #[must_use]
    pub const fn is_time(self) -> bool {
        matches!(self.kind(), TypeKind::Time)
    }

    /// Returns true for binary types.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self.kind(), TypeKind::Binary)
    }

    /// Returns true when values of this type are written as quoted literals:
    /// character types plus enums and sets.
    #[must_use]
    pub const fn is_string_kind(self) -> bool {
        matches!(
            self.kind(),
            TypeKind::String | TypeKind::Enum | TypeKind::Set
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(ColumnType::MediumInt.is_integer());
        assert!(ColumnType::Decimal.is_float());
        assert!(ColumnType::LongText.is_string());
        assert!(ColumnType::Timestamp.is_time());
        assert!(ColumnType::VarBinary.is_binary());
        assert_eq!(ColumnType::Json.kind(), TypeKind::Json);
    }

    #[test]
    fn test_string_kind_covers_enum_and_set() {
        assert!(ColumnType::Varchar.is_string_kind());
        assert!(ColumnType::Enum.is_string_kind());
        assert!(ColumnType::Set.is_string_kind());
        assert!(!ColumnType::Timestamp.is_string_kind());
        assert!(!ColumnType::Integer.is_string_kind());
        assert!(!ColumnType::Json.is_string_kind());
    }

    #[test]
    fn test_display_matches_sql_spelling() {
        assert_eq!(ColumnType::DateTime.to_string(), "datetime");
        assert_eq!(ColumnType::MediumText.to_string(), "mediumtext");
        assert_eq!(ColumnType::BigInt.to_string(), "bigint");
    }
}
