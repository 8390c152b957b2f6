use derive_more::Display;

/// Built-in column types accepted in a view's table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum DataType {
    #[display("string")]
    String,
    #[display("varchar")]
    VarChar,
    #[display("char")]
    Char,
    #[display("boolean")]
    Boolean,
    #[display("byte")]
    Byte,
    #[display("tinyint")]
    TinyInt,
    #[display("short")]
    Short,
    #[display("smallint")]
    SmallInt,
    #[display("integer")]
    Integer,
    #[display("long")]
    Long,
    #[display("bigint")]
    BigInt,
    #[display("biginteger")]
    BigInteger,
    #[display("float")]
    Float,
    #[display("real")]
    Real,
    #[display("double")]
    Double,
    #[display("bigdecimal")]
    BigDecimal,
    #[display("decimal")]
    Decimal,
    #[display("date")]
    Date,
    #[display("time")]
    Time,
    #[display("timestamp")]
    Timestamp,
    #[display("object")]
    Object,
    #[display("blob")]
    Blob,
    #[display("clob")]
    Clob,
    #[display("xml")]
    Xml,
    #[display("varbinary")]
    VarBinary,
    #[display("geometry")]
    Geometry,
    #[display("geography")]
    Geography,
    #[display("json")]
    Json,
}

impl DataType {
    /// Classify a *lower-cased* type name.
    pub fn from_lower(word: &str) -> Option<Self> {
        use DataType::*;
        let data_type = match word {
            "string" => String,
            "varchar" => VarChar,
            "char" => Char,
            "boolean" => Boolean,
            "byte" => Byte,
            "tinyint" => TinyInt,
            "short" => Short,
            "smallint" => SmallInt,
            "integer" | "int" => Integer,
            "long" => Long,
            "bigint" => BigInt,
            "biginteger" => BigInteger,
            "float" => Float,
            "real" => Real,
            "double" => Double,
            "bigdecimal" => BigDecimal,
            "decimal" | "numeric" => Decimal,
            "date" => Date,
            "time" => Time,
            "timestamp" => Timestamp,
            "object" => Object,
            "blob" => Blob,
            "clob" => Clob,
            "xml" => Xml,
            "varbinary" => VarBinary,
            "geometry" => Geometry,
            "geography" => Geography,
            "json" => Json,
            _ => return None,
        };
        Some(data_type)
    }

    /// Maximum number of parenthesized integer arguments, i.e. length,
    /// precision or precision and scale.
    pub const fn max_args(self) -> usize {
        use DataType::*;
        match self {
            String | VarChar | Char | Object | Blob | Clob | VarBinary => 1,
            Float | Real | Double | Time | Timestamp => 1,
            Decimal | BigDecimal => 2,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("string", Some(DataType::String))]
    #[case("int", Some(DataType::Integer))]
    #[case("numeric", Some(DataType::Decimal))]
    #[case("json", Some(DataType::Json))]
    #[case("varchar2", None)]
    #[case("c1", None)]
    fn classifies_type_names(#[case] word: &str, #[case] expected: Option<DataType>) {
        assert_eq!(DataType::from_lower(word), expected);
    }

    #[test]
    fn display_round_trips_through_from_lower() {
        for dt in [DataType::VarChar, DataType::BigDecimal, DataType::Timestamp] {
            assert_eq!(DataType::from_lower(&dt.to_string()), Some(dt));
        }
    }
}
