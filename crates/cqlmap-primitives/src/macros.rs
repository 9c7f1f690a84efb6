#[macro_export]
macro_rules! scalar_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (Ascii, "ascii", Textual, is_keyable = true, is_collection_element = true),
            (Bigint, "bigint", Numeric, is_keyable = true, is_collection_element = true),
            (Blob, "blob", Blob, is_keyable = true, is_collection_element = true),
            (Boolean, "boolean", Bool, is_keyable = true, is_collection_element = true),
            (Counter, "counter", Numeric, is_keyable = false, is_collection_element = false),
            (Date, "date", Temporal, is_keyable = true, is_collection_element = true),
            (Decimal, "decimal", Numeric, is_keyable = true, is_collection_element = true),
            (Double, "double", Numeric, is_keyable = true, is_collection_element = true),
            (Duration, "duration", Temporal, is_keyable = false, is_collection_element = true),
            (Float, "float", Numeric, is_keyable = true, is_collection_element = true),
            (Inet, "inet", Network, is_keyable = true, is_collection_element = true),
            (Int, "int", Numeric, is_keyable = true, is_collection_element = true),
            (Smallint, "smallint", Numeric, is_keyable = true, is_collection_element = true),
            (Text, "text", Textual, is_keyable = true, is_collection_element = true),
            (Time, "time", Temporal, is_keyable = true, is_collection_element = true),
            (Timestamp, "timestamp", Temporal, is_keyable = true, is_collection_element = true),
            (Timeuuid, "timeuuid", Identifier, is_keyable = true, is_collection_element = true),
            (Tinyint, "tinyint", Numeric, is_keyable = true, is_collection_element = true),
            (Uuid, "uuid", Identifier, is_keyable = true, is_collection_element = true),
            (Varint, "varint", Numeric, is_keyable = true, is_collection_element = true),
        }
    };
}

#[macro_export]
macro_rules! scalar_kind_registry {
    ($macro:ident) => {
        $crate::scalar_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::scalar_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($scalar:ident, $name:literal, $family:ident, is_keyable = $is_keyable:expr, is_collection_element = $is_collection_element:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ScalarKind::$scalar => $crate::ScalarMetadata {
                    cql_name: $name,
                    family: $crate::ScalarFamily::$family,
                    is_keyable: $is_keyable,
                    is_collection_element: $is_collection_element,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($scalar:ident, $name:literal, $family:ident, is_keyable = $is_keyable:expr, is_collection_element = $is_collection_element:expr) ),* $(,)? ) => {
        [ $( $crate::ScalarKind::$scalar ),* ]
    };
}
