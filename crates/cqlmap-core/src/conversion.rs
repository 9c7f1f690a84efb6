//! Module: conversion
//! Responsibility: source type → scalar lookups consulted during resolution.
//!
//! `CustomConversions` are user-registered write conversions and take
//! precedence over structural inference. `SimpleTypes` is the built-in table
//! used as the final structural fallback.

use crate::declared::TypeName;
use cqlmap_primitives::ScalarKind;
use std::collections::HashMap;

///
/// CustomConversions
///
/// Ordered registry; when the same source type is registered twice the
/// earlier registration wins.
///

#[derive(Clone, Debug, Default)]
pub struct CustomConversions {
    conversions: Vec<(TypeName, ScalarKind)>,
}

impl CustomConversions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, source: impl Into<TypeName>, target: ScalarKind) -> Self {
        self.register(source, target);
        self
    }

    pub fn register(&mut self, source: impl Into<TypeName>, target: ScalarKind) -> &mut Self {
        self.conversions.push((source.into(), target));
        self
    }

    #[must_use]
    pub fn write_target(&self, source: &TypeName) -> Option<ScalarKind> {
        self.conversions
            .iter()
            .find(|(registered, _)| registered == source)
            .map(|(_, target)| *target)
    }

    #[must_use]
    pub fn has_write_target(&self, source: &TypeName) -> bool {
        self.write_target(source).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }
}

///
/// SimpleTypes
///
/// Built-in mapping from well-known Rust types to store scalars.
///

#[derive(Clone, Debug)]
pub struct SimpleTypes {
    types: HashMap<TypeName, ScalarKind>,
}

impl SimpleTypes {
    /// A table with no entries at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// The standard table for primitive, std and common ecosystem types.
    #[must_use]
    pub fn builtin() -> Self {
        const BUILTIN: &[(&str, ScalarKind)] = &[
            ("String", ScalarKind::Text),
            ("str", ScalarKind::Text),
            ("char", ScalarKind::Text),
            ("bool", ScalarKind::Boolean),
            ("i8", ScalarKind::Tinyint),
            ("i16", ScalarKind::Smallint),
            ("i32", ScalarKind::Int),
            ("i64", ScalarKind::Bigint),
            ("i128", ScalarKind::Varint),
            ("u8", ScalarKind::Smallint),
            ("u16", ScalarKind::Int),
            ("u32", ScalarKind::Bigint),
            ("u64", ScalarKind::Varint),
            ("u128", ScalarKind::Varint),
            ("f32", ScalarKind::Float),
            ("f64", ScalarKind::Double),
            ("Vec<u8>", ScalarKind::Blob),
            ("bytes::Bytes", ScalarKind::Blob),
            ("std::net::IpAddr", ScalarKind::Inet),
            ("IpAddr", ScalarKind::Inet),
            ("std::time::SystemTime", ScalarKind::Timestamp),
            ("SystemTime", ScalarKind::Timestamp),
            ("std::time::Duration", ScalarKind::Duration),
            ("uuid::Uuid", ScalarKind::Uuid),
            ("Uuid", ScalarKind::Uuid),
            ("num_bigint::BigInt", ScalarKind::Varint),
            ("BigInt", ScalarKind::Varint),
            ("rust_decimal::Decimal", ScalarKind::Decimal),
            ("Decimal", ScalarKind::Decimal),
            ("chrono::NaiveDate", ScalarKind::Date),
            ("NaiveDate", ScalarKind::Date),
            ("chrono::NaiveTime", ScalarKind::Time),
            ("NaiveTime", ScalarKind::Time),
            ("chrono::DateTime<Utc>", ScalarKind::Timestamp),
            ("DateTime<Utc>", ScalarKind::Timestamp),
        ];

        let types = BUILTIN
            .iter()
            .map(|(name, kind)| (TypeName::from(*name), *kind))
            .collect();

        Self { types }
    }

    pub fn insert(&mut self, name: impl Into<TypeName>, kind: ScalarKind) -> &mut Self {
        self.types.insert(name.into(), kind);
        self
    }

    #[must_use]
    pub fn scalar_for(&self, name: &TypeName) -> Option<ScalarKind> {
        self.types.get(name).copied()
    }

    #[must_use]
    pub fn is_simple(&self, name: &TypeName) -> bool {
        self.types.contains_key(name)
    }
}

impl Default for SimpleTypes {
    fn default() -> Self {
        Self::builtin()
    }
}
