#![allow(dead_code)]

use cqlmap_core::prelude::*;
use cqlmap_schema::{identifier::Identifier, node::ClusteringOrder};

pub fn ident(name: &str) -> Identifier {
    Identifier::unquoted(name).unwrap()
}

pub fn named(name: &str) -> DeclaredType {
    DeclaredType::named(name)
}

pub fn type_name(name: &str) -> TypeName {
    TypeName::from(name)
}

/// `Key{partition: A, cluster: B desc}` embedded as the identity of
/// `Row{id: Key, value: C}`.
pub fn composite_key_model() -> StaticDescriber {
    StaticDescriber::new()
        .with(
            "shop::Key",
            EntitySeed::key_class()
                .property(PropertySeed::new("a", named("String")).partition_key())
                .property(PropertySeed::new("b", named("i64")).cluster_key(ClusteringOrder::Desc)),
        )
        .with(
            "shop::Row",
            EntitySeed::table()
                .property(PropertySeed::new("id", named("shop::Key")).composite_key())
                .property(PropertySeed::new("value", named("f64"))),
        )
}

/// Two user types referencing each other, and a table holding both.
pub fn mutual_user_type_model() -> StaticDescriber {
    StaticDescriber::new()
        .with(
            "shop::X",
            EntitySeed::user_type()
                .property(PropertySeed::new("y", named("shop::Y")))
                .property(PropertySeed::new("label", named("String"))),
        )
        .with(
            "shop::Y",
            EntitySeed::user_type().property(PropertySeed::new("x", named("shop::X"))),
        )
        .with(
            "shop::Holder",
            EntitySeed::table()
                .property(PropertySeed::new("id", named("uuid::Uuid")).partition_key())
                .property(PropertySeed::new("x", named("shop::X"))),
        )
}

pub fn registered(describer: StaticDescriber, roots: &[&str]) -> MappingContext {
    let mut context = MappingContext::new(describer);
    let roots: Vec<_> = roots.iter().map(|r| type_name(r)).collect();
    context
        .initialize(&roots, &MappingConfig::default())
        .unwrap();

    context
}
