//! Shared in-memory entity fixtures for unit tests.

use crate::{
    declared::{DeclaredType, TypeName},
    entity::{
        IndexDecl, TypeHint,
        describe::{EntitySeed, PropertySeed, StaticDescriber},
    },
    registry::MappingContext,
};
use cqlmap_schema::node::{ClusteringOrder, IndexTarget};

pub(crate) fn named(name: &str) -> DeclaredType {
    DeclaredType::named(name)
}

pub(crate) fn type_name(name: &str) -> TypeName {
    TypeName::from(name)
}

/// A small model covering every entity role:
///
/// - `app::Person` table with a scalar partition key, a user type field, a
///   list of user types and an indexed map
/// - `app::Address` user type nesting `app::Geo`
/// - `app::Reading` table keyed by the `app::ReadingKey` composite key
pub(crate) fn describer() -> StaticDescriber {
    StaticDescriber::new()
        .with(
            "app::Person",
            EntitySeed::table()
                .property(PropertySeed::new("id", named("uuid::Uuid")).partition_key())
                .property(PropertySeed::new("name", named("String")))
                .property(PropertySeed::new("home", named("app::Address")))
                .property(PropertySeed::new(
                    "previous",
                    DeclaredType::list(named("app::Address")),
                ))
                .property(
                    PropertySeed::new(
                        "attributes",
                        DeclaredType::map(named("String"), named("String")),
                    )
                    .index(IndexDecl::secondary().on(IndexTarget::Keys)),
                ),
        )
        .with(
            "app::Address",
            EntitySeed::user_type()
                .property(PropertySeed::new("street", named("String")))
                .property(PropertySeed::new("geo", named("app::Geo"))),
        )
        .with(
            "app::Geo",
            EntitySeed::user_type()
                .property(PropertySeed::new("lat", named("f64")))
                .property(PropertySeed::new("lon", named("f64"))),
        )
        .with(
            "app::ReadingKey",
            EntitySeed::key_class()
                .property(
                    PropertySeed::new("sensor", named("String"))
                        .partition_key()
                        .index(IndexDecl::secondary()),
                )
                .property(
                    PropertySeed::new("taken_at", named("std::time::SystemTime"))
                        .cluster_key(ClusteringOrder::Desc),
                ),
        )
        .with(
            "app::Reading",
            EntitySeed::table()
                .property(PropertySeed::new("key", named("app::ReadingKey")).composite_key())
                .property(
                    PropertySeed::new("tags", DeclaredType::set(named("String")))
                        .index(IndexDecl::secondary().on(IndexTarget::Full)),
                )
                .property(
                    PropertySeed::new("location", named("String"))
                        .hint(TypeHint::Tuple(vec![
                            cqlmap_primitives::ScalarKind::Double,
                            cqlmap_primitives::ScalarKind::Double,
                        ])),
                ),
        )
}

/// A context with the fixture model registered.
pub(crate) fn context() -> MappingContext {
    let mut context = MappingContext::new(describer());
    for root in ["app::Person", "app::Reading"] {
        context
            .register(&type_name(root))
            .expect("fixture registers");
    }

    context
}
