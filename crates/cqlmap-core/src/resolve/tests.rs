use super::*;
use crate::{
    conversion::CustomConversions,
    entity::{PropertyRole, TypeHint},
    error::ErrorClass,
    test_fixtures::{self, named, type_name},
};
use cqlmap_schema::types::Resolution;

fn property(declared: DeclaredType, hint: Option<TypeHint>) -> PropertyDescriptor {
    PropertyDescriptor {
        owner: type_name("app::Sample"),
        name: "sample".to_string(),
        declared_type: declared,
        column_name: Identifier::unquoted("sample").unwrap(),
        type_hint: hint,
        role: PropertyRole::Regular,
        force_quote: false,
        indexes: Vec::new(),
    }
}

fn ident(name: &str) -> Identifier {
    Identifier::unquoted(name).unwrap()
}

fn literal(name: &str) -> DataType {
    DataType::user_type(UserTypeRef::literal(ident(name)))
}

fn resolve_literal(context: &MappingContext, declared: DeclaredType) -> Result<DataType, ResolveError> {
    context
        .resolver(ResolutionMode::Literal)
        .resolve(&property(declared, None))
}

#[test]
fn simple_types_resolve_to_scalars() {
    let context = test_fixtures::context();

    assert_eq!(
        resolve_literal(&context, named("String")).unwrap(),
        DataType::Scalar(ScalarKind::Text)
    );
    assert_eq!(
        resolve_literal(&context, named("uuid::Uuid")).unwrap(),
        DataType::Scalar(ScalarKind::Uuid)
    );
}

#[test]
fn user_type_entity_in_literal_mode_is_a_placeholder() {
    let context = test_fixtures::context();

    let data_type = resolve_literal(&context, named("app::Address")).unwrap();

    assert_eq!(data_type, literal("address"));
    assert!(data_type.is_frozen());
}

#[test]
fn list_of_user_types_wraps_the_user_type() {
    let context = test_fixtures::context();

    assert_eq!(
        resolve_literal(&context, DeclaredType::list(named("app::Address"))).unwrap(),
        DataType::list(literal("address"))
    );
    assert_eq!(
        resolve_literal(&context, DeclaredType::set(named("app::Address"))).unwrap(),
        DataType::set(literal("address"))
    );
}

#[test]
fn resolved_mode_without_resolver_fails() {
    let context = test_fixtures::context();

    let err = context
        .data_type(&property(named("app::Address"), None))
        .unwrap_err();

    assert_eq!(err, ResolveError::NoUserTypeResolver(ident("address")));
    assert_eq!(err.class(), ErrorClass::MissingUserType);
}

#[test]
fn resolved_mode_reports_missing_user_types() {
    let context = test_fixtures::context().with_user_type_resolver(StaticUserTypes::new());

    let err = context
        .data_type(&property(named("app::Address"), None))
        .unwrap_err();

    assert_eq!(err, ResolveError::MissingUserType(ident("address")));
}

#[test]
fn resolved_mode_uses_the_resolver() {
    let context = test_fixtures::context().with_user_type_resolver(
        StaticUserTypes::in_keyspace(ident("shop")).with(ident("address")),
    );

    let data_type = context
        .data_type(&property(named("app::Address"), None))
        .unwrap();
    let user_type = data_type.as_user_type().unwrap();

    assert_eq!(user_type.resolution, Resolution::Resolved);
    assert_eq!(user_type.keyspace, Some(ident("shop")));
    assert_eq!(data_type.to_string(), "shop.address");
}

#[test]
fn tuple_hint_yields_a_tuple() {
    let context = test_fixtures::context();
    let hint = TypeHint::Tuple(vec![ScalarKind::Int, ScalarKind::Text]);

    let data_type = context
        .data_type(&property(named("app::Address"), Some(hint)))
        .unwrap();

    assert_eq!(
        data_type,
        DataType::tuple([
            DataType::Scalar(ScalarKind::Int),
            DataType::Scalar(ScalarKind::Text)
        ])
    );
}

#[test]
fn tuple_hint_rejects_counters() {
    let context = test_fixtures::context();
    let hint = TypeHint::Tuple(vec![ScalarKind::Int, ScalarKind::Counter]);

    let err = context
        .data_type(&property(named("String"), Some(hint)))
        .unwrap_err();

    assert!(matches!(
        err,
        ResolveError::InvalidTupleElement {
            kind: ScalarKind::Counter,
            ..
        }
    ));
}

#[test]
fn scalar_hints_override_inference() {
    let context = test_fixtures::context();

    let data_type = context
        .data_type(&property(
            DeclaredType::list(named("String")),
            Some(TypeHint::Set(ScalarKind::Ascii)),
        ))
        .unwrap();

    assert_eq!(data_type, DataType::set(DataType::Scalar(ScalarKind::Ascii)));
}

#[test]
fn literal_user_type_hint_ignores_resolved_mode() {
    let context = test_fixtures::context();
    let hint = TypeHint::literal_user_type("contact").unwrap();

    let data_type = context
        .data_type(&property(DeclaredType::list(named("app::Contact")), Some(hint)))
        .unwrap();

    assert_eq!(data_type, DataType::list(literal("contact")));
}

#[test]
fn user_type_hint_on_a_map_is_unsupported() {
    let context = test_fixtures::context();
    let hint = TypeHint::literal_user_type("contact").unwrap();

    let err = context
        .data_type(&property(
            DeclaredType::map(named("String"), named("app::Contact")),
            Some(hint),
        ))
        .unwrap_err();

    assert!(matches!(err, ResolveError::UnsupportedHint { .. }));
    assert_eq!(err.class(), ErrorClass::InvalidMetadata);
}

#[test]
fn conversions_apply_to_exact_and_element_types() {
    let context = MappingContext::new(test_fixtures::describer())
        .with_conversions(CustomConversions::new().with("app::Money", ScalarKind::Decimal));

    assert_eq!(
        resolve_literal(&context, named("app::Money")).unwrap(),
        DataType::Scalar(ScalarKind::Decimal)
    );
    assert_eq!(
        resolve_literal(&context, DeclaredType::list(named("app::Money"))).unwrap(),
        DataType::list(DataType::Scalar(ScalarKind::Decimal))
    );
}

#[test]
fn conversions_override_simple_types() {
    let context = MappingContext::new(test_fixtures::describer())
        .with_conversions(CustomConversions::new().with("String", ScalarKind::Ascii));

    assert_eq!(
        resolve_literal(&context, named("String")).unwrap(),
        DataType::Scalar(ScalarKind::Ascii)
    );
}

#[test]
fn maps_resolve_keys_and_values() {
    let context = test_fixtures::context();

    let data_type = resolve_literal(
        &context,
        DeclaredType::map(named("String"), DeclaredType::list(named("i32"))),
    )
    .unwrap();

    assert_eq!(
        data_type,
        DataType::map(
            DataType::Scalar(ScalarKind::Text),
            DataType::list(DataType::Scalar(ScalarKind::Int)).frozen()
        )
    );
    assert_eq!(data_type.to_string(), "map<text, frozen<list<int>>>");
}

#[test]
fn map_values_may_be_user_types() {
    let context = test_fixtures::context();

    assert_eq!(
        resolve_literal(
            &context,
            DeclaredType::map(named("String"), named("app::Address"))
        )
        .unwrap(),
        DataType::map(DataType::Scalar(ScalarKind::Text), literal("address"))
    );
}

#[test]
fn collection_map_keys_are_rejected() {
    let context = test_fixtures::context();

    let err = resolve_literal(
        &context,
        DeclaredType::map(DeclaredType::set(named("String")), named("String")),
    )
    .unwrap_err();

    assert!(matches!(err, ResolveError::InvalidMapKey { .. }));
}

#[test]
fn nested_maps_are_rejected() {
    let context = test_fixtures::context();

    let err = resolve_literal(
        &context,
        DeclaredType::map(
            named("String"),
            DeclaredType::map(named("String"), named("String")),
        ),
    )
    .unwrap_err();

    assert_eq!(
        err,
        ResolveError::UnsupportedNestedMap {
            owner: type_name("app::Sample"),
            property: "sample".to_string(),
        }
    );
}

#[test]
fn maps_nested_through_collections_are_rejected() {
    let context = test_fixtures::context();

    for value in [
        DeclaredType::list(DeclaredType::map(named("String"), named("String"))),
        DeclaredType::set(DeclaredType::list(DeclaredType::map(
            named("String"),
            named("i32"),
        ))),
    ] {
        let err = resolve_literal(&context, DeclaredType::map(named("String"), value)).unwrap_err();

        assert!(matches!(err, ResolveError::UnsupportedNestedMap { .. }));
        assert_eq!(err.class(), ErrorClass::InvalidMetadata);
    }
}

#[test]
fn maps_inside_lists_are_frozen_elements() {
    let context = test_fixtures::context();

    let data_type = resolve_literal(
        &context,
        DeclaredType::list(DeclaredType::map(named("String"), named("String"))),
    )
    .unwrap();

    assert_eq!(data_type.to_string(), "list<frozen<map<text, text>>>");
}

#[test]
fn unresolvable_map_parts_name_the_side() {
    let context = test_fixtures::context();

    let key = resolve_literal(
        &context,
        DeclaredType::map(named("app::Opaque"), named("String")),
    )
    .unwrap_err();
    let value = resolve_literal(
        &context,
        DeclaredType::map(named("String"), named("app::Opaque")),
    )
    .unwrap_err();

    assert!(matches!(key, ResolveError::UnresolvableMapKey { .. }));
    assert!(matches!(value, ResolveError::UnresolvableMapValue { .. }));
    assert_eq!(value.class(), ErrorClass::UnresolvableType);
}

#[test]
fn nested_collections_are_frozen() {
    let context = test_fixtures::context();

    let data_type =
        resolve_literal(&context, DeclaredType::list(DeclaredType::set(named("i64")))).unwrap();

    assert_eq!(data_type.to_string(), "list<frozen<set<bigint>>>");
}

#[test]
fn unknown_types_are_unresolvable() {
    let context = test_fixtures::context();

    let err = resolve_literal(&context, DeclaredType::list(named("app::Opaque"))).unwrap_err();

    assert_eq!(
        err,
        ResolveError::UnresolvableType {
            owner: type_name("app::Sample"),
            property: "sample".to_string(),
            declared: DeclaredType::list(named("app::Opaque")),
        }
    );
}

#[test]
fn table_entities_are_not_storage_types() {
    let context = test_fixtures::context();

    let err = resolve_literal(&context, named("app::Person")).unwrap_err();

    assert!(matches!(err, ResolveError::UnresolvableType { .. }));
}

#[test]
fn custom_fallback_replaces_the_error() {
    let context = test_fixtures::context();

    let data_type = context
        .resolver(ResolutionMode::Literal)
        .resolve_with(&property(named("app::Opaque"), None), &|| {
            Ok(DataType::Scalar(ScalarKind::Blob))
        })
        .unwrap();

    assert_eq!(data_type, DataType::Scalar(ScalarKind::Blob));
}
