use super::*;

fn id(name: &str) -> Identifier {
    Identifier::unquoted(name).unwrap()
}

#[test]
fn scalars_and_tuples_are_never_frozen() {
    let text = DataType::from(ScalarKind::Text);
    assert_eq!(text.clone().frozen(), text);

    let tuple = DataType::tuple([ScalarKind::Int.into(), ScalarKind::Text.into()]);
    assert_eq!(tuple.clone().frozen(), tuple);
}

#[test]
fn collections_and_user_types_are_frozen_once() {
    let list = DataType::list(ScalarKind::Text.into());
    let frozen = list.clone().frozen();

    assert_eq!(frozen, DataType::Frozen(Box::new(list)));
    assert_eq!(frozen.clone().frozen(), frozen);

    let udt = DataType::user_type(UserTypeRef::resolved(id("address")));
    assert!(matches!(udt.frozen(), DataType::Frozen(_)));
}

#[test]
fn literal_placeholders_are_implicitly_frozen() {
    let literal = DataType::user_type(UserTypeRef::literal(id("address")));

    assert!(literal.is_frozen());
    assert_eq!(literal.clone().frozen(), literal);
    assert_eq!(literal.to_string(), "frozen<address>");
}

#[test]
fn display_renders_cql_syntax() {
    let ty = DataType::map(
        ScalarKind::Text.into(),
        DataType::list(ScalarKind::Int.into()).frozen(),
    );
    assert_eq!(ty.to_string(), "map<text, frozen<list<int>>>");

    let udt = UserTypeRef::resolved(id("address")).with_keyspace(id("shop"));
    assert_eq!(DataType::set(DataType::user_type(udt)).to_string(), "set<shop.address>");

    let tuple = DataType::tuple([ScalarKind::Int.into(), ScalarKind::Text.into()]);
    assert_eq!(tuple.to_string(), "tuple<int, text>");
}

#[test]
fn walk_visits_nested_types() {
    let ty = DataType::map(
        ScalarKind::Text.into(),
        DataType::list(DataType::user_type(UserTypeRef::literal(id("address")))),
    );

    let mut user_types = Vec::new();
    ty.walk(&mut |node| {
        if let DataType::UserType(user_type) = node {
            user_types.push(user_type.name.clone());
        }
    });

    assert_eq!(user_types, vec![id("address")]);
}

#[test]
fn serializes_to_tagged_json() {
    let ty = DataType::list(ScalarKind::Bigint.into());
    let json = serde_json::to_value(&ty).unwrap();

    assert_eq!(json, serde_json::json!({ "List": { "Scalar": "bigint" } }));
}
