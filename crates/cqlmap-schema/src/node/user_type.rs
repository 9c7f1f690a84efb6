use crate::{identifier::Identifier, types::DataType};
use serde::Serialize;

///
/// UserTypeField
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UserTypeField {
    pub name: Identifier,
    pub data_type: DataType,
}

///
/// UserTypeSchema
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UserTypeSchema {
    pub name: Identifier,
    pub fields: Vec<UserTypeField>,
}

impl UserTypeSchema {
    #[must_use]
    pub const fn new(name: Identifier) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(&mut self, name: Identifier, data_type: DataType) -> &mut Self {
        self.fields.push(UserTypeField { name, data_type });
        self
    }

    #[must_use]
    pub fn get_field(&self, name: &Identifier) -> Option<&UserTypeField> {
        self.fields.iter().find(|field| &field.name == name)
    }

    /// Names of every user type referenced by a field, in field order.
    #[must_use]
    pub fn referenced_user_types(&self) -> Vec<&Identifier> {
        let mut names = Vec::new();
        for field in &self.fields {
            field.data_type.walk(&mut |node| {
                if let DataType::UserType(user_type) = node {
                    names.push(&user_type.name);
                }
            });
        }

        names
    }
}
