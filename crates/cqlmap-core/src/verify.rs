//! Entity metadata verification.
//!
//! Runs once per newly registered entity, before it enters any registry
//! cache. All problems with one entity are reported together.

use crate::{
    declared::TypeName,
    entity::{EntityDescriptor, EntityRole},
};
use thiserror::Error as ThisError;

///
/// VerificationError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("entity '{type_name}' failed verification: {}", .errors.join("; "))]
pub struct VerificationError {
    pub type_name: TypeName,
    pub errors: Vec<String>,
}

///
/// EntityVerifier
///

pub trait EntityVerifier: Send + Sync {
    /// Push one message per problem found; an untouched list means success.
    fn verify(&self, entity: &EntityDescriptor, errors: &mut Vec<String>);
}

///
/// CompositeVerifier
///

pub struct CompositeVerifier {
    verifiers: Vec<Box<dyn EntityVerifier>>,
}

impl CompositeVerifier {
    /// A verifier that accepts everything.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            verifiers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, verifier: impl EntityVerifier + 'static) -> Self {
        self.verifiers.push(Box::new(verifier));
        self
    }

    /// Run every verifier and fold their findings into one error.
    pub fn check(&self, entity: &EntityDescriptor) -> Result<(), VerificationError> {
        let mut errors = Vec::new();
        self.verify(entity, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(VerificationError {
                type_name: entity.type_name.clone(),
                errors,
            })
        }
    }
}

impl Default for CompositeVerifier {
    fn default() -> Self {
        Self::empty()
            .with(UserTypeVerifier)
            .with(KeyClassVerifier)
            .with(TableKeyVerifier)
    }
}

impl EntityVerifier for CompositeVerifier {
    fn verify(&self, entity: &EntityDescriptor, errors: &mut Vec<String>) {
        for verifier in &self.verifiers {
            verifier.verify(entity, errors);
        }
    }
}

///
/// UserTypeVerifier
///
/// User types are values, so none of their properties may act as a key.
///

pub struct UserTypeVerifier;

impl EntityVerifier for UserTypeVerifier {
    fn verify(&self, entity: &EntityDescriptor, errors: &mut Vec<String>) {
        if entity.role != EntityRole::UserDefinedType {
            return;
        }

        for property in entity.key_properties() {
            errors.push(format!(
                "user type property '{}' must not declare a primary key role",
                property.name
            ));
        }
    }
}

///
/// KeyClassVerifier
///

pub struct KeyClassVerifier;

impl EntityVerifier for KeyClassVerifier {
    fn verify(&self, entity: &EntityDescriptor, errors: &mut Vec<String>) {
        if entity.role != EntityRole::PrimaryKeyClass {
            return;
        }

        if !entity.properties.iter().any(|p| p.role.is_partition_key()) {
            errors.push("primary key class declares no partition key".to_string());
        }

        for property in &entity.properties {
            if property.role.is_composite_key() {
                errors.push(format!(
                    "primary key class property '{}' must not nest another composite key",
                    property.name
                ));
            } else if !property.role.is_key() {
                errors.push(format!(
                    "primary key class property '{}' must be a partition or cluster key",
                    property.name
                ));
            }
        }
    }
}

///
/// TableKeyVerifier
///
/// A table takes its primary key either from one embedded composite key or
/// from key-role properties, never both.
///

pub struct TableKeyVerifier;

impl EntityVerifier for TableKeyVerifier {
    fn verify(&self, entity: &EntityDescriptor, errors: &mut Vec<String>) {
        if entity.role != EntityRole::Table {
            return;
        }

        let composite = entity
            .properties
            .iter()
            .filter(|p| p.role.is_composite_key())
            .count();
        let direct = entity
            .properties
            .iter()
            .filter(|p| p.role.is_partition_key() || p.role.is_cluster_key())
            .count();

        if composite > 1 {
            errors.push(format!(
                "table declares {composite} composite keys, at most one is allowed"
            ));
        }
        if composite > 0 && direct > 0 {
            errors.push(
                "table mixes an embedded composite key with partition or cluster key properties"
                    .to_string(),
            );
        }
    }
}
