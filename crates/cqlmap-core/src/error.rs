use crate::{
    builder::SchemaError, config::ConfigError, registry::RegistryError, resolve::ResolveError,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Every failure in this crate is a configuration or programming error
/// detected at initialization or schema-build time. None are retryable.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Config(_) => ErrorClass::Configuration,
            Self::Registry(err) => err.class(),
            Self::Resolve(err) => err.class(),
            Self::Schema(err) => err.class(),
        }
    }
}

///
/// ErrorClass
///
/// Stable classification of failures for callers that branch on kind
/// rather than message.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum ErrorClass {
    Configuration,
    InvalidIdentifier,
    InvalidMetadata,
    InvalidSchema,
    MissingProperty,
    MissingUserType,
    UnknownEntity,
    UnresolvableType,
}
