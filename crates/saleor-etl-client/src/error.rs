use thiserror::Error;

use crate::types::{FieldError, GraphQLError};

/// Errors returned by the catalog GraphQL client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server rejected the document itself (top-level `errors`).
    #[error("GraphQL errors: {}", join_messages(.0))]
    GraphQL(Vec<GraphQLError>),

    /// A mutation returned a non-empty `productErrors` list.
    #[error("{operation} failed: {}", format_field_errors(.errors))]
    FieldErrors {
        operation: &'static str,
        errors: Vec<FieldError>,
    },

    /// A mutation was rejected because the record already exists
    /// (a field error coded `UNIQUE` or `ALREADY_EXISTS`).
    #[error("{operation} conflict: {}", format_field_errors(.errors))]
    Conflict {
        operation: &'static str,
        errors: Vec<FieldError>,
    },

    /// A field the operation needs is absent, either from the response or
    /// from the input being sent.
    #[error("missing field: {0}")]
    MissingField(String),

    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("API token cannot be used as a header value")]
    InvalidToken,
}

impl CatalogError {
    /// Returns `true` when the remote reported that the record already exists.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, CatalogError::Conflict { .. })
    }
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_error(field: &str, code: &str) -> FieldError {
        FieldError {
            field: Some(field.to_string()),
            message: Some(format!("{field} is not valid")),
            code: code.to_string(),
        }
    }

    #[test]
    fn field_errors_display_lists_every_error() {
        let err = CatalogError::FieldErrors {
            operation: "productCreate",
            errors: vec![field_error("name", "REQUIRED"), field_error("basePrice", "INVALID")],
        };
        assert_eq!(
            err.to_string(),
            concat!(
                "productCreate failed: name: name is not valid (REQUIRED); ",
                "basePrice: basePrice is not valid (INVALID)"
            )
        );
    }

    #[test]
    fn graphql_errors_are_joined() {
        let err = CatalogError::GraphQL(vec![
            GraphQLError {
                message: "Cannot query field".to_string(),
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                path: vec![],
            },
        ]);
        assert_eq!(err.to_string(), "GraphQL errors: Cannot query field; Invalid ID");
    }

    #[test]
    fn only_conflict_is_conflict() {
        let conflict = CatalogError::Conflict {
            operation: "productCreate",
            errors: vec![field_error("sku", "UNIQUE")],
        };
        assert!(conflict.is_conflict());
        assert!(!CatalogError::MissingField("seo.title".to_string()).is_conflict());
    }
}
