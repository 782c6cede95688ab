use vnconnector_error::{vnconnector_error, FlatError};

#[vnconnector_error(flat)]
#[derive(Debug, thiserror::Error)]
enum LookupError {
    #[error("not found")]
    NotFound,
    #[error("rejected: {0}")]
    Rejected(String),
}

#[test]
fn attribute_resolves_without_prelude() {
    assert_eq!(LookupError::NotFound.error_variant(), "NotFound");
    assert_eq!(
        LookupError::Rejected("denied".to_string()).error_variant(),
        "Rejected"
    );
}

#[test]
fn derive_is_exported_from_crate_root() {
    #[derive(Debug, vnconnector_error::FlatError)]
    enum Plain {
        Only,
    }

    assert_eq!(Plain::Only.error_variant(), "Only");
}
