use darling::FromMeta;

#[derive(FromMeta)]
pub(crate) struct VnConnectorErrorArgs {
    #[darling(flatten)]
    pub error_type: VnConnectorErrorType,
}

#[derive(FromMeta)]
pub(crate) enum VnConnectorErrorType {
    /// The error is going to be converted into a flat error using the `FlatError` trait
    #[darling(rename = "flat")]
    Flat,
}
