/// Trait implemented by all flat errors.
pub trait FlatError {
    /// Returns the name of the variant held by this error.
    fn error_variant(&self) -> &'static str;
}
