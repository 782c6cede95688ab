pub(crate) mod attribute;
pub(crate) mod derive;
