pub(crate) mod parse;
/// Product and attribute value types.
pub mod product;
/// HTTP client for the objects resource.
pub mod serviceclient;
