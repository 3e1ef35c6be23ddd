use std::fmt;
use std::fmt::Formatter;

#[derive(Debug)]
pub struct CatalogError(pub String);

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CatalogError: {}", self.0)
    }
}
impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self { CatalogError(err.to_string()) }
}
impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self { CatalogError(err.to_string()) }
}
