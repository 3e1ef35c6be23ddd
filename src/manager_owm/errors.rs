use std::fmt;
use reqwest::StatusCode;

#[derive(Debug)]
pub enum OwmError {
    Request(String),
    Status(StatusCode, String),
    Document(String),
}

impl fmt::Display for OwmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OwmError::Request(e) => write!(f, "OwmError::Request: {}", e),
            OwmError::Status(s, e) => write!(f, "OwmError::Status: {} {}", s, e),
            OwmError::Document(e) => write!(f, "OwmError::Document: {}", e),
        }
    }
}
impl From<reqwest::Error> for OwmError {
    fn from(e: reqwest::Error) -> Self {
        OwmError::Request(e.to_string())
    }
}
impl From<serde_json::Error> for OwmError {
    fn from(e: serde_json::Error) -> Self {
        OwmError::Document(e.to_string())
    }
}
