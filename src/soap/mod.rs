//! SOAP access to the userdata service

pub mod client;
pub mod envelope;
pub mod parser;

pub use client::{SoapClient, SoapOutcome, SoapReply};

/// SOAP 1.1 envelope namespace
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Target namespace of the userdata service
pub const USERDATA_NS: &str = "niffler-userdata";
