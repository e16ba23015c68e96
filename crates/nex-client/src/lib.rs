//! NEX Client - dataTXT NEX annotation service access
//!
//! This crate turns a text and configuration into one service call:
//! - Form-encoded request construction (`QueryData`)
//! - A pluggable `Transport` performing the single POST
//! - Response classification into success, unmanaged language or failure
//!
//! Author: hephaex@gmail.com

pub mod client;
pub mod query;

pub use client::{
    classify, extract_language, HttpReply, NexClient, ReqwestTransport, Transport,
    FORM_CONTENT_TYPE, INCLUDE,
};
pub use query::{encode_component, QueryData};
