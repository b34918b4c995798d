//! Argument extraction for root resolvers
//!
//! The engine has already checked presence and type of non-null arguments
//! before a resolver runs; these helpers turn the accepted values into
//! catalog types and report anything left over as a validation error.

use async_graphql::dynamic::ResolverContext;
use async_graphql::{ErrorExtensions, Value};

use crate::core::entity::RecordId;
use crate::core::error::CatalogError;

fn invalid(argument: &str, message: &str) -> async_graphql::Error {
    CatalogError::Validation {
        argument: argument.to_string(),
        message: message.to_string(),
    }
    .extend()
}

/// Optional id argument; absent or null gives `None`
///
/// `ID` inputs may arrive as strings or integers.
pub fn optional_id(
    ctx: &ResolverContext<'_>,
    name: &str,
) -> async_graphql::Result<Option<RecordId>> {
    let Some(value) = ctx.args.get(name) else {
        return Ok(None);
    };
    let raw = match value.as_value() {
        Value::Null => return Ok(None),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(invalid(name, "expected an ID")),
    };
    RecordId::parse(name, &raw)
        .map(Some)
        .map_err(|e| e.extend())
}

pub fn required_id(ctx: &ResolverContext<'_>, name: &str) -> async_graphql::Result<RecordId> {
    optional_id(ctx, name)?.ok_or_else(|| invalid(name, "required argument missing"))
}

/// Optional string argument; absent or null gives `None`
pub fn optional_string(
    ctx: &ResolverContext<'_>,
    name: &str,
) -> async_graphql::Result<Option<String>> {
    match ctx.args.get(name) {
        None => Ok(None),
        Some(value) if value.is_null() => Ok(None),
        Some(value) => Ok(Some(value.string()?.to_string())),
    }
}

pub fn required_string(ctx: &ResolverContext<'_>, name: &str) -> async_graphql::Result<String> {
    optional_string(ctx, name)?.ok_or_else(|| invalid(name, "required argument missing"))
}

pub fn required_int(ctx: &ResolverContext<'_>, name: &str) -> async_graphql::Result<i64> {
    match ctx.args.get(name) {
        Some(value) if !value.is_null() => Ok(value.i64()?),
        _ => Err(invalid(name, "required argument missing")),
    }
}
