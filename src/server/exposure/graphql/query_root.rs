//! Query root: lookups by id and full listings

use async_graphql::ErrorExtensions;
use async_graphql::dynamic::{Field, FieldFuture, InputValue, Object, TypeRef};

use super::args;
use super::types::{self, CATEGORY, COUNTER, PRODUCT, TIME_RECORD};
use crate::core::service::CatalogService;

pub const QUERY: &str = "Query";

pub fn query_root() -> Object {
    Object::new(QUERY)
        .field(
            Field::new("product", TypeRef::named(PRODUCT), |ctx| {
                FieldFuture::new(async move {
                    let Some(id) = args::optional_id(&ctx, "id")? else {
                        return Ok(None);
                    };
                    let service = ctx.data::<CatalogService>()?;
                    let product = service.product(&id).await.map_err(|e| e.extend())?;
                    Ok(product.map(types::record))
                })
            })
            .argument(InputValue::new("id", TypeRef::named(TypeRef::ID))),
        )
        .field(
            Field::new("category", TypeRef::named(CATEGORY), |ctx| {
                FieldFuture::new(async move {
                    let Some(id) = args::optional_id(&ctx, "id")? else {
                        return Ok(None);
                    };
                    let service = ctx.data::<CatalogService>()?;
                    let category = service.category(&id).await.map_err(|e| e.extend())?;
                    Ok(category.map(types::record))
                })
            })
            .argument(InputValue::new("id", TypeRef::named(TypeRef::ID))),
        )
        .field(Field::new(
            "products",
            TypeRef::named_list(PRODUCT),
            |ctx| {
                FieldFuture::new(async move {
                    let service = ctx.data::<CatalogService>()?;
                    let products = service.products().await.map_err(|e| e.extend())?;
                    Ok(Some(types::records(products)))
                })
            },
        ))
        .field(Field::new(
            "categories",
            TypeRef::named_list(CATEGORY),
            |ctx| {
                FieldFuture::new(async move {
                    let service = ctx.data::<CatalogService>()?;
                    let categories = service.categories().await.map_err(|e| e.extend())?;
                    Ok(Some(types::records(categories)))
                })
            },
        ))
        .field(Field::new(
            "counters",
            TypeRef::named_list(COUNTER),
            |ctx| {
                FieldFuture::new(async move {
                    let service = ctx.data::<CatalogService>()?;
                    let counters = service.counters().await.map_err(|e| e.extend())?;
                    Ok(Some(types::records(counters)))
                })
            },
        ))
        .field(Field::new(
            "time",
            TypeRef::named_list(TIME_RECORD),
            |ctx| {
                FieldFuture::new(async move {
                    let service = ctx.data::<CatalogService>()?;
                    let times = service.time_records().await.map_err(|e| e.extend())?;
                    Ok(Some(types::records(times)))
                })
            },
        ))
}
