//! Mutation root: create, update and delete for every entity
//!
//! Updates and deletes whose target does not exist fail with a `NOT_FOUND`
//! error on their own field; they never answer a silent null. Deleting a
//! category removes its products first (see
//! [`CatalogService::delete_category`]).

use async_graphql::ErrorExtensions;
use async_graphql::dynamic::{Field, FieldFuture, InputValue, Object, TypeRef};

use super::args;
use super::types::{self, CATEGORY, COUNTER, PRODUCT, TIME_RECORD};
use crate::core::entity::RecordId;
use crate::core::service::{CatalogService, ProductPatch};

pub const MUTATION: &str = "Mutation";

pub fn mutation_root() -> Object {
    Object::new(MUTATION)
        // CREATE
        .field(
            Field::new("createCategory", TypeRef::named(CATEGORY), |ctx| {
                FieldFuture::new(async move {
                    let name = args::required_string(&ctx, "name")?;
                    let service = ctx.data::<CatalogService>()?;
                    let category = service
                        .create_category(&name)
                        .await
                        .map_err(|e| e.extend())?;
                    Ok(Some(types::record(category)))
                })
            })
            .argument(InputValue::new("name", TypeRef::named_nn(TypeRef::STRING))),
        )
        .field(
            Field::new("createProduct", TypeRef::named(PRODUCT), |ctx| {
                FieldFuture::new(async move {
                    let name = args::required_string(&ctx, "name")?;
                    let parent = args::required_id(&ctx, "parentCategoryId")?;
                    let service = ctx.data::<CatalogService>()?;
                    let product = service
                        .create_product(&name, &parent)
                        .await
                        .map_err(|e| e.extend())?;
                    Ok(Some(types::record(product)))
                })
            })
            .argument(InputValue::new("name", TypeRef::named_nn(TypeRef::STRING)))
            .argument(InputValue::new(
                "parentCategoryId",
                TypeRef::named_nn(TypeRef::ID),
            )),
        )
        .field(
            Field::new("createCounter", TypeRef::named(COUNTER), |ctx| {
                FieldFuture::new(async move {
                    let number = args::required_int(&ctx, "number")?;
                    let service = ctx.data::<CatalogService>()?;
                    let counter = service
                        .create_counter(number)
                        .await
                        .map_err(|e| e.extend())?;
                    Ok(Some(types::record(counter)))
                })
            })
            .argument(InputValue::new("number", TypeRef::named_nn(TypeRef::INT))),
        )
        .field(Field::new(
            "createTime",
            TypeRef::named(TIME_RECORD),
            |ctx| {
                FieldFuture::new(async move {
                    let service = ctx.data::<CatalogService>()?;
                    let time = service.create_time().await.map_err(|e| e.extend())?;
                    Ok(Some(types::record(time)))
                })
            },
        ))
        // UPDATE
        .field(Field::new(
            "updateCounter",
            TypeRef::named(COUNTER),
            |ctx| {
                FieldFuture::new(async move {
                    let service = ctx.data::<CatalogService>()?;
                    let counter = service
                        .increment_counter()
                        .await
                        .map_err(|e| e.extend())?;
                    Ok(Some(types::record(counter)))
                })
            },
        ))
        .field(
            Field::new("updateCategory", TypeRef::named(CATEGORY), |ctx| {
                FieldFuture::new(async move {
                    let id = args::required_id(&ctx, "id")?;
                    let name = args::required_string(&ctx, "name")?;
                    let service = ctx.data::<CatalogService>()?;
                    let category = service
                        .update_category(&id, &name)
                        .await
                        .map_err(|e| e.extend())?;
                    Ok(Some(types::record(category)))
                })
            })
            .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
            .argument(InputValue::new("name", TypeRef::named_nn(TypeRef::STRING))),
        )
        .field(
            Field::new("updateProduct", TypeRef::named(PRODUCT), |ctx| {
                FieldFuture::new(async move {
                    let id = args::required_id(&ctx, "id")?;
                    let parent_category_id = args::optional_string(&ctx, "parentCategoryId")?
                        .map(|raw| RecordId::parse("parentCategoryId", &raw))
                        .transpose()
                        .map_err(|e| e.extend())?;
                    let patch = ProductPatch {
                        name: args::optional_string(&ctx, "name")?,
                        parent_category_id,
                    };
                    let service = ctx.data::<CatalogService>()?;
                    let product = service
                        .update_product(&id, patch)
                        .await
                        .map_err(|e| e.extend())?;
                    Ok(Some(types::record(product)))
                })
            })
            .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
            .argument(InputValue::new("name", TypeRef::named(TypeRef::STRING)))
            .argument(InputValue::new(
                "parentCategoryId",
                TypeRef::named(TypeRef::STRING),
            )),
        )
        // DELETE
        .field(
            Field::new("deleteCategory", TypeRef::named(CATEGORY), |ctx| {
                FieldFuture::new(async move {
                    let id = args::required_id(&ctx, "id")?;
                    let service = ctx.data::<CatalogService>()?;
                    let category = service
                        .delete_category(&id)
                        .await
                        .map_err(|e| e.extend())?;
                    Ok(Some(types::record(category)))
                })
            })
            .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID))),
        )
        .field(
            Field::new("deleteProduct", TypeRef::named(PRODUCT), |ctx| {
                FieldFuture::new(async move {
                    let id = args::required_id(&ctx, "id")?;
                    let service = ctx.data::<CatalogService>()?;
                    let product = service
                        .delete_product(&id)
                        .await
                        .map_err(|e| e.extend())?;
                    Ok(Some(types::record(product)))
                })
            })
            .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID))),
        )
}
