//! Entity object types of the schema
//!
//! Category and Product refer to each other. Every type is declared here as a
//! dynamic [`Object`] whose relation fields name their peer type with
//! [`TypeRef::named`]; the names are only bound to definitions when the
//! schema is finished, so the registration order does not matter.
//!
//! The parent value handed to every field resolver is the record itself
//! (stored with [`FieldValue::owned_any`]), never a JSON blob.

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, Object, TypeRef};
use async_graphql::{ErrorExtensions, Value};

use crate::core::entity::{Category, Counter, Product, Record, TimeRecord};
use crate::core::service::CatalogService;

pub const CATEGORY: &str = Category::TYPE_NAME;
pub const PRODUCT: &str = Product::TYPE_NAME;
pub const COUNTER: &str = Counter::TYPE_NAME;
pub const TIME_RECORD: &str = TimeRecord::TYPE_NAME;

/// All entity types, ready to be registered on a schema builder
pub fn entity_types() -> Vec<Object> {
    vec![category_type(), product_type(), counter_type(), time_record_type()]
}

/// Wrap one record as a resolver output
pub fn record<T: Record>(record: T) -> FieldValue<'static> {
    FieldValue::owned_any(record)
}

/// Wrap a list of records as a resolver output
pub fn records<T: Record>(records: Vec<T>) -> FieldValue<'static> {
    FieldValue::list(records.into_iter().map(FieldValue::owned_any))
}

/// Field computed synchronously from the parent record
fn scalar_field<T: Record>(name: &str, ty: TypeRef, read: fn(&T) -> Value) -> Field {
    Field::new(name, ty, move |ctx| {
        FieldFuture::new(async move {
            let parent = ctx.parent_value.try_downcast_ref::<T>()?;
            Ok(Some(read(parent)))
        })
    })
}

fn id_field<T: Record>() -> Field {
    scalar_field::<T>("id", TypeRef::named(TypeRef::ID), |r| {
        Value::from(r.id().to_string())
    })
}

fn category_type() -> Object {
    Object::new(CATEGORY)
        .field(id_field::<Category>())
        .field(scalar_field::<Category>(
            "name",
            TypeRef::named(TypeRef::STRING),
            |c| Value::from(c.name.clone()),
        ))
        .field(Field::new(
            "products",
            TypeRef::named_list(PRODUCT),
            |ctx| {
                FieldFuture::new(async move {
                    let category = ctx.parent_value.try_downcast_ref::<Category>()?;
                    let service = ctx.data::<CatalogService>()?;
                    let products = service
                        .category_products(category)
                        .await
                        .map_err(|e| e.extend())?;
                    Ok(Some(records(products)))
                })
            },
        ))
}

fn product_type() -> Object {
    Object::new(PRODUCT)
        .field(id_field::<Product>())
        .field(scalar_field::<Product>(
            "name",
            TypeRef::named(TypeRef::STRING),
            |p| Value::from(p.name.clone()),
        ))
        .field(Field::new("category", TypeRef::named(CATEGORY), |ctx| {
            FieldFuture::new(async move {
                let product = ctx.parent_value.try_downcast_ref::<Product>()?;
                let service = ctx.data::<CatalogService>()?;
                // A dangling parentCategoryId resolves to null, not an error
                let category = service
                    .product_category(product)
                    .await
                    .map_err(|e| e.extend())?;
                Ok(category.map(record))
            })
        }))
}

fn counter_type() -> Object {
    Object::new(COUNTER)
        .field(id_field::<Counter>())
        .field(scalar_field::<Counter>(
            "number",
            TypeRef::named(TypeRef::INT),
            |c| Value::from(c.number),
        ))
}

fn time_record_type() -> Object {
    Object::new(TIME_RECORD)
        .field(id_field::<TimeRecord>())
        .field(scalar_field::<TimeRecord>(
            "time",
            TypeRef::named(TypeRef::STRING),
            |t| Value::from(t.time.clone()),
        ))
}
