use utoipa::OpenApi;
use utoipa::ToSchema;

use models::campaign::{Campaign, CampaignPatch, NewCampaign};
use models::order::{NewOrder, Order, OrderItem, OrderPatch, OrderStatus};
use models::product::{NewProduct, Product, ProductPatch};
use models::status::Status;
use models::store::{NewStore, Store, StorePatch};
use models::supplier::{NewSupplier, Supplier, SupplierPatch};
use models::user::{NewUser, Role, UserPatch, UserView};

use crate::routes::resources::{DeletedResponse, ListQuery};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

// Handlers are generic over the entity, so each resource gets its own
// documentation-only path items.
macro_rules! resource_paths {
    ($module:ident, $tag:tt, $collection:tt, $item:tt, $view:ident, $input:ident, $patch:ident) => {
        pub mod $module {
            use super::*;

            #[utoipa::path(get, path = $collection, tag = $tag, params(ListQuery),
                responses((status = 200, description = "All records, or one page of them", body = [$view]),
                          (status = 400, description = "Bad query string", body = ErrorResponse)))]
            pub fn list() {}

            #[utoipa::path(get, path = $item, tag = $tag,
                params(("id" = String, Path, description = "Record id")),
                responses((status = 200, description = "Record found", body = $view),
                          (status = 404, description = "No record with this id", body = ErrorResponse)))]
            pub fn get() {}

            #[utoipa::path(post, path = $collection, tag = $tag, request_body = $input,
                responses((status = 201, description = "Record created", body = $view),
                          (status = 400, description = "Validation failed", body = ErrorResponse),
                          (status = 409, description = "Duplicate record", body = ErrorResponse)))]
            pub fn create() {}

            #[utoipa::path(put, path = $item, tag = $tag, request_body = $patch,
                params(("id" = String, Path, description = "Record id")),
                responses((status = 200, description = "Record updated", body = $view),
                          (status = 400, description = "Validation failed", body = ErrorResponse),
                          (status = 404, description = "No record with this id", body = ErrorResponse),
                          (status = 409, description = "Duplicate record", body = ErrorResponse)))]
            pub fn update() {}

            #[utoipa::path(delete, path = $item, tag = $tag,
                params(("id" = String, Path, description = "Record id")),
                responses((status = 200, description = "Record removed", body = DeletedResponse),
                          (status = 404, description = "No record with this id", body = ErrorResponse)))]
            pub fn delete() {}
        }
    };
}

resource_paths!(users, "users", "/users", "/users/{id}", UserView, NewUser, UserPatch);
resource_paths!(products, "products", "/products", "/products/{id}", Product, NewProduct, ProductPatch);
resource_paths!(orders, "orders", "/orders", "/orders/{id}", Order, NewOrder, OrderPatch);
resource_paths!(stores, "stores", "/stores", "/stores/{id}", Store, NewStore, StorePatch);
resource_paths!(suppliers, "suppliers", "/suppliers", "/suppliers/{id}", Supplier, NewSupplier, SupplierPatch);
resource_paths!(campaigns, "campaigns", "/campaigns", "/campaigns/{id}", Campaign, NewCampaign, CampaignPatch);

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API da Central de Compras",
        version = "1.0.0",
        description = "Purchasing hub: users, products, orders, stores, suppliers and campaigns"
    ),
    paths(
        crate::routes::health,
        users::list, users::get, users::create, users::update, users::delete,
        products::list, products::get, products::create, products::update, products::delete,
        orders::list, orders::get, orders::create, orders::update, orders::delete,
        stores::list, stores::get, stores::create, stores::update, stores::delete,
        suppliers::list, suppliers::get, suppliers::create, suppliers::update, suppliers::delete,
        campaigns::list, campaigns::get, campaigns::create, campaigns::update, campaigns::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            DeletedResponse,
            Status,
            Role, UserView, NewUser, UserPatch,
            Product, NewProduct, ProductPatch,
            OrderStatus, OrderItem, Order, NewOrder, OrderPatch,
            Store, NewStore, StorePatch,
            Supplier, NewSupplier, SupplierPatch,
            Campaign, NewCampaign, CampaignPatch,
        )
    ),
    tags(
        (name = "health"),
        (name = "users", description = "User management"),
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Store purchase orders"),
        (name = "stores", description = "Buying stores"),
        (name = "suppliers", description = "Suppliers"),
        (name = "campaigns", description = "Supplier discount campaigns")
    )
)]
pub struct ApiDoc;
