//! App Router

use salvo::Router;

use crate::{auth, cart, categories, checkout, orders, products, profile};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("categories").get(categories::index::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("cart/count")
                .hoop(auth::middleware::optional)
                .get(cart::count::handler),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("cart")
                        .get(cart::get::handler)
                        .post(cart::create::handler)
                        .push(Router::with_path("update").post(cart::update::handler))
                        .push(Router::with_path("reconcile").post(cart::reconcile::handler)),
                )
                .push(Router::with_path("checkout").post(checkout::create::handler))
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .push(Router::with_path("{order}").get(orders::get::handler)),
                )
                .push(
                    Router::with_path("profile")
                        .get(profile::get::handler)
                        .put(profile::update::handler),
                ),
        )
}
