// --- File: crates/services/banklink_backend/src/main.rs ---

use axum::{routing::get, Router};
#[cfg(any(
    feature = "plaid",
    feature = "finicity",
    feature = "mx",
    feature = "flinks",
    feature = "visa"
))]
use banklink_common::BanklinkError;
use banklink_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

/// Builds a vendor router when its runtime flag is set. A vendor that is
/// enabled but missing configuration logs an error and stays unmounted, so
/// its paths answer 404 while the rest of the service keeps working.
#[cfg(any(
    feature = "plaid",
    feature = "finicity",
    feature = "mx",
    feature = "flinks",
    feature = "visa"
))]
fn vendor_router<F>(name: &str, enabled: bool, build: F) -> Option<Router>
where
    F: FnOnce() -> Result<Router, BanklinkError>,
{
    if !enabled {
        tracing::info!("{name} routes are disabled by configuration");
        return None;
    }
    match build() {
        Ok(router) => {
            tracing::info!("{name} routes are mounted");
            Some(router)
        }
        Err(err) => {
            tracing::error!("{name} routes are not mounted: {err}");
            None
        }
    }
}

#[tokio::main]
async fn main() {
    banklink_common::logging::init();
    let config = Arc::new(load_config().expect("Failed to load config"));

    let api_router = Router::new().route("/", get(|| async { "Welcome to the Banklink API!" }));

    // The Dwolla routes carry the platform flows every aggregator depends on,
    // so a service without them has nothing to serve.
    let dwolla_router =
        banklink_dwolla::routes(config.clone()).expect("Failed to build Dwolla routes");

    #[cfg(feature = "plaid")]
    let plaid_router = vendor_router("Plaid", config.use_plaid, || {
        banklink_plaid::routes(config.clone()).map_err(Into::into)
    });
    #[cfg(feature = "finicity")]
    let finicity_router = vendor_router("Finicity", config.use_finicity, || {
        banklink_finicity::routes(config.clone()).map_err(Into::into)
    });
    #[cfg(feature = "mx")]
    let mx_router = vendor_router("MX", config.use_mx, || {
        banklink_mx::routes(config.clone()).map_err(Into::into)
    });
    #[cfg(feature = "flinks")]
    let flinks_router = vendor_router("Flinks", config.use_flinks, || {
        banklink_flinks::routes(config.clone()).map_err(Into::into)
    });
    #[cfg(feature = "visa")]
    let visa_router = vendor_router("Visa", config.use_visa, || {
        banklink_visa::routes(config.clone()).map_err(Into::into)
    });

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router.merge(dwolla_router);
        #[cfg(feature = "plaid")]
        if let Some(plaid_router) = plaid_router {
            router = router.merge(plaid_router);
        }
        #[cfg(feature = "finicity")]
        if let Some(finicity_router) = finicity_router {
            router = router.merge(finicity_router);
        }
        #[cfg(feature = "mx")]
        if let Some(mx_router) = mx_router {
            router = router.merge(mx_router);
        }
        #[cfg(feature = "flinks")]
        if let Some(flinks_router) = flinks_router {
            router = router.merge(flinks_router);
        }
        #[cfg(feature = "visa")]
        if let Some(visa_router) = visa_router {
            router = router.merge(visa_router);
        }
        router
    });

    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use banklink_dwolla::doc::DwollaApiDoc;
        #[cfg(feature = "finicity")]
        use banklink_finicity::doc::FinicityApiDoc;
        #[cfg(feature = "flinks")]
        use banklink_flinks::doc::FlinksApiDoc;
        #[cfg(feature = "mx")]
        use banklink_mx::doc::MxApiDoc;
        #[cfg(feature = "plaid")]
        use banklink_plaid::doc::PlaidApiDoc;
        #[cfg(feature = "visa")]
        use banklink_visa::doc::VisaApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Banklink API",
                version = "0.1.0",
                description = "Banklink Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Banklink", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        // Create the merged OpenAPI document
        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(DwollaApiDoc::openapi());
        #[cfg(feature = "plaid")]
        openapi_doc.merge(PlaidApiDoc::openapi());
        #[cfg(feature = "finicity")]
        openapi_doc.merge(FinicityApiDoc::openapi());
        #[cfg(feature = "mx")]
        openapi_doc.merge(MxApiDoc::openapi());
        #[cfg(feature = "flinks")]
        openapi_doc.merge(FlinksApiDoc::openapi());
        #[cfg(feature = "visa")]
        openapi_doc.merge(VisaApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");

        // Create the Swagger UI route, referencing the merged doc
        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        // Merge the Swagger UI into the main app router
        app = app.merge(swagger_ui);
    }

    // Serve static files in dev mode
    if cfg!(debug_assertions) {
        tracing::info!("Running in development mode, serving static files from ./dist");

        // Serve static files at a specific path
        let static_router = Router::new().nest_service("/static", ServeDir::new("dist"));
        app = app.merge(static_router);

        // You can also keep the fallback service for non-matched routes
        app = app.fallback_service(ServeDir::new("dist"));
    }

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!("Starting server at http://{}", addr);
    tracing::info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
