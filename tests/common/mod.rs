#![allow(dead_code)]

use actix_web::HttpResponse;
use actix_web_secure_headers::prelude::*;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub async fn test_handler() -> HttpResponse {
    HttpResponse::Ok().body("Test response")
}

pub async fn handler_with_own_headers() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("x-frame-options", "SAMEORIGIN"))
        .insert_header(("server", "test-server/1.0"))
        .insert_header(("x-powered-by", "test"))
        .body("Test response")
}

pub fn create_test_config() -> SecureHeadersConfiguration {
    SecureHeadersConfiguration::builder()
        .with_recommended()
        .ignore_path("/health")
        .use_clear_site_data_for_paths(
            ClearSiteDataPathConfig::new()
                .path("/logout", ClearSiteDataConfig::wildcard())
                .path(
                    "/account",
                    ClearSiteDataConfig::new([ClearSiteDataOption::Cache])
                        .expect("Test clear-site-data config could not be created"),
                ),
        )
        .build()
        .expect("Test config could not be created")
}
