use actix_web::http::header::HeaderMap;
use actix_web_secure_headers::{
    apply_secure_headers, ClearSiteDataConfig, ClearSiteDataPathConfig,
    SecureHeadersConfiguration, SecureHeadersError,
};

fn main() -> Result<(), SecureHeadersError> {
    println!("Actix Web Secure Headers Example");

    let config = SecureHeadersConfiguration::builder()
        .with_recommended()
        .use_clear_site_data_for_paths(
            ClearSiteDataPathConfig::new().path("/logout", ClearSiteDataConfig::wildcard()),
        )
        .ignore_path("/health")
        .build()?;

    for path in ["/", "/logout", "/health"] {
        let mut headers = HeaderMap::new();
        let added = apply_secure_headers(Some(&config), path, &mut headers)?;

        println!("\n{} ({} headers)", path, added);
        for (name, value) in headers.iter() {
            println!("  {}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
    }

    println!("\nRun the tests with: cargo test");
    Ok(())
}
