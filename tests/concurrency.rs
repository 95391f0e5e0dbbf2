use actix_web::http::header::HeaderMap;
use actix_web_secure_headers::{apply_secure_headers, HeaderPlan, SecureHeadersConfiguration};
use std::sync::Arc;

mod common;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_shared_configuration_across_tasks() {
        let config = Arc::new(common::create_test_config());
        let expected = HeaderPlan::for_request(Some(&config), "/logout")
            .unwrap()
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..64 {
            let config = config.clone();
            handles.push(tokio::spawn(async move {
                let path = match i % 3 {
                    0 => "/logout",
                    1 => "/account",
                    _ => "/health",
                };
                let mut headers = HeaderMap::new();
                let added = apply_secure_headers(Some(&config), path, &mut headers).unwrap();
                (path, added, headers)
            }));
        }

        for handle in handles {
            let (path, added, headers) = handle.await.unwrap();
            match path {
                "/health" => {
                    assert_eq!(added, 0);
                    assert!(headers.is_empty());
                }
                "/logout" => {
                    assert_eq!(
                        headers.get("content-security-policy"),
                        expected.get("content-security-policy")
                    );
                    assert_eq!(headers.get("clear-site-data").unwrap(), "\"*\"");
                }
                _ => assert_eq!(headers.get("clear-site-data").unwrap(), "\"cache\""),
            }
        }
    }

    #[test]
    fn test_configuration_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SecureHeadersConfiguration>();
        assert_send_sync::<HeaderPlan>();
    }
}
