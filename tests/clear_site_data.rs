use actix_web_secure_headers::{
    ClearSiteDataConfig, ClearSiteDataOption, ClearSiteDataPathConfig, SecureHeader,
};

#[cfg(test)]
mod tests {
    use super::*;
    use ClearSiteDataOption::{Cache, Cookies, Storage, Wildcard};

    fn admin_paths() -> ClearSiteDataPathConfig {
        ClearSiteDataPathConfig::new()
            .path("/admin", ClearSiteDataConfig::new([Cache]).unwrap())
            .path("/admin/logout", ClearSiteDataConfig::wildcard())
    }

    #[test]
    fn test_wildcard_is_sole_output() {
        let config = ClearSiteDataConfig::new([Wildcard, Cache, Cookies]).unwrap();
        assert_eq!(config.build_header_value(), "\"*\"");
    }

    #[test]
    fn test_duplicates_collapse() {
        let config = ClearSiteDataConfig::new([Cache, Cookies, Cache]).unwrap();
        assert_eq!(config.build_header_value(), "\"cache\",\"cookies\"");
    }

    #[test]
    fn test_all_categories() {
        let config = ClearSiteDataConfig::new([Storage, Cookies, Cache]).unwrap();
        assert_eq!(
            config.build_header_value(),
            "\"storage\",\"cookies\",\"cache\""
        );
        assert_eq!(
            ClearSiteDataConfig::header_name().as_str(),
            "clear-site-data"
        );
    }

    #[test]
    fn test_longer_key_resolves_its_own_config() {
        let paths = admin_paths();
        assert_eq!(
            paths.resolve("/admin/logout"),
            Some(&ClearSiteDataConfig::wildcard())
        );
        assert_eq!(
            paths.resolve("/admin"),
            Some(&ClearSiteDataConfig::new([Cache]).unwrap())
        );
    }

    #[test]
    fn test_no_match_without_default_is_none() {
        let paths = admin_paths();
        assert!(paths.resolve("/other").is_none());
        assert!(paths.resolve("").is_none());
    }

    #[test]
    fn test_no_match_falls_back_to_default() {
        let default = ClearSiteDataConfig::new([Cookies]).unwrap();
        let paths = admin_paths().default_config(default.clone());
        assert_eq!(paths.resolve("/other"), Some(&default));
        assert_eq!(paths.resolve(""), Some(&default));
    }

    #[test]
    fn test_matching_is_exact_not_prefix() {
        let paths = admin_paths();
        assert!(paths.resolve("/admin/logout/now").is_none());
        assert!(paths.resolve("/admin/").is_none());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let paths = admin_paths();
        assert!(paths.resolve("/Admin").is_none());
        assert!(paths.resolve("/ADMIN/LOGOUT").is_none());
    }
}
