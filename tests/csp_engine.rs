use actix_web_secure_headers::core::build_header_value;
use actix_web_secure_headers::{
    CspConfig, CspMode, CspSlot, DirectiveElement, HashAlgorithm, HashGenerator, SandboxConfig,
    SandboxToken, SecureHeadersError,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_src_directive_and_uri() {
        let config = CspConfig::new().with_slot(
            CspSlot::StyleSrc,
            [
                DirectiveElement::self_(),
                DirectiveElement::uri("cdnjs.cloudflare.com"),
            ],
        );

        assert_eq!(
            build_header_value(&config, CspMode::Enforce).unwrap(),
            "style-src 'self' cdnjs.cloudflare.com;"
        );
    }

    #[test]
    fn test_single_directive_has_no_trailing_space() {
        let config = CspConfig::new().with_slot(CspSlot::StyleSrc, [DirectiveElement::self_()]);

        assert_eq!(
            build_header_value(&config, CspMode::Enforce).unwrap(),
            "style-src 'self';"
        );
    }

    #[test]
    fn test_empty_policy_renders_empty_string() {
        assert_eq!(
            build_header_value(&CspConfig::new(), CspMode::Enforce).unwrap(),
            ""
        );
    }

    #[test]
    fn test_all_slots_in_canonical_order() {
        let mut config = CspConfig::new();
        for slot in CspSlot::ALL.iter().rev() {
            config.set_slot(*slot, [DirectiveElement::self_()]);
        }

        let value = build_header_value(&config, CspMode::Enforce).unwrap();
        let expected: String = CspSlot::ALL
            .iter()
            .map(|slot| format!("{} 'self';", slot))
            .collect();
        assert_eq!(value, expected);
    }

    #[test]
    fn test_full_clause_order() {
        let config = CspConfig::new()
            .with_slot(CspSlot::DefaultSrc, [DirectiveElement::none()])
            .sandbox(SandboxConfig::with_tokens([
                SandboxToken::AllowForms,
                SandboxToken::AllowScripts,
            ]))
            .plugin_types("application/pdf")
            .block_all_mixed_content(true)
            .upgrade_insecure_requests(true)
            .referrer("no-referrer")
            .report_uri("/csp-report")
            .report_to("csp-endpoint");

        assert_eq!(
            config.build_header_value(CspMode::Enforce).unwrap(),
            "default-src 'none';sandbox allow-forms allow-scripts; plugin-types application/pdf;\
             block-all-mixed-content;upgrade-insecure-requests;referrer no-referrer;\
             report-uri /csp-report;report-to csp-endpoint;"
        );
    }

    #[test]
    fn test_report_only_shares_assembly() {
        let config = CspConfig::report_only("https://example.com/csp")
            .unwrap()
            .with_slot(CspSlot::ScriptSrc, [DirectiveElement::self_()]);

        assert_eq!(
            config.build_header_value(CspMode::ReportOnly),
            config.build_header_value(CspMode::Enforce)
        );
        assert_eq!(
            config.build_header_value(CspMode::ReportOnly).unwrap(),
            "script-src 'self';report-uri https://example.com/csp;"
        );
    }

    #[test]
    fn test_report_only_requires_report_uri() {
        assert_eq!(
            CspConfig::report_only(" ").unwrap_err(),
            SecureHeadersError::MissingReportUri
        );
        assert_eq!(
            build_header_value(&CspConfig::recommended(), CspMode::ReportOnly).unwrap_err(),
            SecureHeadersError::MissingReportUri
        );
    }

    #[test]
    fn test_unknown_slot_name_is_invalid_argument() {
        assert!(matches!(
            "script-source".parse::<CspSlot>(),
            Err(SecureHeadersError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_hash_source_in_policy() {
        let config = CspConfig::new().with_slot(
            CspSlot::ScriptSrc,
            [
                DirectiveElement::self_(),
                HashGenerator::generate_element(HashAlgorithm::Sha256, b""),
            ],
        );

        assert_eq!(
            config.build_header_value(CspMode::Enforce).unwrap(),
            "script-src 'self' 'sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=';"
        );
    }

    #[test]
    fn test_blank_optional_clauses_are_omitted() {
        let config = CspConfig::new()
            .with_slot(CspSlot::ImgSrc, [DirectiveElement::uri("data:")])
            .referrer("  ")
            .report_to("");

        assert_eq!(
            config.build_header_value(CspMode::Enforce).unwrap(),
            "img-src data:;"
        );
    }
}
