//! Tests for layout constants and environment-driven settings

#[cfg(test)]
mod tests {
    use bouquet::io::configuration::{
        DEFAULT_ASSETS_DIR, DEFAULT_MAIL_FROM, HEAD_SCALE_MIN, HEAD_SCALE_SPAN, HERO_SCALE_MIN,
        HERO_SCALE_SPAN, LCG_MODULUS, MAX_SCALE, RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_MS,
        Settings,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    // Tests every scale range stays under the global cap
    // Verified by widening the hero range
    #[test]
    fn test_scale_ranges_within_cap() {
        assert!(HERO_SCALE_MIN + HERO_SCALE_SPAN <= MAX_SCALE + 1e-9);
        assert!(HEAD_SCALE_MIN + HEAD_SCALE_SPAN <= MAX_SCALE);
        assert!(HEAD_SCALE_MIN > 0.0);
    }

    // Tests generator and limiter constants
    // Verified by changing the modulus
    #[test]
    fn test_fixed_constants() {
        assert_eq!(LCG_MODULUS, 233_280);
        assert_eq!(RATE_LIMIT_MAX_REQUESTS, 5);
        assert_eq!(RATE_LIMIT_WINDOW_MS, 3_600_000);
    }

    // Tests defaults apply when nothing is set
    // Verified by reading the key from an empty lookup
    #[test]
    fn test_settings_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.assets_dir, PathBuf::from(DEFAULT_ASSETS_DIR));
        assert_eq!(settings.mail_from, DEFAULT_MAIL_FROM);
        assert!(settings.gemini_api_key.is_none());
    }

    // Tests every variable overrides its default
    // Verified by swapping two variable names
    #[test]
    fn test_settings_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("BOUQUET_ASSETS_DIR", "/srv/art"),
            ("BOUQUET_GENERATED_DIR", "/srv/generated"),
            ("BOUQUET_OUTBOX_DIR", "/srv/outbox"),
            ("BOUQUET_MAIL_FROM", "shop@example.com"),
            ("GEMINI_API_KEY", "abc"),
        ]));
        assert_eq!(settings.assets_dir, PathBuf::from("/srv/art"));
        assert_eq!(settings.generated_dir, PathBuf::from("/srv/generated"));
        assert_eq!(settings.outbox_dir, Some(PathBuf::from("/srv/outbox")));
        assert_eq!(settings.mail_from, "shop@example.com");
        assert_eq!(settings.gemini_api_key.as_deref(), Some("abc"));
    }

    // Tests blank values count as unset
    // Verified by keeping whitespace-only keys
    #[test]
    fn test_settings_blank_values() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "   "),
            ("BOUQUET_MAIL_FROM", ""),
        ]));
        assert!(settings.gemini_api_key.is_none());
        assert_eq!(settings.mail_from, DEFAULT_MAIL_FROM);
    }

    // Tests the outbox can be switched off while blank keeps the default
    // Verified by treating "none" as a directory name
    #[test]
    fn test_settings_outbox_disabled() {
        for off in ["none", "OFF", " None "] {
            let settings = Settings::from_lookup(lookup_from(&[("BOUQUET_OUTBOX_DIR", off)]));
            assert!(settings.outbox_dir.is_none(), "{off}");
        }
        let blank = Settings::from_lookup(lookup_from(&[("BOUQUET_OUTBOX_DIR", " ")]));
        assert_eq!(blank.outbox_dir, Settings::default().outbox_dir);
    }
}
