//! Tests for log filter defaults

#[cfg(test)]
mod tests {
    use bouquet::io::logging::{build_filter, default_directive, init_logging};

    // Tests quiet mode only raises the level for this crate
    // Verified by swapping the quiet and normal levels
    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "bouquet=info");
        assert_eq!(default_directive(true), "bouquet=warn");
    }

    // Tests the filter builds and a second install is refused
    // Verified by panicking when a subscriber already exists
    #[test]
    fn test_init_logging_twice() {
        let filter = build_filter(true);
        assert!(!filter.to_string().is_empty());

        init_logging(true);
        assert!(!init_logging(false));
    }
}
