use hn_cli::config::AppConfig;
use hn_cli::internal::session::parse_item_ids;
use hn_cli::utils::datetime::format_age;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_parse_item_ids_no_panic(s in "\\PC*") {
        // Arbitrary input must be rejected or parsed, never panic
        let _ = parse_item_ids(&s);
    }

    #[test]
    fn test_parse_item_ids_reads_list_literals(ids in prop::collection::vec(any::<u32>(), 0..20)) {
        let plain = ids.iter().map(u32::to_string).collect::<Vec<_>>().join(", ");
        let quoted = format!(
            "[{}]",
            ids.iter().map(|id| format!("'{}'", id)).collect::<Vec<_>>().join(", ")
        );
        prop_assert_eq!(parse_item_ids(&plain).unwrap(), ids.clone());
        prop_assert_eq!(parse_item_ids(&quoted).unwrap(), ids);
    }

    #[test]
    fn test_format_age_future_is_empty(now in 0i64..4_000_000_000, ahead in 1i64..1_000_000) {
        prop_assert_eq!(format_age(Some(now + ahead), now), "");
    }

    #[test]
    fn test_format_age_always_labels_the_past(now in 0i64..4_000_000_000, back in 0i64..2_000_000_000) {
        let label = format_age(Some(now - back), now);
        prop_assert!(label == "just now" || label == "Yesterday" || label.ends_with(" ago"));
    }

    #[test]
    fn test_config_parsing_resilience(s in "\\PC*") {
        // Fuzz the config loader with random strings
        // It should return an Err, but not panic
        let _ = ron::from_str::<AppConfig>(&s);
    }
}
