//! Tests for #[derive(Action)] and #[derive(FeatureFlags)]

use datatable::{Action, ActionCategory, FeatureFlags};

#[derive(Action, Clone, Debug)]
enum ViewerAction {
    #[action(category = "page")]
    PageNext,
    #[action(category = "page")]
    PageSelect(usize),
    #[action(category = "filter")]
    FilterSet { term: String },
    Refresh,
}

#[test]
fn test_action_names_for_every_variant_shape() {
    assert_eq!(ViewerAction::PageNext.name(), "PageNext");
    assert_eq!(ViewerAction::PageSelect(3).name(), "PageSelect");
    assert_eq!(
        ViewerAction::FilterSet { term: "x".into() }.name(),
        "FilterSet"
    );
    assert_eq!(ViewerAction::Refresh.name(), "Refresh");
}

#[test]
fn test_action_categories() {
    assert_eq!(ViewerAction::PageSelect(1).category(), Some("page"));
    assert_eq!(
        ViewerAction::FilterSet {
            term: String::new()
        }
        .category(),
        Some("filter")
    );
    assert_eq!(ViewerAction::Refresh.category(), None);
}

#[test]
fn test_flag_defaults() {
    #[derive(FeatureFlags)]
    struct Features {
        #[flag(default = true)]
        search: bool,
        compact_rows: bool,
    }

    let features = Features::default();
    assert!(features.search);
    assert!(!features.compact_rows);
    assert_eq!(Features::all_flags(), &["search", "compact_rows"]);
}

#[test]
fn test_flags_by_name() {
    #[derive(FeatureFlags)]
    struct Features {
        zebra_rows: bool,
        #[flag(default = true)]
        sticky_header: bool,
    }

    let mut features = Features::default();
    assert_eq!(features.is_enabled("zebra_rows"), Some(false));
    assert!(features.enable("zebra_rows"));
    assert!(features.zebra_rows);
    assert_eq!(features.toggle("sticky_header"), Some(false));
    assert!(!features.sticky_header);
    assert!(!features.set("unknown", true));
    assert_eq!(features.is_enabled("unknown"), None);
}
