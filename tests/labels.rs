use priority_triage::model::label::{sort_by_urgency, PriorityLabel::{self, *}};

#[test]
fn labels_order_by_urgency() {
    assert!(Low < Medium && Medium < High);
    assert_eq!(PriorityLabel::ALL, [Low, Medium, High]);
    for (index, label) in PriorityLabel::ALL.iter().enumerate() {
        assert_eq!(label.index(), index);
        assert_eq!(PriorityLabel::from_index(index), Some(*label));
    }
    assert_eq!(PriorityLabel::from_index(3), None);
    assert_eq!(PriorityLabel::default(), Medium);
}

#[test]
fn sort_by_urgency_is_stable() {
    let mut items = vec![
        ("a", Low),
        ("b", High),
        ("c", Medium),
        ("d", High),
        ("e", Low),
    ];
    sort_by_urgency(&mut items, |item| item.1);
    let order: Vec<&str> = items.iter().map(|item| item.0).collect();
    assert_eq!(order, vec!["b", "d", "c", "a", "e"]);
}

#[test]
fn serde_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&High).unwrap(), "\"high\"");
    assert_eq!(
        serde_json::from_str::<Vec<PriorityLabel>>("[\"low\",\"medium\"]").unwrap(),
        vec![Low, Medium]
    );
    assert!(serde_json::from_str::<PriorityLabel>("\"urgent\"").is_err());
}

#[test]
fn parsing_is_exact() {
    assert_eq!("high".parse::<PriorityLabel>().unwrap(), High);
    assert!("HIGH".parse::<PriorityLabel>().is_err());
    assert!(" low".parse::<PriorityLabel>().is_err());
    let err = "urgent".parse::<PriorityLabel>().unwrap_err();
    assert!(err.to_string().contains("urgent"));
}

#[test]
fn lenient_parse_falls_back_to_medium() {
    assert_eq!(PriorityLabel::parse_or_default("low"), Low);
    assert_eq!(PriorityLabel::parse_or_default("critical"), Medium);
    assert_eq!(PriorityLabel::parse_or_default(""), Medium);
    assert_eq!(High.to_string(), "high");
}
