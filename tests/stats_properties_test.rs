// ==========================================
// 材料分组与统计 集成测试
// ==========================================
// 测试目标: 分组精确性与顺序、统计恒等式、典型场景、属性缺失策略
// ==========================================


use nesting_report::domain::{MaterialGroupKey, PropertyPolicy, PropertyValue, SheetId, SheetProperty};
use nesting_report::engine::{MaterialStatsAggregator, NestingError, SheetGrouper, UnavailableReason};
use test_helpers::{assert_close, MemorySheetSource};

fn ids(source: &MemorySheetSource) -> Vec<SheetId> {
    use nesting_report::source::SheetSource;
    source.sheets()
}

#[test]
fn test_grouping_is_exact_and_keeps_order() {
    let source = MemorySheetSource::new()
        .with_sheet("A", "Steel", 3.0, 1.0, 50.0, 50.0)
        .with_sheet("B", "Alu", 2.0, 1.0, 50.0, 50.0)
        .with_sheet("C", "Steel", 3.0, 1.0, 50.0, 50.0)
        .with_sheet("D", "Steel", 4.0, 1.0, 50.0, 50.0)
        .with_sheet("E", "Steel", 3.0, 1.0, 50.0, 50.0);

    let outcome = SheetGrouper::new()
        .group_sheets(&source, &ids(&source), PropertyPolicy::Fail)
        .unwrap();

    let keys: Vec<&MaterialGroupKey> = outcome.groups.iter().map(|g| &g.key).collect();
    assert_eq!(
        keys,
        vec![
            &MaterialGroupKey::new("Steel", 3.0),
            &MaterialGroupKey::new("Alu", 2.0),
            &MaterialGroupKey::new("Steel", 4.0),
        ]
    );

    let steel3: Vec<&str> = outcome.groups[0].sheet_ids().map(|s| s.as_str()).collect();
    assert_eq!(steel3, vec!["A", "C", "E"]);
    assert_eq!(outcome.groups[1].len(), 1);
    assert_eq!(outcome.groups[2].len(), 1);
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_material_names_are_case_sensitive() {
    let source = MemorySheetSource::new()
        .with_sheet("A", "Steel", 3.0, 1.0, 50.0, 50.0)
        .with_sheet("B", "steel", 3.0, 1.0, 50.0, 50.0);

    let outcome = SheetGrouper::new()
        .group_sheets(&source, &ids(&source), PropertyPolicy::Fail)
        .unwrap();
    assert_eq!(outcome.groups.len(), 2);
}

#[test]
fn test_steel_scenario() {
    let source = MemorySheetSource::new()
        .with_sheet("A", "Steel", 3.0, 2.0, 80.0, 20.0)
        .with_sheet("B", "Steel", 3.0, 1.0, 60.0, 40.0);

    let outcome = SheetGrouper::new()
        .group_sheets(&source, &ids(&source), PropertyPolicy::Fail)
        .unwrap();
    assert_eq!(outcome.groups.len(), 1);

    let stats = MaterialStatsAggregator::new()
        .aggregate_group(&outcome.groups[0])
        .unwrap();

    assert_eq!(stats.number_of_sheets, 2);
    assert_close(stats.total_area, 3.0);
    assert_close(stats.total_reusable, 140.0);
    assert_close(stats.total_garbage, 60.0);
    assert_close(stats.average_reusable, 70.0);
    assert_close(stats.average_garbage, 30.0);
}

#[test]
fn test_two_single_sheet_groups() {
    let source = MemorySheetSource::new()
        .with_sheet("S", "Steel", 3.0, 2.0, 80.0, 20.0)
        .with_sheet("L", "Alu", 2.0, 1.5, 35.0, 65.0);

    let outcome = SheetGrouper::new()
        .group_sheets(&source, &ids(&source), PropertyPolicy::Fail)
        .unwrap();
    assert_eq!(outcome.groups.len(), 2);

    let aggregator = MaterialStatsAggregator::new();
    let steel = aggregator.aggregate_group(&outcome.groups[0]).unwrap();
    let alu = aggregator.aggregate_group(&outcome.groups[1]).unwrap();

    assert_eq!(steel.number_of_sheets, 1);
    assert_close(steel.total_area, 2.0);
    assert_close(steel.total_reusable, 80.0);

    assert_eq!(alu.number_of_sheets, 1);
    assert_close(alu.total_area, 1.5);
    assert_close(alu.total_garbage, 65.0);

    // 单张板材: 平均值 == 合计值
    for stats in [steel, alu] {
        assert_close(stats.average_reusable, stats.total_reusable);
        assert_close(stats.average_garbage, stats.total_garbage);
    }
}

#[test]
fn test_stat_identities() {
    let source = MemorySheetSource::new()
        .with_sheet("A", "Steel", 3.0, 2.5, 70.0, 30.0)
        .with_sheet("B", "Steel", 3.0, 1.25, 55.0, 45.0)
        .with_sheet("C", "Steel", 3.0, 0.75, 10.0, 90.0)
        .with_sheet("D", "Steel", 3.0, 3.0, 42.5, 57.5);

    let outcome = SheetGrouper::new()
        .group_sheets(&source, &ids(&source), PropertyPolicy::Fail)
        .unwrap();
    let group = &outcome.groups[0];
    let stats = MaterialStatsAggregator::new().aggregate_group(group).unwrap();
    let n = stats.number_of_sheets as f64;

    assert_eq!(stats.number_of_sheets, group.len());
    assert_close(stats.total_area, 7.5);
    assert_close(stats.average_reusable * n, stats.total_reusable);
    assert_close(stats.average_garbage * n, stats.total_garbage);

    // 每张板材 reusable + leftover = 100 时的代数恒等式
    assert_close(
        stats.total_reusable_material + stats.total_non_reusable_material,
        stats.total_area * (stats.total_reusable + stats.total_garbage) / 100.0 / n,
    );
}

#[test]
fn test_total_area_is_order_independent() {
    let forward = MemorySheetSource::new()
        .with_sheet("A", "Steel", 3.0, 0.1, 50.0, 50.0)
        .with_sheet("B", "Steel", 3.0, 0.2, 50.0, 50.0)
        .with_sheet("C", "Steel", 3.0, 0.3, 50.0, 50.0);
    let backward = MemorySheetSource::new()
        .with_sheet("C", "Steel", 3.0, 0.3, 50.0, 50.0)
        .with_sheet("B", "Steel", 3.0, 0.2, 50.0, 50.0)
        .with_sheet("A", "Steel", 3.0, 0.1, 50.0, 50.0);

    let grouper = SheetGrouper::new();
    let aggregator = MaterialStatsAggregator::new();
    let a = grouper.group_sheets(&forward, &ids(&forward), PropertyPolicy::Fail).unwrap();
    let b = grouper.group_sheets(&backward, &ids(&backward), PropertyPolicy::Fail).unwrap();

    let sa = aggregator.aggregate_group(&a.groups[0]).unwrap();
    let sb = aggregator.aggregate_group(&b.groups[0]).unwrap();
    assert!((sa.total_area - sb.total_area).abs() < 1e-9);
    assert!((sa.total_area - 0.6).abs() < 1e-9);
}

#[test]
fn test_missing_property_fails_fast() {
    let source = MemorySheetSource::new()
        .with_sheet("A", "Steel", 3.0, 1.0, 50.0, 50.0)
        .with_sheet("B", "Steel", 3.0, 1.0, 50.0, 50.0)
        .without_property("B", SheetProperty::Area);

    let err = SheetGrouper::new()
        .group_sheets(&source, &ids(&source), PropertyPolicy::Fail)
        .unwrap_err();

    assert_eq!(
        err,
        NestingError::PropertyUnavailable {
            sheet: SheetId::new("B"),
            property: SheetProperty::Area,
            reason: UnavailableReason::Missing,
        }
    );
}

#[test]
fn test_non_numeric_property_is_skipped_with_skip_policy() {
    let source = MemorySheetSource::new()
        .with_sheet("A", "Steel", 3.0, 1.0, 50.0, 50.0)
        .with_sheet("B", "Steel", 3.0, 1.0, 50.0, 50.0)
        .with_sheet_property("B", SheetProperty::RateReusable, PropertyValue::from("n/a"))
        .with_sheet("C", "Steel", 3.0, 2.0, 50.0, 50.0);

    let outcome = SheetGrouper::new()
        .group_sheets(&source, &ids(&source), PropertyPolicy::Skip)
        .unwrap();

    assert_eq!(outcome.groups.len(), 1);
    let kept: Vec<&str> = outcome.groups[0].sheet_ids().map(|s| s.as_str()).collect();
    assert_eq!(kept, vec!["A", "C"]);

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].sheet, SheetId::new("B"));
    assert_eq!(outcome.skipped[0].property, SheetProperty::RateReusable);

    let stats = MaterialStatsAggregator::new()
        .aggregate_group(&outcome.groups[0])
        .unwrap();
    assert_eq!(stats.number_of_sheets, 2);
    assert_close(stats.total_area, 3.0);
}

#[test]
fn test_empty_input_is_error() {
    let result = MaterialStatsAggregator::new().aggregate(&[]);
    assert_eq!(result.unwrap_err(), NestingError::EmptyGroup);
}
