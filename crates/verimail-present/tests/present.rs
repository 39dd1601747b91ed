//! Presenter behaviour over decoded service responses.

use proptest::prelude::*;
use verimail_model::{BooleanField, Reachability, ResultSet, StatusTone, VerificationResult};
use verimail_present::{Column, SortState, Submission, TableView, VirtualWindow, build_summary};

fn response() -> ResultSet {
    serde_json::from_str(
        r#"{
            "stats": {"safe": 1, "risky": 0, "unknown": 0, "invalid": 1, "total": 2},
            "items": [
                {"email": "a@example.com", "is_reachable": "Safe", "is_disposable": false,
                 "is_role_account": false, "can_connect_smtp": true, "has_full_inbox": false,
                 "is_catch_all": false, "is_deliverable": true, "is_disabled": false},
                {"email": "not-an-email", "is_reachable": "Invalid"}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn submitted_batch_is_presented() {
    let mut submission = Submission::default();
    submission.begin(2).unwrap();
    submission.succeed(response()).unwrap();
    let results = submission.results().unwrap();

    let view = TableView::from_results(results);
    let rows = view.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].is_reachable.tone(), StatusTone::Positive);
    assert_eq!(rows[1].is_reachable.tone(), StatusTone::Negative);

    let chart: Vec<String> = build_summary(&results.stats)
        .iter()
        .map(|bar| format!("{} {} {}", bar.key, bar.value, bar.percentage_label()))
        .collect();
    insta::assert_snapshot!(
        chart.join(" | "),
        @"Total 2 (100.0 %) | Safe 1 (50.0 %) | Risky 0 (0.0 %) | Unknown 0 (0.0 %) | Invalid 1 (50.0 %)"
    );
}

#[test]
fn undetermined_flags_render_as_not_available() {
    let results = response();
    let view = TableView::from_results(&results);
    let cells: Vec<&str> = Column::ALL
        .iter()
        .map(|column| column.display(view.rows()[1]))
        .collect();
    insta::assert_snapshot!(
        cells.join(","),
        @"not-an-email,Invalid,N/A,N/A,N/A,N/A,N/A,N/A,N/A"
    );
}

#[test]
fn window_materializes_visible_rows_only() {
    let items: Vec<VerificationResult> = (0..1_000)
        .map(|i| VerificationResult::new(format!("user{i:04}@example.com"), Reachability::Safe))
        .collect();
    let view = TableView::new(items);
    let rows = view.rows();

    let window = VirtualWindow::compute(25_000, 400, 50, rows.len(), 1);
    let visible = window.slice(&rows);
    assert_eq!(visible.len(), 10);
    assert_eq!(visible[0].email, "user0499@example.com");
}

fn tri_state_strategy() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(false)), Just(Some(true))]
}

proptest! {
    #[test]
    fn boolean_columns_render_tri_state(values in prop::collection::vec(tri_state_strategy(), 7)) {
        let flags = [
            BooleanField::Disposable,
            BooleanField::RoleAccount,
            BooleanField::CanConnectSmtp,
            BooleanField::FullInbox,
            BooleanField::CatchAll,
            BooleanField::Deliverable,
            BooleanField::Disabled,
        ];
        let mut item = VerificationResult::new("x@y.z", Reachability::Unknown);
        for (flag, value) in flags.iter().zip(&values) {
            item = item.with_flag(*flag, *value);
        }
        for column in Column::ALL {
            let Some(flag) = column.flag() else { continue };
            let expected = match item.flag(flag) {
                Some(true) => "Yes",
                Some(false) => "No",
                None => "N/A",
            };
            prop_assert_eq!(column.display(&item), expected);
        }
    }

    #[test]
    fn sort_cycle_returns_to_input_order(
        statuses in prop::collection::vec(0usize..4, 0..20),
        column_index in 0usize..9,
    ) {
        let items: Vec<VerificationResult> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| VerificationResult::new(format!("u{i}@x.y"), Reachability::ALL[*s]))
            .collect();
        let mut view = TableView::new(items.clone());
        let column = Column::ALL[column_index];

        prop_assert_eq!(view.toggle_sort(column), Some(SortState::ascending(column)));
        prop_assert_eq!(view.toggle_sort(column), Some(SortState::descending(column)));
        prop_assert_eq!(view.toggle_sort(column), None);
        let unsorted: Vec<VerificationResult> = view.rows().into_iter().cloned().collect();
        prop_assert_eq!(unsorted, items);
    }
}
