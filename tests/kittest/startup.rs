use egui_kittest::kittest::Queryable;
use crate::harness::app_harness;

/// Test that demonstrates basic app startup with kittest
#[test]
fn test_app_startup() {
    let (mut harness, _) = app_harness(&[]);
    harness.run();

    harness.get_by_label("Tokens");
    harness.get_by_label("No tokens yet. Use Add token to track one.");
}
