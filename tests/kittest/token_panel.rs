use egui_kittest::kittest::Queryable;
use crate::harness::{SENDER, app_harness, gold_token};

#[test]
fn test_tracked_token_is_listed_and_selected() {
    let (harness, _) = app_harness(&[gold_token()]);

    harness.get_by_label("Crown Gold");
    harness.get_by_label("2.5 CGLD");
    assert_eq!(
        harness.state().token_panel.selected_token_hash(),
        Some(gold_token().hash.as_str())
    );
    assert!(harness.state().token_panel.send_page().is_enabled());
}

#[test]
fn test_add_token_opens_form() {
    let (mut harness, _) = app_harness(&[]);

    harness.get_by_label("Add token").click();
    harness.run();

    assert!(harness.state().token_panel.add_page().is_open());
    harness.get_by_label("Contract address:");
}

#[test]
fn test_receive_shows_token_address() {
    let (mut harness, _) = app_harness(&[gold_token()]);

    harness.get_by_label("Receive").click();
    harness.run();

    assert!(harness.state().token_panel.receive_page().is_open());
    harness.get_by_label(SENDER);
}

#[test]
fn test_copy_address_from_receive_page() {
    let (mut harness, clipboard) = app_harness(&[gold_token()]);

    harness.get_by_label("Receive").click();
    harness.run();
    harness.get_by_label("Copy address").click();
    harness.run();

    assert_eq!(clipboard.last(), Some(SENDER.to_string()));
}

#[test]
fn test_copy_token_name_from_context_menu() {
    let (mut harness, clipboard) = app_harness(&[gold_token()]);

    harness.get_by_label("Crown Gold (CGLD)").click_secondary();
    harness.run();
    assert!(harness.state().token_panel.menu_target().is_some());

    harness.get_by_label("Copy token name").click();
    harness.run();

    assert_eq!(clipboard.last(), Some("Crown Gold".to_string()));
    assert!(harness.state().token_panel.menu_target().is_none());
    assert!(harness.query_by_label("Copy token name").is_none());
}

#[test]
fn test_dismissed_context_menu_forgets_row() {
    let (mut harness, clipboard) = app_harness(&[gold_token()]);

    harness.get_by_label("Crown Gold (CGLD)").click_secondary();
    harness.run();
    assert!(harness.state().token_panel.menu_target().is_some());

    harness.get_by_label("Tokens").click();
    harness.run();

    assert!(harness.query_by_label("Copy token name").is_none());
    assert!(harness.state().token_panel.menu_target().is_none());
    assert!(clipboard.copied().is_empty());
}

#[test]
fn test_remove_token_from_context_menu() {
    let (mut harness, _) = app_harness(&[gold_token()]);

    harness.get_by_label("Crown Gold (CGLD)").click_secondary();
    harness.run();
    harness.get_by_label("Remove token").click();
    harness.run();

    assert!(harness.state().token_panel.is_confirming_removal());
    harness.get_by_label("Confirm token remove");
    harness.get_by_label("Remove").click();
    harness.run();

    assert!(!harness.state().token_panel.is_confirming_removal());
    assert!(harness.query_by_label("Crown Gold").is_none());
    harness.get_by_label("No tokens yet. Use Add token to track one.");
    assert!(!harness.state().token_panel.send_page().is_enabled());
}

#[test]
fn test_cancelled_removal_keeps_token() {
    let (mut harness, _) = app_harness(&[gold_token()]);

    harness.get_by_label("Crown Gold (CGLD)").click_secondary();
    harness.run();
    harness.get_by_label("Remove token").click();
    harness.run();
    harness.get_by_label("Cancel").click();
    harness.run();

    assert!(!harness.state().token_panel.is_confirming_removal());
    assert!(harness.state().token_panel.menu_target().is_none());
    harness.get_by_label("Crown Gold");
    assert_eq!(
        harness.state().token_panel.selected_token_hash(),
        Some(gold_token().hash.as_str())
    );
}
