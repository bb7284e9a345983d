use super::*;

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_side_save_reports_nothing_stored() {
    assert!(!save_json("zscraper.test", &vec![1, 2, 3]));
    assert_eq!(load_json::<Vec<i32>>("zscraper.test"), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_side_remove_is_a_no_op() {
    assert!(remove("zscraper.test"));
}
