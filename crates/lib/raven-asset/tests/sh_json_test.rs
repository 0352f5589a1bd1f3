use raven_asset::{ShJsonError, sh_json};
use raven_ibl::ShCoefficients;

#[test]
fn writes_nine_rows() {
    let mut rows = [[0.0; 3]; 9];
    rows[0] = [1.0, 0.5, 0.25];
    rows[8] = [-2.0, 0.0, 3.5];
    let json = sh_json::to_json_string(&ShCoefficients::from_rows(rows));

    assert!(json.starts_with("[[1.0,0.5,0.25],[0.0,0.0,0.0]"));
    assert!(json.ends_with("[-2.0,0.0,3.5]]"));

    let parsed = sh_json::from_json_str(&json).unwrap();
    assert_eq!(parsed.to_rows(), rows);
}

#[test]
fn accepts_integers_and_whitespace() {
    let json = "[[1, 2, 3], [0,0,0], [0,0,0], [0,0,0], [0,0,0],\n [0,0,0], [0,0,0], [0,0,0], [4, 5, 6.5]]";
    let sh = sh_json::from_json_str(json).unwrap();
    assert_eq!(sh.to_rows()[0], [1.0, 2.0, 3.0]);
    assert_eq!(sh.to_rows()[8], [4.0, 5.0, 6.5]);
}

#[test]
fn rejects_other_shapes() {
    assert!(matches!(sh_json::from_json_str("not json"), Err(ShJsonError::Parse(_))));
    assert!(matches!(sh_json::from_json_str("{}"), Err(ShJsonError::CoefficientCount(0))));
    assert!(matches!(sh_json::from_json_str("[[1,2,3]]"), Err(ShJsonError::CoefficientCount(1))));

    let mut rows = vec!["[0,0,0]"; 9];
    rows[4] = "[0,0]";
    let json = format!("[{}]", rows.join(","));
    assert!(matches!(sh_json::from_json_str(&json), Err(ShJsonError::BadCoefficient { index: 4 })));

    rows[4] = "[0,\"a\",0]";
    let json = format!("[{}]", rows.join(","));
    assert!(matches!(sh_json::from_json_str(&json), Err(ShJsonError::BadCoefficient { index: 4 })));
}
