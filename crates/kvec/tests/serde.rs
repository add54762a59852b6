#![cfg(feature = "serde")]

use kvec::{try_vec, Vec};

#[test]
fn round_trip_json() -> Result<(), Box<dyn std::error::Error>> {
    let values = try_vec![1u32, 3, 5, 7, 9];
    let json = serde_json::to_string(&values)?;
    assert_eq!(json, "[1,3,5,7,9]");

    let back: Vec<u32> = serde_json::from_str(&json)?;
    assert_eq!(back, values);

    let nested: Vec<Vec<String>> = serde_json::from_str(r#"[["a"],[],["b","c"]]"#)?;
    assert_eq!(nested.len(), 3);
    assert_eq!(nested[2], ["b", "c"]);
    Ok(())
}

#[test]
fn rejects_non_sequences() {
    assert!(serde_json::from_str::<Vec<u32>>("{}").is_err());
    assert!(serde_json::from_str::<Vec<u32>>("[1, \"two\"]").is_err());
}
