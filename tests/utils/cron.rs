use nimbus::utils::cron::{is_valid_cron, CronError, CronExpression};

#[test]
fn test_valid_expressions() {
    for expr in [
        "* * * * *",
        "0 20 * * 1-5",
        "*/15 8-18 * * MON-FRI",
        "30 6 1,15 JAN,jul *",
        "0 0 * * 7",
        "5-55/10 * * * *",
    ] {
        assert!(is_valid_cron(expr), "{expr} should be valid");
    }
}

#[test]
fn test_invalid_expressions() {
    for expr in ["", "   ", "* * * *", "* * * * * *", "60 * * * *", "* 24 * * *", "* * 0 * *", "* * * 13 *", "*/0 * * * *", "5-1 * * * *", "a * * * *", "1,,2 * * * *"] {
        assert!(!is_valid_cron(expr), "{expr:?} should be invalid");
    }
}

#[test]
fn test_error_details() {
    assert_eq!(CronExpression::parse(""), Err(CronError::Empty));
    assert_eq!(CronExpression::parse("* * *"), Err(CronError::FieldCount(3)));
    assert_eq!(
        CronExpression::parse("0 25 * * *"),
        Err(CronError::OutOfRange {
            field: "hour",
            value: 25,
            min: 0,
            max: 23
        })
    );
}

#[test]
fn test_normalizes_whitespace() {
    let expr: CronExpression = "  0   20 *  * 1-5 ".parse().unwrap();
    assert_eq!(expr.as_str(), "0 20 * * 1-5");
    assert_eq!(expr.to_string(), "0 20 * * 1-5");
}
