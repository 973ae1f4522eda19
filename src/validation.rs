//! Filter and creation-payload validation.
//!
//! Raw input is turned into typed values (`PostingFilter`, `NewPosting`) or an
//! explicit list of `(field, rule)` violations. Validation never performs I/O.

use posting_types::{Freight, FreightComment, NewPosting, Posting};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::ValidationErrors;
use crate::pagination::{
    max_limit_message, min_limit_message, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, MIN_LIMIT,
};

/// Keys accepted in a posting query.
pub const FILTER_FIELDS: [&str; 7] = [
    "companyId",
    "equipmentType",
    "fullPartial",
    "lengthFeet",
    "weightPounds",
    "page",
    "limit",
];

/// Validated creation payload.
pub type CreatePostingInput = NewPosting;

// ============================================================================
// PostingFilter
// ============================================================================

/// Exact-match criteria plus the requested page.
///
/// A `None` criterion places no constraint on that field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingFilter {
    pub company_id: Option<String>,
    pub equipment_type: Option<String>,
    pub full_partial: Option<String>,
    pub length_feet: Option<f64>,
    pub weight_pounds: Option<f64>,
    pub page: u32,
    pub limit: u32,
}

impl Default for PostingFilter {
    fn default() -> Self {
        Self {
            company_id: None,
            equipment_type: None,
            full_partial: None,
            length_feet: None,
            weight_pounds: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PostingFilter {
    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    /// Conjunction of every present criterion. A criterion on a field the
    /// posting lacks (e.g. `lengthFeet`) does not match.
    pub fn matches(&self, posting: &Posting) -> bool {
        let freight = &posting.freight;
        eq_if_set(&self.company_id, &posting.company_id)
            && eq_if_set(&self.equipment_type, &freight.equipment_type)
            && eq_if_set(&self.full_partial, &freight.full_partial)
            && self.weight_pounds.map_or(true, |w| freight.weight_pounds == w)
            && self
                .length_feet
                .map_or(true, |l| freight.length_feet == Some(l))
    }
}

fn eq_if_set(criterion: &Option<String>, value: &str) -> bool {
    criterion.as_deref().map_or(true, |c| c == value)
}

/// Parse raw query pairs into a `PostingFilter`, collecting every violation.
pub fn parse_filter<I, K, V>(raw: I) -> Result<PostingFilter, ValidationErrors>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut filter = PostingFilter::default();
    let mut errors = ValidationErrors::new();

    for (key, value) in raw {
        let (key, value) = (key.as_ref(), value.as_ref());
        match key {
            "companyId" => filter.company_id = non_empty(value),
            "equipmentType" => filter.equipment_type = non_empty(value),
            "fullPartial" => filter.full_partial = non_empty(value),
            "lengthFeet" => filter.length_feet = parse_number(key, value, &mut errors),
            "weightPounds" => filter.weight_pounds = parse_number(key, value, &mut errors),
            "page" => match parse_integer(value) {
                Some(Integer::Value(0) | Integer::Negative) => {
                    errors.push(key, "Page must be at least 1")
                }
                Some(Integer::Value(page)) => match u32::try_from(page) {
                    Ok(page) => filter.page = page,
                    Err(_) => errors.push(key, max_page_message()),
                },
                Some(Integer::Overflow) => errors.push(key, max_page_message()),
                None => errors.push(key, "Page must be an integer"),
            },
            "limit" => match parse_integer(value) {
                Some(Integer::Negative) => errors.push(key, min_limit_message()),
                Some(Integer::Value(limit)) if limit < MIN_LIMIT as u64 => {
                    errors.push(key, min_limit_message())
                }
                Some(Integer::Value(limit)) if limit > MAX_LIMIT as u64 => {
                    errors.push(key, max_limit_message())
                }
                Some(Integer::Value(limit)) => filter.limit = limit as u32,
                Some(Integer::Overflow) => errors.push(key, max_limit_message()),
                None => errors.push(key, "Limit must be an integer"),
            },
            _ => errors.push(key, "Unrecognized filter field"),
        }
    }

    errors.into_result(filter)
}

/// Integer syntax classified by range, so out-of-range values get range
/// messages rather than "must be an integer".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Integer {
    Value(u64),
    Negative,
    Overflow,
}

fn parse_integer(value: &str) -> Option<Integer> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative {
        let zero = digits.bytes().all(|b| b == b'0');
        return Some(if zero { Integer::Value(0) } else { Integer::Negative });
    }
    Some(digits.parse::<u64>().map_or(Integer::Overflow, Integer::Value))
}

fn max_page_message() -> String {
    format!("Page cannot exceed {}", u32::MAX)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_number(field: &str, value: &str, errors: &mut ValidationErrors) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            errors.push(field, format!("{field} must be a number"));
            None
        }
    }
}

// ============================================================================
// Creation payload
// ============================================================================

/// Validate a raw JSON creation body.
///
/// Unknown keys are ignored; every rule violation is reported with a dotted
/// field path.
pub fn validate_create(body: &JsonValue) -> Result<CreatePostingInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(obj) = body.as_object() else {
        errors.push("body", "Expected a JSON object");
        return Err(errors);
    };

    let company_id = required_string(obj, "companyId", "companyId", &mut errors);
    let freight = match obj.get("freight") {
        None | Some(JsonValue::Null) => {
            errors.push("freight", "Required");
            None
        }
        Some(JsonValue::Object(freight)) => validate_freight(freight, &mut errors),
        Some(_) => {
            errors.push("freight", "Expected an object");
            None
        }
    };

    match (company_id, freight) {
        (Some(company_id), Some(freight)) if errors.is_empty() => Ok(NewPosting {
            company_id,
            freight,
        }),
        _ => Err(errors),
    }
}

fn validate_freight(obj: &Map<String, JsonValue>, errors: &mut ValidationErrors) -> Option<Freight> {
    let equipment_type = required_string(obj, "equipmentType", "freight.equipmentType", errors);
    let full_partial = required_string(obj, "fullPartial", "freight.fullPartial", errors);

    let weight_pounds = match obj.get("weightPounds") {
        None | Some(JsonValue::Null) => {
            errors.push("freight.weightPounds", "Required");
            None
        }
        Some(value) => positive_number(value, "freight.weightPounds", errors),
    };

    let length_feet = match obj.get("lengthFeet") {
        None | Some(JsonValue::Null) => None,
        Some(value) => positive_number(value, "freight.lengthFeet", errors),
    };

    let comments = match obj.get("comments") {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::Array(items)) => Some(validate_comments(items, errors)),
        Some(_) => {
            errors.push("freight.comments", "Expected an array");
            None
        }
    };

    Some(Freight {
        equipment_type: equipment_type?,
        full_partial: full_partial?,
        weight_pounds: weight_pounds?,
        length_feet,
        comments,
    })
}

fn validate_comments(items: &[JsonValue], errors: &mut ValidationErrors) -> Vec<FreightComment> {
    let mut comments = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item.get("comment").and_then(JsonValue::as_str) {
            Some(text) => comments.push(FreightComment {
                comment: text.to_string(),
            }),
            None => errors.push(
                format!("freight.comments[{i}].comment"),
                "Expected a string",
            ),
        }
    }
    comments
}

fn required_string(
    obj: &Map<String, JsonValue>,
    key: &str,
    path: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match obj.get(key) {
        None | Some(JsonValue::Null) => {
            errors.push(path, "Required");
            None
        }
        Some(JsonValue::String(s)) if s.is_empty() => {
            errors.push(path, "Must not be empty");
            None
        }
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(path, "Expected a string");
            None
        }
    }
}

fn positive_number(value: &JsonValue, path: &str, errors: &mut ValidationErrors) -> Option<f64> {
    match value.as_f64() {
        Some(n) if n > 0.0 => Some(n),
        Some(_) => {
            errors.push(path, "Must be greater than 0");
            None
        }
        None => {
            errors.push(path, "Expected a number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(errors: &ValidationErrors) -> Vec<&str> {
        errors.violations().iter().map(|v| v.field.as_str()).collect()
    }

    // ── parse_filter ─────────────────────────────────────────────

    #[test]
    fn defaults_when_empty() {
        let filter = parse_filter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(filter, PostingFilter::default());
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 100);
    }

    #[test]
    fn parses_every_recognized_field() {
        let filter = parse_filter([
            ("companyId", "3"),
            ("equipmentType", "Van"),
            ("fullPartial", "Full"),
            ("lengthFeet", "53"),
            ("weightPounds", "1000.5"),
            ("page", "2"),
            ("limit", "10"),
        ])
        .unwrap();

        assert_eq!(filter.company_id.as_deref(), Some("3"));
        assert_eq!(filter.equipment_type.as_deref(), Some("Van"));
        assert_eq!(filter.full_partial.as_deref(), Some("Full"));
        assert_eq!(filter.length_feet, Some(53.0));
        assert_eq!(filter.weight_pounds, Some(1000.5));
        assert_eq!((filter.page, filter.limit), (2, 10));
    }

    #[test]
    fn limit_bounds() {
        let err = parse_filter([("limit", "0")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Limit must be at least 1");

        let err = parse_filter([("limit", "1001")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Limit cannot exceed 1000");

        let err = parse_filter([("limit", "-5")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Limit must be at least 1");

        assert_eq!(parse_filter([("limit", "1")]).unwrap().limit, 1);
        assert_eq!(parse_filter([("limit", "1000")]).unwrap().limit, 1000);
    }

    #[test]
    fn page_must_be_positive_integer() {
        let err = parse_filter([("page", "0")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Page must be at least 1");

        let err = parse_filter([("page", "two")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Page must be an integer");
    }

    #[test]
    fn oversized_integers_get_range_messages() {
        let err = parse_filter([("page", "4294967296")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Page cannot exceed 4294967295");

        let err = parse_filter([("page", "99999999999999999999999")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Page cannot exceed 4294967295");

        let err = parse_filter([("limit", "99999999999999999999")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Limit cannot exceed 1000");

        let err = parse_filter([("page", "-99999999999999999999")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Page must be at least 1");

        assert_eq!(parse_filter([("page", "4294967295")]).unwrap().page, u32::MAX);
    }

    #[test]
    fn fractional_page_and_limit_are_not_integers() {
        let err = parse_filter([("page", "1.5"), ("limit", "2e1")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Page must be an integer");
        assert_eq!(err.violations()[1].message, "Limit must be an integer");
    }

    #[test]
    fn rejects_unknown_fields_and_reports_all_violations() {
        let err = parse_filter([
            ("invalidParam", "value"),
            ("limit", "5000"),
            ("weightPounds", "heavy"),
        ])
        .unwrap_err();

        assert_eq!(fields(&err), vec!["invalidParam", "limit", "weightPounds"]);
        assert_eq!(err.violations()[2].message, "weightPounds must be a number");
    }

    #[test]
    fn empty_string_criteria_are_absent() {
        let filter = parse_filter([("equipmentType", ""), ("lengthFeet", "")]).unwrap();
        assert!(filter.equipment_type.is_none());
        assert!(filter.length_feet.is_none());
    }

    #[test]
    fn padded_values_are_not_trimmed() {
        let filter = parse_filter([("equipmentType", " Van "), ("companyId", "1 ")]).unwrap();
        assert_eq!(filter.equipment_type.as_deref(), Some(" Van "));
        assert_eq!(filter.company_id.as_deref(), Some("1 "));
        assert!(!filter.matches(&posting(None)));

        let err = parse_filter([("limit", " 10")]).unwrap_err();
        assert_eq!(err.violations()[0].message, "Limit must be an integer");
    }

    // ── matches ──────────────────────────────────────────────────

    fn posting(length_feet: Option<f64>) -> Posting {
        Posting {
            id: "a".into(),
            company_id: "1".into(),
            freight: Freight {
                equipment_type: "Van".into(),
                full_partial: "Full".into(),
                weight_pounds: 1000.0,
                length_feet,
                comments: None,
            },
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(PostingFilter::default().matches(&posting(None)));
    }

    #[test]
    fn matching_is_case_sensitive_and_exact() {
        let filter = PostingFilter {
            equipment_type: Some("van".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&posting(None)));

        let filter = PostingFilter {
            equipment_type: Some("Va".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&posting(None)));
    }

    #[test]
    fn all_criteria_must_hold() {
        let filter = PostingFilter {
            company_id: Some("1".into()),
            full_partial: Some("Partial".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&posting(None)));

        let filter = PostingFilter {
            company_id: Some("1".into()),
            full_partial: Some("Full".into()),
            weight_pounds: Some(1000.0),
            ..Default::default()
        };
        assert!(filter.matches(&posting(None)));
    }

    #[test]
    fn length_criterion_fails_when_posting_has_no_length() {
        let filter = PostingFilter {
            length_feet: Some(53.0),
            ..Default::default()
        };
        assert!(!filter.matches(&posting(None)));
        assert!(filter.matches(&posting(Some(53.0))));
    }

    // ── validate_create ──────────────────────────────────────────

    #[test]
    fn valid_create_body() {
        let input = validate_create(&json!({
            "companyId": "1",
            "freight": {
                "equipmentType": "Van",
                "fullPartial": "Full",
                "weightPounds": 1000,
                "lengthFeet": 53,
                "comments": [{"comment": "fragile"}]
            }
        }))
        .unwrap();

        assert_eq!(input.company_id, "1");
        assert_eq!(input.freight.length_feet, Some(53.0));
        assert_eq!(input.freight.comments.unwrap()[0].comment, "fragile");
    }

    #[test]
    fn empty_freight_reports_each_required_field() {
        let err = validate_create(&json!({"companyId": "1", "freight": {}})).unwrap_err();
        assert_eq!(
            fields(&err),
            vec![
                "freight.equipmentType",
                "freight.fullPartial",
                "freight.weightPounds"
            ]
        );
    }

    #[test]
    fn rejects_non_positive_numbers_and_empty_company() {
        let err = validate_create(&json!({
            "companyId": "",
            "freight": {
                "equipmentType": "Van",
                "fullPartial": "Full",
                "weightPounds": 0,
                "lengthFeet": -3
            }
        }))
        .unwrap_err();

        assert_eq!(
            fields(&err),
            vec!["companyId", "freight.weightPounds", "freight.lengthFeet"]
        );
        assert_eq!(err.violations()[1].message, "Must be greater than 0");
    }

    #[test]
    fn whitespace_company_id_is_kept_verbatim() {
        let input = validate_create(&json!({
            "companyId": " 1 ",
            "freight": {"equipmentType": "Van", "fullPartial": "Full", "weightPounds": 10}
        }))
        .unwrap();
        assert_eq!(input.company_id, " 1 ");
    }

    #[test]
    fn rejects_wrong_types() {
        let err = validate_create(&json!({
            "companyId": 1,
            "freight": {
                "equipmentType": "Van",
                "fullPartial": "Full",
                "weightPounds": "1000",
                "comments": [{"comment": "ok"}, {"note": "wrong key"}]
            }
        }))
        .unwrap_err();

        assert_eq!(
            fields(&err),
            vec![
                "companyId",
                "freight.weightPounds",
                "freight.comments[1].comment"
            ]
        );
    }

    #[test]
    fn rejects_non_object_body_and_missing_freight() {
        let err = validate_create(&json!([1, 2])).unwrap_err();
        assert_eq!(fields(&err), vec!["body"]);

        let err = validate_create(&json!({"companyId": "1"})).unwrap_err();
        assert_eq!(fields(&err), vec!["freight"]);
    }
}
