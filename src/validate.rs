//! Input validation for post bodies.
//!
//! Create and edit share one input shape: a JSON object with required string
//! properties `title` and `body`. Validation failures surface to the caller
//! verbatim as `422` messages, so the wording here is part of the API
//! contract — `'body' is a required property`, `32 is not of type 'string'`.

use serde_json::Value;

use crate::model::PostDraft;

/// Properties a post body must carry, checked in declaration order.
/// Requireds are reported before type mismatches.
const REQUIRED: &[&str] = &["title", "body"];

/// Validates a decoded JSON body and extracts the draft.
///
/// The error string is the user-facing message.
pub(crate) fn post_draft(value: &Value) -> Result<PostDraft, String> {
    let object = match value.as_object() {
        Some(object) => object,
        None => return Err("Request body must be a JSON object".to_owned()),
    };

    for name in REQUIRED {
        if !object.contains_key(*name) {
            return Err(format!("'{name}' is a required property"));
        }
    }

    for name in REQUIRED {
        let value = &object[*name];
        if !value.is_string() {
            return Err(format!("{} is not of type 'string'", describe(value)));
        }
    }

    // Extra properties are ignored.
    Ok(PostDraft {
        title: object["title"].as_str().unwrap_or_default().to_owned(),
        body: object["body"].as_str().unwrap_or_default().to_owned(),
    })
}

/// Renders a JSON value the way the error messages quote it: strings
/// single-quoted, everything else in its JSON form.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::post_draft;

    #[test]
    fn accepts_valid_input() {
        let draft = post_draft(&json!({"title": "Example Post", "body": "Just a test"})).unwrap();
        assert_eq!(draft.title, "Example Post");
        assert_eq!(draft.body, "Just a test");
    }

    #[test]
    fn ignores_extra_properties() {
        let draft =
            post_draft(&json!({"title": "t", "body": "b", "author": "nobody"})).unwrap();
        assert_eq!(draft.title, "t");
    }

    #[test]
    fn missing_body_is_reported_first_as_required() {
        let err = post_draft(&json!({"title": "Example Post"})).unwrap_err();
        assert_eq!(err, "'body' is a required property");
    }

    #[test]
    fn missing_title_is_reported() {
        let err = post_draft(&json!({"body": "Just a test"})).unwrap_err();
        assert_eq!(err, "'title' is a required property");
    }

    #[test]
    fn non_string_body_is_a_type_error() {
        let err = post_draft(&json!({"title": "Example Post", "body": 32})).unwrap_err();
        assert_eq!(err, "32 is not of type 'string'");
    }

    #[test]
    fn non_string_title_quotes_the_value_in_json_form() {
        let err = post_draft(&json!({"title": null, "body": "b"})).unwrap_err();
        assert_eq!(err, "null is not of type 'string'");

        let err = post_draft(&json!({"title": [1, 2], "body": "b"})).unwrap_err();
        assert_eq!(err, "[1,2] is not of type 'string'");
    }

    #[test]
    fn required_beats_type_when_both_fail() {
        // title has the wrong type AND body is missing: required wins.
        let err = post_draft(&json!({"title": 7})).unwrap_err();
        assert_eq!(err, "'body' is a required property");
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        let err = post_draft(&json!("<xml></xml>")).unwrap_err();
        assert_eq!(err, "Request body must be a JSON object");

        let err = post_draft(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, "Request body must be a JSON object");
    }
}
