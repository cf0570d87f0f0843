//! Time zone display names (`timeZoneNames.json`).

use crate::{format::convert_value, tree::Node};

/// Top-level pattern fields holding `{N}` placeholders.
const FORMAT_FIELDS: [&str; 6] = [
    "gmtFormat",
    "gmtZeroFormat",
    "regionFormat",
    "regionFormat-type-standard",
    "regionFormat-type-daylight",
    "fallbackFormat",
];

pub fn transform(data: &mut Node) {
    for field in FORMAT_FIELDS {
        if let Some(value) = data.get_mut(field) {
            *value = convert_value(value.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whitelisted_fields_are_converted() {
        let mut data = json!({
            "hourFormat": "+HH:mm;-HH:mm",
            "gmtFormat": "GMT{0}",
            "regionFormat": "{0} Time",
            "fallbackFormat": "{1} ({0})",
            "zone": {"Europe": {"London": {"long": {"daylight": "British Summer Time"}}}}
        })
        .as_object()
        .cloned()
        .unwrap();
        transform(&mut data);
        assert_eq!(data["gmtFormat"], "GMT%1$s");
        assert_eq!(data["regionFormat"], "%1$s Time");
        assert_eq!(data["fallbackFormat"], "%2$s (%1$s)");
        assert_eq!(data["hourFormat"], "+HH:mm;-HH:mm");
        assert!(!data.contains_key("gmtZeroFormat"));
    }
}
