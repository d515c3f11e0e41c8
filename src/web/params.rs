use std::collections::{BTreeMap, HashMap};

/// Raw request parameters, looked up by full name.
pub trait ParameterSource {
    fn parameter(&self, name: &str) -> Option<&str>;

    /// A parameter with text in it. Blank values count as absent.
    fn text(&self, name: &str) -> Option<&str> {
        self.parameter(name).filter(|v| !v.trim().is_empty())
    }
}

impl ParameterSource for HashMap<String, String> {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ParameterSource for [(&str, &str)] {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> ParameterSource for [(&str, &str); N] {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.as_slice().parameter(name)
    }
}

impl<P: ParameterSource + ?Sized> ParameterSource for &P {
    fn parameter(&self, name: &str) -> Option<&str> {
        (**self).parameter(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_blank_is_absent() {
        let params = [("size", "  "), ("next", "100"), ("prev", "")];
        assert_eq!(params.parameter("size"), Some("  "));
        assert_eq!(params.text("size"), None);
        assert_eq!(params.text("prev"), None);
        assert_eq!(params.text("next"), Some("100"));
        assert_eq!(params.text("direction"), None);
    }

    #[test]
    pub fn test_map_source() {
        let params: HashMap<String, String> =
            HashMap::from([("page_number".to_owned(), "3".to_owned())]);
        assert_eq!(params.text("page_number"), Some("3"));
        assert_eq!((&params).text("size"), None);
    }
}
