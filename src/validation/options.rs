use super::ValidationError;

/// Ordered `key=value` pairs parsed from a comma separated option string.
///
/// A repeated key keeps the position of its first occurrence and the value
/// of its last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    entries: Vec<(String, String)>,
}

impl OptionList {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }
}

/// Splits on `,`, then each token on its first `=`.
pub fn parse_options(input: &str) -> Result<OptionList, ValidationError> {
    let mut options = OptionList::default();
    for token in input.split(',') {
        let (key, value) =
            token
                .split_once('=')
                .ok_or_else(|| ValidationError::MalformedOption {
                    token: token.to_string(),
                })?;
        options.insert(key, value);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_in_order() {
        let options = parse_options("proto=nfs,status=enabled,secType=sys").unwrap();
        let pairs: Vec<_> = options.iter().collect();
        assert_eq!(
            pairs,
            vec![("proto", "nfs"), ("status", "enabled"), ("secType", "sys")]
        );
    }

    #[test]
    fn splits_on_first_equals_only() {
        let options = parse_options("proto=nfs,clients=a=b").unwrap();
        assert_eq!(options.get("clients"), Some("a=b"));
    }

    #[test]
    fn later_duplicate_replaces_value_in_place() {
        let options = parse_options("status=enabled,proto=nfs,status=disabled").unwrap();
        let pairs: Vec<_> = options.iter().collect();
        assert_eq!(pairs, vec![("status", "disabled"), ("proto", "nfs")]);
    }

    #[test]
    fn token_without_equals_is_rejected() {
        assert_eq!(
            parse_options("proto=nfs,secType"),
            Err(ValidationError::MalformedOption {
                token: "secType".into()
            })
        );
        assert!(parse_options("proto=nfs,").is_err());
        assert!(parse_options("").is_err());
    }

    #[test]
    fn empty_value_is_allowed() {
        let options = parse_options("proto=").unwrap();
        assert_eq!(options.get("proto"), Some(""));
        assert_eq!(options.len(), 1);
    }
}
