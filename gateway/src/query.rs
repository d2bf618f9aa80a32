//! Query-string assembly shared by all verbs.

use crate::options::RequestOptions;
use url::Url;

/// Canonical version query parameter.
pub const VERSION_PARAM: &str = "v";
// Alternate spelling a few resource families use; either suppresses the
// default version parameter.
const VERSION_PARAM_ALT: &str = "version";

const SELECT_PARAM: &str = "select";
const INCLUDE_DELETED_PARAM: &str = "include_deleted";
const SOURCE_PARAM: &str = "source";

/// Appends the query string in its fixed order: version, select,
/// include_deleted (only when set), source, then extra parameters in caller
/// order. A caller-supplied version key wins over the default; values are
/// URL-encoded. The same options always produce the same query string.
pub fn append_query(url: &mut Url, options: &RequestOptions) {
    {
        let mut pairs = url.query_pairs_mut();

        let version_overridden = options.extra_params.contains_key(VERSION_PARAM)
            || options.extra_params.contains_key(VERSION_PARAM_ALT);
        if !version_overridden && !options.api_version.is_empty() {
            pairs.append_pair(VERSION_PARAM, &options.api_version);
        }

        if let Some(ref select) = options.select_fields {
            pairs.append_pair(SELECT_PARAM, select);
        }
        if options.include_deleted {
            pairs.append_pair(INCLUDE_DELETED_PARAM, "true");
        }
        if let Some(ref source) = options.source_tag {
            pairs.append_pair(SOURCE_PARAM, source);
        }
        for (key, value) in &options.extra_params {
            pairs.append_pair(key, value);
        }
    }

    // query_pairs_mut leaves an empty query ("...?") when nothing was
    // appended; normalize that back to no query at all
    if url.query() == Some("") {
        url.set_query(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(options: &RequestOptions) -> String {
        let mut url = Url::parse("https://cfg.va.engagecloud.net/api/account/acct-1/skills").unwrap();
        append_query(&mut url, options);
        url.to_string()
    }

    #[test]
    fn test_fixed_parameter_order() {
        let mut options = RequestOptions::new("3.0");
        options.select_fields = Some("id,name".into());
        options.include_deleted = true;
        options.source_tag = Some("console".into());
        options.extra_params.insert("expand".into(), "members".into());

        assert_eq!(
            build(&options),
            "https://cfg.va.engagecloud.net/api/account/acct-1/skills?v=3.0&select=id%2Cname&include_deleted=true&source=console&expand=members"
        );
    }

    #[test]
    fn test_identical_options_are_byte_identical() {
        let options = RequestOptions::new("3.0")
            .with_param("b", "2")
            .with_param("a", "1");

        assert_eq!(build(&options), build(&options));
        // Extra parameters keep caller order, not alphabetical order
        assert!(build(&options).ends_with("?v=3.0&b=2&a=1"));
    }

    #[test]
    fn test_caller_version_suppresses_default() {
        let options = RequestOptions::new("3.0").with_param("v", "2.0");
        assert_eq!(
            build(&options),
            "https://cfg.va.engagecloud.net/api/account/acct-1/skills?v=2.0"
        );

        let options = RequestOptions::new("3.0").with_param("version", "1.0");
        assert_eq!(
            build(&options),
            "https://cfg.va.engagecloud.net/api/account/acct-1/skills?version=1.0"
        );
    }

    #[test]
    fn test_include_deleted_absent_when_false() {
        let options = RequestOptions::new("3.0");
        assert_eq!(
            build(&options),
            "https://cfg.va.engagecloud.net/api/account/acct-1/skills?v=3.0"
        );
    }

    #[test]
    fn test_empty_options_leave_no_query() {
        let options = RequestOptions::default();
        assert_eq!(
            build(&options),
            "https://cfg.va.engagecloud.net/api/account/acct-1/skills"
        );
    }

    #[test]
    fn test_values_are_encoded() {
        let options = RequestOptions::new("3.0").with_param("name", "tier 1 & 2");
        assert_eq!(
            build(&options),
            "https://cfg.va.engagecloud.net/api/account/acct-1/skills?v=3.0&name=tier+1+%26+2"
        );
    }
}
