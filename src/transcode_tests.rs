//! Tests for comment transcoding.

use super::*;

fn transcoder() -> CommentTranscoder {
    CommentTranscoder::new("test").unwrap()
}

/// Runs text through encode, the YAML engine, and decode.
fn round_trip(raw: &str) -> String {
    let transcoder = transcoder();
    let encoded = transcoder.encode(raw).unwrap();
    let document: serde_yaml::Value = serde_yaml::from_str(&encoded.text).unwrap();
    let serialized = serde_yaml::to_string(&document).unwrap();
    transcoder.decode(&serialized)
}

fn non_blank_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.is_empty()).collect()
}

mod namespace {
    use super::*;

    #[test]
    fn accepts_plugin_style_names() {
        assert!(CommentTranscoder::new("MyPlugin").is_ok());
        assert!(CommentTranscoder::new("my-plugin_2").is_ok());
        assert!(CommentTranscoder::new("_internal").is_ok());
    }

    #[test]
    fn rejects_empty_namespace() {
        let err = CommentTranscoder::new("").unwrap_err();
        assert_eq!(err, InvalidNamespace(String::new()));
    }

    #[test]
    fn rejects_structural_characters() {
        assert!(CommentTranscoder::new("my plugin").is_err());
        assert!(CommentTranscoder::new("a:b").is_err());
        assert!(CommentTranscoder::new("-leading").is_err());
        assert!(CommentTranscoder::new("a.b").is_err());
    }

    #[test]
    fn error_names_the_namespace() {
        let err = CommentTranscoder::new("bad name").unwrap_err();
        assert!(err.to_string().contains("'bad name'"));
    }

    #[test]
    fn comment_key_uses_namespace_and_index() {
        assert_eq!(transcoder().comment_key(7), "test_COMMENT_7");
    }

    #[test]
    fn is_comment_key_requires_exact_shape() {
        let transcoder = transcoder();
        assert!(transcoder.is_comment_key("test_COMMENT_0"));
        assert!(transcoder.is_comment_key("test_COMMENT_42"));
        assert!(!transcoder.is_comment_key("other_COMMENT_0"));
        assert!(!transcoder.is_comment_key("test_COMMENT_"));
        assert!(!transcoder.is_comment_key("test_COMMENT_1x"));
        assert!(!transcoder.is_comment_key("my_test_COMMENT_1"));
    }
}

mod encode {
    use super::*;

    #[test]
    fn converts_comment_line_to_entry() {
        let encoded = transcoder().encode("# Title\nname: old\n").unwrap();
        assert_eq!(
            encoded.text,
            "test_COMMENT_0: _SPACE_Title\nname: old\n"
        );
        assert_eq!(encoded.comment_count, 1);
    }

    #[test]
    fn numbers_comments_in_file_order() {
        let encoded = transcoder()
            .encode("# one\na: 1\n# two\n# three\nb: 2\n")
            .unwrap();
        let keys: Vec<&str> = encoded
            .text
            .lines()
            .filter_map(|line| line.split(':').next())
            .collect();
        assert_eq!(
            keys,
            [
                "test_COMMENT_0",
                "a",
                "test_COMMENT_1",
                "test_COMMENT_2",
                "b"
            ]
        );
        assert_eq!(encoded.comment_count, 3);
    }

    #[test]
    fn escapes_structural_characters() {
        let encoded = transcoder().encode("# url: http://x | a-b\n").unwrap();
        assert_eq!(
            encoded.text,
            "test_COMMENT_0: _SPACE_url_COLON__SPACE_http_COLON_//x_SPACE__VERT__SPACE_a_HYPHEN_b\n"
        );
    }

    #[test]
    fn quotes_empty_comment() {
        let encoded = transcoder().encode("#\n").unwrap();
        assert_eq!(encoded.text, "test_COMMENT_0: ''\n");
    }

    #[test]
    fn quotes_comment_that_reads_as_number() {
        let encoded = transcoder().encode("#123\n").unwrap();
        assert_eq!(encoded.text, "test_COMMENT_0: '123'\n");
    }

    #[test]
    fn quotes_comment_that_reads_as_flow_sequence() {
        let encoded = transcoder().encode("#[draft]\n").unwrap();
        assert_eq!(encoded.text, "test_COMMENT_0: '[draft]'\n");
    }

    #[test]
    fn doubles_single_quotes_inside_quoted_comment() {
        let encoded = transcoder().encode("#'quoted'\n").unwrap();
        assert_eq!(encoded.text, "test_COMMENT_0: '''quoted'''\n");
    }

    #[test]
    fn indented_hash_is_not_a_comment() {
        let raw = "section:\n  # nested\n  key: value\n";
        let encoded = transcoder().encode(raw).unwrap();
        assert_eq!(encoded.text, raw);
        assert_eq!(encoded.comment_count, 0);
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let encoded = transcoder().encode("# a\r\nkey: 1\r\n").unwrap();
        assert_eq!(encoded.text, "test_COMMENT_0: _SPACE_a\nkey: 1\n");
    }

    #[test]
    fn counter_restarts_for_every_pass() {
        let transcoder = transcoder();
        let first = transcoder.encode("# a\n# b\n").unwrap();
        let second = transcoder.encode("# c\n").unwrap();
        assert_eq!(first.comment_count, 2);
        assert_eq!(second.comment_count, 1);
        assert!(second.text.starts_with("test_COMMENT_0:"));
    }

    #[test]
    fn rejects_comment_before_indented_sequence() {
        let err = transcoder()
            .encode("list:\n# first item\n  - a\n  - b\nother: 1\n")
            .unwrap_err();
        assert_eq!(err, MisplacedComment { line: 2 });
    }

    #[test]
    fn rejects_comment_inside_nested_mapping() {
        let raw = "server:\n  host: a\n# port\n\n  port: 1\n";
        assert_eq!(
            transcoder().encode(raw).unwrap_err(),
            MisplacedComment { line: 3 }
        );
    }

    #[test]
    fn rejects_comment_between_unindented_sequence_items() {
        let raw = "features:\n- chat\n# pvp is optional\n- pvp\n";
        assert_eq!(
            transcoder().encode(raw).unwrap_err(),
            MisplacedComment { line: 3 }
        );
    }

    #[test]
    fn reports_first_line_of_misplaced_block() {
        let raw = "a:\n# one\n# two\n  b: 1\n";
        assert_eq!(
            transcoder().encode(raw).unwrap_err(),
            MisplacedComment { line: 2 }
        );
    }

    #[test]
    fn accepts_comment_after_nested_block() {
        let encoded = transcoder()
            .encode("server:\n  host: a\n\n# next\nother: 1\n")
            .unwrap();
        assert_eq!(encoded.comment_count, 1);
    }

    #[test]
    fn encoded_text_parses_as_yaml() {
        let encoded = transcoder()
            .encode("# a: b - c | d\n#\n#1.5\nkey: value\n")
            .unwrap();
        let document: serde_yaml::Value = serde_yaml::from_str(&encoded.text).unwrap();
        assert_eq!(document.as_mapping().map(serde_yaml::Mapping::len), Some(4));
    }
}

mod decode {
    use super::*;

    #[test]
    fn converts_entry_to_comment() {
        let decoded = transcoder().decode("test_COMMENT_0: _SPACE_Title\nname: old\n");
        assert_eq!(decoded, "# Title\nname: old\n");
    }

    #[test]
    fn separates_new_block_from_previous_entry() {
        let decoded = transcoder().decode(
            "a: 1\ntest_COMMENT_0: _SPACE_One\ntest_COMMENT_1: _SPACE_Two\nb: 2\n",
        );
        assert_eq!(decoded, "a: 1\n\n# One\n# Two\nb: 2\n");
    }

    #[test]
    fn keeps_block_contiguous_with_following_entry() {
        let decoded = transcoder().decode("test_COMMENT_0: _SPACE_a\nkey: 1\n");
        assert!(decoded.contains("# a\nkey: 1\n"));
    }

    #[test]
    fn unquotes_single_quoted_values() {
        let transcoder = transcoder();
        assert_eq!(transcoder.decode("test_COMMENT_0: ''\n"), "#\n");
        assert_eq!(transcoder.decode("test_COMMENT_0: '123'\n"), "#123\n");
        assert_eq!(
            transcoder.decode("test_COMMENT_0: '''quoted'''\n"),
            "#'quoted'\n"
        );
    }

    #[test]
    fn unquotes_double_quoted_values() {
        let decoded = transcoder().decode("test_COMMENT_0: \"caf\\u00E9\"\n");
        assert_eq!(decoded, "#café\n");
    }

    #[test]
    fn missing_value_decodes_to_bare_marker() {
        assert_eq!(transcoder().decode("test_COMMENT_3:\n"), "#\n");
    }

    #[test]
    fn ignores_other_namespaces() {
        let text = "other_COMMENT_0: _SPACE_x\n";
        assert_eq!(transcoder().decode(text), text);
    }

    #[test]
    fn ignores_indented_lines() {
        let text = "section:\n  test_COMMENT_0: _SPACE_x\n";
        assert_eq!(transcoder().decode(text), text);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(transcoder().decode(""), "");
    }
}

mod full_cycle {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn preserves_comments_around_nested_sections() {
        let raw = "# Database\ndatabase:\n  host: localhost\n  port: 5432\n\n# Features\n# (experimental)\nfeatures:\n- a\n- b\n";
        assert_eq!(round_trip(raw), raw);
    }

    #[test]
    fn preserves_tricky_comment_bodies() {
        let raw = "#\n#123\n#[draft]\n#'q'\n# a: b | c - d\n#true\nkey: value\n";
        assert_eq!(non_blank_lines(&round_trip(raw)), non_blank_lines(raw));
    }

    #[test]
    fn drops_original_blank_line_placement_only() {
        let raw = "a: 1\n# c\n\n\nb: 2\n";
        assert_eq!(round_trip(raw), "a: 1\n\n# c\nb: 2\n");
    }

    proptest! {
        #[test]
        fn keeps_comment_key_value_order(
            triples in prop::collection::vec(
                ("[a-zA-Z0-9 ,.!?]{0,24}", "[a-z]{1,8}", "[a-z]{1,8}"),
                1..8,
            )
        ) {
            let raw: String = triples
                .iter()
                .enumerate()
                .map(|(i, (comment, key, value))| format!("#{comment}\nk{i}{key}: v{value}\n"))
                .collect();
            let decoded = round_trip(&raw);
            prop_assert_eq!(non_blank_lines(&decoded), non_blank_lines(&raw));
        }
    }
}
