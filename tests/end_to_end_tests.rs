#[cfg(test)]
mod tests {
    use html_digest::*;

    use serde_json::Value;
    use std::fs::File;
    use std::io::Read;
    use std::path::{Path, PathBuf};
    use test_generator::test_resources;

    fn fixture_path(dir: &str, file: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(dir).join(file)
    }

    fn get_file_content(path: &Path) -> String {
        let mut content = String::new();
        let mut file = File::open(path).unwrap();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn test(resource: &str) {
        let source = get_file_content(&fixture_path(resource, "source.html"));
        let expected: Value =
            serde_json::from_str(&get_file_content(&fixture_path(resource, "expected.json")))
                .unwrap();
        let result = extract(source.as_str()).unwrap();
        let actual: Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        if actual != expected {
            println!(
                "Failed: {}\nExpected: {}\nActual: {}",
                resource,
                serde_json::to_string_pretty(&expected).unwrap(),
                serde_json::to_string_pretty(&actual).unwrap()
            );
        }
        assert_eq!(actual, expected);

        let round_trip: ExtractedDocument = serde_json::from_value(actual).unwrap();
        assert_eq!(round_trip, result);
    }

    #[test_resources("tests/fixtures/*")]
    fn run(resource: &str) {
        if resource.ends_with("DS_Store") {
            return;
        }
        test(resource);
    }

    #[test]
    fn debug_this() {
        let resource = match std::env::var("HTML_DIGEST_DEBUG_RESOURCE") {
            Ok(value) => value,
            Err(_) => return,
        };
        let source = get_file_content(&fixture_path(resource.as_str(), "source.html"));
        let mut options = ExtractOptions::default();
        options.debug = true;
        let result = extract_with_options(source.as_str(), options).unwrap();
        std::fs::write("/tmp/html-digest-actual.json", result.to_json_pretty().unwrap()).unwrap();
        println!("Wrote /tmp/html-digest-actual.json");
    }

    #[test]
    fn extraction_is_deterministic() {
        let html = get_file_content(&fixture_path("tests/fixtures/article", "source.html"));
        let first = extract(&html).unwrap();
        let second = extract(&html).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn last_meta_value_wins() {
        let doc = extract(r#"<meta name="x" content="1"><meta name="x" content="2">"#).unwrap();
        assert_eq!(doc.meta.get("x").map(String::as_str), Some("2"));
        assert_eq!(doc.meta.len(), 1);
    }

    #[test]
    fn anchors_without_href_are_excluded() {
        let doc = extract(r#"<a href="/a">A</a><a>no href</a>"#).unwrap();
        assert_eq!(
            doc.links,
            vec![Link {
                text: "A".to_string(),
                href: "/a".to_string()
            }]
        );
    }

    #[test]
    fn simple_table_shape() {
        let doc =
            extract("<table><tr><th>H</th></tr><tr><td>1</td><td>2</td></tr></table>").unwrap();
        assert_eq!(doc.tables[0].headers, vec!["H"]);
        assert_eq!(doc.tables[0].rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn simple_form_shape() {
        let doc = extract(r#"<form action="/s"><input name="q"></form>"#).unwrap();
        assert_eq!(
            doc.forms,
            vec![Form {
                action: "/s".to_string(),
                method: "get".to_string(),
                inputs: vec![FormInput {
                    name: Some("q".to_string()),
                    input_type: "text".to_string()
                }],
            }]
        );
    }

    #[test]
    fn div_inclusion_rules() {
        assert!(extract("<div></div>").unwrap().divs.is_empty());
        assert_eq!(
            extract(r#"<div class="a b">x</div>"#).unwrap().divs,
            vec![TextBlock {
                class: Some(vec!["a".to_string(), "b".to_string()]),
                text: "x".to_string()
            }]
        );
    }

    #[test]
    fn surrounding_whitespace_does_not_change_trimmed_fields() {
        let tight = extract(
            r#"<title>T</title><h2>Head</h2><a href="/x">link</a><table><tr><th>h</th></tr><tr><td>c</td></tr></table><div class="k">d</div><span>s</span>"#,
        )
        .unwrap();
        let padded = extract(
            "\n\n  <title>  T \n</title>\n <h2>\n  Head  </h2>  <a href=\"/x\">  link\n</a>\n\
             <table>\n <tr> <th>  h </th> </tr>\n <tr>\n <td>\n c \n</td> </tr>\n</table>\n\
             <div class=\"k\">   d   </div>  <span>\ts\t</span>   \n",
        )
        .unwrap();
        assert_eq!(tight, padded);
    }

    #[test]
    fn deeply_nested_markup_completes() {
        let depth = 10_000;
        let html = format!(
            "{}<span class=\"leaf\">deep</span>{}",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let doc = extract(&html).unwrap();
        assert_eq!(doc.divs.len(), depth);
        assert!(doc.divs.iter().all(|d| d.text == "deep"));
        assert_eq!(doc.spans.len(), 1);
        assert_eq!(doc.text, "deep");
    }

    #[test]
    fn parallel_calls_do_not_interfere() {
        let inputs = (0..8)
            .map(|i| format!("<title>page {i}</title><h1>{i}</h1>"))
            .collect::<Vec<_>>();
        let handles = inputs
            .iter()
            .cloned()
            .map(|html| std::thread::spawn(move || extract(&html).unwrap()))
            .collect::<Vec<_>>();
        for (i, handle) in handles.into_iter().enumerate() {
            let doc = handle.join().unwrap();
            assert_eq!(doc.title, Some(format!("page {i}")));
            assert_eq!(doc.headings["h1"], vec![i.to_string()]);
        }
    }

    #[test]
    fn bytes_and_reader_agree_with_str() {
        let html = "<title>Caf\u{e9}</title><p>na\u{ef}ve</p>";
        let from_str = extract(html).unwrap();
        let from_bytes = extract_bytes(html.as_bytes(), ExtractOptions::default()).unwrap();
        let from_reader = extract_reader(html.as_bytes(), ExtractOptions::default()).unwrap();
        assert_eq!(from_str, from_bytes);
        assert_eq!(from_str, from_reader);
        assert_eq!(from_str.title.as_deref(), Some("Caf\u{e9}"));
    }

    #[test]
    fn undecodable_bytes_are_distinguishable_from_empty_results() {
        let err = extract_bytes(b"\xc3\x28", ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::Encoding(_)));
        let empty = extract_bytes(b"", ExtractOptions::default()).unwrap();
        assert_eq!(empty.title, None);
    }
}
