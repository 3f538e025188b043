use super::*;
use facet_testhelpers::test;

#[test]
fn test_parse_collects_globals_and_sections() {
    let source = "network = test\n\n[signer]\nkey = GABC\n[net \"test\"]\nhorizon = https://h.example # c\n";
    let doc = parse("stc.conf", source.as_bytes()).unwrap();
    assert_eq!(doc.get_global("network"), Some("test"));
    assert_eq!(doc.get_path("signer.key"), Some("GABC"));
    assert_eq!(doc.get_path("net.test.horizon"), Some("https://h.example"));
}

#[test]
fn test_parse_reports_every_error() {
    let errors = parse("stc.conf", b"[a\nk = \"x\n= 1\n").unwrap_err();
    let lines: Vec<_> = errors.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert!(errors.iter().all(|d| d.file.as_deref() == Some("stc.conf")));
}

#[test]
fn test_written_document_parses_back() {
    let source = "top = \" x\"\n[a]\nk = \"v;w\"\nflag\n[A]\nk = 2\n[net \"q\\\"s\"]\nv = a\\\\b\\n\n";
    let doc = parse("", source.as_bytes()).unwrap();
    let again = parse("", doc.to_ini_string().as_bytes()).unwrap();
    assert_eq!(doc, again);
    assert_eq!(again.get_all("a", None, "k"), vec!["v;w", "2"]);
}

#[test]
fn test_parse_file() {
    let path = std::env::temp_dir().join(format!("stc-ini-tree-{}.ini", std::process::id()));
    std::fs::write(&path, "[core]\nname = value\n").unwrap();
    let doc = parse_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(doc.get("core", None, "name"), Some("value"));

    let err = parse_file(&path).unwrap_err();
    assert!(matches!(err, ParseFileError::Io(_)));
}

#[test]
fn test_parse_file_names_diagnostics() {
    let path = std::env::temp_dir().join(format!("stc-ini-tree-bad-{}.ini", std::process::id()));
    std::fs::write(&path, "!\n").unwrap();
    let err = parse_file(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();
    let diagnostics = err.diagnostics().unwrap();
    assert_eq!(
        diagnostics.as_slice()[0].file.as_deref(),
        Some(path.display().to_string().as_str())
    );
}

mod props {
    use crate::{Document, Entry, Section, parse};
    use proptest::prelude::*;

    fn key() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9-]{0,6}"
    }

    fn text(chars: &'static [char], max: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(chars), 0..max)
            .prop_map(|chars| chars.into_iter().collect())
    }

    const VALUE_CHARS: &[char] = &[
        'a', 'Z', '0', '.', '=', '/', ' ', '\t', '#', ';', '"', '\\', '\n', '\u{8}', 'é',
    ];
    const SUBSECTION_CHARS: &[char] = &['a', '.', ' ', '\t', '#', ']', '"', '\\', 'é'];

    fn entries() -> impl Strategy<Value = Vec<Entry>> {
        prop::collection::vec(
            (key(), text(VALUE_CHARS, 10)).prop_map(|(k, v)| Entry::new(k, v)),
            0..4,
        )
    }

    fn document() -> impl Strategy<Value = Document> {
        let block = (key(), prop::option::of(text(SUBSECTION_CHARS, 6)), entries());
        (entries(), prop::collection::vec(block, 0..4)).prop_map(|(globals, blocks)| {
            let mut doc = Document::new();
            doc.globals = globals;
            for (name, sub, entries) in blocks {
                let header = match sub {
                    Some(sub) => Section::with_subsection(name, sub),
                    None => Section::new(name),
                };
                doc.section_mut(&header).entries.extend(entries);
            }
            doc
        })
    }

    proptest! {
        #[test]
        fn written_documents_parse_back(doc in document()) {
            let text = doc.to_ini_string();
            let again = parse("", text.as_bytes());
            prop_assert_eq!(again, Ok(doc), "text was {:?}", text);
        }
    }
}
