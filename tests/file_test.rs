//! File and byte input APIs.

use std::io::Write;

use richtex::render::RenderOptions;
use richtex::Error;
use tempfile::NamedTempFile;

fn temp_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_render_file_with_options() {
    let file = temp_file(b"first\\nsecond\r\nthird");
    let options = RenderOptions::new().with_line_break("<br>");
    let html = richtex::render_file_with_options(file.path(), &options).unwrap();
    assert_eq!(html, "first<br>second<br>third");
}

#[test]
fn test_render_file_rejects_invalid_utf8() {
    let file = temp_file(&[b'a', 0xC3, 0x28]);
    let result = richtex::render_file(file.path());
    assert!(matches!(result, Err(Error::Encoding(_))));
}

#[test]
fn test_render_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = richtex::render_file(dir.path().join("missing.txt"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_render_batch_matches_sequential() {
    let inputs: Vec<String> = (0..16)
        .map(|i| format!("Item {}\\n\\begin{{center}}row {}\\end{{center}}", i, i))
        .collect();
    let options = RenderOptions::new().with_math(false);

    let batch = richtex::render_batch(&inputs, &options);
    let sequential: Vec<String> = inputs
        .iter()
        .map(|text| richtex::render_with_options(text, &options))
        .collect();

    assert_eq!(batch, sequential);
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_render_file_async() {
    let file = temp_file(b"a\nb");
    let options = RenderOptions::new().with_line_break("|");
    let html = richtex::render_file_async(file.path(), &options).await.unwrap();
    assert_eq!(html, "a|b");
}
