use pretty_assertions::assert_eq;
use watch_core::{LinkExtractor, LinkFilter};

const THUMB: &str = "https://mavanimes.co/wp-content/uploads/2024/05/thumb.jpg";

fn init_logging() {
    watch_logging::initialize_for_tests();
}

fn page(body: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>t</title></head><body>{body}</body></html>")
}

fn item(href: &str) -> String {
    format!(r#"<a href="{href}"><img src="{THUMB}" alt=""></a>"#)
}

fn extract(body: &str) -> Vec<String> {
    init_logging();
    LinkExtractor::default().extract_from_html(&page(body))
}

#[test]
fn qualifying_anchor_is_extracted() {
    let links = extract(&item("https://mavanimes.co/one-piece-1100-vostfr/"));
    assert_eq!(links, vec!["https://mavanimes.co/one-piece-1100-vostfr/"]);
}

#[test]
fn page_without_items_yields_nothing() {
    let links = extract(r#"<p>Nothing here</p><a href="https://mavanimes.co/">home</a>"#);
    assert!(links.is_empty());
}

#[test]
fn output_follows_document_order() {
    let body = format!(
        "<div>{}</div><ul><li>{}</li><li>{}</li></ul>",
        item("https://mavanimes.co/c/"),
        item("https://mavanimes.co/a/"),
        item("https://mavanimes.co/b/"),
    );
    assert_eq!(
        extract(&body),
        vec![
            "https://mavanimes.co/c/",
            "https://mavanimes.co/a/",
            "https://mavanimes.co/b/",
        ]
    );
}

#[test]
fn duplicates_are_kept() {
    let body = format!("{}{}", item("https://mavanimes.co/a/"), item("https://mavanimes.co/a/"));
    assert_eq!(extract(&body).len(), 2);
}

#[test]
fn anchor_without_href_is_skipped() {
    let body = format!(r#"<a><img src="{THUMB}"></a>"#);
    assert!(extract(&body).is_empty());
}

#[test]
fn anchor_with_empty_href_is_skipped() {
    let body = format!(r#"<a href=""><img src="{THUMB}"></a>"#);
    assert!(extract(&body).is_empty());
}

#[test]
fn anchor_with_class_is_skipped() {
    let body = format!(r#"<a class="menu-link" href="https://mavanimes.co/a/"><img src="{THUMB}"></a>"#);
    assert!(extract(&body).is_empty());
}

#[test]
fn anchor_with_empty_class_attribute_is_kept() {
    let body = format!(r#"<a class="" href="https://mavanimes.co/a/"><img src="{THUMB}"></a>"#);
    assert_eq!(extract(&body), vec!["https://mavanimes.co/a/"]);
}

#[test]
fn text_only_anchor_is_skipped() {
    let body = r#"<a href="https://mavanimes.co/a/">https://mavanimes.co/wp-content/uploads/x.jpg</a>"#;
    assert!(extract(body).is_empty());
}

#[test]
fn anchor_without_image_is_skipped() {
    let body = r#"<a href="https://mavanimes.co/a/"><span>Episode 1</span></a>"#;
    assert!(extract(body).is_empty());
}

#[test]
fn anchor_with_two_images_is_skipped() {
    let body = format!(
        r#"<a href="https://mavanimes.co/a/"><img src="{THUMB}"><img src="{THUMB}"></a>"#
    );
    assert!(extract(&body).is_empty());
}

#[test]
fn nested_single_image_counts() {
    let body = format!(
        r#"<a href="https://mavanimes.co/a/"><div><span><img src="{THUMB}"></span></div></a>"#
    );
    assert_eq!(extract(&body), vec!["https://mavanimes.co/a/"]);
}

#[test]
fn image_without_src_is_skipped() {
    let body = r#"<a href="https://mavanimes.co/a/"><img alt="x"></a>"#;
    assert!(extract(body).is_empty());
}

#[test]
fn image_outside_upload_path_is_skipped() {
    let body = r#"<a href="https://mavanimes.co/a/"><img src="https://cdn.example.com/wp-content/uploads/a.jpg"></a>"#;
    assert!(extract(body).is_empty());
}

#[test]
fn offsite_href_is_skipped() {
    let body = format!(r#"<a href="https://example.com/a/"><img src="{THUMB}"></a>"#);
    assert!(extract(&body).is_empty());
}

#[test]
fn href_is_returned_verbatim() {
    let body = format!(r#"<a href="//mavanimes.co/a/?x=1"><img src="{THUMB}"></a>"#);
    assert_eq!(extract(&body), vec!["//mavanimes.co/a/?x=1"]);
}

#[test]
fn custom_filter_markers_are_honoured() {
    init_logging();
    let extractor = LinkExtractor::new(LinkFilter {
        site_marker: "example.org".to_string(),
        thumbnail_marker: "example.org/media/".to_string(),
    });
    let html = page(
        r#"<a href="https://example.org/show/"><img src="https://example.org/media/s.png"></a>
           <a href="https://mavanimes.co/a/"><img src="https://mavanimes.co/wp-content/uploads/a.jpg"></a>"#,
    );
    assert_eq!(extractor.extract_from_html(&html), vec!["https://example.org/show/"]);
}
